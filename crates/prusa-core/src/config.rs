use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters (optional `[retry]` section in config.toml).
///
/// `max_retries` is the total number of attempts, the first one included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Ceiling on the backoff delay, in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_retry_delay_ms: 1000,
            max_retry_delay_ms: 8000,
        }
    }
}

impl RetryConfig {
    /// Every field must be positive; a zero delay would never grow.
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            bail!("retry.max_retries must be positive");
        }
        if self.initial_retry_delay_ms == 0 {
            bail!("retry.initial_retry_delay_ms must be positive");
        }
        if self.max_retry_delay_ms == 0 {
            bail!("retry.max_retry_delay_ms must be positive");
        }
        Ok(())
    }
}

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where the printer lives and how to authenticate against PrusaLink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Printer IP address or host name, optionally with scheme and port.
    pub host: String,
    /// PrusaLink API key, sent as `X-Api-Key`.
    pub api_key: String,
    /// Per-request timeout in seconds (None = 10s).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl PrinterConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Reject configs that cannot reach a printer.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("printer host is not configured");
        }
        if self.api_key.trim().is_empty() {
            bail!("printer API key is not configured");
        }
        if self.request_timeout_secs == Some(0) {
            bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/prusactl/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrusaConfig {
    #[serde(default)]
    pub printer: PrinterConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl PrusaConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("prusactl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PrusaConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<PrusaConfig> {
    if !path.exists() {
        let default_cfg = PrusaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PrusaConfig = toml::from_str(&data)?;
    if let Some(retry) = &cfg.retry {
        retry
            .validate()
            .with_context(|| format!("invalid [retry] section in {}", path.display()))?;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PrusaConfig::default();
        assert!(cfg.printer.host.is_empty());
        assert!(cfg.retry.is_none());
        assert_eq!(cfg.retry_policy(), RetryPolicy::default());
        assert_eq!(cfg.printer.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = PrusaConfig::default();
        cfg.printer.host = "192.168.1.50".to_string();
        cfg.printer.api_key = "secret".to_string();
        cfg.retry = Some(RetryConfig::default());
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PrusaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_retry_section() {
        let toml = r#"
            [printer]
            host = "mk4.local"
            api_key = "abc"
            request_timeout_secs = 3

            [retry]
            max_retries = 5
        "#;
        let cfg: PrusaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.printer.host, "mk4.local");
        assert_eq!(cfg.printer.request_timeout(), Duration::from_secs(3));
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_retries, 5);
        assert_eq!(retry.initial_retry_delay_ms, 1000);
        assert_eq!(retry.max_retry_delay_ms, 8000);
        assert_eq!(cfg.retry_policy().max_retries, 5);
    }

    #[test]
    fn validate_requires_host_and_key() {
        let mut p = PrinterConfig::default();
        assert!(p.validate().is_err());
        p.host = "10.0.0.2".to_string();
        assert!(p.validate().is_err());
        p.api_key = "k".to_string();
        assert!(p.validate().is_ok());
        p.request_timeout_secs = Some(0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first, PrusaConfig::default());

        fs::write(
            &path,
            "[printer]\nhost = \"printer.lan\"\napi_key = \"xyz\"\n",
        )
        .unwrap();
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(second.printer.host, "printer.lan");
        assert_eq!(second.printer.api_key, "xyz");
    }

    #[test]
    fn retry_config_rejects_zero_fields() {
        assert!(RetryConfig::default().validate().is_ok());

        let zero_attempts = RetryConfig {
            max_retries: 0,
            ..Default::default()
        };
        let err = zero_attempts.validate().unwrap_err();
        assert!(err.to_string().contains("max_retries"));

        let zero_initial = RetryConfig {
            initial_retry_delay_ms: 0,
            ..Default::default()
        };
        let err = zero_initial.validate().unwrap_err();
        assert!(err.to_string().contains("initial_retry_delay_ms"));

        let zero_max = RetryConfig {
            max_retry_delay_ms: 0,
            ..Default::default()
        };
        let err = zero_max.validate().unwrap_err();
        assert!(err.to_string().contains("max_retry_delay_ms"));
    }

    #[test]
    fn load_rejects_zero_initial_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let toml = r#"
            [printer]
            host = "mk4.local"
            api_key = "abc"

            [retry]
            initial_retry_delay_ms = 0
        "#;
        fs::write(&path, toml).unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{err:#}").contains("initial_retry_delay_ms must be positive"));
    }
}
