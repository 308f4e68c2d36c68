//! CLI for prusactl.

mod commands;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use prusa_core::client::{PrinterClient, PrusaError};
use prusa_core::config::{self, PrusaConfig};
use prusa_core::format::{self, JobAction};
use prusa_core::retry::CancelToken;
use std::time::Duration;

use commands::{run_completions, run_info, run_job_action, run_man, run_status};

/// Top-level CLI for prusactl.
#[derive(Debug, Parser)]
#[command(name = "prusactl")]
#[command(about = "prusactl: monitor and control Prusa printers over PrusaLink", long_about = None)]
pub struct Cli {
    /// Printer IP or host name (overrides config).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// PrusaLink API key (overrides config).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show printer state, job progress and temperatures.
    Status {
        /// Keep polling until the printer is idle.
        #[arg(long)]
        watch: bool,
        /// Seconds between polls with --watch.
        #[arg(long, default_value = "5", value_name = "SECS")]
        interval: u64,
    },

    /// Show printer model, name and serial.
    Info,

    /// Pause the current print.
    Pause,

    /// Resume the paused print.
    Resume,

    /// Cancel the current print. Cannot be undone.
    Cancel {
        /// Confirm cancellation.
        #[arg(long)]
        yes: bool,
    },

    /// Print the path of the config file.
    ConfigPath,

    /// Generate shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Generate a man page.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::ConfigPath => {
                println!("{}", config::config_path()?.display());
                return Ok(());
            }
            CliCommand::Completions { shell } => return run_completions(shell, Cli::command()),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        apply_overrides(&mut cfg, cli.host, cli.api_key);
        tracing::debug!(host = %cfg.printer.host, retry = ?cfg.retry, "loaded config");

        let client = PrinterClient::new(&cfg.printer, cfg.retry_policy()).with_context(|| {
            format!(
                "printer not configured; edit {} or pass --host/--api-key",
                config::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            )
        })?;
        let cancel = CancelToken::new();
        spawn_ctrl_c(cancel.clone());
        let client = client.with_cancel(cancel);

        let res = match cli.command {
            CliCommand::Status { watch, interval } => {
                run_status(&client, watch, Duration::from_secs(interval.max(1))).await
            }
            CliCommand::Info => run_info(&client).await,
            CliCommand::Pause => run_job_action(&client, JobAction::Pause, true).await,
            CliCommand::Resume => run_job_action(&client, JobAction::Resume, true).await,
            CliCommand::Cancel { yes } => run_job_action(&client, JobAction::Cancel, yes).await,
            CliCommand::ConfigPath | CliCommand::Completions { .. } | CliCommand::Man => Ok(()),
        };
        res.map_err(|e| anyhow::anyhow!(describe_failure(&e, &cfg.printer.host)))
    }
}

fn apply_overrides(cfg: &mut PrusaConfig, host: Option<String>, api_key: Option<String>) {
    if let Some(host) = host {
        cfg.printer.host = host;
    }
    if let Some(key) = api_key {
        cfg.printer.api_key = key;
    }
}

fn spawn_ctrl_c(token: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted; cancelling pending requests");
            token.cancel();
        }
    });
}

/// User-facing text for a failed command. Network failures get troubleshooting steps.
pub(crate) fn describe_failure(err: &anyhow::Error, host: &str) -> String {
    match err.downcast_ref::<PrusaError>() {
        Some(e) if e.is_network() => format!("{e}\n\n{}", format::troubleshooting(host)),
        Some(e) => e.to_string(),
        None => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests;
