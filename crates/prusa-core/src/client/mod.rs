//! PrusaLink client.
//!
//! Every call is a single HTTP request wrapped in [`run_with_retry`]: transport
//! failures, 429 and 5xx are retried with backoff, everything else surfaces at once.

mod http;
mod types;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::PrinterConfig;
use crate::retry::{
    classify, run_with_retry, run_with_retry_cancellable, CancelToken, ClassifiedError,
    RetryHalt, RetryPolicy, Retryable, MSG_INVALID,
};

pub use http::Method;
pub use types::{JobStatus, PrinterInfo, PrinterStatus, PrinterTelemetry};

pub const STATUS_PATH: &str = "/api/v1/status";
pub const INFO_PATH: &str = "/api/v1/info";

/// Error returned by [`PrinterClient`] calls.
#[derive(Debug, Error)]
pub enum PrusaError {
    /// The request failed; see the classified message.
    #[error(transparent)]
    Api(#[from] ClassifiedError),
    /// The printer answered 2xx with a body we could not parse.
    #[error("{}", MSG_INVALID)]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Halted(#[from] RetryHalt),
    /// The blocking request task panicked or was aborted.
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PrusaError {
    /// The classified form, when the failure came from the request itself.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            PrusaError::Api(c) => Some(c),
            _ => None,
        }
    }

    /// True when no HTTP response was received.
    pub fn is_network(&self) -> bool {
        self.classified().is_some_and(ClassifiedError::is_network)
    }
}

impl Retryable for PrusaError {
    fn is_retryable(&self) -> bool {
        match self {
            PrusaError::Api(c) => c.is_retryable(),
            PrusaError::Decode { .. } | PrusaError::Halted(_) | PrusaError::Task(_) => false,
        }
    }
}

/// Client for one printer. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PrinterClient {
    base: url::Url,
    api_key: String,
    timeout: Duration,
    policy: RetryPolicy,
    cancel: Option<CancelToken>,
}

impl PrinterClient {
    pub fn new(cfg: &PrinterConfig, policy: RetryPolicy) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            base: base_url(&cfg.host)?,
            api_key: cfg.api_key.clone(),
            timeout: cfg.request_timeout(),
            policy,
            cancel: None,
        })
    }

    /// Abort in-flight retries when `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn status(&self) -> Result<PrinterStatus, PrusaError> {
        self.get_json(STATUS_PATH).await
    }

    pub async fn info(&self) -> Result<PrinterInfo, PrusaError> {
        self.get_json(INFO_PATH).await
    }

    pub async fn pause_job(&self, job_id: u64) -> Result<(), PrusaError> {
        self.send(Method::Put, &format!("/api/v1/job/{job_id}/pause"))
            .await
            .map(drop)
    }

    pub async fn resume_job(&self, job_id: u64) -> Result<(), PrusaError> {
        self.send(Method::Put, &format!("/api/v1/job/{job_id}/resume"))
            .await
            .map(drop)
    }

    pub async fn cancel_job(&self, job_id: u64) -> Result<(), PrusaError> {
        self.send(Method::Delete, &format!("/api/v1/job/{job_id}"))
            .await
            .map(drop)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PrusaError> {
        let body = self.send(Method::Get, path).await?;
        serde_json::from_slice(&body).map_err(|source| PrusaError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    /// Send one request with retries; returns the response body.
    async fn send(&self, method: Method, path: &str) -> Result<Vec<u8>, PrusaError> {
        let req = http::Request {
            method,
            url: self.join(path),
            endpoint: path.to_string(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
            cancel: self.cancel.clone(),
        };
        let attempt = || {
            let req = req.clone();
            async move {
                let res = tokio::task::spawn_blocking(move || http::perform(&req)).await?;
                res.map_err(|e| PrusaError::Api(classify(&e)))
            }
        };
        match &self.cancel {
            Some(token) => run_with_retry_cancellable(&self.policy, token, attempt).await,
            None => run_with_retry(&self.policy, attempt).await,
        }
    }

    fn join(&self, path: &str) -> String {
        // `base` always ends with '/', path always starts with one.
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }
}

/// `http://<host>/` for a bare host or IP; hosts with a scheme are kept as-is.
fn base_url(host: &str) -> Result<url::Url> {
    let host = host.trim();
    let raw = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    let mut url = url::Url::parse(&raw).with_context(|| format!("invalid printer host: {host}"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
