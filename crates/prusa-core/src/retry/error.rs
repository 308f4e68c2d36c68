//! Raw request failures and the classified form handed to callers.

use std::fmt;
use thiserror::Error;

/// Failure of a single PrusaLink request, before classification.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No HTTP response was received (connect refused, DNS, timeout, reset).
    #[error("{endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: curl::Error,
    },
    /// The printer answered with a non-2xx status.
    #[error("{endpoint}: HTTP {status}")]
    Http { status: u32, endpoint: String },
}

impl RequestError {
    pub fn endpoint(&self) -> &str {
        match self {
            RequestError::Transport { endpoint, .. } | RequestError::Http { endpoint, .. } => {
                endpoint
            }
        }
    }

    pub fn status(&self) -> Option<u32> {
        match self {
            RequestError::Transport { .. } => None,
            RequestError::Http { status, .. } => Some(*status),
        }
    }
}

/// A request failure with a stable user-facing message and a retry verdict.
///
/// Built at the moment a request fails; lives for one retry sequence at most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub message: String,
    /// Absent for network-level failures.
    pub status_code: Option<u32>,
    pub retryable: bool,
    pub endpoint: Option<String>,
}

impl ClassifiedError {
    pub fn new(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            retryable,
            endpoint: None,
        }
    }

    /// True when no HTTP response was received.
    pub fn is_network(&self) -> bool {
        self.status_code.is_none()
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClassifiedError {}

/// Why a retry loop stopped without an operation error of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RetryHalt {
    #[error("operation cancelled")]
    Cancelled,
    /// The loop ran zero attempts (`max_retries == 0`).
    #[error("all retries failed without an error")]
    NoAttempts,
}

impl From<RetryHalt> for ClassifiedError {
    fn from(halt: RetryHalt) -> Self {
        ClassifiedError::new(halt.to_string(), false)
    }
}
