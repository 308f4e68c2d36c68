//! Classify HTTP status and curl failures into user-facing messages and retry verdicts.

use super::error::{ClassifiedError, RequestError, RetryHalt};

pub const MSG_NETWORK: &str = "Network error. Please check your connection.";
pub const MSG_UNAUTHORIZED: &str = "Invalid API key. Please check your credentials.";
pub const MSG_NOT_FOUND: &str = "Resource not found on printer.";
pub const MSG_THROTTLED: &str = "Too many requests. Please try again later.";
pub const MSG_OFFLINE: &str = "Printer is offline. Please check the connection.";
pub const MSG_SERVER: &str = "Printer server error. Please check printer status.";
pub const MSG_INVALID: &str = "Invalid response from printer. Please try again.";

/// Something the retry loop can ask "should I try again?".
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Message and retry verdict for an HTTP status code.
pub fn classify_http_status(status: u32) -> (&'static str, bool) {
    match status {
        401 => (MSG_UNAUTHORIZED, false),
        404 => (MSG_NOT_FOUND, false),
        429 => (MSG_THROTTLED, true),
        503 => (MSG_OFFLINE, true),
        500..=u32::MAX => (MSG_SERVER, true),
        _ => (MSG_INVALID, false),
    }
}

/// Classify a raw request failure.
pub fn classify(e: &RequestError) -> ClassifiedError {
    match e {
        RequestError::Transport { endpoint, .. } => ClassifiedError {
            message: MSG_NETWORK.to_string(),
            status_code: None,
            retryable: true,
            endpoint: Some(endpoint.clone()),
        },
        RequestError::Http { status, endpoint } => {
            let (message, retryable) = classify_http_status(*status);
            ClassifiedError {
                message: message.to_string(),
                status_code: Some(*status),
                retryable,
                endpoint: Some(endpoint.clone()),
            }
        }
    }
}

impl Retryable for ClassifiedError {
    fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl Retryable for RequestError {
    fn is_retryable(&self) -> bool {
        classify(self).retryable
    }
}

impl Retryable for RetryHalt {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Unknown error shapes fail open toward retrying; known ones keep their verdict.
impl Retryable for anyhow::Error {
    fn is_retryable(&self) -> bool {
        if let Some(c) = self.downcast_ref::<ClassifiedError>() {
            return c.retryable;
        }
        if let Some(r) = self.downcast_ref::<RequestError>() {
            return r.is_retryable();
        }
        if let Some(h) = self.downcast_ref::<RetryHalt>() {
            return h.is_retryable();
        }
        if let Some(p) = self.downcast_ref::<crate::client::PrusaError>() {
            return p.is_retryable();
        }
        true
    }
}
