//! Retry and backoff policy for PrusaLink requests.
//!
//! Raw failures (`RequestError`) are classified into a stable message and a
//! retry verdict (`ClassifiedError`). `run_with_retry` drives an async
//! operation through exponential backoff using that verdict.

mod cancel;
mod classify;
mod error;
mod policy;
mod run;

pub use cancel::CancelToken;
pub use classify::{
    classify, classify_http_status, Retryable, MSG_INVALID, MSG_NETWORK, MSG_NOT_FOUND,
    MSG_OFFLINE, MSG_SERVER, MSG_THROTTLED, MSG_UNAUTHORIZED,
};
pub use error::{ClassifiedError, RequestError, RetryHalt};
pub use policy::RetryPolicy;
pub use run::{run_with_retry, run_with_retry_cancellable};
