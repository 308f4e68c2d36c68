//! Cancellation signal for a retry sequence.
//!
//! Clones share one token. Cancelling wakes any retry loop waiting on it,
//! whether it is inside an attempt or a backoff sleep, and is visible to
//! blocking curl transfers through [`CancelToken::is_cancelled`].

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct CancelToken(CancellationToken);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Resolves once `cancel` has been called (immediately if it already was).
    pub async fn cancelled(&self) {
        self.0.cancelled().await
    }
}
