//! Retry loop: run an async operation until success, a non-retryable error, or exhaustion.

use std::fmt;
use std::future::Future;

use super::cancel::CancelToken;
use super::classify::Retryable;
use super::error::RetryHalt;
use super::policy::RetryPolicy;

/// Runs `op` up to `policy.max_retries` times in total.
///
/// A non-retryable error is returned at once. A retryable one is followed by a
/// non-blocking sleep, after which the delay doubles (capped). When every
/// attempt fails the last error is returned; with zero attempts the loop
/// yields `RetryHalt::NoAttempts`.
pub async fn run_with_retry<T, E, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + From<RetryHalt> + fmt::Display,
{
    run(policy, None, op).await
}

/// Like [`run_with_retry`], but `cancel` aborts the in-flight attempt or the
/// backoff sleep with `RetryHalt::Cancelled`. Cancellation is not classified.
pub async fn run_with_retry_cancellable<T, E, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + From<RetryHalt> + fmt::Display,
{
    run(policy, Some(cancel), op).await
}

async fn run<T, E, F, Fut>(
    policy: &RetryPolicy,
    cancel: Option<&CancelToken>,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + From<RetryHalt> + fmt::Display,
{
    let mut delay = policy.first_delay();
    let mut last_error: Option<E> = None;

    for attempt in 0..policy.max_retries {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(RetryHalt::Cancelled.into());
        }
        let e = match until_cancelled(cancel, op()).await? {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        if !e.is_retryable() {
            tracing::debug!(attempt = attempt + 1, error = %e, "not retryable");
            return Err(e);
        }
        if attempt + 1 < policy.max_retries {
            tracing::debug!(
                attempt = attempt + 1,
                max = policy.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %e,
                "retrying after backoff"
            );
            until_cancelled(cancel, tokio::time::sleep(delay)).await?;
            delay = policy.next_delay(delay);
        }
        last_error = Some(e);
    }

    match last_error {
        Some(e) => {
            tracing::debug!(attempts = policy.max_retries, error = %e, "retries exhausted");
            Err(e)
        }
        None => Err(RetryHalt::NoAttempts.into()),
    }
}

async fn until_cancelled<O>(
    cancel: Option<&CancelToken>,
    fut: impl Future<Output = O>,
) -> Result<O, RetryHalt> {
    match cancel {
        None => Ok(fut.await),
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(RetryHalt::Cancelled),
            out = fut => Ok(out),
        },
    }
}
