//! Retry with exponential back-off and jitter for the `YouTube` client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, HTTP 429 and 5xx). Quota and
//! permission errors come back as 403 and are never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::CommentsError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - [`CommentsError::Api`] with status 429 or 5xx.
///
/// **Not retriable:** every other API status (403 quota exceeded, 404 video
/// not found, 400 bad request), malformed bodies, and local errors.
pub(crate) fn is_retriable(err: &CommentsError) -> bool {
    match err {
        CommentsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        CommentsError::Api { status, .. } => *status == 429 || *status >= 500,
        CommentsError::Deserialize { .. }
        | CommentsError::InvalidVideoUrl { .. }
        | CommentsError::InvalidBaseUrl { .. }
        | CommentsError::PaginationLimit { .. }
        | CommentsError::Io { .. }
        | CommentsError::FileFormat { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms × 2^(n-1)` ± 25 % jitter, capped
/// at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CommentsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CommentsError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "YouTube transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
