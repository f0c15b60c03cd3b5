//! Retry with exponential back-off and jitter for page and document fetches.
//!
//! [`retry_with_backoff`] wraps any fallible async fetch and retries on
//! transient errors (network failures, 5xx). Everything else is returned
//! on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** [`ScraperError::Http`] (connect, timeout, reset, body read)
/// and [`ScraperError::ServerStatus`].
///
/// **Not retriable:** 4xx responses, invalid URLs and structural parse
/// failures; a second attempt would see the same result.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(_) | ScraperError::ServerStatus { .. } => true,
        ScraperError::NotFound { .. }
        | ScraperError::UnexpectedStatus { .. }
        | ScraperError::InvalidUrl { .. }
        | ScraperError::MarkerLinkMissing { .. } => false,
    }
}

/// Back-off before retry number `attempt` (1-based), without jitter.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    backoff_base_ms
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Retry | Sleep before it              |
/// |-------|------------------------------|
/// | 1     | 500 ms × 2⁰ ± 25 % jitter    |
/// | 2     | 500 ms × 2¹ ± 25 % jitter    |
/// | 3     | 500 ms × 2² ± 25 % jitter    |
///
/// Delay is capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(backoff_base_ms, attempt);
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
                    "transient fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
