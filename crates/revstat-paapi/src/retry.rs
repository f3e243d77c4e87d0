//! Fixed-delay retry for product API lookups.
//!
//! [`retry_fixed_delay`] wraps a fallible async operation and retries on
//! transient errors (network failures, 5xx). Authentication errors —
//! [`PaapiError::InvalidAccessKey`] and [`PaapiError::InvalidSignature`] —
//! and other application-level errors are returned immediately without any
//! retry; retrying a rejected credential cannot succeed.

use std::future::Future;
use std::time::Duration;

use crate::error::PaapiError;

/// Returns `true` for errors that are worth retrying after the fixed delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset, DNS failure.
/// - HTTP 5xx responses: transient server/infrastructure errors.
///
/// **Not retriable (hard stop):**
/// - [`PaapiError::InvalidAccessKey`] / [`PaapiError::InvalidSignature`] —
///   credential misconfiguration; retrying won't fix it.
/// - [`PaapiError::Api`] — application-level error; retrying won't fix it.
/// - [`PaapiError::Xml`] — malformed response; retrying won't fix it.
/// - [`PaapiError::UnexpectedStatus`] with a 4xx status.
pub(crate) fn is_retriable(err: &PaapiError) -> bool {
    match err {
        PaapiError::Http(e) => e.is_timeout() || e.is_connect(),
        PaapiError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        PaapiError::InvalidAccessKey { .. }
        | PaapiError::InvalidSignature { .. }
        | PaapiError::Api { .. }
        | PaapiError::Xml { .. }
        | PaapiError::InvalidEndpoint { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times, sleeping `delay_secs`
/// between attempts on transient errors.
///
/// `max_attempts` counts every attempt including the first; the operation
/// always runs at least once. N attempts produce at most N−1 sleeps.
/// Non-retriable errors are returned immediately.
pub(crate) async fn retry_fixed_delay<T, F, Fut>(
    max_attempts: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, PaapiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PaapiError>>,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs,
                    error = %err,
                    "transient product API error — retrying after delay"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
