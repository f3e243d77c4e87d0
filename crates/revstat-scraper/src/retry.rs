//! Fixed-delay retry for review-page fetches.
//!
//! Transient network failures are expected when hammering review pages, so
//! [`retry_fixed_delay`] re-attempts the fetch a bounded number of times
//! with a constant inter-attempt delay. Non-network failures (4xx statuses,
//! body decode errors) are propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after the fixed delay.
///
/// Retriable:
/// - [`ScrapeError::Http`] with a timeout or connection-level failure
///   (includes DNS resolution errors).
/// - [`ScrapeError::UnexpectedStatus`] with a 5xx status.
///
/// Not retriable: 4xx statuses and body decode failures — retrying returns
/// the same result.
fn is_retriable(err: &ScrapeError) -> bool {
    match err {
        ScrapeError::Http(e) => e.is_timeout() || e.is_connect(),
        ScrapeError::UnexpectedStatus { status, .. } => (500..600).contains(status),
    }
}

/// Executes `operation` up to `max_attempts` times, sleeping `delay_secs`
/// between attempts on transient errors.
///
/// `max_attempts` counts every attempt including the first, so a run that
/// succeeds on attempt N has slept N−1 times. The operation always runs at
/// least once. Non-retriable errors and an exhausted budget both surface
/// the last error.
pub(crate) async fn retry_fixed_delay<T, F, Fut>(
    max_attempts: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
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
                    "transient fetch error — retrying after delay"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> ScrapeError {
        ScrapeError::UnexpectedStatus {
            status: 503,
            url: "https://example.com/reviews".to_owned(),
        }
    }

    fn not_found() -> ScrapeError {
        ScrapeError::UnexpectedStatus {
            status: 404,
            url: "https://example.com/reviews".to_owned(),
        }
    }

    #[test]
    fn server_error_is_retriable() {
        assert!(is_retriable(&server_error()));
    }

    #[test]
    fn client_error_is_not_retriable() {
        assert!(!is_retriable(&not_found()));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(10, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ScrapeError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_when_a_later_attempt_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(10, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 4 {
                    Err(server_error())
                } else {
                    Ok::<u32, ScrapeError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(
            calls.load(Ordering::SeqCst),
            4,
            "three failures then one success"
        );
    }

    #[tokio::test]
    async fn stops_after_exhausting_the_attempt_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScrapeError>(server_error())
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "max_attempts bounds total attempts, not retries"
        );
        assert!(matches!(
            result,
            Err(ScrapeError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_non_retriable_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(10, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScrapeError>(not_found())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(ScrapeError::UnexpectedStatus { status: 404, .. })
        ));
    }
}
