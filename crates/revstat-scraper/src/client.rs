//! HTTP client for review-summary pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;
use crate::retry::retry_fixed_delay;

/// HTTP client for downloading review-summary pages.
///
/// Applies a fixed per-attempt timeout and retries transient failures
/// (connect/timeout/DNS errors, 5xx) up to `max_attempts` total attempts
/// with a constant `retry_delay_secs` between them. This is the only retry
/// layer around the fetch — callers must not wrap it in another one.
pub struct ReviewPageClient {
    client: Client,
    max_attempts: u32,
    retry_delay_secs: u64,
}

impl ReviewPageClient {
    /// Creates a `ReviewPageClient` with configured timeout, `User-Agent`,
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_attempts,
            retry_delay_secs,
        })
    }

    /// Downloads the page at `url` and returns its body text.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — non-2xx response; 5xx are
    ///   retried before surfacing, 4xx fail immediately.
    /// - [`ScrapeError::Http`] — network failure after all attempts are
    ///   exhausted, or a body decode failure (not retried).
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        retry_fixed_delay(self.max_attempts, self.retry_delay_secs, || async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response.text().await?)
        })
        .await
    }
}
