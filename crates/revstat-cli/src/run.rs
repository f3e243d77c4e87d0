//! The sequential driver loop.
//!
//! Each identifier walks resolve → fetch → extract → record; a failure at
//! any step is logged with the identifier and stage name and the loop moves
//! on to the next identifier. The per-step clients own all retrying — this
//! loop never re-attempts an identifier.

use std::time::Duration;

use revstat_core::{AppConfig, ReviewRecord};
use revstat_paapi::{PaapiClient, PaapiError};
use revstat_scraper::{ReviewDocument, ReviewPageClient};

/// Collects review statistics for `asins`, in input order.
///
/// A fixed pacing delay precedes every lookup call to throttle the
/// upstream API. Identifiers that fail resolution or fetch produce no
/// record; identifiers whose page was fetched are always recorded, with
/// `None` for any field the extractor could not find.
pub(crate) async fn collect_reviews(
    asins: &[String],
    api: &PaapiClient,
    pages: &ReviewPageClient,
    config: &AppConfig,
) -> Vec<ReviewRecord> {
    let mut records = Vec::new();

    for asin in asins {
        if asin.is_empty() {
            tracing::warn!("skipping empty identifier in input list");
            continue;
        }

        // Deliberate pacing before every lookup call.
        tokio::time::sleep(Duration::from_secs(config.api_delay_secs)).await;

        let reference = match api.resolve_reviews_iframe(asin).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                tracing::warn!(asin = %asin, stage = "resolve", "identifier has no reviews iframe");
                continue;
            }
            Err(
                e @ (PaapiError::InvalidAccessKey { .. } | PaapiError::InvalidSignature { .. }),
            ) => {
                tracing::error!(
                    asin = %asin,
                    stage = "resolve",
                    error = %e,
                    "authentication failure — check the configured credentials"
                );
                continue;
            }
            Err(e) => {
                tracing::error!(asin = %asin, stage = "resolve", error = %e, "lookup failed");
                continue;
            }
        };

        let markup = match pages.fetch_page(&reference).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(asin = %asin, stage = "fetch", error = %e, "review page fetch failed");
                continue;
            }
        };

        let document = ReviewDocument::parse(&markup);
        let review_count = document.review_count();
        let average_score = document.average_score();
        if review_count.is_none() {
            tracing::warn!(asin = %asin, stage = "extract", "review count not found in document");
        }
        if average_score.is_none() {
            tracing::warn!(asin = %asin, stage = "extract", "average score not found in document");
        }

        records.push(ReviewRecord {
            asin: asin.clone(),
            review_count,
            average_score,
        });
    }

    records
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
