//! Review-page fetching and field extraction.
//!
//! [`ReviewPageClient`] downloads a review-summary page with a fixed-delay
//! retry policy for transient network failures; [`ReviewDocument`] parses
//! the downloaded markup once and extracts the review count and average
//! score by pattern-matching link text and image attributes.

pub mod client;
pub mod error;
pub mod extract;

mod retry;

pub use client::ReviewPageClient;
pub use error::ScrapeError;
pub use extract::ReviewDocument;
