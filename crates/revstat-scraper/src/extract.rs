//! Pattern extraction of review statistics from review-summary markup.
//!
//! The review count lives in a link whose visible text reads like
//! `"223 customer reviews"`; the average score lives in a star-rating
//! image whose `alt` (or, failing that, `title`) attribute reads like
//! `"4.8 out of 5 stars"`. Both extractors degrade to `None` on any
//! missing or malformed structure — an extraction miss must never abort
//! the run.

use regex::Regex;
use scraper::{Html, Selector};

/// Visible link text announcing the review count.
/// Accepts `"223 customer reviews"`, `"0 Customer Reviews"`, `"1 Review"`.
const REVIEW_COUNT_PATTERN: &str = r"^\d{1,7}(\s[Cc]ustomer)?\s[Rr]eview(s)?$";

/// Image `alt`/`title` text announcing the average score.
/// Accepts `"4.8 out of 5 stars"`, `"4.8 Out Of 5 Stars"`, `"0.0 out of 5"`.
const AVERAGE_SCORE_PATTERN: &str = r"^[0-5]\.[0-9]\s[Oo]ut\s[Oo]f\s5(\s[Ss]tars)?$";

const LEADING_COUNT_PATTERN: &str = r"^\d{1,7}";
const LEADING_SCORE_PATTERN: &str = r"^[0-5]\.[0-9]";

/// A parsed review-summary page.
///
/// Parsing is lenient — any input produces a document — and the document
/// is immutable once built, so both extractors are idempotent over it.
pub struct ReviewDocument {
    html: Html,
}

impl ReviewDocument {
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Extracts the customer review count from the first link whose
    /// whitespace-normalized text matches `REVIEW_COUNT_PATTERN`.
    ///
    /// The leading digit run is bounded to seven digits, so the value
    /// always fits a `u32`. Returns `None` when no link matches.
    #[must_use]
    pub fn review_count(&self) -> Option<u32> {
        let links = Selector::parse("a").expect("valid anchor selector");
        let full = Regex::new(REVIEW_COUNT_PATTERN).expect("valid review-count regex");
        let leading = Regex::new(LEADING_COUNT_PATTERN).expect("valid leading-digits regex");

        for link in self.html.select(&links) {
            let text = normalize_whitespace(link.text());
            if !full.is_match(&text) {
                continue;
            }
            if let Some(digits) = leading.find(&text) {
                if let Ok(count) = digits.as_str().parse::<u32>() {
                    return Some(count);
                }
            }
        }

        tracing::debug!(
            pattern = REVIEW_COUNT_PATTERN,
            "no link text matched the review-count pattern"
        );
        None
    }

    /// Extracts the average review score from star-rating image attributes.
    ///
    /// `alt` is authoritative: `title` is only consulted when no image's
    /// `alt` matches `AVERAGE_SCORE_PATTERN`. Returns `None` when neither
    /// attribute matches on any image.
    #[must_use]
    pub fn average_score(&self) -> Option<f64> {
        for attr in ["alt", "title"] {
            if let Some(score) = self.score_from_attr(attr) {
                return Some(score);
            }
            tracing::debug!(
                attr,
                pattern = AVERAGE_SCORE_PATTERN,
                "no image attribute matched the average-score pattern"
            );
        }
        None
    }

    fn score_from_attr(&self, attr: &str) -> Option<f64> {
        let images = Selector::parse("img").expect("valid image selector");
        let full = Regex::new(AVERAGE_SCORE_PATTERN).expect("valid average-score regex");
        let leading = Regex::new(LEADING_SCORE_PATTERN).expect("valid leading-score regex");

        for image in self.html.select(&images) {
            let Some(value) = image.value().attr(attr) else {
                continue;
            };
            let value = value.trim();
            if !full.is_match(value) {
                continue;
            }
            if let Some(digits) = leading.find(value) {
                if let Ok(score) = digits.as_str().parse::<f64>() {
                    // The pattern admits up to "5.9"; scores above the
                    // five-star ceiling are treated as a miss.
                    if score <= 5.0 {
                        return Some(score);
                    }
                }
            }
        }
        None
    }
}

/// Collapses runs of whitespace (including newlines from nested markup)
/// into single spaces and trims the ends.
fn normalize_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> ReviewDocument {
        ReviewDocument::parse(&format!("<html><body>{body}</body></html>"))
    }

    // -----------------------------------------------------------------------
    // review_count
    // -----------------------------------------------------------------------

    #[test]
    fn count_from_customer_reviews_link() {
        let d = doc(r##"<a href="#customerReviews">223 customer reviews</a>"##);
        assert_eq!(d.review_count(), Some(223));
    }

    #[test]
    fn count_accepts_capitalized_variant() {
        let d = doc(r##"<a href="#">0 Customer Reviews</a>"##);
        assert_eq!(d.review_count(), Some(0));
    }

    #[test]
    fn count_accepts_singular_review() {
        let d = doc(r##"<a href="#">1 Review</a>"##);
        assert_eq!(d.review_count(), Some(1));
    }

    #[test]
    fn count_accepts_plain_reviews_without_customer() {
        let d = doc(r##"<a href="#">223 reviews</a>"##);
        assert_eq!(d.review_count(), Some(223));
    }

    #[test]
    fn count_rejects_other_nouns() {
        let d = doc(r##"<a href="#">223 comments</a>"##);
        assert_eq!(d.review_count(), None);
    }

    #[test]
    fn count_rejects_more_than_seven_digits() {
        let d = doc(r##"<a href="#">12345678 reviews</a>"##);
        assert_eq!(d.review_count(), None);
    }

    #[test]
    fn count_rejects_matching_text_outside_a_link() {
        let d = doc("<div>223 customer reviews</div>");
        assert_eq!(d.review_count(), None);
    }

    #[test]
    fn count_normalizes_nested_markup_and_whitespace() {
        let d = doc("<a href=\"#\"><span>223</span>\n   customer reviews</a>");
        assert_eq!(d.review_count(), Some(223));
    }

    #[test]
    fn count_skips_non_matching_links() {
        let d = doc(
            r##"<a href="#">See all</a><a href="#">223 customer reviews</a><a href="#">999 reviews</a>"##,
        );
        assert_eq!(d.review_count(), Some(223), "first matching link wins");
    }

    #[test]
    fn count_is_idempotent() {
        let d = doc(r##"<a href="#">223 customer reviews</a>"##);
        assert_eq!(d.review_count(), d.review_count());
    }

    #[test]
    fn count_absent_from_empty_document() {
        assert_eq!(ReviewDocument::parse("").review_count(), None);
    }

    // -----------------------------------------------------------------------
    // average_score
    // -----------------------------------------------------------------------

    #[test]
    fn score_from_alt_attribute() {
        let d = doc(r#"<img src="stars.gif" alt="4.8 out of 5 stars">"#);
        assert_eq!(d.average_score(), Some(4.8));
    }

    #[test]
    fn score_accepts_capitalized_variant() {
        let d = doc(r#"<img alt="4.8 Out Of 5 Stars">"#);
        assert_eq!(d.average_score(), Some(4.8));
    }

    #[test]
    fn score_accepts_missing_stars_suffix() {
        let d = doc(r#"<img alt="0.0 out of 5">"#);
        assert_eq!(d.average_score(), Some(0.0));
    }

    #[test]
    fn score_falls_back_to_title_attribute() {
        let d = doc(r#"<img src="stars.gif" title="3.5 out of 5 stars">"#);
        assert_eq!(d.average_score(), Some(3.5));
    }

    #[test]
    fn score_prefers_alt_over_title() {
        let d = doc(
            r#"<img title="1.0 out of 5 stars"><img alt="4.8 out of 5 stars">"#,
        );
        assert_eq!(d.average_score(), Some(4.8), "alt pass runs before title");
    }

    #[test]
    fn score_consults_title_only_when_alt_does_not_match() {
        let d = doc(r#"<img alt="star rating" title="2.5 out of 5 stars">"#);
        assert_eq!(d.average_score(), Some(2.5));
    }

    #[test]
    fn score_rejects_values_above_five() {
        let d = doc(r#"<img alt="5.9 out of 5 stars">"#);
        assert_eq!(d.average_score(), None);
    }

    #[test]
    fn score_rejects_unrelated_alt_text() {
        let d = doc(r#"<img alt="product photo"><img alt="company logo">"#);
        assert_eq!(d.average_score(), None);
    }

    #[test]
    fn score_absent_when_no_images_exist() {
        let d = doc("<p>no images here</p>");
        assert_eq!(d.average_score(), None);
    }

    #[test]
    fn score_is_idempotent() {
        let d = doc(r#"<img alt="4.8 out of 5 stars">"#);
        assert_eq!(d.average_score(), d.average_score());
    }

    // -----------------------------------------------------------------------
    // combined documents
    // -----------------------------------------------------------------------

    #[test]
    fn extracts_both_fields_from_a_realistic_fragment() {
        let d = doc(concat!(
            r#"<div class="crIFrameNumCustReviews">"#,
            r#"<img src="stars-4-8.gif" alt="4.8 out of 5 stars" />"#,
            r##"<a href="#customerReviews">223 customer reviews</a>"##,
            "</div>"
        ));
        assert_eq!(d.review_count(), Some(223));
        assert_eq!(d.average_score(), Some(4.8));
    }

    #[test]
    fn one_field_missing_does_not_affect_the_other() {
        let d = doc(r##"<a href="#">223 customer reviews</a>"##);
        assert_eq!(d.review_count(), Some(223));
        assert_eq!(d.average_score(), None);
    }
}
