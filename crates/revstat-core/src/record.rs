//! The review-statistics record produced for each successfully processed ASIN.

use serde::{Deserialize, Serialize};

/// Review statistics for one product identifier.
///
/// Serialized field names match the external output contract exactly:
/// `ASIN`, `Number of reviews`, `Average score`. Both statistics are
/// optional — an extraction miss leaves the field `null` in JSON and empty
/// in CSV, but the record is still emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "ASIN")]
    pub asin: String,

    /// Customer review count. At most seven digits (`<= 9_999_999`).
    #[serde(rename = "Number of reviews")]
    pub review_count: Option<u32>,

    /// Average review score in `[0.0, 5.0]`.
    #[serde(rename = "Average score")]
    pub average_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_external_field_names() {
        let record = ReviewRecord {
            asin: "B00W0I6TIM".to_owned(),
            review_count: Some(223),
            average_score: Some(4.8),
        };
        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["ASIN"], "B00W0I6TIM");
        assert_eq!(json["Number of reviews"], 223);
        assert!((json["Average score"].as_f64().unwrap() - 4.8).abs() < f64::EPSILON);
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let record = ReviewRecord {
            asin: "B00TEST".to_owned(),
            review_count: None,
            average_score: None,
        };
        let json = serde_json::to_value(&record).expect("record serializes");
        assert!(json["Number of reviews"].is_null());
        assert!(json["Average score"].is_null());
    }

    #[test]
    fn round_trips_through_json() {
        let record = ReviewRecord {
            asin: "B00W0I6TIM".to_owned(),
            review_count: Some(1),
            average_score: None,
        };
        let json = serde_json::to_string(&record).expect("serializes");
        let back: ReviewRecord = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, record);
    }
}
