//! Review records and the values derived from them
//!
//! Field names on the wire follow the seed dataset's column headers
//! (`ReviewId`, `ReviewBody`, `Location`, `Timestamp`).

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Textual form of a review timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Textual form of a calendar date filter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Opaque unique identifier, immutable once assigned
    #[serde(rename = "ReviewId")]
    pub id: String,

    /// Non-empty review text
    #[serde(rename = "ReviewBody")]
    pub body: String,

    /// Member of the location whitelist
    #[serde(rename = "Location")]
    pub location: String,

    /// Second precision, serialized as `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

/// Four-component sentiment assessment of a review body
///
/// Recomputed on every query; never stored on the review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    #[serde(rename = "neg")]
    pub negative: f64,
    #[serde(rename = "neu")]
    pub neutral: f64,
    #[serde(rename = "pos")]
    pub positive: f64,
    /// Normalized aggregate in [-1, 1], used for ranking
    pub compound: f64,
}

impl SentimentScore {
    /// Score reported for text with no content at all
    pub const EMPTY: SentimentScore = SentimentScore {
        negative: 0.0,
        neutral: 0.0,
        positive: 0.0,
        compound: 0.0,
    };

    /// Score reported for text carrying no sentiment-bearing words
    pub const NEUTRAL: SentimentScore = SentimentScore {
        negative: 0.0,
        neutral: 1.0,
        positive: 0.0,
        compound: 0.0,
    };
}

/// A review paired with the sentiment computed for one query response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScore,
}

/// Untyped fields of a review submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewInput {
    #[serde(rename = "ReviewBody")]
    pub body: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    no_padding(value).and_then(|v| NaiveDateTime::parse_from_str(v, TIMESTAMP_FORMAT).ok())
}

/// Parse a `YYYY-MM-DD` date as that day at midnight
pub fn parse_date_midnight(value: &str) -> Option<NaiveDateTime> {
    no_padding(value)
        .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// chrono skips whitespace before numeric fields; reject it up front
fn no_padding(value: &str) -> Option<&str> {
    (value.trim() == value).then_some(value)
}

/// Drop sub-second precision
pub fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
