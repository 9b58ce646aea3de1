//! Review records and the line parser
//!
//! One review per source line. A line that does not decode as a JSON object
//! becomes a [`ParseFailure`]; missing fields fall back to empty/zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque source line, kept as raw bytes so encoding problems surface in the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine(pub Vec<u8>);

impl RawLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for RawLine {
    fn from(line: &str) -> Self {
        Self(line.as_bytes().to_vec())
    }
}

impl From<String> for RawLine {
    fn from(line: String) -> Self {
        Self(line.into_bytes())
    }
}

/// Per-line decode failure; dropped by the worker pool, never escalated
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// Line is empty or whitespace only
    #[error("blank line")]
    Blank,

    /// Line is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Line is valid JSON but not an object
    #[error("not a JSON object")]
    NotAnObject,

    /// Line is not JSON, or a field has the wrong type
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parsed review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer_id: String,
    pub asin: String,
    /// Star rating (`overall`); 0.0 when the source omits it
    pub rating: f64,
    pub review_text: String,
}

/// Wire shape of a source line. `null` is treated the same as an absent field.
#[derive(Deserialize)]
struct SourceReview {
    #[serde(rename = "reviewText", default)]
    review_text: Option<String>,
    #[serde(rename = "reviewerID", default)]
    reviewer_id: Option<String>,
    #[serde(default)]
    asin: Option<String>,
    #[serde(default)]
    overall: Option<f64>,
}

impl From<SourceReview> for ReviewRecord {
    fn from(src: SourceReview) -> Self {
        Self {
            reviewer_id: src.reviewer_id.unwrap_or_default(),
            asin: src.asin.unwrap_or_default(),
            rating: src.overall.unwrap_or(0.0),
            review_text: src.review_text.unwrap_or_default(),
        }
    }
}

/// Decode one source line into a [`ReviewRecord`]
pub fn parse(line: &RawLine) -> Result<ReviewRecord, ParseFailure> {
    let text = std::str::from_utf8(line.as_bytes())?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseFailure::Blank);
    }

    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ParseFailure::NotAnObject);
    }

    let src: SourceReview = serde_json::from_value(value)?;
    Ok(src.into())
}

/// Sentiment label derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Reporting order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown sentiment label '{}'",
                other
            ))),
        }
    }
}

/// Review plus its score; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub review: ReviewRecord,
    pub score: i64,
    pub sentiment: Sentiment,
    pub scored_at: DateTime<Utc>,
}
