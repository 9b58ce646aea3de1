//! Timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Text layout of the `timestamp` column
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Render a timestamp for storage (second precision, UTC)
pub fn to_storage(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(STORAGE_FORMAT).to_string()
}

/// Parse a stored timestamp back into UTC
pub fn from_storage(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, STORAGE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidInput(format!("bad timestamp '{}': {}", text, e)))
}
