//! Timestamp parsing and formatting.
//!
//! Every persisted timestamp uses the fixed second-precision format
//! `%Y-%m-%dT%H:%M:%SZ` so documents written by older installations
//! keep parsing.

use crate::error::{IshuError, Result};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

/// On-disk timestamp format (UTC, second precision).
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Comment filename timestamp format (colons replaced for portability).
pub const FILENAME_STAMP_FMT: &str = "%Y-%m-%dT%H-%M-%S";

/// Current UTC time truncated to whole seconds.
///
/// Sub-second precision is dropped so a value survives a
/// format/parse round trip unchanged.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let ts = Utc::now();
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Format a timestamp in the on-disk format.
#[must_use]
pub fn format_stamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}

/// Format a timestamp for use in a comment filename.
#[must_use]
pub fn filename_stamp(ts: DateTime<Utc>) -> String {
    ts.format(FILENAME_STAMP_FMT).to_string()
}

/// Parse a timestamp in the on-disk format.
///
/// # Errors
///
/// Returns a validation error if the value doesn't match
/// [`TIMESTAMP_FMT`].
pub fn parse_stamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT)
        .map(|naive| naive.and_utc())
        .map_err(|e| IshuError::validation("timestamp", format!("'{s}': {e}")))
}

/// Serde adapter for `DateTime<Utc>` fields in the on-disk format.
pub mod stamp_format {
    use super::{TIMESTAMP_FMT, format_stamp};
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Serialize a timestamp as a fixed-format string.
    ///
    /// # Errors
    ///
    /// Infallible in practice; errors only come from the underlying
    /// serializer.
    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_stamp(*ts))
    }

    /// Deserialize a timestamp from a fixed-format string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match the format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FMT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
