//! Publication timestamps
//!
//! The CMS emits dates such as `2021-03-25T19:25:28+0000`. The source text is
//! kept for output so the core never reformats a date; ordering uses the
//! parsed instant.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A publication timestamp as supplied by the content source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    instant: DateTime<FixedOffset>,
}

/// The timestamp text could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0:?}")]
pub struct InvalidTimestamp(pub String);

impl Timestamp {
    /// Parse a timestamp, accepting RFC 3339 and `+0000`-style offsets
    pub fn parse(raw: &str) -> Result<Self, InvalidTimestamp> {
        let trimmed = raw.trim();
        let instant = DateTime::parse_from_rfc3339(trimmed)
            .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z"))
            .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map_err(|_| InvalidTimestamp(raw.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    /// The text exactly as the source supplied it
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant
    pub fn instant(&self) -> &DateTime<FixedOffset> {
        &self.instant
    }
}

impl TryFrom<String> for Timestamp {
    type Error = InvalidTimestamp;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}
