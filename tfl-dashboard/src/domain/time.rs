//! Journey timestamps.
//!
//! TfL journey legs carry local date-times such as `2026-03-15T10:04:00`
//! without an offset. Some legs arrive with malformed or missing times; we
//! keep the raw text so it can still be displayed.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime};

/// Formats accepted for offset-less timestamps, tried in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A timestamp as received from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl Timestamp {
    /// Parse a timestamp, keeping the raw text whether or not it parses.
    ///
    /// Offset-bearing RFC 3339 values are accepted too; their wall-clock
    /// time is kept and the offset dropped.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let parsed = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.naive_local())
            });

        Self {
            raw: raw.to_string(),
            parsed,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parsed(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    /// `HH:MM` if the timestamp parsed, otherwise the raw text.
    pub fn display_time(&self) -> String {
        match self.parsed {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => self.raw.clone(),
        }
    }

    /// Duration from `self` to `later`, if both parsed.
    pub fn until(&self, later: &Timestamp) -> Option<Duration> {
        Some(later.parsed? - self.parsed?)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_time())
    }
}
