//! Journey types.
//!
//! A `Journey` is one option returned by the TfL journey planner: an
//! ordered list of legs, each travelled in a single mode.

use std::fmt;

use chrono::Duration;

use super::Timestamp;

/// A transport mode name, normalized for display.
///
/// TfL reports modes in lower case (`tube`, `elizabeth-line`); we capitalize
/// the first letter and lower-case the rest, so `elizabeth-line` becomes
/// `Elizabeth-line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mode(String);

impl Mode {
    /// Mode used when a leg carries no mode name.
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(name: &str) -> Self {
        let mut chars = name.chars();
        let normalized = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
        Mode(normalized)
    }

    pub fn unknown() -> Self {
        Mode(Self::UNKNOWN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One leg of a journey.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyLeg {
    pub mode: Mode,
    pub line_name: Option<String>,
    pub departure: Timestamp,
    pub arrival: Timestamp,
    /// First disruption description attached to the leg, if any.
    pub disruption_note: Option<String>,
}

impl JourneyLeg {
    /// Wall-clock time spent on this leg, if both ends parsed.
    pub fn duration(&self) -> Option<Duration> {
        self.departure.until(&self.arrival)
    }

    /// `Mode Line` when the leg has a line, otherwise just the mode.
    pub fn display_name(&self) -> String {
        match self.line_name.as_deref() {
            Some(line) if !line.is_empty() => format!("{} {}", self.mode, line),
            _ => self.mode.to_string(),
        }
    }
}

/// A journey option from origin to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    /// Total duration reported by TfL.
    pub duration_minutes: Option<i64>,
    pub legs: Vec<JourneyLeg>,
}
