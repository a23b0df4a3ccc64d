//! Station identity and station records.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid NaPTAN identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid NaPTAN id: {reason}")]
pub struct InvalidNaptanId {
    reason: &'static str,
}

/// The network's stable identifier for a stop (e.g. `940GZZLUOXC`).
///
/// The only requirement is that the id is non-empty. Anything else is kept
/// verbatim; request paths percent-encode it.
///
/// # Examples
///
/// ```
/// use tfl_dashboard::domain::NaptanId;
///
/// let oxford_circus = NaptanId::parse("940GZZLUOXC").unwrap();
/// assert_eq!(oxford_circus.as_str(), "940GZZLUOXC");
///
/// assert!(NaptanId::parse("").is_err());
/// assert_eq!(NaptanId::parse("940G/ZZLU").unwrap().as_str(), "940G/ZZLU");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NaptanId(String);

impl NaptanId {
    /// Parse a NaPTAN id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidNaptanId> {
        if s.is_empty() {
            return Err(InvalidNaptanId {
                reason: "must not be empty",
            });
        }

        Ok(NaptanId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NaptanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NaptanId({})", self.0)
    }
}

impl fmt::Display for NaptanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A metro station with the lines that serve it.
///
/// Stations are immutable for the lifetime of a fetch; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id: NaptanId,
    /// Line names in upstream order.
    pub lines: Vec<String>,
}

impl Station {
    /// Whether any of this station's lines is in `lines`.
    pub fn serves_any<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        self.lines
            .iter()
            .any(|l| lines.iter().any(|other| other.as_ref() == l))
    }
}
