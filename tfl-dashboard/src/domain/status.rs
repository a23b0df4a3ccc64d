//! Line and bus route status records.

use std::fmt;

use serde::{Serialize, Serializer};

/// A line status severity as reported by TfL.
///
/// The known vocabulary gets its own variant; anything else the upstream
/// API reports is passed through verbatim as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    GoodService,
    MinorDelays,
    SevereDelays,
    PartClosure,
    ServiceClosed,
    Other(String),
}

impl Severity {
    /// Map an upstream `statusSeverityDescription` to a severity.
    pub fn from_description(description: &str) -> Self {
        match description {
            "Good Service" => Severity::GoodService,
            "Minor Delays" => Severity::MinorDelays,
            "Severe Delays" => Severity::SevereDelays,
            "Part Closure" => Severity::PartClosure,
            "Service Closed" => Severity::ServiceClosed,
            other => Severity::Other(other.to_string()),
        }
    }

    /// The upstream description text.
    pub fn as_str(&self) -> &str {
        match self {
            Severity::GoodService => "Good Service",
            Severity::MinorDelays => "Minor Delays",
            Severity::SevereDelays => "Severe Delays",
            Severity::PartClosure => "Part Closure",
            Severity::ServiceClosed => "Service Closed",
            Severity::Other(s) => s,
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Severity::GoodService)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Current status of one rail line (Tube, DLR, Overground, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStatus {
    pub line_id: String,
    pub line_name: String,
    pub status: Severity,
}

/// Current status of one bus route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusRouteStatus {
    pub route_name: String,
    pub status: Severity,
    /// Disruption reason, if TfL gave one.
    pub reason: Option<String>,
}
