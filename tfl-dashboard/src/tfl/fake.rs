//! In-memory `TransitApi` for unit tests.
//!
//! Serves fixed records and counts calls per operation, so tests can check
//! caching and short-circuit behaviour without any network.

use std::sync::Mutex;

use crate::domain::{BusRouteStatus, Journey, LineStatus, NaptanId, Severity, Station};

use super::{TflError, TransitApi};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub stop_points: usize,
    pub line_statuses: usize,
    pub bus_statuses: usize,
    pub journeys: usize,
}

/// Fake API. A `None` collection makes that operation fail.
#[derive(Debug, Default)]
pub struct FakeTransit {
    pub stations: Option<Vec<Station>>,
    pub failing_modes: Vec<String>,
    pub lines: Option<Vec<LineStatus>>,
    pub buses: Option<Vec<BusRouteStatus>>,
    pub journeys: Option<Vec<Journey>>,
    pub counts: Mutex<CallCounts>,
}

impl FakeTransit {
    /// A fake where every operation succeeds with no records.
    pub fn empty() -> Self {
        Self {
            stations: Some(Vec::new()),
            lines: Some(Vec::new()),
            buses: Some(Vec::new()),
            journeys: Some(Vec::new()),
            ..Default::default()
        }
    }

    /// A fake where every operation fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> CallCounts {
        *self.counts.lock().unwrap()
    }
}

fn unavailable() -> TflError {
    TflError::ApiError {
        status: 503,
        message: "Service Unavailable".into(),
    }
}

impl TransitApi for FakeTransit {
    async fn stop_points(&self, mode: &str) -> Result<Vec<Station>, TflError> {
        self.counts.lock().unwrap().stop_points += 1;
        if self.failing_modes.iter().any(|m| m == mode) {
            return Err(unavailable());
        }
        self.stations.clone().ok_or_else(unavailable)
    }

    async fn line_statuses(&self, _modes: &[String]) -> Result<Vec<LineStatus>, TflError> {
        self.counts.lock().unwrap().line_statuses += 1;
        self.lines.clone().ok_or_else(unavailable)
    }

    async fn bus_statuses(&self) -> Result<Vec<BusRouteStatus>, TflError> {
        self.counts.lock().unwrap().bus_statuses += 1;
        self.buses.clone().ok_or_else(unavailable)
    }

    async fn journeys(&self, _from: &NaptanId, _to: &NaptanId) -> Result<Vec<Journey>, TflError> {
        self.counts.lock().unwrap().journeys += 1;
        self.journeys.clone().ok_or_else(unavailable)
    }
}

/// Build a station for tests.
pub fn station(name: &str, id: &str, lines: &[&str]) -> Station {
    Station {
        name: name.to_string(),
        latitude: 51.5,
        longitude: -0.12,
        id: NaptanId::parse(id).unwrap(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// Build a line status for tests.
pub fn line(name: &str, status: &str) -> LineStatus {
    LineStatus {
        line_id: name.to_lowercase(),
        line_name: name.to_string(),
        status: Severity::from_description(status),
    }
}
