//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::analysis::{
    LineAlert, ModeDisruption, NetworkSummary, StatusCount, mode_aggregate, status_options,
};
use crate::domain::{BusRouteStatus, Journey, JourneyLeg, LineStatus, Severity};

use super::templates::MarkerView;

/// Split a comma-separated query value into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Query parameters of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated line names. Absent or empty selects every line.
    pub lines: Option<String>,

    /// Comma-separated statuses. Absent selects every observed status;
    /// present but empty selects none.
    pub statuses: Option<String>,

    /// Bus route search text.
    pub route: Option<String>,

    /// Journey start station name.
    pub from: Option<String>,

    /// Journey end station name.
    pub to: Option<String>,
}

impl DashboardQuery {
    /// The line and status selection, resolved against observed statuses.
    pub fn selection(&self, observed: &[LineStatus]) -> LineSelection {
        LineSelection::new(self.lines.as_deref(), self.statuses.as_deref(), observed)
    }

    /// The route search text, if one was entered.
    pub fn route_query(&self) -> Option<&str> {
        self.route.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }

    /// Start and end station names, once both are chosen.
    pub fn journey_stations(&self) -> Option<(&str, &str)> {
        let from = self.from.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let to = self.to.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((from, to))
    }
}

/// Query parameters of `/api/lines`.
#[derive(Debug, Default, Deserialize)]
pub struct LinesQuery {
    pub lines: Option<String>,
    pub statuses: Option<String>,
}

/// A resolved line filter.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSelection {
    pub lines: Vec<String>,
    pub statuses: Vec<Severity>,
}

impl LineSelection {
    pub fn new(lines: Option<&str>, statuses: Option<&str>, observed: &[LineStatus]) -> Self {
        let statuses = match statuses {
            Some(raw) => split_list(raw)
                .iter()
                .map(|s| Severity::from_description(s))
                .collect(),
            None => status_options(observed),
        };

        Self {
            lines: lines.map(split_list).unwrap_or_default(),
            statuses,
        }
    }

    /// The status selection as display strings.
    pub fn status_names(&self) -> Vec<String> {
        self.statuses.iter().map(|s| s.to_string()).collect()
    }
}

/// Query parameters of `/api/bus`.
#[derive(Debug, Default, Deserialize)]
pub struct BusQuery {
    pub route: Option<String>,
}

/// Query parameters of `/api/journey`.
#[derive(Debug, Default, Deserialize)]
pub struct JourneyQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Response for `/api/summary`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: NetworkSummary,
    pub status_counts: Vec<StatusCount>,
    pub disruption_by_mode: ModeDisruption,
}

/// Response for `/api/lines`.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    /// Records matching the filter.
    pub lines: Vec<LineStatus>,

    /// Callouts for each selected line.
    pub alerts: Vec<LineAlert>,

    /// Filtered records not running a good service.
    pub disruptions: Vec<LineStatus>,
}

/// Response for `/api/bus`.
#[derive(Debug, Serialize)]
pub struct BusResponse {
    /// The search text, when the response is a search result.
    pub query: Option<String>,
    pub routes: Vec<BusRouteStatus>,
}

/// Response for `/api/stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<String>,
}

/// Response for `/api/stations/map`.
#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<MarkerView>,
}

/// Response for `/api/journey` when journeys were found.
#[derive(Debug, Serialize)]
pub struct JourneyPlanResponse {
    pub journeys: Vec<JourneyResult>,
}

/// Response for `/api/journey` when there is nothing to show.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A journey option.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// Total duration reported by TfL, in minutes.
    pub duration_minutes: Option<i64>,

    pub legs: Vec<LegResult>,

    /// Minutes per mode, in order of first appearance.
    pub mode_minutes: Vec<ModeMinutes>,
}

impl JourneyResult {
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            duration_minutes: journey.duration_minutes,
            legs: journey.legs.iter().map(LegResult::from_leg).collect(),
            mode_minutes: mode_aggregate(&journey.legs)
                .iter()
                .map(|(mode, minutes)| ModeMinutes {
                    mode: mode.to_string(),
                    minutes,
                })
                .collect(),
        }
    }
}

/// A journey leg.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub mode: String,
    pub line: Option<String>,

    /// Departure time as reported by TfL.
    pub departure: String,

    /// Arrival time as reported by TfL.
    pub arrival: String,

    pub disruption: Option<String>,
}

impl LegResult {
    pub fn from_leg(leg: &JourneyLeg) -> Self {
        Self {
            mode: leg.mode.to_string(),
            line: leg.line_name.clone(),
            departure: leg.departure.raw().to_string(),
            arrival: leg.arrival.raw().to_string(),
            disruption: leg.disruption_note.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModeMinutes {
    pub mode: String,
    pub minutes: i64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
