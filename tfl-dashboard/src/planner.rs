//! Point-to-point journey planning between metro stations.
//!
//! Stations are picked by name; names are resolved against the fetched
//! station list to NaPTAN ids before the journey planner is asked. Journey
//! results are never cached.

use tracing::{info, warn};

use crate::cache::CachedTflClient;
use crate::domain::{Journey, Station};
use crate::tfl::TransitApi;

/// What the journey planner produced for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum JourneyOutcome {
    /// Start and end resolve to the same station; nothing was requested.
    SameStation,
    /// A station name did not match any known station.
    UnknownStation(String),
    /// TfL answered but offered no journeys.
    NoJourneys,
    /// Journey options, in TfL's order.
    Found(Vec<Journey>),
    /// The request failed; the message is suitable for display.
    Failed(String),
}

impl JourneyOutcome {
    /// Informational text for outcomes that have no journeys to show.
    pub fn message(&self) -> Option<String> {
        match self {
            JourneyOutcome::SameStation => Some("Start and end stations are the same.".into()),
            JourneyOutcome::UnknownStation(name) => Some(format!("Unknown station: {name}")),
            JourneyOutcome::NoJourneys => Some("No journeys found for these stations.".into()),
            JourneyOutcome::Found(_) => None,
            JourneyOutcome::Failed(msg) => Some(format!("API request failed: {msg}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, JourneyOutcome::Failed(_))
    }
}

/// Find a station by name, ignoring case. The first match wins.
pub fn resolve_station<'a>(stations: &'a [Station], name: &str) -> Option<&'a Station> {
    let wanted = name.trim().to_lowercase();
    stations.iter().find(|s| s.name.to_lowercase() == wanted)
}

/// Distinct station names, sorted, for the start and end selectors.
pub fn station_names(stations: &[Station]) -> Vec<String> {
    let mut names: Vec<String> = stations.iter().map(|s| s.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Plan journeys from `from_name` to `to_name`.
///
/// Never fails: transport problems are reported as `Failed` so the rest of
/// the page can still render.
pub async fn plan<A: TransitApi>(
    client: &CachedTflClient<A>,
    stations: &[Station],
    from_name: &str,
    to_name: &str,
) -> JourneyOutcome {
    let Some(from) = resolve_station(stations, from_name) else {
        return JourneyOutcome::UnknownStation(from_name.to_string());
    };
    let Some(to) = resolve_station(stations, to_name) else {
        return JourneyOutcome::UnknownStation(to_name.to_string());
    };

    if from.id == to.id {
        return JourneyOutcome::SameStation;
    }

    match client.journeys(&from.id, &to.id).await {
        Ok(journeys) if journeys.is_empty() => JourneyOutcome::NoJourneys,
        Ok(journeys) => {
            info!(from = %from.id, to = %to.id, options = journeys.len(), "planned journey");
            JourneyOutcome::Found(journeys)
        }
        Err(e) => {
            warn!(from = %from.id, to = %to.id, error = %e, "journey request failed");
            JourneyOutcome::Failed(e.to_string())
        }
    }
}
