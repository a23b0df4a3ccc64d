//! Network-wide KPIs and chart aggregates.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::{LineStatus, Severity, Station};

use super::disruption::disrupted_lines;

/// The eleven London Underground lines.
pub const TUBE_LINES: &[&str] = &[
    "Bakerloo",
    "Central",
    "Circle",
    "District",
    "Hammersmith & City",
    "Jubilee",
    "Metropolitan",
    "Northern",
    "Piccadilly",
    "Victoria",
    "Waterloo & City",
];

pub fn is_tube_line(name: &str) -> bool {
    TUBE_LINES.contains(&name)
}

/// Headline figures for the network summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    /// Distinct stations fetched.
    pub station_count: usize,
    /// Distinct station names served by at least one disrupted Tube line.
    pub affected_station_count: usize,
    /// Number of Tube lines.
    pub line_count: usize,
    /// Tube lines not running a good service.
    pub disrupted_line_count: usize,
    pub disrupted_line_percent: f64,
    pub good_line_percent: f64,
    /// Names of the disrupted Tube lines, sorted.
    pub disrupted_lines: Vec<String>,
}

/// Compute the network summary KPIs.
pub fn network_summary(stations: &[Station], statuses: &[LineStatus]) -> NetworkSummary {
    let station_count = stations.iter().map(|s| &s.id).collect::<HashSet<_>>().len();

    let disrupted = disrupted_lines(statuses, TUBE_LINES);

    let affected_station_count = stations
        .iter()
        .filter(|s| s.serves_any(TUBE_LINES))
        .filter(|s| s.lines.iter().any(|l| disrupted.contains(l)))
        .map(|s| s.name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let line_count = TUBE_LINES.len();
    let disrupted_line_count = disrupted.len();
    let disrupted_line_percent = if line_count > 0 {
        disrupted_line_count as f64 / line_count as f64 * 100.0
    } else {
        0.0
    };

    NetworkSummary {
        station_count,
        affected_station_count,
        line_count,
        disrupted_line_count,
        disrupted_line_percent,
        good_line_percent: 100.0 - disrupted_line_percent,
        disrupted_lines: disrupted.into_iter().collect(),
    }
}

/// Number of lines reporting a status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: Severity,
    pub lines: usize,
}

/// Lines per status, ordered by status text.
pub fn status_counts(statuses: &[LineStatus]) -> Vec<StatusCount> {
    let mut counts: BTreeMap<&str, (&Severity, usize)> = BTreeMap::new();
    for s in statuses {
        counts.entry(s.status.as_str()).or_insert((&s.status, 0)).1 += 1;
    }

    counts
        .into_values()
        .map(|(status, lines)| StatusCount {
            status: status.clone(),
            lines,
        })
        .collect()
}

/// Disrupted line counts split between the Tube and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeDisruption {
    pub tube: usize,
    pub other: usize,
}

pub fn disruption_by_mode(statuses: &[LineStatus]) -> ModeDisruption {
    statuses
        .iter()
        .filter(|s| !s.status.is_good())
        .fold(ModeDisruption { tube: 0, other: 0 }, |mut acc, s| {
            if is_tube_line(&s.line_name) {
                acc.tube += 1;
            } else {
                acc.other += 1;
            }
            acc
        })
}
