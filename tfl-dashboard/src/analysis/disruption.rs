//! Joining stations against line statuses.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::{LineStatus, Severity, Station};

/// Line name → current status lookup.
///
/// If a line name appears more than once, the first record wins.
#[derive(Debug, Clone)]
pub struct StatusIndex<'a> {
    by_name: HashMap<&'a str, &'a Severity>,
}

impl<'a> StatusIndex<'a> {
    pub fn new(statuses: &'a [LineStatus]) -> Self {
        let mut by_name = HashMap::with_capacity(statuses.len());
        for s in statuses {
            by_name.entry(s.line_name.as_str()).or_insert(&s.status);
        }
        Self { by_name }
    }

    /// Current status of `line`, if known.
    pub fn get(&self, line: &str) -> Option<&'a Severity> {
        self.by_name.get(line).copied()
    }
}

/// A station together with the worst status among its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDisruption<'a> {
    pub station: &'a Station,
    pub worst_status: Severity,
}

/// The most severe current status among a station's lines.
///
/// `Severe Delays` always wins. Otherwise the first status other than
/// `Good Service`, in the station's line order, is kept. Lines without a
/// known status are skipped. A station with no known lines is `Good
/// Service`.
pub fn worst_status_for_station(station: &Station, statuses: &StatusIndex<'_>) -> Severity {
    let mut worst = &Severity::GoodService;

    for status in station.lines.iter().filter_map(|l| statuses.get(l)) {
        match status {
            Severity::SevereDelays => return Severity::SevereDelays,
            s if worst.is_good() && !s.is_good() => worst = s,
            _ => {}
        }
    }

    worst.clone()
}

/// Names in `universe` whose current status is not `Good Service`.
///
/// Lines in `universe` with no status record are not disrupted.
pub fn disrupted_lines<S: AsRef<str>>(statuses: &[LineStatus], universe: &[S]) -> BTreeSet<String> {
    let index = StatusIndex::new(statuses);
    universe
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| index.get(name).is_some_and(|s| !s.is_good()))
        .map(str::to_string)
        .collect()
}

/// Worst status for every station that is served by at least one line.
pub fn station_disruptions<'a>(
    stations: &'a [Station],
    statuses: &[LineStatus],
) -> Vec<StationDisruption<'a>> {
    let index = StatusIndex::new(statuses);
    stations
        .iter()
        .filter(|s| !s.lines.is_empty())
        .map(|station| StationDisruption {
            station,
            worst_status: worst_status_for_station(station, &index),
        })
        .collect()
}
