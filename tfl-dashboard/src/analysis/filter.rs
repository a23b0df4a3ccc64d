//! Line and bus route filtering.
//!
//! Selections arrive as explicit request parameters; nothing here keeps
//! state between requests.

use serde::Serialize;

use crate::domain::{BusRouteStatus, LineStatus, Severity};

/// Records whose line is selected and whose status is selected.
///
/// An empty `selected_lines` selects every line. An empty
/// `selected_statuses` selects nothing.
pub fn filter_lines<S: AsRef<str>>(
    statuses: &[LineStatus],
    selected_lines: &[S],
    selected_statuses: &[Severity],
) -> Vec<LineStatus> {
    statuses
        .iter()
        .filter(|s| {
            selected_lines.is_empty() || selected_lines.iter().any(|l| l.as_ref() == s.line_name)
        })
        .filter(|s| selected_statuses.contains(&s.status))
        .cloned()
        .collect()
}

/// Distinct line names, sorted, for the line selector.
pub fn line_options(statuses: &[LineStatus]) -> Vec<String> {
    let mut names: Vec<String> = statuses.iter().map(|s| s.line_name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Distinct statuses in first-seen order, for the status selector.
pub fn status_options(statuses: &[LineStatus]) -> Vec<Severity> {
    let mut options: Vec<Severity> = Vec::new();
    for s in statuses {
        if !options.contains(&s.status) {
            options.push(s.status.clone());
        }
    }
    options
}

/// How loudly a line's status should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn for_status(status: &Severity) -> Self {
        match status {
            Severity::GoodService => AlertLevel::Success,
            Severity::MinorDelays | Severity::ServiceClosed => AlertLevel::Warning,
            _ => AlertLevel::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

/// Status callout for a line the user picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAlert {
    pub line_name: String,
    pub status: Severity,
    pub level: AlertLevel,
}

/// One callout per selected line that has a status record.
///
/// Selected lines with no record are left out.
pub fn selected_line_alerts<S: AsRef<str>>(
    statuses: &[LineStatus],
    selected_lines: &[S],
) -> Vec<LineAlert> {
    selected_lines
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            statuses.iter().find(|s| s.line_name == name).map(|s| LineAlert {
                line_name: s.line_name.clone(),
                status: s.status.clone(),
                level: AlertLevel::for_status(&s.status),
            })
        })
        .collect()
}

/// The records among `filtered` that are not `Good Service`.
pub fn disruption_alerts(filtered: &[LineStatus]) -> Vec<&LineStatus> {
    filtered.iter().filter(|s| !s.status.is_good()).collect()
}

/// Bus routes whose name contains `query`, ignoring case.
///
/// An empty or blank query matches nothing.
pub fn search_bus_routes<'a>(buses: &'a [BusRouteStatus], query: &str) -> Vec<&'a BusRouteStatus> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    buses
        .iter()
        .filter(|b| b.route_name.to_lowercase().contains(&query))
        .collect()
}

/// All bus routes, ordered by route name.
pub fn sorted_bus_table(buses: &[BusRouteStatus]) -> Vec<&BusRouteStatus> {
    let mut table: Vec<&BusRouteStatus> = buses.iter().collect();
    table.sort_by(|a, b| a.route_name.cmp(&b.route_name));
    table
}
