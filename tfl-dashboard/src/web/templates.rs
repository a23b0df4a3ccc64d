//! Askama templates and view models for the dashboard page.

use askama::Template;
use serde::Serialize;

use crate::analysis::{
    AlertLevel, LineAlert, ModeDisruption, ModeTotals, NetworkSummary, StatusCount, StatusIndex,
    mode_aggregate, station_disruptions,
};
use crate::domain::{BusRouteStatus, Journey, JourneyLeg, LineStatus, Mode, Severity, Station};
use crate::planner::JourneyOutcome;

/// Initial map view: central London.
pub const MAP_CENTER: (f64, f64) = (51.5074, -0.1278);
pub const MAP_ZOOM: u8 = 11;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The dashboard.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub summary: SummaryView,
    pub line_options: Vec<OptionView>,
    pub status_options: Vec<OptionView>,
    pub selected_alerts: Vec<AlertView>,
    pub disruption_alerts: Vec<AlertView>,
    pub filtered_lines: Vec<LineRowView>,
    pub route_query: String,
    /// `None` when no route search was made.
    pub route_results: Option<Vec<BusRowView>>,
    pub bus_table: Vec<BusRowView>,
    pub status_chart: Vec<ChartBarView>,
    pub mode_chart: Vec<ChartBarView>,
    pub from_options: Vec<OptionView>,
    pub to_options: Vec<OptionView>,
    /// `None` until both journey stations are chosen.
    pub journey: Option<JourneySectionView>,
}

// ============================================================================
// Colour tables
// ============================================================================

/// Marker colour on the station map.
pub fn map_color(status: &Severity) -> &'static str {
    match status {
        Severity::GoodService => "green",
        Severity::MinorDelays => "orange",
        Severity::SevereDelays => "red",
        Severity::PartClosure => "darkred",
        _ => "gray",
    }
}

/// Bar colour on the status chart.
pub fn chart_color(status: &Severity) -> &'static str {
    match status {
        Severity::ServiceClosed => "purple",
        other => map_color(other),
    }
}

/// CSS class for a status cell in the line and bus tables.
pub fn status_css_class(status: &Severity) -> Option<&'static str> {
    match status {
        Severity::GoodService => Some("good"),
        Severity::MinorDelays => Some("minor"),
        Severity::SevereDelays => Some("severe"),
        Severity::PartClosure => Some("part-closure"),
        _ => None,
    }
}

/// Icon shown next to a journey leg. Modes without one get an empty string.
pub fn mode_icon(mode: &Mode) -> &'static str {
    match mode.as_str() {
        "Walking" => "🚶",
        "Bus" => "🚌",
        "Tube" => "🚇",
        "Dlr" => "🚈",
        "Overground" | "Elizabeth-line" => "🚆",
        _ => "",
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Network KPIs, formatted.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub station_count: usize,
    pub affected_station_count: usize,
    pub line_count: usize,
    pub disrupted_line_count: usize,
    pub disrupted_line_percent: String,
    pub good_line_percent: String,
}

impl SummaryView {
    pub fn from_summary(summary: &NetworkSummary) -> Self {
        Self {
            station_count: summary.station_count,
            affected_station_count: summary.affected_station_count,
            line_count: summary.line_count,
            disrupted_line_count: summary.disrupted_line_count,
            disrupted_line_percent: format!("{:.1}%", summary.disrupted_line_percent),
            good_line_percent: format!("{:.1}%", summary.good_line_percent),
        }
    }
}

/// An entry in a `<select>`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

impl OptionView {
    /// Options for `values`, marking those present in `selected`.
    pub fn list<S: AsRef<str>>(values: &[String], selected: &[S]) -> Vec<Self> {
        values
            .iter()
            .map(|v| OptionView {
                value: v.clone(),
                selected: selected.iter().any(|s| s.as_ref() == v),
            })
            .collect()
    }
}

/// A status callout.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertView {
    pub level: &'static str,
    pub text: String,
}

impl AlertView {
    pub fn from_line_alert(alert: &LineAlert) -> Self {
        let icon = match alert.level {
            AlertLevel::Success => "✅",
            AlertLevel::Warning => "⚠️",
            AlertLevel::Error => "🚨",
        };
        Self {
            level: alert.level.as_str(),
            text: format!("{icon} {}: {}", alert.line_name, alert.status),
        }
    }

    /// A disruption alert, always shown as a warning.
    pub fn disruption(status: &LineStatus) -> Self {
        Self {
            level: AlertLevel::Warning.as_str(),
            text: format!("⚠️ {}: {}", status.line_name, status.status),
        }
    }
}

/// A row of the filtered line table.
#[derive(Debug, Clone)]
pub struct LineRowView {
    pub line_name: String,
    pub status: String,
    pub css_class: &'static str,
}

impl LineRowView {
    pub fn from_status(status: &LineStatus) -> Self {
        Self {
            line_name: status.line_name.clone(),
            status: status.status.to_string(),
            css_class: status_css_class(&status.status).unwrap_or_default(),
        }
    }
}

/// A row of the bus table.
#[derive(Debug, Clone)]
pub struct BusRowView {
    pub route_name: String,
    pub status: String,
    pub reason: String,
    pub css_class: &'static str,
}

impl BusRowView {
    pub fn from_bus(bus: &BusRouteStatus) -> Self {
        Self {
            route_name: bus.route_name.clone(),
            status: bus.status.to_string(),
            reason: bus.reason.clone().unwrap_or_default(),
            css_class: status_css_class(&bus.status).unwrap_or_default(),
        }
    }
}

/// One bar of a horizontal bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBarView {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    /// Bar length relative to the largest bar.
    pub width_percent: usize,
}

/// Bars for the lines-per-status chart.
pub fn status_chart(counts: &[StatusCount]) -> Vec<ChartBarView> {
    let max = counts.iter().map(|c| c.lines).max().unwrap_or(0);
    counts
        .iter()
        .map(|c| ChartBarView {
            label: c.status.to_string(),
            value: c.lines,
            color: chart_color(&c.status),
            width_percent: bar_width(c.lines, max),
        })
        .collect()
}

/// Bars for disrupted lines by transport mode.
pub fn mode_chart(split: &ModeDisruption) -> Vec<ChartBarView> {
    let max = split.tube.max(split.other);
    vec![
        ChartBarView {
            label: "Tube".into(),
            value: split.tube,
            color: "#1f77b4",
            width_percent: bar_width(split.tube, max),
        },
        ChartBarView {
            label: "Other".into(),
            value: split.other,
            color: "#ff7f0e",
            width_percent: bar_width(split.other, max),
        },
    ]
}

fn bar_width(value: usize, max: usize) -> usize {
    if max == 0 { 0 } else { value * 100 / max }
}

/// A station marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub radius: usize,
    pub popup: Vec<PopupRow>,
}

/// One line in a marker popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupRow {
    pub line: String,
    pub status: String,
}

/// Markers for every station that serves at least one line.
pub fn station_markers(stations: &[Station], statuses: &[LineStatus]) -> Vec<MarkerView> {
    let index = StatusIndex::new(statuses);
    station_disruptions(stations, statuses)
        .into_iter()
        .map(|d| MarkerView {
            name: d.station.name.clone(),
            latitude: d.station.latitude,
            longitude: d.station.longitude,
            color: map_color(&d.worst_status),
            radius: 5 + d.station.lines.len(),
            popup: d
                .station
                .lines
                .iter()
                .map(|line| PopupRow {
                    line: line.clone(),
                    status: index
                        .get(line)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Unknown".to_string()),
                })
                .collect(),
        })
        .collect()
}

/// The journey planner result area.
#[derive(Debug, Clone)]
pub struct JourneySectionView {
    pub message: Option<String>,
    pub is_error: bool,
    pub options: Vec<JourneyView>,
}

impl JourneySectionView {
    pub fn from_outcome(outcome: &JourneyOutcome) -> Self {
        let options = match outcome {
            JourneyOutcome::Found(journeys) => journeys
                .iter()
                .enumerate()
                .map(|(i, j)| JourneyView::from_journey(i, j))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            message: outcome.message(),
            is_error: outcome.is_error(),
            options,
        }
    }
}

/// One journey option.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyView {
    /// `Option N`, counting from one.
    pub title: String,
    pub duration: String,
    pub legs: Vec<LegView>,
    /// `None` when no leg has usable times.
    pub mode_summary: Option<String>,
}

impl JourneyView {
    /// Create from the `index`-th journey option.
    pub fn from_journey(index: usize, journey: &Journey) -> Self {
        let duration = match journey.duration_minutes {
            Some(mins) => format!("{mins} mins"),
            None => "Unknown".to_string(),
        };
        let summary = mode_summary(&mode_aggregate(&journey.legs));

        Self {
            title: format!("Option {}", index + 1),
            duration,
            legs: journey.legs.iter().map(LegView::from_leg).collect(),
            mode_summary: (!summary.is_empty()).then_some(summary),
        }
    }
}

/// One leg of a journey option.
#[derive(Debug, Clone, PartialEq)]
pub struct LegView {
    pub icon: &'static str,
    pub name: String,
    pub departure: String,
    pub arrival: String,
    pub disruption: Option<String>,
}

impl LegView {
    pub fn from_leg(leg: &JourneyLeg) -> Self {
        Self {
            icon: mode_icon(&leg.mode),
            name: leg.display_name(),
            departure: leg.departure.display_time(),
            arrival: leg.arrival.display_time(),
            disruption: leg.disruption_note.clone(),
        }
    }
}

/// `🚌 Bus: 25 min | 🚶 Walking: 5 min`
pub fn mode_summary(totals: &ModeTotals) -> String {
    totals
        .iter()
        .map(|(mode, minutes)| match mode_icon(mode) {
            "" => format!("{mode}: {minutes} min"),
            icon => format!("{icon} {mode}: {minutes} min"),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
