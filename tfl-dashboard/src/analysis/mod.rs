//! Derived views over fetched TfL data.
//!
//! Everything here is a pure function of its inputs and is re-evaluated
//! on every request:
//! - `disruption`: joins stations against line statuses
//! - `filter`: line and bus route selection
//! - `summary`: network KPIs and chart aggregates
//! - `journey`: per-mode time totals for journey options

mod disruption;
mod filter;
mod journey;
mod summary;

pub use disruption::{
    StationDisruption, StatusIndex, disrupted_lines, station_disruptions,
    worst_status_for_station,
};
pub use filter::{
    AlertLevel, LineAlert, disruption_alerts, filter_lines, line_options, search_bus_routes,
    selected_line_alerts, sorted_bus_table, status_options,
};
pub use journey::{ModeTotals, mode_aggregate};
pub use summary::{
    ModeDisruption, NetworkSummary, StatusCount, TUBE_LINES, disruption_by_mode, is_tube_line,
    network_summary, status_counts,
};
