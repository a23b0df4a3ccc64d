//! Conversion from TfL DTOs to domain types.
//!
//! Upstream data is known to be incomplete for some entries, so records
//! that cannot be used are skipped (and logged at debug level) rather than
//! failing the whole response.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{
    BusRouteStatus, Journey, JourneyLeg, LineStatus, Mode, NaptanId, Severity, Station, Timestamp,
};

use super::types::{JourneyDto, JourneyResponse, LegDto, Line, StopPoint, StopPointsResponse};

/// `stopType` value that marks a metro station.
pub const METRO_STATION_STOP_TYPE: &str = "NaptanMetroStation";

/// Convert a stop points response into metro stations.
///
/// Keeps only metro stations with coordinates and an id. If the same id
/// appears twice, the first record wins.
pub fn convert_stop_points(response: &StopPointsResponse) -> Vec<Station> {
    let mut seen = HashSet::new();
    let mut stations = Vec::with_capacity(response.stop_points.len());

    for stop in &response.stop_points {
        if stop.stop_type.as_deref() != Some(METRO_STATION_STOP_TYPE) {
            continue;
        }

        let Some(station) = convert_stop_point(stop) else {
            debug!(
                name = stop.common_name.as_deref().unwrap_or(""),
                "skipping incomplete stop point"
            );
            continue;
        };

        if seen.insert(station.id.clone()) {
            stations.push(station);
        } else {
            debug!(id = %station.id, "skipping duplicate stop point");
        }
    }

    stations
}

/// Convert a single stop point, returning `None` if a required field is missing.
fn convert_stop_point(stop: &StopPoint) -> Option<Station> {
    let latitude = stop.lat?;
    let longitude = stop.lon?;
    let id = NaptanId::parse(stop.naptan_id.as_deref()?).ok()?;

    let lines = stop
        .lines
        .iter()
        .filter_map(|l| l.name.clone())
        .collect();

    Some(Station {
        name: stop.common_name.clone().unwrap_or_default(),
        latitude,
        longitude,
        id,
        lines,
    })
}

/// Severity of the current (first) status entry, `Good Service` if none.
fn current_severity(line: &Line) -> Severity {
    line.line_statuses
        .first()
        .and_then(|s| s.status_severity_description.as_deref())
        .map(Severity::from_description)
        .unwrap_or_default()
}

/// Convert a line status response. Missing ids and names become empty.
pub fn convert_line_statuses(lines: &[Line]) -> Vec<LineStatus> {
    lines
        .iter()
        .map(|line| LineStatus {
            line_id: line.id.clone().unwrap_or_default(),
            line_name: line.name.clone().unwrap_or_default(),
            status: current_severity(line),
        })
        .collect()
}

/// Convert a bus line status response.
///
/// A blank reason is treated the same as a missing one.
pub fn convert_bus_statuses(lines: &[Line]) -> Vec<BusRouteStatus> {
    lines
        .iter()
        .map(|line| {
            let reason = line
                .line_statuses
                .first()
                .and_then(|s| s.reason.as_deref())
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string);

            BusRouteStatus {
                route_name: line.name.clone().unwrap_or_default(),
                status: current_severity(line),
                reason,
            }
        })
        .collect()
}

/// Convert a journey planner response.
pub fn convert_journeys(response: &JourneyResponse) -> Vec<Journey> {
    response.journeys.iter().map(convert_journey).collect()
}

fn convert_journey(dto: &JourneyDto) -> Journey {
    Journey {
        duration_minutes: dto.duration,
        legs: dto.legs.iter().map(convert_leg).collect(),
    }
}

fn convert_leg(dto: &LegDto) -> JourneyLeg {
    let mode = dto
        .mode
        .as_ref()
        .and_then(|m| m.name.as_deref())
        .map(Mode::new)
        .unwrap_or_else(Mode::unknown);

    let line_name = dto
        .line
        .as_ref()
        .and_then(|l| l.name.clone())
        .or_else(|| dto.route_options.first().and_then(|r| r.name.clone()))
        .filter(|n| !n.is_empty());

    let disruption_note = dto
        .disruptions
        .first()
        .and_then(|d| d.description.clone())
        .filter(|d| !d.is_empty());

    JourneyLeg {
        mode,
        line_name,
        departure: Timestamp::parse(dto.departure_time.as_deref().unwrap_or("")),
        arrival: Timestamp::parse(dto.arrival_time.as_deref().unwrap_or("")),
        disruption_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfl::types::{DisruptionDto, Identifier, LineStatusEntry};

    fn named(name: &str) -> Identifier {
        Identifier {
            id: None,
            name: Some(name.to_string()),
        }
    }

    fn metro_stop(name: &str, id: &str, lines: &[&str]) -> StopPoint {
        StopPoint {
            common_name: Some(name.to_string()),
            lat: Some(51.515),
            lon: Some(-0.1415),
            naptan_id: Some(id.to_string()),
            stop_type: Some(METRO_STATION_STOP_TYPE.to_string()),
            lines: lines.iter().map(|l| named(l)).collect(),
        }
    }

    fn line(id: &str, name: &str, status: Option<&str>, reason: Option<&str>) -> Line {
        Line {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            line_statuses: status
                .map(|s| {
                    vec![LineStatusEntry {
                        status_severity_description: Some(s.to_string()),
                        reason: reason.map(str::to_string),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn complete_station_survives_unchanged() {
        let resp = StopPointsResponse {
            stop_points: vec![metro_stop(
                "Oxford Circus Underground Station",
                "940GZZLUOXC",
                &["Bakerloo", "Central", "Victoria"],
            )],
        };

        let stations = convert_stop_points(&resp);

        assert_eq!(stations.len(), 1);
        let s = &stations[0];
        assert_eq!(s.name, "Oxford Circus Underground Station");
        assert_eq!(s.latitude, 51.515);
        assert_eq!(s.longitude, -0.1415);
        assert_eq!(s.id.as_str(), "940GZZLUOXC");
        assert_eq!(s.lines, vec!["Bakerloo", "Central", "Victoria"]);
    }

    #[test]
    fn non_metro_stops_are_dropped() {
        let mut bus_stop = metro_stop("Oxford Circus Stop A", "490000173A", &["73"]);
        bus_stop.stop_type = Some("NaptanPublicBusCoachTram".into());

        let mut untyped = metro_stop("Mystery", "940GZZLUXXX", &[]);
        untyped.stop_type = None;

        let resp = StopPointsResponse {
            stop_points: vec![bus_stop, untyped],
        };
        assert!(convert_stop_points(&resp).is_empty());
    }

    #[test]
    fn incomplete_stations_are_dropped() {
        let mut no_lat = metro_stop("A", "940GZZLUAAA", &[]);
        no_lat.lat = None;
        let mut no_lon = metro_stop("B", "940GZZLUBBB", &[]);
        no_lon.lon = None;
        let mut no_id = metro_stop("C", "", &[]);
        no_id.naptan_id = None;
        let empty_id = metro_stop("D", "", &[]);
        let ok = metro_stop("E", "940GZZLUEEE", &[]);

        let resp = StopPointsResponse {
            stop_points: vec![no_lat, no_lon, no_id, empty_id, ok],
        };

        let stations = convert_stop_points(&resp);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "E");
    }

    #[test]
    fn ids_with_spaces_or_slashes_are_kept() {
        let resp = StopPointsResponse {
            stop_points: vec![metro_stop("Odd", "HUB 1/2", &["Central"])],
        };

        let stations = convert_stop_points(&resp);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id.as_str(), "HUB 1/2");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let resp = StopPointsResponse {
            stop_points: vec![
                metro_stop("Bank", "940GZZLUBNK", &["Central"]),
                metro_stop("Bank (dup)", "940GZZLUBNK", &["Northern"]),
            ],
        };

        let stations = convert_stop_points(&resp);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Bank");
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let mut stop = metro_stop("", "940GZZLUAAA", &[]);
        stop.common_name = None;
        let stations = convert_stop_points(&StopPointsResponse {
            stop_points: vec![stop],
        });
        assert_eq!(stations[0].name, "");
    }

    #[test]
    fn line_status_uses_first_entry() {
        let mut l = line("central", "Central", Some("Minor Delays"), None);
        l.line_statuses.push(LineStatusEntry {
            status_severity_description: Some("Good Service".into()),
            reason: None,
        });

        let statuses = convert_line_statuses(&[l]);
        assert_eq!(statuses[0].line_id, "central");
        assert_eq!(statuses[0].line_name, "Central");
        assert_eq!(statuses[0].status, Severity::MinorDelays);
    }

    #[test]
    fn line_without_name_defaults_to_empty() {
        let mut l = line("x", "", Some("Part Closure"), Some("  "));
        l.name = None;

        let statuses = convert_line_statuses(std::slice::from_ref(&l));
        assert_eq!(statuses[0].line_id, "x");
        assert_eq!(statuses[0].line_name, "");
        assert_eq!(statuses[0].status, Severity::PartClosure);

        let buses = convert_bus_statuses(&[l]);
        assert_eq!(buses[0].route_name, "");
        assert_eq!(buses[0].reason, None);
    }

    #[test]
    fn line_without_statuses_is_good_service() {
        let statuses = convert_line_statuses(&[line("dlr", "DLR", None, None)]);
        assert_eq!(statuses[0].status, Severity::GoodService);
    }

    #[test]
    fn bus_reason_is_optional() {
        let lines = vec![
            line("73", "73", Some("Good Service"), None),
            line("25", "25", Some("Minor Delays"), Some("Roadworks on Mile End Road")),
            line("38", "38", Some("Good Service"), Some("   ")),
            line("N8", "N8", None, None),
        ];

        let buses = convert_bus_statuses(&lines);
        assert_eq!(buses[0].reason, None);
        assert_eq!(
            buses[1].reason.as_deref(),
            Some("Roadworks on Mile End Road")
        );
        assert_eq!(buses[1].status, Severity::MinorDelays);
        assert_eq!(buses[2].reason, None);
        assert_eq!(buses[3].status, Severity::GoodService);
        assert_eq!(buses[3].reason, None);
    }

    #[test]
    fn journey_leg_conversion() {
        let resp = JourneyResponse {
            journeys: vec![JourneyDto {
                duration: Some(18),
                legs: vec![
                    LegDto {
                        mode: Some(named("walking")),
                        departure_time: Some("2026-03-15T10:00:00".into()),
                        arrival_time: Some("2026-03-15T10:03:00".into()),
                        ..Default::default()
                    },
                    LegDto {
                        mode: Some(named("tube")),
                        route_options: vec![named("Victoria")],
                        departure_time: Some("2026-03-15T10:05:00".into()),
                        arrival_time: Some("2026-03-15T10:18:00".into()),
                        disruptions: vec![DisruptionDto {
                            description: Some("Lift out of service".into()),
                        }],
                        ..Default::default()
                    },
                ],
            }],
        };

        let journeys = convert_journeys(&resp);
        assert_eq!(journeys.len(), 1);
        let j = &journeys[0];
        assert_eq!(j.duration_minutes, Some(18));
        assert_eq!(j.legs[0].mode.as_str(), "Walking");
        assert_eq!(j.legs[0].line_name, None);
        assert_eq!(j.legs[1].display_name(), "Tube Victoria");
        assert_eq!(
            j.legs[1].disruption_note.as_deref(),
            Some("Lift out of service")
        );
    }

    #[test]
    fn leg_line_takes_precedence_over_route_options() {
        let leg = LegDto {
            mode: Some(named("bus")),
            line: Some(named("73")),
            route_options: vec![named("390")],
            ..Default::default()
        };
        assert_eq!(convert_leg(&leg).line_name.as_deref(), Some("73"));
    }

    #[test]
    fn leg_without_mode_or_times() {
        let leg = convert_leg(&LegDto::default());
        assert_eq!(leg.mode.as_str(), "Unknown");
        assert!(leg.departure.parsed().is_none());
        assert!(leg.arrival.parsed().is_none());
        assert_eq!(leg.duration(), None);
    }
}
