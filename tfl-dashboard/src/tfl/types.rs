//! TfL Unified API response DTOs.
//!
//! These types map directly to the JSON the API returns. They use `Option`
//! and `#[serde(default)]` liberally because TfL omits fields rather than
//! sending nulls, and some stop points are known to be incomplete.
//!
//! Arrays of records are decoded element by element: a record that does not
//! fit its DTO is dropped and the rest of the response survives.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decode each value on its own, dropping the ones that do not fit `T`.
pub fn decode_records<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(
                    record = std::any::type_name::<T>(),
                    error = %e,
                    "skipping malformed record"
                );
                None
            }
        })
        .collect()
}

/// `deserialize_with` form of [`decode_records`]. A `null` array is empty.
fn lenient<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(decode_records(values.unwrap_or_default()))
}

/// Response from `/StopPoint/Mode/{mode}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub stop_points: Vec<StopPoint>,
}

/// A single stop point.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    /// Display name, e.g. "Oxford Circus Underground Station".
    pub common_name: Option<String>,

    pub lat: Option<f64>,

    pub lon: Option<f64>,

    /// Stable NaPTAN identifier.
    pub naptan_id: Option<String>,

    /// Stop classification; metro stations are `NaptanMetroStation`.
    pub stop_type: Option<String>,

    /// Lines serving this stop.
    #[serde(default, deserialize_with = "lenient")]
    pub lines: Vec<Identifier>,
}

/// A named reference to another TfL entity (a line, a mode, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One entry of the `/Line/Mode/{modes}/Status` response array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: Option<String>,

    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub line_statuses: Vec<LineStatusEntry>,
}

/// A status entry for a line. TfL may attach several; the first is current.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusEntry {
    pub status_severity_description: Option<String>,

    /// Free-text explanation, present only when disrupted.
    pub reason: Option<String>,
}

/// Response from `/Journey/JourneyResults/{from}/to/{to}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub journeys: Vec<JourneyDto>,
}

/// A journey option.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// Total duration in minutes.
    pub duration: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub legs: Vec<LegDto>,
}

/// One leg of a journey option.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub mode: Option<Identifier>,

    pub line: Option<Identifier>,

    /// Lines that can be used for this leg; the first is shown when `line`
    /// is absent.
    #[serde(default, deserialize_with = "lenient")]
    pub route_options: Vec<Identifier>,

    pub departure_time: Option<String>,

    pub arrival_time: Option<String>,

    #[serde(default, alias = "disruption", deserialize_with = "lenient")]
    pub disruptions: Vec<DisruptionDto>,
}

/// A disruption attached to a journey leg.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisruptionDto {
    pub description: Option<String>,
}
