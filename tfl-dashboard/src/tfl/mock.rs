//! Mock TfL client for running without API access.
//!
//! Loads recorded API responses from JSON files and serves them as if they
//! were live responses. Expected files in the data directory:
//!
//! - `stops_{mode}.json`: `/StopPoint/Mode/{mode}` response
//! - `line_status.json`: `/Line/Mode/{modes}/Status` response
//! - `bus_status.json`: `/Line/Mode/bus/Status` response
//! - `journey.json`: `/Journey/JourneyResults` response (served for any pair)
//!
//! Any file may be absent; requests that need it then fail, which exercises
//! the same degraded paths as an unreachable upstream.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{BusRouteStatus, Journey, LineStatus, NaptanId, Station};

use super::TransitApi;
use super::convert::{
    convert_bus_statuses, convert_journeys, convert_line_statuses, convert_stop_points,
};
use super::error::TflError;
use super::types::{JourneyResponse, Line, StopPointsResponse, decode_records};

#[derive(Debug, Default)]
struct Fixtures {
    stops: HashMap<String, StopPointsResponse>,
    line_status: Option<Vec<Line>>,
    bus_status: Option<Vec<Line>>,
    journey: Option<JourneyResponse>,
}

/// Mock TfL client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockTflClient {
    fixtures: Arc<Fixtures>,
}

impl MockTflClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TflError> {
        let data_dir = data_dir.as_ref();
        let mut fixtures = Fixtures::default();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TflError::Mock(format!("failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry =
                entry.map_err(|e| TflError::Mock(format!("failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match stem {
                "line_status" => fixtures.line_status = Some(decode_records(load(&path)?)),
                "bus_status" => fixtures.bus_status = Some(decode_records(load(&path)?)),
                "journey" => fixtures.journey = Some(load(&path)?),
                _ => {
                    if let Some(mode) = stem.strip_prefix("stops_") {
                        fixtures.stops.insert(mode.to_lowercase(), load(&path)?);
                    }
                }
            }
        }

        Ok(Self {
            fixtures: Arc::new(fixtures),
        })
    }

    /// Modes that have stop point fixtures.
    pub fn available_modes(&self) -> Vec<String> {
        let mut modes: Vec<String> = self.fixtures.stops.keys().cloned().collect();
        modes.sort();
        modes
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, TflError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TflError::Mock(format!("failed to read {:?}: {}", path, e)))?;

    serde_json::from_str(&json).map_err(|e| TflError::Json {
        message: format!("{:?}: {}", path, e),
        body: None,
    })
}

fn missing(what: &str) -> TflError {
    TflError::Mock(format!("no {what} fixture"))
}

impl TransitApi for MockTflClient {
    async fn stop_points(&self, mode: &str) -> Result<Vec<Station>, TflError> {
        let response = self
            .fixtures
            .stops
            .get(&mode.to_lowercase())
            .ok_or_else(|| missing(&format!("stops_{mode}")))?;
        Ok(convert_stop_points(response))
    }

    async fn line_statuses(&self, _modes: &[String]) -> Result<Vec<LineStatus>, TflError> {
        let lines = self
            .fixtures
            .line_status
            .as_ref()
            .ok_or_else(|| missing("line_status"))?;
        Ok(convert_line_statuses(lines))
    }

    async fn bus_statuses(&self) -> Result<Vec<BusRouteStatus>, TflError> {
        let lines = self
            .fixtures
            .bus_status
            .as_ref()
            .ok_or_else(|| missing("bus_status"))?;
        Ok(convert_bus_statuses(lines))
    }

    async fn journeys(&self, _from: &NaptanId, _to: &NaptanId) -> Result<Vec<Journey>, TflError> {
        let response = self
            .fixtures
            .journey
            .as_ref()
            .ok_or_else(|| missing("journey"))?;
        Ok(convert_journeys(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use tempfile::tempdir;

    const SAMPLE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock_tfl");

    #[tokio::test]
    async fn load_sample_data() {
        let client = MockTflClient::new(SAMPLE_DIR).unwrap();
        assert!(client.available_modes().contains(&"tube".to_string()));

        let stations = client.stop_points("tube").await.unwrap();
        assert!(!stations.is_empty());
        assert!(stations.iter().all(|s| !s.id.as_str().is_empty()));

        let lines = client.line_statuses(&["tube".into()]).await.unwrap();
        assert!(lines.iter().any(|l| l.line_name == "Central"));

        let buses = client.bus_statuses().await.unwrap();
        assert!(!buses.is_empty());
    }

    #[tokio::test]
    async fn sample_journey_fixture() {
        let client = MockTflClient::new(SAMPLE_DIR).unwrap();
        let from = NaptanId::parse("940GZZLUOXC").unwrap();
        let to = NaptanId::parse("940GZZLUBNK").unwrap();

        let journeys = client.journeys(&from, &to).await.unwrap();
        assert!(!journeys.is_empty());
        assert!(!journeys[0].legs.is_empty());
    }

    #[tokio::test]
    async fn missing_fixtures_are_errors() {
        let dir = tempdir().unwrap();
        let client = MockTflClient::new(dir.path()).unwrap();

        assert!(matches!(
            client.stop_points("tube").await,
            Err(TflError::Mock(_))
        ));
        assert!(client.line_statuses(&[]).await.is_err());
        assert!(client.bus_statuses().await.is_err());
    }

    #[tokio::test]
    async fn fixture_files_are_picked_up_by_name() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("line_status.json"),
            r#"[{"id": "victoria", "name": "Victoria",
                 "lineStatuses": [{"statusSeverityDescription": "Severe Delays"}]}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let client = MockTflClient::new(dir.path()).unwrap();
        let lines = client.line_statuses(&[]).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].status, Severity::SevereDelays);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("bus_status.json"),
            r#"[{"id": "25", "name": "25",
                 "lineStatuses": [{"statusSeverityDescription": "Good Service"}]},
                {"id": "x", "name": null},
                {"id": "y", "name": ["73"]}]"#,
        )
        .unwrap();

        let client = MockTflClient::new(dir.path()).unwrap();
        let buses = client.bus_statuses().await.unwrap();

        assert_eq!(buses.len(), 2);
        assert_eq!(buses[0].route_name, "25");
        assert_eq!(buses[1].route_name, "");
    }

    #[test]
    fn malformed_fixture_fails_to_load() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bus_status.json"), "{not json").unwrap();

        assert!(matches!(
            MockTflClient::new(dir.path()),
            Err(TflError::Json { .. })
        ));
    }

    #[test]
    fn missing_directory_fails() {
        assert!(MockTflClient::new("/nonexistent/mock/dir").is_err());
    }
}
