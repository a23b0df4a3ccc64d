//! TfL Unified API client.
//!
//! This module wraps the four read-only endpoints the dashboard needs:
//! stop points by mode, line status by mode, bus status, and journey
//! planning. Every response is converted to domain types before it leaves
//! the module.
//!
//! The `TransitApi` trait is the seam between fetching and everything
//! downstream; the live client, the fixture-backed mock, and test fakes all
//! implement it.

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod mock;
mod types;

use std::future::Future;

use crate::domain::{BusRouteStatus, Journey, LineStatus, NaptanId, Station};

pub use client::{DEFAULT_BASE_URL, TflClient, TflConfig};
pub use convert::METRO_STATION_STOP_TYPE;
pub use error::TflError;
pub use mock::MockTflClient;
pub use types::{
    DisruptionDto, Identifier, JourneyDto, JourneyResponse, LegDto, Line, LineStatusEntry,
    StopPoint, StopPointsResponse,
};

/// Read access to the transit API, already converted to domain types.
pub trait TransitApi {
    /// Metro stations served by `mode`.
    fn stop_points(&self, mode: &str) -> impl Future<Output = Result<Vec<Station>, TflError>> + Send;

    /// Current status of every line of the given modes.
    fn line_statuses(
        &self,
        modes: &[String],
    ) -> impl Future<Output = Result<Vec<LineStatus>, TflError>> + Send;

    /// Current status of every bus route.
    fn bus_statuses(&self) -> impl Future<Output = Result<Vec<BusRouteStatus>, TflError>> + Send;

    /// Journey options between two stations.
    fn journeys(
        &self,
        from: &NaptanId,
        to: &NaptanId,
    ) -> impl Future<Output = Result<Vec<Journey>, TflError>> + Send;
}

/// The API backend selected at startup.
#[derive(Debug, Clone)]
pub enum TflBackend {
    Live(TflClient),
    Mock(MockTflClient),
}

impl TransitApi for TflBackend {
    async fn stop_points(&self, mode: &str) -> Result<Vec<Station>, TflError> {
        match self {
            TflBackend::Live(c) => c.stop_points(mode).await,
            TflBackend::Mock(c) => c.stop_points(mode).await,
        }
    }

    async fn line_statuses(&self, modes: &[String]) -> Result<Vec<LineStatus>, TflError> {
        match self {
            TflBackend::Live(c) => c.line_statuses(modes).await,
            TflBackend::Mock(c) => c.line_statuses(modes).await,
        }
    }

    async fn bus_statuses(&self) -> Result<Vec<BusRouteStatus>, TflError> {
        match self {
            TflBackend::Live(c) => c.bus_statuses().await,
            TflBackend::Mock(c) => c.bus_statuses().await,
        }
    }

    async fn journeys(&self, from: &NaptanId, to: &NaptanId) -> Result<Vec<Journey>, TflError> {
        match self {
            TflBackend::Live(c) => c.journeys(from, to).await,
            TflBackend::Mock(c) => c.journeys(from, to).await,
        }
    }
}
