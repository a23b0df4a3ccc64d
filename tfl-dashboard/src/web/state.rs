//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedTflClient, NetworkSnapshot};
use crate::config::DashboardConfig;
use crate::tfl::TflBackend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached TfL API client
    pub tfl: Arc<CachedTflClient<TflBackend>>,

    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tfl: CachedTflClient<TflBackend>, config: DashboardConfig) -> Self {
        Self {
            tfl: Arc::new(tfl),
            config: Arc::new(config),
        }
    }

    /// Stations, line statuses and bus statuses for the configured modes.
    pub async fn snapshot(&self) -> NetworkSnapshot {
        self.tfl
            .snapshot(&self.config.station_modes, &self.config.line_modes)
            .await
    }
}
