//! Caching layer for TfL API responses.
//!
//! Each of the three dashboard fetches (stations, line status, bus status)
//! is cached independently with a short TTL, keyed by the operation's
//! arguments. Upstream failures degrade to empty results so every view
//! stays renderable; failures are never cached, so the next request
//! retries.
//!
//! Journey requests are passed through uncached.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use crate::domain::{BusRouteStatus, Journey, LineStatus, NaptanId, Station};
use crate::tfl::{TflError, TransitApi};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per operation.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 64,
        }
    }
}

/// Normalize a set of mode identifiers: trimmed, lower-cased, sorted,
/// de-duplicated, empties removed.
pub fn normalize_modes<S: AsRef<str>>(modes: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = modes
        .iter()
        .map(|m| m.as_ref().trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// The three collections one dashboard render reads.
#[derive(Debug, Clone, Default)]
pub struct NetworkSnapshot {
    pub stations: Arc<Vec<Station>>,
    pub lines: Arc<Vec<LineStatus>>,
    pub buses: Arc<Vec<BusRouteStatus>>,
}

/// TfL client with caching and graceful degradation.
pub struct CachedTflClient<A> {
    api: A,
    /// Stations, keyed by mode.
    stations: MokaCache<String, Arc<Vec<Station>>>,
    /// Line statuses, keyed by comma-joined normalized modes.
    lines: MokaCache<String, Arc<Vec<LineStatus>>>,
    /// Bus statuses; there is only one key.
    buses: MokaCache<(), Arc<Vec<BusRouteStatus>>>,
}

impl<A: TransitApi> CachedTflClient<A> {
    /// Create a new cached client.
    pub fn new(api: A, config: &CacheConfig) -> Self {
        Self {
            api,
            stations: build_cache(config),
            lines: build_cache(config),
            buses: build_cache(config),
        }
    }

    /// Stations for all `modes`, merged in mode order.
    ///
    /// A failing mode contributes no stations; the others still do. A
    /// station listed under several modes appears once.
    pub async fn fetch_stations<S: AsRef<str>>(&self, modes: &[S]) -> Arc<Vec<Station>> {
        let modes = normalize_modes(modes);
        let per_mode = join_all(modes.iter().map(|m| self.fetch_stations_for_mode(m))).await;

        if per_mode.len() == 1 {
            return per_mode.into_iter().next().unwrap_or_default();
        }

        let mut seen = HashSet::new();
        let merged: Vec<Station> = per_mode
            .iter()
            .flat_map(|stations| stations.iter())
            .filter(|s| seen.insert(s.id.clone()))
            .cloned()
            .collect();

        Arc::new(merged)
    }

    async fn fetch_stations_for_mode(&self, mode: &str) -> Arc<Vec<Station>> {
        if let Some(cached) = self.stations.get(mode).await {
            debug!(mode, "stations cache hit");
            return cached;
        }

        match self.api.stop_points(mode).await {
            Ok(stations) => {
                info!(mode, count = stations.len(), "fetched stations");
                let entry = Arc::new(stations);
                self.stations.insert(mode.to_string(), entry.clone()).await;
                entry
            }
            Err(e) => {
                warn!(mode, error = %e, "failed to fetch stations");
                Arc::default()
            }
        }
    }

    /// Current status of every line of `modes`, empty if TfL is unavailable.
    pub async fn fetch_line_status<S: AsRef<str>>(&self, modes: &[S]) -> Arc<Vec<LineStatus>> {
        let modes = normalize_modes(modes);
        if modes.is_empty() {
            return Arc::default();
        }

        let key = modes.join(",");
        if let Some(cached) = self.lines.get(&key).await {
            debug!(modes = %key, "line status cache hit");
            return cached;
        }

        match self.api.line_statuses(&modes).await {
            Ok(lines) => {
                info!(modes = %key, count = lines.len(), "fetched line status");
                let entry = Arc::new(lines);
                self.lines.insert(key, entry.clone()).await;
                entry
            }
            Err(e) => {
                warn!(modes = %key, error = %e, "failed to fetch line status");
                Arc::default()
            }
        }
    }

    /// Current status of every bus route, empty if TfL is unavailable.
    pub async fn fetch_bus_status(&self) -> Arc<Vec<BusRouteStatus>> {
        if let Some(cached) = self.buses.get(&()).await {
            debug!("bus status cache hit");
            return cached;
        }

        match self.api.bus_statuses().await {
            Ok(buses) => {
                info!(count = buses.len(), "fetched bus status");
                let entry = Arc::new(buses);
                self.buses.insert((), entry.clone()).await;
                entry
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch bus status");
                Arc::default()
            }
        }
    }

    /// Fetch all three collections concurrently.
    pub async fn snapshot<S: AsRef<str>>(
        &self,
        station_modes: &[S],
        line_modes: &[S],
    ) -> NetworkSnapshot {
        let (stations, lines, buses) = tokio::join!(
            self.fetch_stations(station_modes),
            self.fetch_line_status(line_modes),
            self.fetch_bus_status(),
        );

        NetworkSnapshot {
            stations,
            lines,
            buses,
        }
    }

    /// Journey options between two stations. Not cached.
    pub async fn journeys(&self, from: &NaptanId, to: &NaptanId) -> Result<Vec<Journey>, TflError> {
        self.api.journeys(from, to).await
    }

    /// Access the underlying API for operations that bypass the cache.
    pub fn api(&self) -> &A {
        &self.api
    }
}

fn build_cache<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}
