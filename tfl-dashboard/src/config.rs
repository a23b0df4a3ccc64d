//! Dashboard configuration, read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::tfl::{DEFAULT_BASE_URL, TflConfig};

/// Modes whose stations are shown on the map and in the journey planner.
pub const DEFAULT_STATION_MODES: &[&str] = &["tube"];

/// Modes whose line statuses are fetched.
pub const DEFAULT_LINE_MODES: &[&str] = &["tube", "overground", "dlr", "river-bus"];

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// TfL `app_key`. Requests are sent without one when unset.
    pub tfl_key: Option<String>,

    /// Upstream base URL.
    pub base_url: String,

    /// When set, serve fixtures from this directory instead of calling TfL.
    pub mock_dir: Option<PathBuf>,

    /// Listen address.
    pub addr: SocketAddr,

    /// Static asset directory.
    pub static_dir: String,

    /// How long fetched collections stay cached.
    pub cache_ttl: Duration,

    /// Upstream HTTP timeout in seconds.
    pub timeout_secs: u64,

    pub station_modes: Vec<String>,
    pub line_modes: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tfl_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_dir: None,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            station_modes: to_strings(DEFAULT_STATION_MODES),
            line_modes: to_strings(DEFAULT_LINE_MODES),
        }
    }
}

impl DashboardConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparsable values are reported and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let tfl_key = var("TFL_KEY");
        let mock_dir = var("TFL_MOCK_DIR").map(PathBuf::from);
        if tfl_key.is_none() && mock_dir.is_none() {
            warn!("TFL_KEY not set. Requests will be sent without an app key.");
        }

        let addr = match var("DASHBOARD_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid DASHBOARD_ADDR, using {DEFAULT_ADDR}");
                defaults.addr
            }),
            None => defaults.addr,
        };

        let cache_ttl_secs = parse_secs(var("TFL_CACHE_TTL_SECS"), "TFL_CACHE_TTL_SECS")
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let timeout_secs =
            parse_secs(var("TFL_TIMEOUT_SECS"), "TFL_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            tfl_key,
            base_url: var("TFL_BASE_URL").unwrap_or(defaults.base_url),
            mock_dir,
            addr,
            static_dir: var("DASHBOARD_STATIC_DIR").unwrap_or(defaults.static_dir),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            timeout_secs,
            station_modes: defaults.station_modes,
            line_modes: defaults.line_modes,
        }
    }

    /// Upstream client settings.
    pub fn tfl_config(&self) -> TflConfig {
        TflConfig::new(self.tfl_key.clone())
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout_secs)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.cache_ttl,
            ..CacheConfig::default()
        }
    }
}

fn parse_secs(raw: Option<String>, name: &str) -> Option<u64> {
    let raw = raw?;
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!(value = %raw, "invalid {name}, using default");
            None
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
