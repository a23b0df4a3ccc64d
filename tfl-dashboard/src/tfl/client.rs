//! TfL Unified API HTTP client.
//!
//! Provides async methods for the four read-only endpoints the dashboard
//! uses. The app key travels as the `app_key` query parameter.

use reqwest::{IntoUrl, Response, Url};
use serde::de::DeserializeOwned;

use crate::domain::{BusRouteStatus, Journey, LineStatus, NaptanId, Station};

use super::TransitApi;
use super::convert::{
    convert_bus_statuses, convert_journeys, convert_line_statuses, convert_stop_points,
};
use super::error::TflError;
use super::types::{JourneyResponse, Line, StopPointsResponse, decode_records};

/// Default base URL for the TfL Unified API.
pub const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// App key, sent as `app_key`. Anonymous requests are allowed but
    /// heavily rate limited.
    pub app_key: Option<String>,
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a new config with the given app key.
    pub fn new(app_key: Option<String>) -> Self {
        Self {
            app_key: app_key.filter(|k| !k.is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// Issue a GET against `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TflError> {
        self.get_url(format!("{}{}", self.base_url, path)).await
    }

    /// Issue a GET against a full URL and decode the JSON body.
    async fn get_url<T: DeserializeOwned>(&self, url: impl IntoUrl) -> Result<T, TflError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key)]);
        }

        let response = request.send().await?;
        let body = check_status(response).await?.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// URL of the journey planner between two stops. Ids are percent-encoded
    /// as single path segments.
    pub fn journey_url(&self, from: &NaptanId, to: &NaptanId) -> Result<Url, TflError> {
        let invalid = |reason: String| TflError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".into()))?
            .pop_if_empty()
            .extend(["Journey", "JourneyResults", from.as_str(), "to", to.as_str()]);
        Ok(url)
    }

    /// Issue a GET against `path` returning a JSON array, keeping the
    /// elements that decode.
    async fn get_records<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, TflError> {
        let values: Vec<serde_json::Value> = self.get_json(path).await?;
        Ok(decode_records(values))
    }

    /// Get the raw line status response for one or more modes.
    pub async fn get_line_status_raw(&self, modes: &[String]) -> Result<Vec<Line>, TflError> {
        self.get_records(&format!("/Line/Mode/{}/Status", modes.join(",")))
            .await
    }
}

/// Map non-success statuses to errors.
async fn check_status(response: Response) -> Result<Response, TflError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TflError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TflError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TflError::ApiError {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    Ok(response)
}

impl TransitApi for TflClient {
    async fn stop_points(&self, mode: &str) -> Result<Vec<Station>, TflError> {
        let response = self.get_stop_points_raw(mode).await?;
        Ok(convert_stop_points(&response))
    }

    async fn line_statuses(&self, modes: &[String]) -> Result<Vec<LineStatus>, TflError> {
        let lines = self.get_line_status_raw(modes).await?;
        Ok(convert_line_statuses(&lines))
    }

    async fn bus_statuses(&self) -> Result<Vec<BusRouteStatus>, TflError> {
        let lines: Vec<Line> = self.get_records("/Line/Mode/bus/Status").await?;
        Ok(convert_bus_statuses(&lines))
    }

    async fn journeys(&self, from: &NaptanId, to: &NaptanId) -> Result<Vec<Journey>, TflError> {
        let response: JourneyResponse = self.get_url(self.journey_url(from, to)?).await?;
        Ok(convert_journeys(&response))
    }
}
