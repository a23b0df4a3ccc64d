//! TfL client error types.

use std::fmt;

/// Errors from the TfL HTTP client.
#[derive(Debug)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid or missing app key
    Unauthorized,

    /// The configured base URL cannot carry a request path
    InvalidUrl { url: String, reason: String },

    /// Fixture data could not be loaded or has no entry for the request
    Mock(String),
}

impl fmt::Display for TflError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TflError::Http(e) => write!(f, "HTTP error: {e}"),
            TflError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TflError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TflError::RateLimited => write!(f, "rate limited by TfL API"),
            TflError::Unauthorized => write!(f, "unauthorized: check TFL_KEY"),
            TflError::InvalidUrl { url, reason } => write!(f, "invalid base URL {url}: {reason}"),
            TflError::Mock(msg) => write!(f, "mock data error: {msg}"),
        }
    }
}

impl std::error::Error for TflError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TflError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TflError {
    fn from(err: reqwest::Error) -> Self {
        TflError::Http(err)
    }
}
