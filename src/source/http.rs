//! Blocking HTTP client for the countries API.
//!
//! Endpoints, relative to the configured base URL:
//!
//! - `GET countries?page=&limit=[&timezone=]` for [`Endpoint::ListAll`]
//! - `GET countries/search?page=&limit=[&name=][&region=a,b][&timezone=]` for
//!   [`Endpoint::Search`]
//!
//! Successful responses carry `{ "data": [Country, ...] }`. Error responses may
//! carry `{ "message": "..." }`, which is surfaced to the user.

use crate::model::{Country, Endpoint, FetchError, PageRequest};
use crate::source::CountrySource;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct PagePayload {
    data: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

/// Countries API client.
#[derive(Debug, Clone)]
pub struct HttpCountrySource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpCountrySource {
    /// Create a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cbrowse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint variant.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

impl CountrySource for HttpCountrySource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError> {
        let url = self.endpoint_url(request.query.endpoint);
        let pairs = request.query_pairs();
        debug!(url = %url, params = ?pairs, "GET");

        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        parse_page(&body)
    }
}

/// Parse a `{ "data": [...] }` payload.
///
/// # Errors
///
/// Returns `FetchError::Decode` if the body is not valid JSON or lacks `data`.
pub fn parse_page(body: &str) -> Result<Vec<Country>, FetchError> {
    serde_json::from_str::<PagePayload>(body)
        .map(|payload| payload.data)
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Extract `message` from an error body, if it is JSON and has one.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.trim().is_empty())
}
