use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::constants::{NWS_ACCEPT, NWS_API_BASE, USER_AGENT};

/// Why an upstream call produced no data
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("request failed with status: {0}")]
    Status(StatusCode),
    #[error("invalid JSON body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the National Weather Service API
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    /// Creates a client against the public API with the default identifier
    pub fn new() -> reqwest::Result<Self> {
        Self::builder().build()
    }

    /// Starts a builder preset with the public API base and default identifier
    pub fn builder() -> NwsClientBuilder {
        NwsClientBuilder::default()
    }

    /// Active alerts lookup for an already-normalized state code
    pub fn alerts_url(&self, state: &str) -> String {
        format!("{}/alerts?area={}", self.base_url, state)
    }

    /// Grid point lookup; coordinates are always rendered with four decimals
    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{:.4},{:.4}", self.base_url, latitude, longitude)
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let result = self.try_fetch(url).await;
        if let Err(e) = &result {
            tracing::error!(url, error = %e, "Error making NWS request");
        }
        result
    }

    async fn try_fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}

/// Settings for an [`NwsClient`]
#[derive(Debug, Clone)]
pub struct NwsClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for NwsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl NwsClientBuilder {
    /// Sets the API base URL; a trailing slash is dropped
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the identifying User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a per-request timeout; `None` keeps the HTTP client default
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client with the fixed `Accept` header installed
    pub fn build(self) -> reqwest::Result<NwsClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(NWS_ACCEPT));

        let mut builder = Client::builder()
            .user_agent(self.user_agent)
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(NwsClient {
            client: builder.build()?,
            base_url: self.base_url,
        })
    }
}
