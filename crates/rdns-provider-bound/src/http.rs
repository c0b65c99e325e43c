//! HTTP implementation of the remote directory client
//!
//! Talks to the Bound management API: zones and records as REST
//! collections, JSON bodies wrapped in the [`ApiResponse`] envelope.
//!
//! ## Endpoints
//!
//! - `GET    /api/zones`
//! - `POST   /api/zones`
//! - `GET    /api/zones/:id/records`
//! - `POST   /api/zones/:id/records`
//! - `PUT    /api/records/:id`
//! - `DELETE /api/records/:id`
//!
//! Connectivity and protocol failures surface as
//! [`Error::Transport`](rdns_core::Error::Transport); a response that
//! parses into the envelope is handed back as-is for the caller to
//! check its `ok` flag.

use async_trait::async_trait;
use rdns_core::traits::{ApiResponse, DirectoryClient, RecordSummary, ZoneSummary};
use rdns_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Bound management API
///
/// # Security
///
/// The API key is sent as a bearer token and never appears in logs or
/// `Debug` output.
pub struct HttpDirectoryClient {
    /// Base URL including the `/api` prefix
    base_url: String,

    /// API key
    /// Never log this value
    api_key: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpDirectoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectoryClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl HttpDirectoryClient {
    /// Create a new client for the API at `host:port`
    pub fn new(host: &str, port: u16, use_tls: bool, api_key: String) -> Result<Self> {
        if host.is_empty() {
            return Err(Error::config("Bound API host cannot be empty"));
        }
        if api_key.is_empty() {
            return Err(Error::config("Bound API key cannot be empty"));
        }

        let scheme = if use_tls { "https" } else { "http" };
        let base_url = format!("{scheme}://{host}:{port}/api");

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Send a prepared request and decode the response envelope
    ///
    /// Server errors (5xx) are treated as transport failures since the
    /// envelope cannot be trusted; anything else must parse as an
    /// [`ApiResponse`].
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = builder
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            return Err(Error::transport(format!(
                "server error {status}: {body}"
            )));
        }

        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| Error::transport(format!("failed to parse response ({status}): {e}")))
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn list_zones(&self) -> Result<ApiResponse<Vec<ZoneSummary>>> {
        let url = format!("{}/zones", self.base_url);
        self.send(self.client.get(&url)).await
    }

    async fn create_zone(&self, name: &str) -> Result<ApiResponse<ZoneSummary>> {
        let url = format!("{}/zones", self.base_url);
        let payload = serde_json::json!({ "name": name });
        self.send(self.client.post(&url).json(&payload)).await
    }

    async fn list_records(&self, zone_id: &str) -> Result<ApiResponse<Vec<RecordSummary>>> {
        let url = format!("{}/zones/{}/records", self.base_url, zone_id);
        self.send(self.client.get(&url)).await
    }

    async fn create_record(
        &self,
        zone_id: &str,
        name: &str,
        record_class: &str,
        hostname: &str,
    ) -> Result<ApiResponse<RecordSummary>> {
        let url = format!("{}/zones/{}/records", self.base_url, zone_id);
        let payload = serde_json::json!({
            "name": name,
            "type": record_class,
            "form_data": { "name": hostname },
        });
        self.send(self.client.post(&url).json(&payload)).await
    }

    async fn update_record(&self, record_id: &str, hostname: &str) -> Result<ApiResponse<()>> {
        let url = format!("{}/records/{}", self.base_url, record_id);
        let payload = serde_json::json!({
            "form_data": { "name": hostname },
        });
        self.send(self.client.put(&url).json(&payload)).await
    }

    async fn destroy_record(&self, record_id: &str) -> Result<ApiResponse<()>> {
        let url = format!("{}/records/{}", self.base_url, record_id);
        self.send(self.client.delete(&url)).await
    }
}
