use std::time::Duration;

use reqwest::blocking::Client;

use crate::transport::Transport;
use crate::transport::request::{AuthRequest, TransportOutcome};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// HTTP transport (reqwest, blocking)
// ============================================================================

pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &AuthRequest) -> String {
        format!("{}{}", self.base_url, request.path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &AuthRequest) -> TransportOutcome {
        let url = self.url_for(request);
        tracing::debug!(flow = %request.flow, %url, "sending auth request");

        // .json() also sets Content-Type: application/json
        let response = match self.client.post(&url).json(&request.body).send() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(flow = %request.flow, error = %e, "auth request got no response");
                return TransportOutcome::unreachable_at(e.to_string(), &self.base_url);
            }
        };

        let status = response.status().as_u16();
        let body = match response.text() {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(status, error = %e, "failed to read auth response body");
                String::new()
            }
        };

        tracing::debug!(flow = %request.flow, status, "auth response received");
        TransportOutcome::response(status, body)
    }
}
