use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::io::remote::{
    ErrorBody, HealthStatus, ItemPatch, ItemsEnvelope, RemoteStore, StoreError, TranscriptRequest,
};
use crate::model::config::ServerConfig;

/// Everything outside the RFC 3986 unreserved set is encoded in an id segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// [`RemoteStore`] over the service's JSON HTTP API
pub struct HttpStore {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("insightboard/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpStore {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(server: &ServerConfig) -> Self {
        HttpStore::new(&server.url, Duration::from_secs(server.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, id: &str) -> String {
        self.url(&format!(
            "/api/action-items/{}",
            utf8_percent_encode(id, SEGMENT)
        ))
    }

    /// Log the exchange and normalize a ureq result into a response or a
    /// [`StoreError`].
    fn finish(
        &self,
        method: &str,
        url: &str,
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<ureq::Response, StoreError> {
        match result {
            Ok(response) => {
                debug!(method, url, status = response.status(), "response received");
                Ok(response)
            }
            Err(ureq::Error::Status(code, response)) => {
                let message = error_message(code, response);
                warn!(method, url, status = code, %message, "request rejected");
                Err(StoreError::Api {
                    status: code,
                    message,
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                let message = transport.to_string();
                warn!(method, url, %message, "request failed");
                Err(StoreError::Transport(message))
            }
        }
    }
}

impl RemoteStore for HttpStore {
    fn analyze(&self, transcript: &str) -> Result<ItemsEnvelope, StoreError> {
        let url = self.url("/api/transcripts/analyze");
        debug!(url, chars = transcript.chars().count(), "POST transcript");
        let body = TranscriptRequest {
            transcript: transcript.to_string(),
        };
        let result = self.agent.post(&url).send_json(&body);
        decode(self.finish("POST", &url, result)?)
    }

    fn list_all(&self) -> Result<ItemsEnvelope, StoreError> {
        let url = self.url("/api/action-items");
        debug!(url, "GET action items");
        let result = self.agent.get(&url).call();
        decode(self.finish("GET", &url, result)?)
    }

    fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), StoreError> {
        let url = self.item_url(id);
        debug!(url, ?patch, "PUT action item");
        let result = self.agent.put(&url).send_json(patch);
        self.finish("PUT", &url, result).map(drop)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.item_url(id);
        debug!(url, "DELETE action item");
        let result = self.agent.delete(&url).call();
        self.finish("DELETE", &url, result).map(drop)
    }

    fn health(&self) -> Result<HealthStatus, StoreError> {
        let url = self.url("/api/health");
        let result = self.agent.get(&url).call();
        decode(self.finish("GET", &url, result)?)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, StoreError> {
    response
        .into_json::<T>()
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Message for an error status: the body's `detail`/`error` when it is the
/// service's JSON error shape, otherwise a generic one.
fn error_message(code: u16, response: ureq::Response) -> String {
    response
        .into_string()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.message())
        .unwrap_or_else(|| format!("request failed with status {}", code))
}
