use serde::{Deserialize, Serialize};

use crate::model::item::{ActionItem, Priority, Status};

/// Error type for remote store calls. Every variant renders as a message fit
/// to show the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The service answered with an error status
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never got a response (connect, DNS, timeout)
    #[error("{0}")]
    Transport(String),
    /// The response body was not what the API promises
    #[error("unexpected response from server: {0}")]
    Decode(String),
    /// The service answered `success: false`
    #[error("{0}")]
    Rejected(String),
}

impl StoreError {
    /// Human-readable message, without any prefix
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Request body for transcript analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

/// Response envelope shared by the analyze and list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub total_count: usize,
}

/// Partial update for a single item. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ItemPatch {
    pub fn status(status: Status) -> Self {
        ItemPatch {
            status: Some(status),
            priority: None,
        }
    }

    pub fn priority(priority: Priority) -> Self {
        ItemPatch {
            status: None,
            priority: Some(priority),
        }
    }
}

/// Health endpoint payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Structured error body returned by the service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The best message in the body: `detail` when present, else `error`
    pub fn message(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(serde_json::Value::String(s)) => Some(s.clone()).filter(|s| !s.is_empty()),
            Some(serde_json::Value::Null) | None => None,
            // Validation errors arrive as a list of objects with a `msg` field
            Some(serde_json::Value::Array(entries)) => {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            Some(other) => Some(other.to_string()),
        };
        detail.or_else(|| self.error.clone().filter(|e| !e.is_empty()))
    }
}

/// The backend's action item API. Implementations normalize every failure
/// into a [`StoreError`] carrying a readable message.
pub trait RemoteStore {
    /// Submit a transcript; the store creates and returns the extracted items
    fn analyze(&self, transcript: &str) -> Result<ItemsEnvelope, StoreError>;

    /// Fetch every stored item
    fn list_all(&self) -> Result<ItemsEnvelope, StoreError>;

    fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    fn health(&self) -> Result<HealthStatus, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let json = serde_json::to_string(&ItemPatch::status(Status::Completed)).unwrap();
        assert_eq!(json, r#"{"status":"completed"}"#);
        let json = serde_json::to_string(&ItemPatch::priority(Priority::High)).unwrap();
        assert_eq!(json, r#"{"priority":"high"}"#);
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"success":false,"error":"Internal server error","detail":"boom"}"#)
                .unwrap();
        assert_eq!(body.message().as_deref(), Some("boom"));
    }

    #[test]
    fn test_error_body_falls_back_to_error() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Internal server error"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Internal server error"));
    }

    #[test]
    fn test_error_body_validation_list() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","transcript"],"msg":"String should have at least 10 characters"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("String should have at least 10 characters")
        );
    }

    #[test]
    fn test_envelope_tolerates_missing_count() {
        let env: ItemsEnvelope = serde_json::from_str(r#"{"success":true,"action_items":[]}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.total_count, 0);
    }

    #[test]
    fn test_store_error_display_is_message() {
        let err = StoreError::Api {
            status: 404,
            message: "Action item not found".into(),
        };
        assert_eq!(err.message(), "Action item not found");
    }
}
