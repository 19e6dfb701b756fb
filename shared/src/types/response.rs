//! Backend response envelope

use serde::{Deserialize, Serialize};

/// Envelope every portal endpoint answers with.
///
/// Business-rule rejections arrive with `success == false` and a message,
/// often with a 2xx status. Endpoint-specific fields sit next to `success`
/// and are captured by `payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted the request
    #[serde(default)]
    pub success: bool,

    /// Human-readable message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Endpoint-specific fields
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check if the backend reported success
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The backend message, or `fallback` when none was sent
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
    }

    /// Extract the payload, consuming the envelope
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Payload for endpoints that only answer with `success` and `message`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoPayload {}
