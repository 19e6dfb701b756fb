//! Client error taxonomy
//!
//! Every failure a controller can hit falls into one of four groups:
//! local validation, transport, business-rule rejection by the backend, and
//! unexpected responses. Each carries the text shown in the transient
//! notification.

use lp_shared::validation::{FieldError, FieldErrors};
use thiserror::Error;

/// Advisory shown instead of the backend text when login is rate limited
pub const LOGIN_RATE_LIMIT_MESSAGE: &str =
    "Too many login attempts. You can try 5 times within 5 minutes. Please wait 5 minutes and try again.";

/// Advisory shown when a bank slip reuses a transaction number
pub const DUPLICATE_TRANSACTION_MESSAGE: &str = "This transaction number has already been used.";

/// Generic text for transport failures
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Generic text for responses that could not be understood
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// HTTP status used by the backend for rate limiting
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// HTTP status used by the backend for duplicates
pub const STATUS_CONFLICT: u16 = 409;

/// Errors surfaced by client operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Rejected locally; never reached the network
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The backend answered with `success == false` or an error status
    #[error("Request rejected: {message}")]
    Rejected { status: Option<u16>, message: String },

    /// Connectivity failure or a server error without a usable body
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// A response that could not be interpreted
    #[error("Unexpected response: {message}")]
    Unexpected { message: String },

    /// An operation was invoked from a step that does not offer it
    #[error("Operation '{operation}' is not available in step {step}")]
    InvalidStep { operation: &'static str, step: String },
}

impl ClientError {
    /// Validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        ClientError::Validation(FieldErrors::single(FieldError::new(field, message, code)))
    }

    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ClientError::Unexpected {
            message: message.into(),
        }
    }

    /// Status code of a backend rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(STATUS_TOO_MANY_REQUESTS)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(STATUS_CONFLICT)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Rejected { .. } if self.is_rate_limited() => "RATE_LIMITED",
            ClientError::Rejected { .. } => "REJECTED",
            ClientError::Transport { .. } => "NETWORK_ERROR",
            ClientError::Unexpected { .. } => "UNEXPECTED_RESPONSE",
            ClientError::InvalidStep { .. } => "INVALID_STEP",
        }
    }

    /// Text for the transient notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => errors
                .first_message()
                .unwrap_or("Please check the highlighted fields.")
                .to_string(),
            ClientError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            ClientError::Rejected { .. } => UNEXPECTED_ERROR_MESSAGE.to_string(),
            ClientError::Transport { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Unexpected { .. } => UNEXPECTED_ERROR_MESSAGE.to_string(),
            ClientError::InvalidStep { .. } => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// Replace the backend message for a known status with fixed text
    pub fn with_status_override(self, status: u16, message: &str) -> Self {
        match self {
            ClientError::Rejected { status: Some(s), .. } if s == status => ClientError::Rejected {
                status: Some(s),
                message: message.to_string(),
            },
            other => other,
        }
    }
}

impl From<FieldErrors> for ClientError {
    fn from(errors: FieldErrors) -> Self {
        ClientError::Validation(errors)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
