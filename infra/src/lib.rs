//! # Infrastructure Layer
//!
//! Concrete implementations of the seams declared in `lp_core`:
//!
//! - **HTTP**: [`HttpPortalClient`] talks to the portal REST backend with a
//!   cookie store, JSON bodies and multipart uploads
//! - **Push**: [`SocketIoPushChannel`] subscribes to the socket.io channel
//!   that delivers forced logouts
//! - **Links**: WhatsApp checkout and courier tracking URLs

pub use lp_core::errors::*;

pub mod http;
pub mod links;
pub mod push;

pub use http::HttpPortalClient;
pub use push::SocketIoPushChannel;

use lp_shared::config::AppConfig;

/// Load client configuration, reading a `.env` file first when present
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    for (name, url) in [
        ("PORTAL_API_URL", &config.backend.base_url),
        ("PORTAL_PUSH_URL", &config.backend.push_url),
    ] {
        if reqwest::Url::parse(url).is_err() {
            return Err(InfrastructureError::Config(format!("{} is not a valid URL: {}", name, url)));
        }
    }

    tracing::debug!(
        environment = %config.environment,
        base_url = %config.backend.base_url,
        "Client configuration loaded"
    );
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP transport failure
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Push channel failure
    #[error("Push channel error: {0}")]
    Push(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for ClientError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Http(e) if e.is_decode() => ClientError::unexpected(e.to_string()),
            InfrastructureError::Http(e) => ClientError::transport(e.to_string()),
            InfrastructureError::Serialization(e) => ClientError::unexpected(e.to_string()),
            InfrastructureError::Push(message) => ClientError::transport(message),
            InfrastructureError::Config(message) => ClientError::unexpected(message),
        }
    }
}
