//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `backend` - REST backend and push channel locations
//! - `checkout` - WhatsApp checkout and courier tracking
//! - `environment` - Environment detection and logging configuration
//! - `polling` - Background refresh intervals
//! - `upload` - Image upload limits

pub mod backend;
pub mod checkout;
pub mod environment;
pub mod polling;
pub mod upload;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use backend::BackendConfig;
pub use checkout::CheckoutConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use polling::PollingConfig;
pub use upload::{UploadConfig, DEFAULT_MAX_UPLOAD_BYTES};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Backend configuration
    pub backend: BackendConfig,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Polling intervals
    #[serde(default)]
    pub polling: PollingConfig,

    /// Checkout configuration
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            backend: BackendConfig::default(),
            upload: UploadConfig::default(),
            polling: PollingConfig::default(),
            checkout: CheckoutConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self::default()
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig::new("https://api.learnportal.lk"),
            upload: UploadConfig::default(),
            polling: PollingConfig::default(),
            checkout: CheckoutConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            backend: BackendConfig::from_env(),
            upload: UploadConfig::default(),
            polling: PollingConfig::from_env(),
            checkout: CheckoutConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
