//! Shared utilities and common types for the LearnPortal client
//!
//! This crate provides common functionality used across all client modules:
//! - Configuration types
//! - The backend response envelope
//! - Utility functions (phone validation, field validation)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, CheckoutConfig, Environment, LoggingConfig, PollingConfig,
    UploadConfig,
};
pub use types::ApiEnvelope;
pub use utils::{nic, phone, validation};
