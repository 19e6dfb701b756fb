//! Common utility functions

pub mod nic;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use nic::*;
pub use phone::*;
pub use validation::*;
