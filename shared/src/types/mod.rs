//! Type definitions shared between the client layers
//!
//! - `response` - the backend response envelope

pub mod response;

pub use response::{ApiEnvelope, NoPayload};
