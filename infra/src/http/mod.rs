//! REST backend client

mod client;
mod envelope;
pub mod endpoints;

pub use client::HttpPortalClient;
