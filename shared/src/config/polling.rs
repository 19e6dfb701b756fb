//! Background refresh intervals

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Polling configuration for server-side state the client waits on
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Seconds between NIC status checks while verification is pending
    pub nic_status_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            nic_status_interval_secs: 10,
        }
    }
}

impl PollingConfig {
    pub fn from_env() -> Self {
        Self {
            nic_status_interval_secs: env::var("NIC_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
        }
    }

    pub fn nic_status_interval(&self) -> Duration {
        Duration::from_secs(self.nic_status_interval_secs)
    }
}
