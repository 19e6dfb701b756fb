//! Portal backend endpoint configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Where the portal backend and its push channel live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the REST backend, without trailing slash
    pub base_url: String,

    /// URL of the socket.io push endpoint
    pub push_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:4000"),
            push_url: String::from("http://localhost:4000"),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            push_url: base_url.clone(),
            base_url,
            user_agent: default_user_agent(),
        }
    }

    /// Load from `PORTAL_API_URL` and `PORTAL_PUSH_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("PORTAL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let push_url = env::var("PORTAL_PUSH_URL").unwrap_or_else(|_| base_url.clone());
        Self {
            base_url,
            push_url,
            user_agent: defaults.user_agent,
        }
    }

    /// Join an API path such as `/api/auth/login` onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn default_user_agent() -> String {
    format!("learn-portal-client/{}", env!("CARGO_PKG_VERSION"))
}
