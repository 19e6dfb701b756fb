//! Upload limits for NIC images and bank slips

use serde::{Deserialize, Serialize};

/// Maximum accepted upload size (5 MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Limits applied to every image selected for upload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Maximum file size in bytes
    pub max_bytes: u64,

    /// Accepted MIME types
    pub allowed_mime_types: Vec<String>,

    /// Accepted filename extensions, lowercase and without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_mime_types: ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl UploadConfig {
    /// Size limit expressed in whole megabytes, for messages
    pub fn max_megabytes(&self) -> u64 {
        self.max_bytes / (1024 * 1024)
    }
}
