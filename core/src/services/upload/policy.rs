//! Client-side checks applied to every selected image.

use lp_shared::config::UploadConfig;
use std::fmt;

use crate::domain::value_objects::FileCandidate;
use crate::errors::ClientError;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Why a file was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// MIME type or extension outside the allow-list
    InvalidType { mime_type: String, name: String },
    /// Larger than the cap
    TooLarge { size_bytes: u64, max_bytes: u64 },
    /// Zero-length file
    Empty,
}

impl UploadRejection {
    pub fn code(&self) -> &'static str {
        match self {
            UploadRejection::InvalidType { .. } => "INVALID_FILE_TYPE",
            UploadRejection::TooLarge { .. } => "FILE_TOO_LARGE",
            UploadRejection::Empty => "EMPTY_FILE",
        }
    }
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::InvalidType { .. } => write!(
                f,
                "Invalid file type. Please upload an image file (JPEG, PNG, GIF or WEBP)."
            ),
            UploadRejection::TooLarge { size_bytes, max_bytes } => write!(
                f,
                "File size exceeds {}MB limit. Current size: {:.2}MB",
                max_bytes / (1024 * 1024),
                *size_bytes as f64 / BYTES_PER_MB
            ),
            UploadRejection::Empty => write!(f, "The selected file is empty."),
        }
    }
}

impl std::error::Error for UploadRejection {}

impl From<UploadRejection> for ClientError {
    fn from(rejection: UploadRejection) -> Self {
        ClientError::field("file", rejection.to_string(), rejection.code())
    }
}

/// Allow-list and size cap for uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_mime_types: Vec<String>,
    allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            allowed_mime_types: config
                .allowed_mime_types
                .iter()
                .map(|m| m.to_ascii_lowercase())
                .collect(),
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Type is checked before size, so a non-image is refused whatever its size
    pub fn check(&self, file: &FileCandidate) -> Result<(), UploadRejection> {
        let mime_ok = self
            .allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(file.mime_type.trim()));
        let extension_ok = file
            .extension()
            .map(|ext| self.allowed_extensions.contains(&ext))
            .unwrap_or(false);

        if !mime_ok || !extension_ok {
            return Err(UploadRejection::InvalidType {
                mime_type: file.mime_type.clone(),
                name: file.name.clone(),
            });
        }

        if file.size() == 0 {
            return Err(UploadRejection::Empty);
        }

        if file.size() > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size_bytes: file.size(),
                max_bytes: self.max_bytes,
            });
        }

        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}
