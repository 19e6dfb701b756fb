//! Preview handles for selected images.
//!
//! A preview is an unmanaged resource (an object URL in a browser, a temp
//! file elsewhere). Whoever creates one must revoke it.

use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::value_objects::FileCandidate;

/// Opaque preview location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Creates and releases previews
pub trait PreviewStore: Send + Sync {
    fn create(&self, file: &FileCandidate) -> PreviewUrl;
    fn revoke(&self, url: &PreviewUrl);
}

/// Preview store that only tracks which handles are alive
#[derive(Debug, Default)]
pub struct MemoryPreviewStore {
    live: Mutex<HashSet<PreviewUrl>>,
}

impl MemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of previews created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.live.lock().map(|live| live.contains(url)).unwrap_or(false)
    }
}

impl PreviewStore for MemoryPreviewStore {
    fn create(&self, file: &FileCandidate) -> PreviewUrl {
        let url = PreviewUrl::new(format!("blob:preview/{}", Uuid::new_v4()));
        tracing::trace!(file = %file.name, url = url.as_str(), "preview created");
        if let Ok(mut live) = self.live.lock() {
            live.insert(url.clone());
        }
        url
    }

    fn revoke(&self, url: &PreviewUrl) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(url);
        }
    }
}
