//! File selection state shared by the NIC and bank-slip uploaders.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::value_objects::FileCandidate;

use super::policy::{UploadPolicy, UploadRejection};
use super::preview::{PreviewStore, PreviewUrl};

/// Simulated progress stops here until the real request completes
pub const SIMULATED_PROGRESS_CEILING: u8 = 90;

const PROGRESS_STEP: u8 = 10;
const PROGRESS_TICK: Duration = Duration::from_millis(200);

/// How the file reached the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Browse,
    Drop,
}

/// Read-only view of a submission, cloneable into UI observers
#[derive(Debug, Clone, Default)]
pub struct SubmissionProgress {
    in_flight: Arc<AtomicBool>,
    percent: Arc<AtomicU8>,
}

impl SubmissionProgress {
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::SeqCst)
    }

    /// Claim the submission slot; `false` when one is already running
    pub(crate) fn try_begin(&self) -> bool {
        let claimed = self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if claimed {
            self.percent.store(0, Ordering::SeqCst);
        }
        claimed
    }

    pub(crate) fn finish(&self, success: bool) {
        self.percent.store(if success { 100 } else { 0 }, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
    }

    fn bump(&self) {
        let _ = self.percent.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| {
            (p < SIMULATED_PROGRESS_CEILING)
                .then(|| p.saturating_add(PROGRESS_STEP).min(SIMULATED_PROGRESS_CEILING))
        });
    }

    /// Drive `request` to completion while advancing the simulated progress
    pub(crate) async fn track<F, T>(&self, request: F) -> T
    where
        F: Future<Output = T>,
    {
        tokio::pin!(request);
        let mut ticker = tokio::time::interval(PROGRESS_TICK);
        loop {
            tokio::select! {
                output = &mut request => return output,
                _ = ticker.tick() => self.bump(),
            }
        }
    }
}

/// One selected image with its preview.
///
/// Exactly one preview is alive while a file is selected; it is revoked on
/// replacement, on `clear` and when the card is dropped.
pub struct UploadCard {
    policy: UploadPolicy,
    previews: Arc<dyn PreviewStore>,
    file: Option<FileCandidate>,
    preview: Option<PreviewUrl>,
    error: Option<String>,
    dragging: bool,
    progress: SubmissionProgress,
}

impl UploadCard {
    pub fn new(policy: UploadPolicy, previews: Arc<dyn PreviewStore>) -> Self {
        Self {
            policy,
            previews,
            file: None,
            preview: None,
            error: None,
            dragging: false,
            progress: SubmissionProgress::default(),
        }
    }

    /// Offer a file from either source; both go through the same checks.
    ///
    /// A refused file leaves the current selection untouched.
    pub fn select(&mut self, file: FileCandidate, source: SelectionSource) -> Result<(), UploadRejection> {
        if source == SelectionSource::Drop {
            self.dragging = false;
        }

        if let Err(rejection) = self.policy.check(&file) {
            tracing::debug!(
                file = %file.name,
                mime = %file.mime_type,
                size = file.size(),
                reason = rejection.code(),
                "file rejected"
            );
            self.error = Some(rejection.to_string());
            return Err(rejection);
        }

        let preview = self.previews.create(&file);
        if let Some(previous) = self.preview.replace(preview) {
            self.previews.revoke(&previous);
        }
        self.file = Some(file);
        self.error = None;
        Ok(())
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drop the selection and release its preview
    pub fn clear(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.previews.revoke(&preview);
        }
        self.file = None;
        self.error = None;
    }

    pub fn file(&self) -> Option<&FileCandidate> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }

    /// Last rejection message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn progress(&self) -> SubmissionProgress {
        self.progress.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.progress.in_flight()
    }
}

impl Drop for UploadCard {
    fn drop(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.previews.revoke(&preview);
        }
    }
}
