//! NIC verification card: status display, polling and re-upload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use lp_shared::config::PollingConfig;
use tokio::task::JoinHandle;

use crate::domain::entities::{NicRecord, NicStatus};
use crate::domain::value_objects::FileCandidate;
use crate::errors::{ClientError, ClientResult};
use crate::repositories::UserRepository;
use crate::services::notification::{Notification, Notifier};
use crate::services::session::SessionHandle;
use crate::services::upload::{
    PreviewStore, SelectionSource, SubmissionProgress, UploadCard, UploadPolicy, UploadRejection,
};

const NIC_UPLOADED_MESSAGE: &str = "NIC uploaded. Verification is pending.";

/// Append a `t` query parameter so a re-uploaded image is not served from cache
pub fn cache_busted(url: &str, key: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, key)
}

/// Identifies one status request; only the newest may update the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// What the card shows to the student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicDisplayState {
    NotSubmitted,
    Pending,
    Failed,
    Verified,
}

/// Last applied server state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicView {
    pub record: Option<NicRecord>,
    pub image_url: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl NicView {
    pub fn status(&self) -> Option<NicStatus> {
        self.record.as_ref().map(|r| r.status)
    }

    pub fn is_pending(&self) -> bool {
        self.status().map(|s| s.is_pending()).unwrap_or(false)
    }

    /// Approval comes from the user record; the NIC record only knows
    /// `pending` and `failed`
    pub fn display_state(&self, nic_verified: bool) -> NicDisplayState {
        if nic_verified {
            return NicDisplayState::Verified;
        }
        match self.status() {
            None => NicDisplayState::NotSubmitted,
            Some(NicStatus::Pending) => NicDisplayState::Pending,
            Some(NicStatus::Failed) => NicDisplayState::Failed,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Reporting {
    Notify,
    LogOnly,
}

/// NIC verification card.
///
/// Status requests carry a generation token; a response is applied only if
/// no newer request was started after it. While the status is pending the
/// card polls on a fixed interval; the poller stops on any other status and
/// when the card is dropped.
pub struct NicVerificationCard<R: UserRepository + 'static> {
    me: Weak<Self>,
    users: Arc<R>,
    session: Arc<dyn SessionHandle>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    generation: AtomicU64,
    view: Mutex<NicView>,
    upload: Mutex<UploadCard>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<R: UserRepository + 'static> NicVerificationCard<R> {
    pub fn new(
        users: Arc<R>,
        session: Arc<dyn SessionHandle>,
        notifier: Arc<dyn Notifier>,
        policy: UploadPolicy,
        previews: Arc<dyn PreviewStore>,
        polling: &PollingConfig,
    ) -> Arc<Self> {
        let poll_interval = polling.nic_status_interval();
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            users,
            session,
            notifier,
            poll_interval,
            generation: AtomicU64::new(0),
            view: Mutex::new(NicView::default()),
            upload: Mutex::new(UploadCard::new(policy, previews)),
            poller: Mutex::new(None),
        })
    }

    pub fn view(&self) -> NicView {
        self.view_lock().clone()
    }

    pub fn is_polling(&self) -> bool {
        self.poller_lock().is_some()
    }

    /// Start a new status request, superseding any still in flight
    pub fn begin_request(&self) -> RequestToken {
        let token = RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.view_lock().loading = true;
        token
    }

    /// Apply a status response if `token` is still the newest request.
    ///
    /// `cache_key` adds a cache-busting parameter to the image URL.
    /// Returns whether the response was applied.
    pub fn apply_response(
        &self,
        token: RequestToken,
        result: &ClientResult<Option<NicRecord>>,
        cache_key: Option<i64>,
    ) -> bool {
        let mut view = self.view_lock();
        if self.generation.load(Ordering::SeqCst) != token.0 {
            tracing::debug!(token = token.0, "stale NIC status response dropped");
            return false;
        }

        view.loading = false;
        match result {
            Ok(record) => {
                view.image_url = record
                    .as_ref()
                    .and_then(|r| r.image_url.as_deref())
                    .map(|url| match cache_key {
                        Some(key) => cache_busted(url, key),
                        None => url.to_string(),
                    });
                view.record = record.clone();
                view.error = None;
            }
            Err(err) => {
                view.error = Some(err.user_message());
            }
        }
        true
    }

    /// Fetch the current status; `bust_cache` forces a fresh image URL
    pub async fn refresh(&self, bust_cache: bool) -> ClientResult<()> {
        self.fetch(bust_cache, Reporting::Notify).await
    }

    /// Window focus or visibility came back
    pub async fn on_focus_regained(&self) -> ClientResult<()> {
        self.fetch(false, Reporting::Notify).await
    }

    pub fn select_file(&self, file: FileCandidate, source: SelectionSource) -> Result<(), UploadRejection> {
        let result = self.upload_lock().select(file, source);
        if let Err(rejection) = &result {
            self.notifier.notify(Notification::error(rejection.to_string()));
        }
        result
    }

    pub fn clear_file(&self) {
        self.upload_lock().clear();
    }

    pub fn has_file(&self) -> bool {
        self.upload_lock().has_file()
    }

    pub fn upload_error(&self) -> Option<String> {
        self.upload_lock().error().map(str::to_string)
    }

    pub fn progress(&self) -> SubmissionProgress {
        self.upload_lock().progress()
    }

    pub fn can_upload(&self) -> bool {
        let card = self.upload_lock();
        card.has_file() && !card.is_in_flight()
    }

    /// Upload the selected image, then reload status and the user record
    pub async fn upload(&self) -> ClientResult<()> {
        let (file, progress) = {
            let card = self.upload_lock();
            (card.file().cloned(), card.progress())
        };
        let Some(file) = file else {
            return Err(self.report(
                ClientError::field("nic image", "Please select an image of your NIC", "REQUIRED_FIELD"),
                Reporting::Notify,
            ));
        };
        if !progress.try_begin() {
            return Err(ClientError::field("nic image", "An upload is already in progress.", "IN_FLIGHT"));
        }

        tracing::info!(file = %file.name, size = file.size(), event = "nic_upload", "Uploading NIC image");
        let result = progress.track(self.users.upload_nic(&file)).await;
        progress.finish(result.is_ok());

        if let Err(err) = result {
            self.upload_lock().set_error(err.user_message());
            return Err(self.report(err, Reporting::Notify));
        }

        self.upload_lock().clear();
        self.notifier.notify(Notification::success(NIC_UPLOADED_MESSAGE));

        let (status, user) = tokio::join!(self.refresh(true), self.session.refresh_user());
        if let Err(err) = user {
            tracing::warn!(error = %err, "user refresh after NIC upload failed");
        }
        status
    }

    async fn fetch(&self, bust_cache: bool, reporting: Reporting) -> ClientResult<()> {
        let token = self.begin_request();
        let result = self.users.nic_info().await;
        let cache_key = bust_cache.then(|| Utc::now().timestamp_millis());

        if !self.apply_response(token, &result, cache_key) {
            return Ok(());
        }
        self.sync_polling();

        match result {
            Ok(_) => Ok(()),
            Err(err) => Err(self.report(err, reporting)),
        }
    }

    /// Keep a poller running exactly while the status is pending
    fn sync_polling(&self) {
        let pending = self.view_lock().is_pending();
        let mut poller = self.poller_lock();

        if !pending {
            if let Some(handle) = poller.take() {
                handle.abort();
                tracing::debug!("NIC status polling stopped");
            }
            return;
        }
        if poller.as_ref().map(|h| !h.is_finished()).unwrap_or(false) {
            return;
        }

        let card = self.me.clone();
        let interval = self.poll_interval;
        *poller = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(card) = card.upgrade() else { break };
                let _ = card.fetch(false, Reporting::LogOnly).await;
                if !card.view().is_pending() {
                    break;
                }
            }
        }));
        tracing::debug!(interval_secs = interval.as_secs(), "NIC status polling started");
    }

    fn report(&self, err: ClientError, reporting: Reporting) -> ClientError {
        tracing::warn!(code = err.code(), error = %err, "NIC request failed");
        if reporting == Reporting::Notify {
            self.notifier.notify(Notification::error(err.user_message()));
        }
        err
    }

    fn view_lock(&self) -> MutexGuard<'_, NicView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn upload_lock(&self) -> MutexGuard<'_, UploadCard> {
        self.upload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn poller_lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: UserRepository + 'static> Drop for NicVerificationCard<R> {
    fn drop(&mut self) {
        if let Some(handle) = self.poller_lock().take() {
            handle.abort();
        }
    }
}
