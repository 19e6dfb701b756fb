//! The single authoritative session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use async_trait::async_trait;
use lp_shared::validation::Validate;
use tokio::task::JoinHandle;

use crate::domain::entities::{Category, Course, Enrollment, Payment, Session, UserProfile};
use crate::errors::{ClientError, ClientResult};
use crate::repositories::{PortalRepository, ProfileUpdate};
use crate::services::navigation::{Navigator, Route};
use crate::services::notification::{Notification, Notifier};

use super::loadable::Loadable;
use super::push::{PushChannel, PushEvent, PushGuard};
use super::SessionHandle;

const FORCED_LOGOUT_MESSAGE: &str =
    "You have been logged out because your account was signed in on another device.";
const LOGGED_OUT_MESSAGE: &str = "Logged out successfully";
const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";

/// Everything the client knows about the signed-in student
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub session: Session,
    pub enrolled: Loadable<Vec<Enrollment>>,
    pub courses: Loadable<Vec<Course>>,
    pub categories: Loadable<Vec<Category>>,
    pub payments: Loadable<Vec<Payment>>,
}

struct PushTask {
    guard: PushGuard,
    handle: JoinHandle<()>,
}

impl PushTask {
    fn close(mut self) {
        self.guard.close();
        self.handle.abort();
    }
}

/// Shared session state plus the actions that change it.
///
/// Built inside an `Arc` so the push listener can hold a weak reference
/// back to the store; the listener never keeps the store alive on its own.
///
/// Every `clear_session` starts a new epoch. A response is applied only if
/// the epoch it was requested in is still current, so a request that
/// outlives a logout cannot bring the previous user's data back.
pub struct SessionStore<B, P>
where
    B: PortalRepository + 'static,
    P: PushChannel + 'static,
{
    me: Weak<Self>,
    backend: Arc<B>,
    push: Arc<P>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionSnapshot>,
    epoch: AtomicU64,
    push_task: Mutex<Option<PushTask>>,
}

impl<B, P> SessionStore<B, P>
where
    B: PortalRepository + 'static,
    P: PushChannel + 'static,
{
    pub fn new(
        backend: Arc<B>,
        push: Arc<P>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            backend,
            push,
            notifier,
            navigator,
            state: RwLock::new(SessionSnapshot::default()),
            epoch: AtomicU64::new(0),
            push_task: Mutex::new(None),
        })
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().session.authenticated
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().session.user.clone()
    }

    /// Whether a push listener is currently attached
    pub fn is_push_connected(&self) -> bool {
        self.push_slot().is_some()
    }

    /// Establish the session on start-up or after login.
    ///
    /// The authentication check and the user record are fetched together;
    /// both must succeed for the session to count as authenticated.
    /// Collections are then loaded concurrently and fail independently.
    pub async fn initialize(&self) -> bool {
        let epoch = self.current_epoch();
        let (auth, user) = tokio::join!(self.backend.is_authenticated(), self.backend.user_data());

        let user = match (auth, user) {
            (Ok(true), Ok(user)) => user,
            (auth, user) => {
                if let Some(err) = auth.err().or(user.err()) {
                    tracing::info!(code = err.code(), error = %err, "session not established");
                    if matches!(err, ClientError::Transport { .. } | ClientError::Unexpected { .. }) {
                        self.notifier.notify(Notification::error(err.user_message()));
                    }
                }
                self.clear_session();
                return false;
            }
        };

        let user_id = user.id.clone();
        {
            let mut state = self.write();
            if !self.is_current(epoch) {
                tracing::debug!(user_id = %user_id, "session cleared while establishing; dropped");
                return false;
            }
            state.session = Session::authenticated(user);
        }
        tracing::info!(user_id = %user_id, event = "session_established", "Session established");

        self.load_collections().await;
        self.connect_push(&user_id).await;
        true
    }

    /// Reload every collection; each one records its own failure
    pub async fn load_collections(&self) {
        let _ = tokio::join!(
            self.refresh_enrolled(),
            self.refresh_courses(),
            self.refresh_categories(),
            self.refresh_payments_list(),
        );
    }

    pub async fn refresh_enrolled(&self) -> ClientResult<()> {
        let epoch = self.begin(|s| &mut s.enrolled);
        let result = self.backend.enrolled_courses().await;
        self.settle(epoch, result, "enrolled courses", |s| &mut s.enrolled)
    }

    pub async fn refresh_courses(&self) -> ClientResult<()> {
        let epoch = self.begin(|s| &mut s.courses);
        let result = self.backend.all_courses().await;
        self.settle(epoch, result, "courses", |s| &mut s.courses)
    }

    pub async fn refresh_categories(&self) -> ClientResult<()> {
        let epoch = self.begin(|s| &mut s.categories);
        let result = self.backend.categories().await;
        self.settle(epoch, result, "categories", |s| &mut s.categories)
    }

    pub async fn refresh_payments_list(&self) -> ClientResult<()> {
        let epoch = self.begin(|s| &mut s.payments);
        let result = self.backend.payment_history().await;
        self.settle(epoch, result, "payment history", |s| &mut s.payments)
    }

    /// Reload the basic user record, e.g. after the NIC was uploaded
    pub async fn reload_user(&self) -> ClientResult<()> {
        let epoch = self.current_epoch();
        match self.backend.user_data().await {
            Ok(user) => {
                self.set_user(epoch, user);
                Ok(())
            }
            Err(err) => Err(self.report("user", err)),
        }
    }

    /// Fetch the detailed profile and cache it as the session user
    pub async fn load_profile(&self) -> ClientResult<UserProfile> {
        let epoch = self.current_epoch();
        match self.backend.profile().await {
            Ok(profile) => {
                self.set_user(epoch, profile.clone());
                Ok(profile)
            }
            Err(err) => Err(self.report("profile", err)),
        }
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()> {
        if let Err(errors) = update.validate() {
            return Err(self.report("profile", errors.into()));
        }
        if let Err(err) = self.backend.update_profile(update).await {
            return Err(self.report("profile", err));
        }
        self.notifier.notify(Notification::success(PROFILE_UPDATED_MESSAGE));
        self.load_profile().await.map(|_| ())
    }

    pub async fn course_detail(&self, course_id: &str) -> ClientResult<Course> {
        self.backend
            .course(course_id)
            .await
            .map_err(|err| self.report("course", err))
    }

    /// End the session on the backend and locally.
    ///
    /// When the backend refuses, the local session is kept.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(err) = self.backend.logout().await {
            return Err(self.report("logout", err));
        }
        self.clear_session();
        self.notifier.notify(Notification::success(LOGGED_OUT_MESSAGE));
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    /// Forget the user, every collection, and the push connection
    pub fn clear_session(&self) {
        {
            let mut state = self.write();
            self.epoch.fetch_add(1, Ordering::SeqCst);
            state.session.clear();
            state.enrolled.reset();
            state.courses.reset();
            state.categories.reset();
            state.payments.reset();
        }
        self.disconnect_push();
    }

    async fn connect_push(&self, user_id: &str) {
        self.disconnect_push();

        let subscription = match self.push.subscribe(user_id).await {
            Ok(subscription) => subscription,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "push subscription failed");
                return;
            }
        };

        let mut events = subscription.events;
        let store = self.me.clone();
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(store) = store.upgrade() else { break };
                store.handle_push_event(event);
            }
        });

        *self.push_slot() = Some(PushTask {
            guard: subscription.guard,
            handle,
        });
        tracing::debug!(user_id = %user_id, "push listener attached");
    }

    fn disconnect_push(&self) {
        let task = self.push_slot().take();
        if let Some(task) = task {
            task.close();
            tracing::debug!("push listener detached");
        }
    }

    fn handle_push_event(&self, event: PushEvent) {
        match event {
            PushEvent::ForceLogout => {
                tracing::warn!(
                    user_id = ?self.read().session.user_id(),
                    event = "force_logout",
                    "Session ended remotely"
                );
                self.clear_session();
                self.notifier.notify(Notification::warning(FORCED_LOGOUT_MESSAGE));
                self.navigator.navigate(Route::Login);
            }
        }
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch
    }

    /// Mark a collection as loading and return the epoch the request belongs to
    fn begin<T>(&self, slot: impl FnOnce(&mut SessionSnapshot) -> &mut Loadable<T>) -> u64 {
        let mut state = self.write();
        slot(&mut *state).start();
        self.current_epoch()
    }

    fn set_user(&self, epoch: u64, user: UserProfile) {
        let mut state = self.write();
        if self.is_current(epoch) {
            state.session.user = Some(user);
        } else {
            tracing::debug!("user record from a cleared session dropped");
        }
    }

    fn settle<T>(
        &self,
        epoch: u64,
        result: ClientResult<T>,
        what: &str,
        slot: impl FnOnce(&mut SessionSnapshot) -> &mut Loadable<T>,
    ) -> ClientResult<()> {
        let mut state = self.write();
        if !self.is_current(epoch) {
            tracing::debug!(resource = what, "response from a cleared session dropped");
            return Ok(());
        }
        match result {
            Ok(value) => {
                slot(&mut *state).succeed(value);
                Ok(())
            }
            Err(err) => {
                slot(&mut *state).fail(err.user_message());
                drop(state);
                Err(self.report(what, err))
            }
        }
    }

    fn report(&self, what: &str, err: ClientError) -> ClientError {
        tracing::warn!(resource = what, code = err.code(), error = %err, "session request failed");
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_slot(&self) -> std::sync::MutexGuard<'_, Option<PushTask>> {
        self.push_task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B, P> Drop for SessionStore<B, P>
where
    B: PortalRepository + 'static,
    P: PushChannel + 'static,
{
    fn drop(&mut self) {
        if let Some(task) = self.push_slot().take() {
            task.close();
        }
    }
}

#[async_trait]
impl<B, P> SessionHandle for SessionStore<B, P>
where
    B: PortalRepository + 'static,
    P: PushChannel + 'static,
{
    async fn refresh_session(&self) -> bool {
        self.initialize().await
    }

    async fn refresh_user(&self) -> ClientResult<()> {
        self.reload_user().await
    }

    async fn refresh_payments(&self) -> ClientResult<()> {
        self.refresh_payments_list().await
    }
}
