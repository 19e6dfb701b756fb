//! In-memory backend, push channel and session handle for service tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, Notify};

use crate::domain::entities::{Category, Course, Enrollment, NicRecord, Payment, UserProfile};
use crate::domain::value_objects::FileCandidate;
use crate::errors::{ClientError, ClientResult};
use crate::repositories::{
    AuthRepository, BankSlipSubmission, CourseRepository, PaymentRepository, ProfileUpdate,
    RegistrationRequest, UserRepository,
};
use crate::services::session::{PushChannel, PushEvent, PushSubscription, SessionHandle};

pub fn student() -> UserProfile {
    UserProfile {
        id: "u-1".to_string(),
        name: "Nimal Perera".to_string(),
        phone: "0711234567".to_string(),
        ..UserProfile::default()
    }
}

pub fn image(name: &str, mime_type: &str, size: usize) -> FileCandidate {
    FileCandidate::new(name, mime_type, vec![0u8; size])
}

// Mock portal backend for testing
#[derive(Default)]
pub struct MockPortal {
    pub registered: Mutex<HashSet<String>>,
    pub authenticated: AtomicBool,
    pub user: Mutex<Option<UserProfile>>,
    pub courses: Mutex<Vec<Course>>,
    pub categories: Mutex<Vec<Category>>,
    pub enrolled: Mutex<Vec<Enrollment>>,
    pub payments: Mutex<Vec<Payment>>,
    pub nic: Mutex<Option<NicRecord>>,
    pub registrations: Mutex<Vec<RegistrationRequest>>,
    pub slips: Mutex<Vec<BankSlipSubmission>>,
    pub profile_updates: Mutex<Vec<ProfileUpdate>>,
    pub nic_uploads: Mutex<Vec<FileCandidate>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl MockPortal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with a signed-in student
    pub fn signed_in() -> Self {
        let portal = Self::new();
        portal.authenticated.store(true, Ordering::SeqCst);
        *portal.user.lock().unwrap() = Some(student());
        portal
    }

    pub fn with_registered(self, phone: &str) -> Self {
        self.registered.lock().unwrap().insert(phone.to_string());
        self
    }

    /// Make `operation` fail with `error` until cleared
    pub fn fail(&self, operation: &'static str, error: ClientError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn succeed(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    /// Hold `operation` open until the returned gate is notified
    pub fn gate(&self, operation: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(operation, gate.clone());
        gate
    }

    async fn pass(&self, operation: &'static str) {
        let gate = self.gates.lock().unwrap().remove(operation);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == operation).count()
    }

    fn enter(&self, operation: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn current_user(&self) -> ClientResult<UserProfile> {
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::rejected(Some(401), "Not authorized. Login again"))
    }
}

#[async_trait]
impl AuthRepository for MockPortal {
    async fn is_user_registered(&self, phone: &str) -> ClientResult<bool> {
        self.enter("is_user_registered")?;
        Ok(self.registered.lock().unwrap().contains(phone))
    }

    async fn register(&self, request: &RegistrationRequest) -> ClientResult<()> {
        self.enter("register")?;
        self.registrations.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn verify_account(&self, _phone: &str, otp: &str) -> ClientResult<()> {
        self.enter("verify_account")?;
        if otp != "123456" {
            return Err(ClientError::rejected(Some(400), "Invalid OTP"));
        }
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn send_verify_otp(&self, _phone: &str) -> ClientResult<()> {
        self.enter("send_verify_otp")
    }

    async fn login(&self, _phone: &str, _password: &str) -> ClientResult<()> {
        self.enter("login")?;
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn logout(&self) -> ClientResult<()> {
        self.enter("logout")?;
        self.authenticated.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn send_reset_otp(&self, _phone: &str) -> ClientResult<()> {
        self.enter("send_reset_otp")
    }

    async fn reset_password(&self, _phone: &str, otp: &str, _new_password: &str) -> ClientResult<()> {
        self.enter("reset_password")?;
        if otp != "123456" {
            return Err(ClientError::rejected(Some(400), "Invalid OTP"));
        }
        Ok(())
    }

    async fn is_authenticated(&self) -> ClientResult<bool> {
        self.enter("is_authenticated")?;
        Ok(self.authenticated.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl UserRepository for MockPortal {
    async fn user_data(&self) -> ClientResult<UserProfile> {
        self.enter("user_data")?;
        self.pass("user_data").await;
        self.current_user()
    }

    async fn profile(&self) -> ClientResult<UserProfile> {
        self.enter("profile")?;
        self.current_user()
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()> {
        self.enter("update_profile")?;
        self.profile_updates.lock().unwrap().push(update.clone());
        if let Some(user) = self.user.lock().unwrap().as_mut() {
            user.name = update.name.clone();
            user.address = Some(update.address.clone());
        }
        Ok(())
    }

    async fn nic_info(&self) -> ClientResult<Option<NicRecord>> {
        self.enter("nic_info")?;
        Ok(self.nic.lock().unwrap().clone())
    }

    async fn upload_nic(&self, image: &FileCandidate) -> ClientResult<()> {
        self.enter("upload_nic")?;
        self.nic_uploads.lock().unwrap().push(image.clone());
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MockPortal {
    async fn all_courses(&self) -> ClientResult<Vec<Course>> {
        self.enter("all_courses")?;
        self.pass("all_courses").await;
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn course(&self, id: &str) -> ClientResult<Course> {
        self.enter("course")?;
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ClientError::rejected(Some(404), "Course not found"))
    }

    async fn enrolled_courses(&self) -> ClientResult<Vec<Enrollment>> {
        self.enter("enrolled_courses")?;
        self.pass("enrolled_courses").await;
        Ok(self.enrolled.lock().unwrap().clone())
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.enter("categories")?;
        self.pass("categories").await;
        Ok(self.categories.lock().unwrap().clone())
    }
}

#[async_trait]
impl PaymentRepository for MockPortal {
    async fn payment_history(&self) -> ClientResult<Vec<Payment>> {
        self.enter("payment_history")?;
        self.pass("payment_history").await;
        Ok(self.payments.lock().unwrap().clone())
    }

    async fn submit_bank_slip(&self, submission: &BankSlipSubmission) -> ClientResult<()> {
        self.enter("submit_bank_slip")?;
        self.slips.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

// Mock push channel: keeps the transport ends of every subscription
#[derive(Default)]
pub struct MockPushChannel {
    pub fail: AtomicBool,
    subscribed: Mutex<Vec<String>>,
    senders: Mutex<Vec<mpsc::UnboundedSender<PushEvent>>>,
    shutdowns: Mutex<Vec<oneshot::Receiver<()>>>,
}

impl MockPushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribed_users(&self) -> Vec<String> {
        self.subscribed.lock().unwrap().clone()
    }

    /// Deliver `event` on the most recent subscription
    pub fn emit(&self, event: PushEvent) -> bool {
        self.senders
            .lock()
            .unwrap()
            .last()
            .map(|tx| tx.send(event).is_ok())
            .unwrap_or(false)
    }

    /// Whether the most recent subscription was asked to close
    pub fn last_closed(&self) -> bool {
        let mut shutdowns = self.shutdowns.lock().unwrap();
        match shutdowns.last_mut() {
            Some(rx) => !matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Empty)),
            None => false,
        }
    }
}

#[async_trait]
impl PushChannel for MockPushChannel {
    async fn subscribe(&self, user_id: &str) -> ClientResult<PushSubscription> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::transport("push endpoint unreachable"));
        }
        let (subscription, events, shutdown) = PushSubscription::channel();
        self.subscribed.lock().unwrap().push(user_id.to_string());
        self.senders.lock().unwrap().push(events);
        self.shutdowns.lock().unwrap().push(shutdown);
        Ok(subscription)
    }
}

// Mock session handle counting refreshes
pub struct MockSession {
    pub authenticated: AtomicBool,
    pub session_refreshes: AtomicUsize,
    pub user_refreshes: AtomicUsize,
    pub payment_refreshes: AtomicUsize,
}

impl MockSession {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: AtomicBool::new(authenticated),
            session_refreshes: AtomicUsize::new(0),
            user_refreshes: AtomicUsize::new(0),
            payment_refreshes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionHandle for MockSession {
    async fn refresh_session(&self) -> bool {
        self.session_refreshes.fetch_add(1, Ordering::SeqCst);
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn refresh_user(&self) -> ClientResult<()> {
        self.user_refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn refresh_payments(&self) -> ClientResult<()> {
        self.payment_refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
