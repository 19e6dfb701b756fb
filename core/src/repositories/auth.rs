//! Authentication endpoints of the portal backend.

use async_trait::async_trait;

use crate::domain::entities::{ExamYear, Gender, District, Stream};
use crate::domain::value_objects::FileCandidate;
use crate::errors::ClientResult;

/// Everything collected across the registration steps, sent as one
/// multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    /// ISO date (YYYY-MM-DD)
    pub birth_date: String,
    pub gender: Gender,
    pub exam_year: ExamYear,
    pub nic_number: String,
    pub nic_image: Option<FileCandidate>,
    pub address: String,
    pub school: String,
    pub district: District,
    pub stream: Stream,
    pub institute: String,
    pub secondary_phone: String,
}

/// Authentication operations
///
/// Every method maps to one backend endpoint. Implementations translate
/// `success == false` envelopes and error statuses into
/// [`ClientError::Rejected`](crate::errors::ClientError::Rejected) and keep
/// the status code so callers can override known ones.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// `POST /api/auth/is-user-registered`
    async fn is_user_registered(&self, phone: &str) -> ClientResult<bool>;

    /// `POST /api/auth/register` (multipart)
    async fn register(&self, request: &RegistrationRequest) -> ClientResult<()>;

    /// `POST /api/auth/verify-account`
    async fn verify_account(&self, phone: &str, otp: &str) -> ClientResult<()>;

    /// `POST /api/auth/send-verify-otp`
    async fn send_verify_otp(&self, phone: &str) -> ClientResult<()>;

    /// `POST /api/auth/login`
    async fn login(&self, phone: &str, password: &str) -> ClientResult<()>;

    /// `POST /api/auth/logout`
    async fn logout(&self) -> ClientResult<()>;

    /// `POST /api/auth/send-reset-otp`
    async fn send_reset_otp(&self, phone: &str) -> ClientResult<()>;

    /// `POST /api/auth/reset-password`
    async fn reset_password(&self, phone: &str, otp: &str, new_password: &str) -> ClientResult<()>;

    /// `GET /api/auth/is-auth`
    async fn is_authenticated(&self) -> ClientResult<bool>;
}
