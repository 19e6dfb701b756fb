//! Backend seams.
//!
//! The portal backend owns persistence; these traits are the client's view
//! of it. `lp_infra` implements them over HTTP, tests implement them in
//! memory.

pub mod auth;
pub mod course;
pub mod payment;
pub mod user;

pub use auth::{AuthRepository, RegistrationRequest};
pub use course::CourseRepository;
pub use payment::{BankSlipSubmission, PaymentRepository};
pub use user::{ProfileUpdate, UserRepository};

/// The whole backend surface
pub trait PortalRepository:
    AuthRepository + UserRepository + CourseRepository + PaymentRepository
{
}

impl<T> PortalRepository for T where
    T: AuthRepository + UserRepository + CourseRepository + PaymentRepository
{
}
