//! # LearnPortal Core
//!
//! Client-side logic for the LearnPortal student portal: domain entities,
//! backend repository seams, the authentication step machine, upload cards,
//! NIC verification and the shared session store.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Category, Course, District, Enrollment, ExamYear, Gender, NicRecord, NicStatus, Payment,
    PaymentMethod, PaymentStatus, Session, ShipmentStatus, Stream, Subcategory, TuteShipment,
    UserProfile,
};
pub use domain::value_objects::{Countdown, FileCandidate, OtpInput, OtpPurpose};
pub use errors::*;
pub use repositories::{
    AuthRepository, BankSlipSubmission, CourseRepository, PaymentRepository, PortalRepository,
    ProfileUpdate, RegistrationRequest, UserRepository,
};
pub use services::{
    AuthFlowConfig, AuthFlowController, AuthStep, LogNotifier, MemoryPreviewStore, Navigator,
    NicVerificationCard, Notification, Notifier, PaymentSlipForm, PushChannel, PushEvent,
    PushSubscription, Route, SessionHandle, SessionStore, UploadPolicy,
};
