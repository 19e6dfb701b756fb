//! Client-side services: state machines and controllers over the backend seams.

pub mod auth_flow;
pub mod catalog;
pub mod navigation;
pub mod nic;
pub mod notification;
pub mod session;
pub mod upload;

#[cfg(test)]
pub(crate) mod mocks;

// Re-export commonly used types
pub use auth_flow::{AuthFlowConfig, AuthFlowController, AuthStep, FlowEvent};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use nic::{NicDisplayState, NicVerificationCard, NicView};
pub use notification::{LogNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use session::{PushChannel, PushEvent, PushSubscription, SessionHandle, SessionSnapshot, SessionStore};
pub use upload::{
    MemoryPreviewStore, PaymentSlipForm, PreviewStore, SelectionSource, UploadCard, UploadPolicy,
    UploadRejection,
};
