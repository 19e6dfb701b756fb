//! Image upload handling for NIC verification and bank slips
//!
//! - Client-side type and size checks with precise rejection messages
//! - One live preview per card, released on replacement and drop
//! - Drag-and-drop and browse converge on the same validation path
//! - Two-phase submission: simulated progress around the real request

mod card;
mod payment_slip;
mod policy;
mod preview;


pub use card::{SelectionSource, SubmissionProgress, UploadCard, SIMULATED_PROGRESS_CEILING};
pub use payment_slip::{PaymentSlipForm, SlipMetadata};
pub use policy::{UploadPolicy, UploadRejection};
pub use preview::{MemoryPreviewStore, PreviewStore, PreviewUrl};
