//! Domain entities mirrored from the portal backend.

pub mod course;
pub mod payment;
pub mod session;
pub mod tute;
pub mod user;
pub mod verification;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use course::{Category, Course, Enrollment, Subcategory};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use session::Session;
pub use tute::{ShipmentStatus, TuteShipment};
pub use user::{District, ExamYear, Gender, Stream, UnknownOption, UserProfile};
pub use verification::{NicRecord, NicStatus};
