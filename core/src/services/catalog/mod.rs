//! Catalog lookups and presentation helpers for the store, dashboard,
//! payments page and player.

pub mod checkout;
mod filter;
mod resolve;
mod summary;
mod watermark;

pub use checkout::whatsapp_message;
pub use filter::{is_enrolled, CourseFilter};
pub use resolve::{course_category, resolve_category, ResolvedCategory};
pub use summary::{shipments, DashboardSummary, PaymentSummary};
pub use watermark::{Watermark, WatermarkAnchor, WATERMARK_ROTATION};
