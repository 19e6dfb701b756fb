//! Identity card verification.

mod card;


pub use card::{cache_busted, NicDisplayState, NicVerificationCard, NicView, RequestToken};
