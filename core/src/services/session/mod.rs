//! Session state shared by every screen.
//!
//! [`SessionStore`] owns the authentication flag, the user record and the
//! cached collections, and keeps the push listener alive while the user is
//! signed in. Controllers talk to it through [`SessionHandle`] so they can
//! be tested without a backend.

mod loadable;
mod push;
mod store;


use async_trait::async_trait;

use crate::errors::ClientResult;

pub use loadable::Loadable;
pub use push::{
    PushChannel, PushEvent, PushGuard, PushSubscription, FORCE_LOGOUT_EVENT, REGISTER_USER_EVENT,
};
pub use store::{SessionSnapshot, SessionStore};

/// The part of the session controllers need after they change something
#[async_trait]
pub trait SessionHandle: Send + Sync {
    /// Re-establish the session; `true` when the user is signed in
    async fn refresh_session(&self) -> bool;

    /// Reload the user record
    async fn refresh_user(&self) -> ClientResult<()>;

    /// Reload payment history
    async fn refresh_payments(&self) -> ClientResult<()>;
}
