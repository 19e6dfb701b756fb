//! Client-side session snapshot.

use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Authentication flag plus the cached user record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.authenticated = false;
        self.user = None;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}
