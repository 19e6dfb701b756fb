//! Configuration for the authentication flow

use std::time::Duration;

use crate::domain::value_objects::OTP_RESEND_COOLDOWN;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Configuration for the authentication flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlowConfig {
    /// Time before another OTP may be requested
    pub otp_cooldown: Duration,
    /// Minimum length for new and login passwords
    pub min_password_length: usize,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            otp_cooldown: OTP_RESEND_COOLDOWN,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}
