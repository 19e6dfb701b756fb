//! Value objects representing transient client-side concepts.

pub mod countdown;
pub mod file_candidate;
pub mod otp_input;

// Re-export commonly used types
pub use countdown::{Countdown, OTP_RESEND_COOLDOWN};
pub use file_candidate::FileCandidate;
pub use otp_input::{OtpInput, OtpPurpose, OTP_LENGTH};
