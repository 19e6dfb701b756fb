//! Steps of the authentication flow and the transitions between them.

use std::fmt;

/// Where the user currently is in the flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthStep {
    #[default]
    Check,
    Register,
    NicVerify,
    OtherDetails,
    VerifyOtp,
    Login,
    ForgotPassword,
    ResetPasswordOtp,
    Authenticated,
}

impl AuthStep {
    pub const ALL: [AuthStep; 9] = [
        AuthStep::Check,
        AuthStep::Register,
        AuthStep::NicVerify,
        AuthStep::OtherDetails,
        AuthStep::VerifyOtp,
        AuthStep::Login,
        AuthStep::ForgotPassword,
        AuthStep::ResetPasswordOtp,
        AuthStep::Authenticated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStep::Check => "check",
            AuthStep::Register => "register",
            AuthStep::NicVerify => "nic_verify",
            AuthStep::OtherDetails => "other_details",
            AuthStep::VerifyOtp => "verify_otp",
            AuthStep::Login => "login",
            AuthStep::ForgotPassword => "forgot_password",
            AuthStep::ResetPasswordOtp => "reset_password_otp",
            AuthStep::Authenticated => "authenticated",
        }
    }

    /// Steps that show the six-box OTP input
    pub fn expects_otp(&self) -> bool {
        matches!(self, AuthStep::VerifyOtp | AuthStep::ResetPasswordOtp)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthStep::Authenticated)
    }
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcomes that move the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEvent {
    PhoneRegistered,
    PhoneNotRegistered,
    RegistrationDetailsAccepted,
    NicAccepted,
    RegistrationSubmitted,
    AccountVerified,
    LoginSucceeded,
    RequestPasswordReset,
    ResetOtpSent,
    PasswordReset,
    ChangePhone,
    BackToLogin,
    StepBack,
}

/// Transition table.
///
/// `None` means the event has no meaning in that step and the flow stays put.
pub fn next_step(step: AuthStep, event: FlowEvent) -> Option<AuthStep> {
    use AuthStep::*;
    use FlowEvent::*;

    match (step, event) {
        (Check, PhoneRegistered) => Some(Login),
        (Check, PhoneNotRegistered) => Some(Register),

        (Register, RegistrationDetailsAccepted) => Some(NicVerify),
        (NicVerify, NicAccepted) => Some(OtherDetails),
        (OtherDetails, RegistrationSubmitted) => Some(VerifyOtp),
        (VerifyOtp, AccountVerified) => Some(Authenticated),

        (Login, LoginSucceeded) => Some(Authenticated),
        (Login, RequestPasswordReset) => Some(ForgotPassword),
        (ForgotPassword, ResetOtpSent) => Some(ResetPasswordOtp),
        (ResetPasswordOtp, PasswordReset) => Some(Login),

        (Login | Register, ChangePhone) => Some(Check),
        (ForgotPassword | ResetPasswordOtp, BackToLogin) => Some(Login),

        (NicVerify, StepBack) => Some(Register),
        (OtherDetails, StepBack) => Some(NicVerify),

        _ => None,
    }
}
