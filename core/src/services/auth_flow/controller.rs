//! Drives the user from phone check to an authenticated session.

use std::sync::Arc;
use std::time::Duration;

use lp_shared::nic::is_valid_nic;
use lp_shared::phone::{is_valid_local_mobile, mask_phone_number};
use lp_shared::validation::{FieldError, FieldErrors, Validate};

use crate::domain::value_objects::{Countdown, OtpInput, OtpPurpose};
use crate::errors::{ClientError, ClientResult, LOGIN_RATE_LIMIT_MESSAGE, STATUS_TOO_MANY_REQUESTS};
use crate::repositories::{AuthRepository, RegistrationRequest};
use crate::services::navigation::{Navigator, Route};
use crate::services::notification::{Notification, Notifier};
use crate::services::session::SessionHandle;
use crate::services::upload::{PreviewStore, UploadCard, UploadPolicy};

use super::config::AuthFlowConfig;
use super::forms::{check_mobile, check_password, OtherDetailsForm, PasswordResetForm, RegisterForm};
use super::state::{next_step, AuthStep, FlowEvent};

const OTP_SENT_MESSAGE: &str = "A verification code has been sent to your phone";
const OTP_RESENT_MESSAGE: &str = "A new verification code has been sent";
const ACCOUNT_VERIFIED_MESSAGE: &str = "Account verified successfully";
const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully";
const PASSWORD_RESET_MESSAGE: &str = "Password reset successfully. Please log in.";

/// Authentication flow controller.
///
/// Holds every input captured along the way so going back and forth between
/// steps never loses what the user typed. Every failure is reported through
/// the notifier and leaves the flow on the step where it happened.
pub struct AuthFlowController<A: AuthRepository> {
    auth: Arc<A>,
    session: Arc<dyn SessionHandle>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    config: AuthFlowConfig,

    step: AuthStep,
    phone: String,
    password: String,
    registration: RegisterForm,
    nic_number: String,
    nic_card: UploadCard,
    details: OtherDetailsForm,
    reset: PasswordResetForm,
    otp: OtpInput,
    countdown: Countdown,
}

impl<A: AuthRepository> AuthFlowController<A> {
    pub fn new(
        auth: Arc<A>,
        session: Arc<dyn SessionHandle>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        policy: UploadPolicy,
        previews: Arc<dyn PreviewStore>,
        config: AuthFlowConfig,
    ) -> Self {
        let countdown = Countdown::idle(config.otp_cooldown);
        Self {
            auth,
            session,
            notifier,
            navigator,
            config,
            step: AuthStep::Check,
            phone: String::new(),
            password: String::new(),
            registration: RegisterForm::default(),
            nic_number: String::new(),
            nic_card: UploadCard::new(policy, previews),
            details: OtherDetailsForm::default(),
            reset: PasswordResetForm::default(),
            otp: OtpInput::new(),
            countdown,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn registration(&self) -> &RegisterForm {
        &self.registration
    }

    pub fn registration_mut(&mut self) -> &mut RegisterForm {
        &mut self.registration
    }

    pub fn nic_number(&self) -> &str {
        &self.nic_number
    }

    pub fn set_nic_number(&mut self, nic_number: impl Into<String>) {
        self.nic_number = nic_number.into();
    }

    pub fn nic_card(&self) -> &UploadCard {
        &self.nic_card
    }

    pub fn nic_card_mut(&mut self) -> &mut UploadCard {
        &mut self.nic_card
    }

    pub fn details(&self) -> &OtherDetailsForm {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut OtherDetailsForm {
        &mut self.details
    }

    pub fn reset_form_mut(&mut self) -> &mut PasswordResetForm {
        &mut self.reset
    }

    pub fn otp(&self) -> &OtpInput {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut OtpInput {
        &mut self.otp
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Which send endpoint a resend goes to in the current step
    pub fn otp_purpose(&self) -> Option<OtpPurpose> {
        match self.step {
            AuthStep::VerifyOtp => Some(OtpPurpose::RegisterVerify),
            AuthStep::ResetPasswordOtp => Some(OtpPurpose::PasswordReset),
            _ => None,
        }
    }

    /// Resend is offered only on an OTP step once the countdown has run out
    pub fn can_resend(&self) -> bool {
        self.step.expects_otp() && !self.countdown.is_running()
    }

    /// Advance the resend countdown by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) {
        self.countdown.advance(elapsed);
    }

    /// Check whether the phone number belongs to an account
    pub async fn submit_phone(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_phone", &[AuthStep::Check])?;

        let mut errors = FieldErrors::new();
        check_mobile(&mut errors, "phone", &self.phone);
        if let Err(errors) = errors.into_result() {
            return Err(self.fail(errors.into()));
        }

        let registered = match self.auth.is_user_registered(&self.phone).await {
            Ok(registered) => registered,
            Err(err) => return Err(self.fail(err)),
        };

        tracing::debug!(registered, "phone checked");
        let event = if registered {
            FlowEvent::PhoneRegistered
        } else {
            FlowEvent::PhoneNotRegistered
        };
        self.advance(event)
    }

    /// Accept the personal details; nothing is sent yet
    pub fn submit_registration(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_registration", &[AuthStep::Register])?;

        let mut errors = match self.registration.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        check_password(&mut errors, "password", &self.password, self.config.min_password_length);
        if let Err(errors) = errors.into_result() {
            return Err(self.fail(errors.into()));
        }

        self.advance(FlowEvent::RegistrationDetailsAccepted)
    }

    /// Accept the NIC number and image; nothing is sent yet
    pub fn submit_nic(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_nic", &[AuthStep::NicVerify])?;

        let mut errors = FieldErrors::new();
        if !is_valid_nic(&self.nic_number) {
            errors.add_error(
                "nic number",
                "Enter a valid NIC number (9 digits followed by V or X, or 12 digits)",
                "INVALID_NIC",
            );
        }
        if !self.nic_card.has_file() {
            errors.add_error("nic image", "Please upload a photo of your NIC", "REQUIRED_FIELD");
        }
        if let Err(errors) = errors.into_result() {
            return Err(self.fail(errors.into()));
        }

        self.nic_number = self.nic_number.trim().to_string();
        self.advance(FlowEvent::NicAccepted)
    }

    /// Send the whole registration and start OTP verification
    pub async fn submit_other_details(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_other_details", &[AuthStep::OtherDetails])?;

        if let Err(errors) = self.details.validate() {
            return Err(self.fail(errors.into()));
        }
        let request = match self.registration_request() {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err)),
        };

        tracing::info!(
            phone = %mask_phone_number(&request.phone),
            event = "registration_submit",
            "Submitting registration"
        );
        if let Err(err) = self.auth.register(&request).await {
            return Err(self.fail(err));
        }

        let step = self.advance(FlowEvent::RegistrationSubmitted)?;
        self.start_otp();
        self.notifier.notify(Notification::success(OTP_SENT_MESSAGE));
        Ok(step)
    }

    /// Confirm the account with the six-digit code
    pub async fn submit_verification_otp(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_verification_otp", &[AuthStep::VerifyOtp])?;

        let code = self.require_otp()?;
        if let Err(err) = self.auth.verify_account(&self.phone, &code).await {
            return Err(self.fail(err));
        }

        self.notifier.notify(Notification::success(ACCOUNT_VERIFIED_MESSAGE));
        self.finish_authentication(FlowEvent::AccountVerified).await
    }

    /// Request a new code once the countdown has run out
    pub async fn resend_otp(&mut self) -> ClientResult<()> {
        let purpose = match self.otp_purpose() {
            Some(purpose) => purpose,
            None => return Err(self.invalid_step("resend_otp")),
        };
        if self.countdown.is_running() {
            let err = ClientError::field(
                "otp",
                format!("You can request a new code in {}", self.countdown.display()),
                "RESEND_COOLDOWN",
            );
            return Err(self.fail(err));
        }

        let result = match purpose {
            OtpPurpose::RegisterVerify => self.auth.send_verify_otp(&self.phone).await,
            OtpPurpose::PasswordReset => self.auth.send_reset_otp(&self.phone).await,
        };
        if let Err(err) = result {
            return Err(self.fail(err));
        }

        self.start_otp();
        self.notifier.notify(Notification::success(OTP_RESENT_MESSAGE));
        Ok(())
    }

    /// Sign in with phone and password
    pub async fn login(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("login", &[AuthStep::Login])?;

        let mut errors = FieldErrors::new();
        check_mobile(&mut errors, "phone", &self.phone);
        errors.require("password", &self.password);
        if let Err(errors) = errors.into_result() {
            return Err(self.fail(errors.into()));
        }

        if let Err(err) = self.auth.login(&self.phone, &self.password).await {
            let err = err.with_status_override(STATUS_TOO_MANY_REQUESTS, LOGIN_RATE_LIMIT_MESSAGE);
            return Err(self.fail(err));
        }

        tracing::info!(phone = %mask_phone_number(&self.phone), event = "login_success", "Login accepted");
        self.notifier.notify(Notification::success(LOGIN_SUCCESS_MESSAGE));
        self.finish_authentication(FlowEvent::LoginSucceeded).await
    }

    /// Leave the login step for password recovery
    pub fn forgot_password(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("forgot_password", &[AuthStep::Login])?;
        self.advance(FlowEvent::RequestPasswordReset)
    }

    /// Send the reset code to the phone number
    pub async fn request_reset_otp(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("request_reset_otp", &[AuthStep::ForgotPassword])?;

        if !is_valid_local_mobile(&self.phone) {
            let mut errors = FieldErrors::new();
            check_mobile(&mut errors, "phone", &self.phone);
            return Err(self.fail(errors.into()));
        }

        if let Err(err) = self.auth.send_reset_otp(&self.phone).await {
            return Err(self.fail(err));
        }

        let step = self.advance(FlowEvent::ResetOtpSent)?;
        self.start_otp();
        self.notifier.notify(Notification::success(OTP_SENT_MESSAGE));
        Ok(step)
    }

    /// Set a new password with the reset code
    pub async fn submit_password_reset(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("submit_password_reset", &[AuthStep::ResetPasswordOtp])?;

        let code = self.require_otp()?;
        if let Err(errors) = self.reset.check(self.config.min_password_length) {
            return Err(self.fail(errors.into()));
        }

        let result = self
            .auth
            .reset_password(&self.phone, &code, &self.reset.new_password)
            .await;
        if let Err(err) = result {
            return Err(self.fail(err));
        }

        let step = self.advance(FlowEvent::PasswordReset)?;
        self.reset.clear();
        self.password.clear();
        self.stop_otp();
        self.notifier.notify(Notification::success(PASSWORD_RESET_MESSAGE));
        Ok(step)
    }

    /// Abandon password recovery
    pub fn back_to_login(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("back_to_login", &[AuthStep::ForgotPassword, AuthStep::ResetPasswordOtp])?;
        let step = self.advance(FlowEvent::BackToLogin)?;
        self.stop_otp();
        Ok(step)
    }

    /// Return to the phone check; only the password is forgotten
    pub fn change_phone(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("change_phone", &[AuthStep::Login, AuthStep::Register])?;
        let step = self.advance(FlowEvent::ChangePhone)?;
        self.password.clear();
        Ok(step)
    }

    /// Go back one registration sub-step
    pub fn step_back(&mut self) -> ClientResult<AuthStep> {
        self.expect_step("step_back", &[AuthStep::NicVerify, AuthStep::OtherDetails])?;
        self.advance(FlowEvent::StepBack)
    }

    async fn finish_authentication(&mut self, event: FlowEvent) -> ClientResult<AuthStep> {
        if !self.session.refresh_session().await {
            let err = ClientError::unexpected("session could not be established after sign-in");
            return Err(self.fail(err));
        }

        let step = self.advance(event)?;
        self.password.clear();
        self.stop_otp();
        self.navigator.navigate(Route::Dashboard);
        Ok(step)
    }

    fn registration_request(&self) -> ClientResult<RegistrationRequest> {
        let missing = |field: &str| ClientError::from(FieldErrors::single(FieldError::required(field)));

        let gender = self.registration.gender.ok_or_else(|| missing("gender"))?;
        let exam_year = self.registration.exam_year.ok_or_else(|| missing("exam year"))?;
        let district = self.details.district.ok_or_else(|| missing("district"))?;
        let stream = self.details.stream.ok_or_else(|| missing("stream"))?;

        Ok(RegistrationRequest {
            name: self.registration.name.trim().to_string(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            birth_date: self.registration.birth_date.trim().to_string(),
            gender,
            exam_year,
            nic_number: self.nic_number.clone(),
            nic_image: self.nic_card.file().cloned(),
            address: self.details.address.trim().to_string(),
            school: self.details.school.trim().to_string(),
            district,
            stream,
            institute: self.details.institute.trim().to_string(),
            secondary_phone: self.details.secondary_phone.trim().to_string(),
        })
    }

    fn require_otp(&self) -> ClientResult<String> {
        match self.otp.code() {
            Some(code) => Ok(code),
            None => Err(self.fail(ClientError::field(
                "otp",
                "Please enter the 6-digit code",
                "INCOMPLETE_OTP",
            ))),
        }
    }

    fn start_otp(&mut self) {
        self.otp.clear();
        self.countdown.restart();
    }

    fn stop_otp(&mut self) {
        self.otp.clear();
        self.countdown.stop();
    }

    fn expect_step(&self, operation: &'static str, allowed: &[AuthStep]) -> ClientResult<()> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(self.invalid_step(operation))
        }
    }

    fn invalid_step(&self, operation: &'static str) -> ClientError {
        tracing::warn!(operation, step = %self.step, "operation not available in this step");
        ClientError::InvalidStep {
            operation,
            step: self.step.to_string(),
        }
    }

    fn advance(&mut self, event: FlowEvent) -> ClientResult<AuthStep> {
        let next = next_step(self.step, event).ok_or_else(|| {
            ClientError::InvalidStep {
                operation: "advance",
                step: self.step.to_string(),
            }
        })?;
        tracing::debug!(from = %self.step, to = %next, ?event, "auth step changed");
        self.step = next;
        Ok(next)
    }

    fn fail(&self, err: ClientError) -> ClientError {
        tracing::warn!(step = %self.step, code = err.code(), error = %err, "auth flow request failed");
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }
}
