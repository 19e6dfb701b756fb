//! Unit tests for the authentication flow controller

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{District, ExamYear, Gender, Stream};
use crate::errors::{ClientError, LOGIN_RATE_LIMIT_MESSAGE};
use crate::services::auth_flow::{AuthFlowConfig, AuthFlowController, AuthStep};
use crate::services::mocks::{image, MockPortal, MockSession};
use crate::services::navigation::{RecordingNavigator, Route};
use crate::services::notification::RecordingNotifier;
use crate::services::upload::{MemoryPreviewStore, SelectionSource, UploadPolicy};

const PHONE: &str = "0711234567";

struct Fixture {
    portal: Arc<MockPortal>,
    session: Arc<MockSession>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    flow: AuthFlowController<MockPortal>,
}

fn fixture(portal: MockPortal) -> Fixture {
    let portal = Arc::new(portal);
    let session = Arc::new(MockSession::new(true));
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let flow = AuthFlowController::new(
        portal.clone(),
        session.clone(),
        notifier.clone(),
        navigator.clone(),
        UploadPolicy::default(),
        Arc::new(MemoryPreviewStore::new()),
        AuthFlowConfig::default(),
    );
    Fixture {
        portal,
        session,
        notifier,
        navigator,
        flow,
    }
}

async fn at_other_details() -> Fixture {
    let mut f = fixture(MockPortal::new());
    f.flow.set_phone(PHONE);
    assert_eq!(f.flow.submit_phone().await.unwrap(), AuthStep::Register);

    let form = f.flow.registration_mut();
    form.name = "Nimal Perera".to_string();
    form.birth_date = "2006-03-14".to_string();
    form.gender = Some(Gender::Male);
    form.exam_year = Some(ExamYear::Y2026);
    f.flow.set_password("secret1");
    assert_eq!(f.flow.submit_registration().unwrap(), AuthStep::NicVerify);

    f.flow.set_nic_number("200612345678");
    f.flow
        .nic_card_mut()
        .select(image("nic.jpg", "image/jpeg", 2048), SelectionSource::Browse)
        .unwrap();
    assert_eq!(f.flow.submit_nic().unwrap(), AuthStep::OtherDetails);

    let details = f.flow.details_mut();
    details.address = "12 Temple Road, Kandy".to_string();
    details.school = "Trinity College".to_string();
    details.district = Some(District::Kandy);
    details.stream = Some(Stream::PhysicalScience);
    details.institute = "Sipwin".to_string();
    details.secondary_phone = "0771234567".to_string();
    f
}

async fn at_login() -> Fixture {
    let mut f = fixture(MockPortal::new().with_registered(PHONE));
    f.flow.set_phone(PHONE);
    assert_eq!(f.flow.submit_phone().await.unwrap(), AuthStep::Login);
    f
}

#[tokio::test]
async fn test_invalid_phone_never_reaches_backend() {
    for phone in ["0711234", "07112345678", "0811234567", "+94711234567", "07a1234567", ""] {
        let mut f = fixture(MockPortal::new());
        f.flow.set_phone(phone);

        let err = f.flow.submit_phone().await.unwrap_err();

        assert!(err.is_validation(), "{} should be refused", phone);
        assert_eq!(f.flow.step(), AuthStep::Check);
        assert!(f.portal.calls().is_empty());
        assert_eq!(f.notifier.errors().len(), 1);
    }
}

#[tokio::test]
async fn test_non_ascii_digits_and_padding_are_refused() {
    for phone in ["07١٢٣٤٥٦٧٨", "07१२३४५६७८", "  0711234567\t", "0711234567 ", "\n0711234567"] {
        let mut f = fixture(MockPortal::new());
        f.flow.set_phone(phone);

        assert!(f.flow.submit_phone().await.unwrap_err().is_validation(), "{:?} should be refused", phone);
        assert_eq!(f.flow.step(), AuthStep::Check);
        assert!(f.portal.calls().is_empty());
    }
}

#[tokio::test]
async fn test_reset_otp_refuses_padded_phone() {
    let mut f = at_login().await;
    f.flow.forgot_password().unwrap();
    f.flow.set_phone(" 0711234567");

    assert!(f.flow.request_reset_otp().await.unwrap_err().is_validation());
    assert_eq!(f.flow.step(), AuthStep::ForgotPassword);
    assert_eq!(f.portal.call_count("send_reset_otp"), 0);
}

#[tokio::test]
async fn test_phone_check_network_failure_stays_on_check() {
    let mut f = fixture(MockPortal::new());
    f.portal.fail("is_user_registered", ClientError::transport("offline"));
    f.flow.set_phone(PHONE);

    assert!(f.flow.submit_phone().await.is_err());
    assert_eq!(f.flow.step(), AuthStep::Check);
    assert_eq!(f.notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_registration_reaches_otp_with_full_countdown() {
    let mut f = at_other_details().await;

    let step = f.flow.submit_other_details().await.unwrap();

    assert_eq!(step, AuthStep::VerifyOtp);
    assert_eq!(f.flow.countdown().display(), "2:00");
    assert!(!f.flow.can_resend());

    let registrations = f.portal.registrations.lock().unwrap().clone();
    assert_eq!(registrations.len(), 1);
    let request = &registrations[0];
    assert_eq!(request.phone, PHONE);
    assert_eq!(request.password, "secret1");
    assert_eq!(request.nic_number, "200612345678");
    assert_eq!(request.district, District::Kandy);
    assert_eq!(request.nic_image.as_ref().map(|f| f.name.as_str()), Some("nic.jpg"));
}

#[tokio::test]
async fn test_registration_steps_make_no_network_calls() {
    let f = at_other_details().await;
    assert_eq!(f.portal.calls(), vec!["is_user_registered".to_string()]);
}

#[tokio::test]
async fn test_registration_requires_every_field() {
    let mut f = fixture(MockPortal::new());
    f.flow.set_phone(PHONE);
    f.flow.submit_phone().await.unwrap();
    f.flow.registration_mut().name = "Nimal".to_string();
    f.flow.set_password("12345");

    let err = f.flow.submit_registration().unwrap_err();

    match err {
        ClientError::Validation(errors) => {
            assert!(errors.has_field("birth date"));
            assert!(errors.has_field("gender"));
            assert!(errors.has_field("exam year"));
            assert!(errors.has_field("password"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(f.flow.step(), AuthStep::Register);
}

#[tokio::test]
async fn test_nic_step_requires_number_and_image() {
    let mut f = at_other_details().await;
    f.flow.step_back().unwrap();
    assert_eq!(f.flow.step(), AuthStep::NicVerify);

    f.flow.set_nic_number("12345");
    let err = f.flow.submit_nic().unwrap_err();
    assert!(err.is_validation());
    assert_eq!(f.flow.step(), AuthStep::NicVerify);

    f.flow.set_nic_number("991234567V");
    assert_eq!(f.flow.submit_nic().unwrap(), AuthStep::OtherDetails);
}

#[tokio::test]
async fn test_registration_failure_keeps_step_and_input() {
    let mut f = at_other_details().await;
    f.portal.fail(
        "register",
        ClientError::rejected(Some(400), "User already exists"),
    );

    let err = f.flow.submit_other_details().await.unwrap_err();

    assert_eq!(err.user_message(), "User already exists");
    assert_eq!(f.flow.step(), AuthStep::OtherDetails);
    assert_eq!(f.flow.details().school, "Trinity College");
    assert!(!f.flow.countdown().is_running());
    assert_eq!(f.notifier.errors(), vec!["User already exists".to_string()]);
}

#[tokio::test]
async fn test_verification_otp_completes_registration() {
    let mut f = at_other_details().await;
    f.flow.submit_other_details().await.unwrap();

    assert!(f.flow.otp_mut().paste("123456"));
    let step = f.flow.submit_verification_otp().await.unwrap();

    assert_eq!(step, AuthStep::Authenticated);
    assert_eq!(f.session.session_refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(f.navigator.current(), Some(Route::Dashboard));
    assert!(f.flow.password().is_empty());
}

#[tokio::test]
async fn test_incomplete_otp_is_not_sent() {
    let mut f = at_other_details().await;
    f.flow.submit_other_details().await.unwrap();

    f.flow.otp_mut().paste("1234");
    let err = f.flow.submit_verification_otp().await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(f.portal.call_count("verify_account"), 0);
    assert_eq!(f.flow.step(), AuthStep::VerifyOtp);
}

#[tokio::test]
async fn test_wrong_otp_stays_on_step() {
    let mut f = at_other_details().await;
    f.flow.submit_other_details().await.unwrap();

    f.flow.otp_mut().paste("000000");
    assert!(f.flow.submit_verification_otp().await.is_err());
    assert_eq!(f.flow.step(), AuthStep::VerifyOtp);
    assert_eq!(f.notifier.errors(), vec!["Invalid OTP".to_string()]);
}

#[tokio::test]
async fn test_resend_waits_for_countdown() {
    let mut f = at_other_details().await;
    f.flow.submit_other_details().await.unwrap();

    assert!(f.flow.resend_otp().await.is_err());
    assert_eq!(f.portal.call_count("send_verify_otp"), 0);

    f.flow.tick(Duration::from_millis(119_999));
    assert!(!f.flow.can_resend());
    assert_eq!(f.flow.countdown().display(), "0:01");

    f.flow.tick(Duration::from_millis(1));
    assert!(f.flow.can_resend());

    f.flow.resend_otp().await.unwrap();
    assert_eq!(f.portal.call_count("send_verify_otp"), 1);
    assert_eq!(f.flow.countdown().display(), "2:00");
    assert!(!f.flow.can_resend());
}

#[tokio::test]
async fn test_login_success_refreshes_session_and_goes_to_dashboard() {
    let mut f = at_login().await;
    f.flow.set_password("secret1");

    assert_eq!(f.flow.login().await.unwrap(), AuthStep::Authenticated);
    assert_eq!(f.session.session_refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(f.navigator.current(), Some(Route::Dashboard));
}

#[tokio::test]
async fn test_login_rate_limit_shows_advisory() {
    let mut f = at_login().await;
    f.flow.set_password("secret1");
    f.portal.fail(
        "login",
        ClientError::rejected(Some(429), "Too many requests, please try again later."),
    );

    let err = f.flow.login().await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.user_message(), LOGIN_RATE_LIMIT_MESSAGE);
    assert_eq!(f.notifier.errors(), vec![LOGIN_RATE_LIMIT_MESSAGE.to_string()]);
    assert_eq!(f.flow.step(), AuthStep::Login);
    assert!(f.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_login_rejection_keeps_backend_message() {
    let mut f = at_login().await;
    f.flow.set_password("wrong-password");
    f.portal.fail("login", ClientError::rejected(Some(401), "Invalid credentials"));

    let err = f.flow.login().await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(f.flow.step(), AuthStep::Login);
}

#[tokio::test]
async fn test_login_without_session_stays_on_login() {
    let mut f = at_login().await;
    f.flow.set_password("secret1");
    f.session.authenticated.store(false, Ordering::SeqCst);

    assert!(f.flow.login().await.is_err());
    assert_eq!(f.flow.step(), AuthStep::Login);
    assert!(f.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_password_reset_returns_to_login() {
    let mut f = at_login().await;

    assert_eq!(f.flow.forgot_password().unwrap(), AuthStep::ForgotPassword);
    assert_eq!(f.flow.request_reset_otp().await.unwrap(), AuthStep::ResetPasswordOtp);
    assert_eq!(f.flow.countdown().display(), "2:00");

    f.flow.otp_mut().paste("123456");
    let form = f.flow.reset_form_mut();
    form.new_password = "newsecret".to_string();
    form.confirm_password = "newsecret".to_string();

    assert_eq!(f.flow.submit_password_reset().await.unwrap(), AuthStep::Login);
    assert_eq!(f.portal.call_count("reset_password"), 1);
    assert!(!f.flow.countdown().is_running());
}

#[tokio::test]
async fn test_password_reset_mismatch_is_local() {
    let mut f = at_login().await;
    f.flow.forgot_password().unwrap();
    f.flow.request_reset_otp().await.unwrap();

    f.flow.otp_mut().paste("123456");
    let form = f.flow.reset_form_mut();
    form.new_password = "newsecret".to_string();
    form.confirm_password = "different".to_string();

    assert!(f.flow.submit_password_reset().await.unwrap_err().is_validation());
    assert_eq!(f.portal.call_count("reset_password"), 0);
    assert_eq!(f.flow.step(), AuthStep::ResetPasswordOtp);
}

#[tokio::test]
async fn test_reset_resend_uses_reset_endpoint() {
    let mut f = at_login().await;
    f.flow.forgot_password().unwrap();
    f.flow.request_reset_otp().await.unwrap();

    f.flow.tick(Duration::from_secs(120));
    f.flow.resend_otp().await.unwrap();

    assert_eq!(f.portal.call_count("send_reset_otp"), 2);
    assert_eq!(f.portal.call_count("send_verify_otp"), 0);
}

#[tokio::test]
async fn test_back_to_login_stops_countdown() {
    let mut f = at_login().await;
    f.flow.forgot_password().unwrap();
    f.flow.request_reset_otp().await.unwrap();

    assert_eq!(f.flow.back_to_login().unwrap(), AuthStep::Login);
    assert!(!f.flow.countdown().is_running());
}

#[tokio::test]
async fn test_change_phone_clears_only_password() {
    let mut f = fixture(MockPortal::new());
    f.flow.set_phone(PHONE);
    f.flow.submit_phone().await.unwrap();
    f.flow.registration_mut().name = "Nimal Perera".to_string();
    f.flow.set_password("secret1");

    assert_eq!(f.flow.change_phone().unwrap(), AuthStep::Check);

    assert!(f.flow.password().is_empty());
    assert_eq!(f.flow.phone(), PHONE);
    assert_eq!(f.flow.registration().name, "Nimal Perera");
}

#[tokio::test]
async fn test_operations_outside_their_step_are_refused() {
    let mut f = fixture(MockPortal::new());

    assert!(matches!(
        f.flow.submit_nic(),
        Err(ClientError::InvalidStep { operation: "submit_nic", .. })
    ));
    assert!(f.flow.login().await.is_err());
    assert!(f.flow.resend_otp().await.is_err());
    assert!(f.flow.change_phone().is_err());
    assert_eq!(f.flow.step(), AuthStep::Check);
    assert!(f.portal.calls().is_empty());
    assert!(f.notifier.received().is_empty());
}
