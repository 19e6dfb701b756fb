//! Portal backend client over reqwest.

use async_trait::async_trait;
use lp_core::domain::entities::{Category, Course, Enrollment, NicRecord, Payment, UserProfile};
use lp_core::domain::value_objects::FileCandidate;
use lp_core::errors::{ClientError, ClientResult};
use lp_core::repositories::{
    AuthRepository, BankSlipSubmission, CourseRepository, PaymentRepository, ProfileUpdate,
    RegistrationRequest, UserRepository,
};
use lp_shared::config::BackendConfig;
use lp_shared::types::NoPayload;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::endpoints;
use super::envelope::{
    decode_envelope, CategoryList, CourseData, CourseList, EnrolledList, NicInfo, PaymentList,
    ProfileData, Registered, UserData,
};
use crate::InfrastructureError;

/// HTTP implementation of every backend repository.
///
/// The session lives in cookies set by the backend, so one client (and one
/// cookie jar) must be shared by everything that talks to the portal.
#[derive(Clone)]
pub struct HttpPortalClient {
    client: Client,
    config: BackendConfig,
}

impl HttpPortalClient {
    pub fn new(config: BackendConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.config.endpoint(path)), path).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> ClientResult<T> {
        self.send(self.client.post(self.config.endpoint(path)).json(&body), path).await
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> ClientResult<T> {
        self.send(self.client.post(self.config.endpoint(path)).multipart(form), path).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "portal request failed");
            ClientError::from(InfrastructureError::Http(e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from(InfrastructureError::Http(e)))?;
        debug!(path, status, "portal response");

        decode_envelope(status, &body)
    }
}

fn file_part(file: &FileCandidate) -> ClientResult<Part> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| ClientError::from(InfrastructureError::Http(e)))
}

/// Multipart body for `register`
pub(crate) fn registration_form(request: &RegistrationRequest) -> ClientResult<Form> {
    let form = Form::new()
        .text("name", request.name.clone())
        .text("phone", request.phone.clone())
        .text("password", request.password.clone())
        .text("birthDate", request.birth_date.clone())
        .text("gender", request.gender.as_str())
        .text("examYear", request.exam_year.as_str())
        .text("nicNumber", request.nic_number.clone())
        .text("address", request.address.clone())
        .text("school", request.school.clone())
        .text("district", request.district.as_str())
        .text("stream", request.stream.as_str())
        .text("institute", request.institute.clone())
        .text("secondaryPhone", request.secondary_phone.clone());

    match &request.nic_image {
        Some(image) => Ok(form.part("nicImage", file_part(image)?)),
        None => Ok(form),
    }
}

/// Multipart body for `payment/bankslip`
pub(crate) fn bank_slip_form(submission: &BankSlipSubmission) -> ClientResult<Form> {
    Ok(Form::new()
        .text("courseId", submission.course_id.clone())
        .text("transactionNumber", submission.transaction_number.clone())
        .text("deliveryAddress", submission.delivery_address.clone())
        .text("phone", submission.phone.clone())
        .text("secondaryPhone", submission.secondary_phone.clone())
        .part("slip", file_part(&submission.slip)?))
}

#[async_trait]
impl AuthRepository for HttpPortalClient {
    async fn is_user_registered(&self, phone: &str) -> ClientResult<bool> {
        let registered: Registered = self
            .post(endpoints::IS_USER_REGISTERED, json!({ "phone": phone }))
            .await?;
        Ok(registered.is_registered)
    }

    async fn register(&self, request: &RegistrationRequest) -> ClientResult<()> {
        let form = registration_form(request)?;
        self.post_form::<NoPayload>(endpoints::REGISTER, form).await?;
        Ok(())
    }

    async fn verify_account(&self, phone: &str, otp: &str) -> ClientResult<()> {
        self.post::<NoPayload>(endpoints::VERIFY_ACCOUNT, json!({ "phone": phone, "otp": otp }))
            .await?;
        Ok(())
    }

    async fn send_verify_otp(&self, phone: &str) -> ClientResult<()> {
        self.post::<NoPayload>(endpoints::SEND_VERIFY_OTP, json!({ "phone": phone }))
            .await?;
        Ok(())
    }

    async fn login(&self, phone: &str, password: &str) -> ClientResult<()> {
        self.post::<NoPayload>(endpoints::LOGIN, json!({ "phone": phone, "password": password }))
            .await?;
        Ok(())
    }

    async fn logout(&self) -> ClientResult<()> {
        self.post::<NoPayload>(endpoints::LOGOUT, json!({})).await?;
        Ok(())
    }

    async fn send_reset_otp(&self, phone: &str) -> ClientResult<()> {
        self.post::<NoPayload>(endpoints::SEND_RESET_OTP, json!({ "phone": phone }))
            .await?;
        Ok(())
    }

    async fn reset_password(&self, phone: &str, otp: &str, new_password: &str) -> ClientResult<()> {
        let body = json!({ "phone": phone, "otp": otp, "newPassword": new_password });
        self.post::<NoPayload>(endpoints::RESET_PASSWORD, body).await?;
        Ok(())
    }

    /// A client-side rejection (missing or expired cookie) means signed out
    async fn is_authenticated(&self) -> ClientResult<bool> {
        match self.get::<NoPayload>(endpoints::IS_AUTH).await {
            Ok(_) => Ok(true),
            Err(err @ ClientError::Rejected { .. }) if err.status().map_or(true, |s| s < 500) => {
                debug!(status = ?err.status(), "not authenticated");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl UserRepository for HttpPortalClient {
    async fn user_data(&self) -> ClientResult<UserProfile> {
        let data: UserData = self.get(endpoints::USER_DATA).await?;
        Ok(data.user_data)
    }

    async fn profile(&self) -> ClientResult<UserProfile> {
        let data: ProfileData = self.get(endpoints::PROFILE).await?;
        Ok(data.user)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()> {
        let request = self
            .client
            .put(self.config.endpoint(endpoints::UPDATE_PROFILE))
            .json(update);
        self.send::<NoPayload>(request, endpoints::UPDATE_PROFILE).await?;
        Ok(())
    }

    async fn nic_info(&self) -> ClientResult<Option<NicRecord>> {
        let info: NicInfo = self.get(endpoints::NIC_INFO).await?;
        Ok(info.nic_info)
    }

    async fn upload_nic(&self, image: &FileCandidate) -> ClientResult<()> {
        let form = Form::new().part("nicImage", file_part(image)?);
        self.post_form::<NoPayload>(endpoints::NIC_UPLOAD, form).await?;
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for HttpPortalClient {
    async fn all_courses(&self) -> ClientResult<Vec<Course>> {
        let list: CourseList = self.get(endpoints::ALL_COURSES).await?;
        Ok(list.courses)
    }

    async fn course(&self, id: &str) -> ClientResult<Course> {
        let data: CourseData = self.get(&endpoints::course(id)).await?;
        Ok(data.course)
    }

    async fn enrolled_courses(&self) -> ClientResult<Vec<Enrollment>> {
        let list: EnrolledList = self.get(endpoints::ENROLLED_COURSES).await?;
        Ok(list.enrollments)
    }

    async fn categories(&self) -> ClientResult<Vec<Category>> {
        let list: CategoryList = self.get(endpoints::ALL_CATEGORIES).await?;
        Ok(list.categories)
    }
}

#[async_trait]
impl PaymentRepository for HttpPortalClient {
    async fn payment_history(&self) -> ClientResult<Vec<Payment>> {
        let list: PaymentList = self.get(endpoints::PAYMENT_HISTORY).await?;
        Ok(list.payments)
    }

    async fn submit_bank_slip(&self, submission: &BankSlipSubmission) -> ClientResult<()> {
        let form = bank_slip_form(submission)?;
        self.post_form::<NoPayload>(endpoints::BANK_SLIP, form).await?;
        Ok(())
    }
}
