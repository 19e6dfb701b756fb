//! Profile and identity endpoints of the portal backend.

use async_trait::async_trait;
use lp_shared::phone::OPTIONAL_LOCAL_MOBILE_REGEX;
use lp_shared::validation::{check_fields, validators, FieldErrors, Validate, NOT_BLANK_REGEX};
use serde::Serialize;

use crate::domain::entities::{District, NicRecord, UserProfile};
use crate::domain::value_objects::FileCandidate;
use crate::errors::ClientResult;

/// Editable profile fields, sent as JSON to `update-profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "name is required"))]
    pub name: String,
    pub address: String,
    pub school: String,
    pub district: String,
    pub institute: String,
    #[validate(regex(path = *OPTIONAL_LOCAL_MOBILE_REGEX, code = "INVALID_PHONE", message = "Enter a valid mobile number (07XXXXXXXX)"))]
    pub secondary_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *OPTIONAL_LOCAL_MOBILE_REGEX, code = "INVALID_PHONE", message = "Enter a valid mobile number (07XXXXXXXX)"))]
    pub guardian_phone: Option<String>,
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = check_fields(self);
        if validators::not_empty(&self.district) && self.district.parse::<District>().is_err() {
            errors.add_error("district", format!("'{}' is not a valid district", self.district), "INVALID_OPTION");
        }
        errors.into_result()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `GET /api/user/data`
    async fn user_data(&self) -> ClientResult<UserProfile>;

    /// `GET /api/user/profile`
    async fn profile(&self) -> ClientResult<UserProfile>;

    /// `PUT /api/user/update-profile`
    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()>;

    /// `GET /api/user/nic-info`; `None` when nothing was uploaded yet
    async fn nic_info(&self) -> ClientResult<Option<NicRecord>>;

    /// `POST /api/user/nic-upload` (multipart)
    async fn upload_nic(&self, image: &FileCandidate) -> ClientResult<()>;
}
