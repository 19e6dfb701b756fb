//! Response decoding: envelope, status mapping and endpoint payloads.

use lp_core::domain::entities::{Category, Course, Enrollment, NicRecord, Payment, UserProfile};
use lp_core::errors::{ClientError, ClientResult};
use lp_shared::types::ApiEnvelope;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Map a status code and raw body to the payload or a [`ClientError`].
///
/// - 2xx with `success: true` decodes the payload; a payload that does not
///   fit is `Unexpected`
/// - any other status, or `success: false`, is `Rejected` carrying the
///   backend message
/// - a body that is not JSON is `Transport` on 5xx, `Rejected` on other
///   error statuses and `Unexpected` on 2xx
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    let ok_status = (200..300).contains(&status);

    let envelope: ApiEnvelope<Value> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(err) if ok_status => {
            return Err(ClientError::unexpected(format!("undecodable response body: {}", err)));
        }
        Err(_) if status >= 500 => {
            return Err(ClientError::transport(format!("server error {}", status)));
        }
        Err(_) => return Err(ClientError::rejected(Some(status), String::new())),
    };

    if !ok_status || !envelope.is_success() {
        let message = envelope.message_or("").to_string();
        return Err(ClientError::rejected(Some(status), message));
    }

    serde_json::from_value(envelope.into_payload())
        .map_err(|err| ClientError::unexpected(format!("unexpected payload: {}", err)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Registered {
    #[serde(alias = "isUserRegistered", alias = "registered")]
    pub is_registered: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserData {
    #[serde(alias = "user")]
    pub user_data: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileData {
    #[serde(alias = "profile")]
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseList {
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseData {
    pub course: Course,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnrolledList {
    #[serde(default, alias = "enrolledCourses")]
    pub enrollments: Vec<Enrollment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentList {
    #[serde(default, alias = "paymentHistory")]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NicInfo {
    #[serde(default, alias = "nic")]
    pub nic_info: Option<NicRecord>,
}
