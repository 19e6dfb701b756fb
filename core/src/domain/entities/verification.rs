//! NIC verification record as seen by the client.

use serde::{Deserialize, Serialize};

/// The two states the backend exposes for an uploaded NIC.
///
/// Any status string other than
/// `pending` is treated as `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NicStatus {
    Pending,
    Failed,
}

impl NicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NicStatus::Pending => "pending",
            NicStatus::Failed => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, NicStatus::Pending)
    }
}

impl From<String> for NicStatus {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("pending") {
            NicStatus::Pending
        } else {
            NicStatus::Failed
        }
    }
}

impl From<NicStatus> for String {
    fn from(value: NicStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Latest NIC submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicRecord {
    pub status: NicStatus,

    #[serde(default, alias = "nicImage")]
    pub image_url: Option<String>,
}
