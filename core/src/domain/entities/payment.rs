//! Payment history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Failed => "failed",
        }
    }
}

// Unknown values map to the safer `Failed`.
impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => PaymentStatus::Pending,
            "approved" | "completed" | "success" => PaymentStatus::Approved,
            _ => PaymentStatus::Failed,
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

/// How the student paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    BankSlip,
    WhatsApp,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankSlip => "bankslip",
            PaymentMethod::WhatsApp => "whatsapp",
            PaymentMethod::Online => "online",
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "bankslip" | "bank" => PaymentMethod::BankSlip,
            "whatsapp" => PaymentMethod::WhatsApp,
            _ => PaymentMethod::Online,
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.as_str().to_string()
    }
}

/// One row of the payment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub course_title: String,

    #[serde(default)]
    pub amount: f64,

    pub method: PaymentMethod,

    pub status: PaymentStatus,

    #[serde(default)]
    pub transaction_number: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
