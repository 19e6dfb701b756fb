//! Payment endpoints of the portal backend.

use async_trait::async_trait;

use crate::domain::entities::Payment;
use crate::domain::value_objects::FileCandidate;
use crate::errors::ClientResult;

/// A bank slip ready for submission
#[derive(Debug, Clone, PartialEq)]
pub struct BankSlipSubmission {
    pub course_id: String,
    pub transaction_number: String,
    pub delivery_address: String,
    pub phone: String,
    pub secondary_phone: String,
    pub slip: FileCandidate,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// `GET /api/user/payment-history`
    async fn payment_history(&self) -> ClientResult<Vec<Payment>>;

    /// `POST /api/user/payment/bankslip` (multipart)
    async fn submit_bank_slip(&self, submission: &BankSlipSubmission) -> ClientResult<()>;
}
