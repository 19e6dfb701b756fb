//! Bank-slip checkout form.

use std::sync::Arc;

use lp_shared::phone::OPTIONAL_LOCAL_MOBILE_REGEX;
use lp_shared::validation::{check_fields, validators, FieldErrors, Validate, NOT_BLANK_REGEX};

use crate::domain::value_objects::FileCandidate;
use crate::errors::{ClientError, ClientResult, DUPLICATE_TRANSACTION_MESSAGE, STATUS_CONFLICT};
use crate::repositories::{BankSlipSubmission, PaymentRepository};
use crate::services::notification::{Notification, Notifier};
use crate::services::session::SessionHandle;

use super::card::{SelectionSource, SubmissionProgress, UploadCard};
use super::policy::{UploadPolicy, UploadRejection};
use super::preview::PreviewStore;

const SLIP_SUBMITTED_MESSAGE: &str = "Payment slip submitted. We will verify it shortly.";

/// Text fields that accompany the slip image; the phones are optional
#[derive(Debug, Clone, Default, PartialEq, Eq, validator::Validate)]
pub struct SlipMetadata {
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "course is required"))]
    pub course_id: String,
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "transaction number is required"))]
    pub transaction_number: String,
    pub delivery_address: String,
    #[validate(regex(path = *OPTIONAL_LOCAL_MOBILE_REGEX, code = "INVALID_PHONE", message = "Enter a valid mobile number (07XXXXXXXX)"))]
    pub phone: String,
    #[validate(regex(path = *OPTIONAL_LOCAL_MOBILE_REGEX, code = "INVALID_PHONE", message = "Enter a valid mobile number (07XXXXXXXX)"))]
    pub secondary_phone: String,
}

impl Validate for SlipMetadata {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_fields(self).into_result()
    }
}

/// Upload card plus metadata for a bank-slip payment
pub struct PaymentSlipForm<R: PaymentRepository> {
    payments: Arc<R>,
    session: Arc<dyn SessionHandle>,
    notifier: Arc<dyn Notifier>,
    card: UploadCard,
    metadata: SlipMetadata,
}

impl<R: PaymentRepository> PaymentSlipForm<R> {
    pub fn new(
        payments: Arc<R>,
        session: Arc<dyn SessionHandle>,
        notifier: Arc<dyn Notifier>,
        policy: UploadPolicy,
        previews: Arc<dyn PreviewStore>,
        course_id: impl Into<String>,
    ) -> Self {
        Self {
            payments,
            session,
            notifier,
            card: UploadCard::new(policy, previews),
            metadata: SlipMetadata {
                course_id: course_id.into(),
                ..SlipMetadata::default()
            },
        }
    }

    pub fn card(&self) -> &UploadCard {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut UploadCard {
        &mut self.card
    }

    pub fn metadata(&self) -> &SlipMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut SlipMetadata {
        &mut self.metadata
    }

    /// Select the slip image; a rejection is also sent as a notification
    pub fn select_file(&mut self, file: FileCandidate, source: SelectionSource) -> Result<(), UploadRejection> {
        self.card.select(file, source).inspect_err(|rejection| {
            self.notifier.notify(Notification::error(rejection.to_string()));
        })
    }

    pub fn progress(&self) -> SubmissionProgress {
        self.card.progress()
    }

    /// Submit is offered only with a file, a transaction number and no
    /// submission running
    pub fn can_submit(&self) -> bool {
        !self.card.is_in_flight()
            && self.card.has_file()
            && validators::not_empty(&self.metadata.transaction_number)
    }

    /// Send the slip.
    ///
    /// On failure the file and every field stay as they were so the user
    /// can retry. On success the draft is discarded and payment history is
    /// reloaded.
    pub async fn submit(&mut self) -> ClientResult<()> {
        if !self.can_submit() {
            let err = ClientError::field(
                "file",
                "Please select a payment slip and enter the transaction number.",
                "INCOMPLETE_SUBMISSION",
            );
            return Err(self.report(err));
        }
        if let Err(errors) = self.metadata.validate() {
            return Err(self.report(errors.into()));
        }
        let Some(slip) = self.card.file().cloned() else {
            return Err(self.report(ClientError::field("file", "Please select a payment slip.", "REQUIRED_FIELD")));
        };

        let progress = self.card.progress();
        if !progress.try_begin() {
            return Err(ClientError::field("file", "A submission is already in progress.", "IN_FLIGHT"));
        }

        let submission = BankSlipSubmission {
            course_id: self.metadata.course_id.trim().to_string(),
            transaction_number: self.metadata.transaction_number.trim().to_string(),
            delivery_address: self.metadata.delivery_address.trim().to_string(),
            phone: self.metadata.phone.trim().to_string(),
            secondary_phone: self.metadata.secondary_phone.trim().to_string(),
            slip,
        };

        tracing::info!(
            course_id = %submission.course_id,
            event = "bank_slip_submit",
            "Submitting bank slip"
        );

        let result = progress.track(self.payments.submit_bank_slip(&submission)).await;
        match result {
            Ok(()) => {
                progress.finish(true);
                self.card.clear();
                self.metadata.transaction_number.clear();
                self.notifier.notify(Notification::success(SLIP_SUBMITTED_MESSAGE));
                if let Err(e) = self.session.refresh_payments().await {
                    tracing::warn!(error = %e, "payment history refresh after slip upload failed");
                }
                Ok(())
            }
            Err(err) => {
                progress.finish(false);
                let err = err.with_status_override(STATUS_CONFLICT, DUPLICATE_TRANSACTION_MESSAGE);
                self.card.set_error(err.user_message());
                Err(self.report(err))
            }
        }
    }

    fn report(&self, err: ClientError) -> ClientError {
        tracing::warn!(code = err.code(), error = %err, "bank slip submission failed");
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }
}
