//! Counters shown on the dashboard and the payments page.

use crate::domain::entities::{Enrollment, Payment, PaymentStatus, ShipmentStatus, TuteShipment};

/// Payment history totals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentSummary {
    pub pending: usize,
    pub approved: usize,
    pub failed: usize,
    /// Sum of approved payments, in rupees
    pub approved_total: f64,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        payments.iter().fold(Self::default(), |mut summary, payment| {
            match payment.status {
                PaymentStatus::Pending => summary.pending += 1,
                PaymentStatus::Approved => {
                    summary.approved += 1;
                    summary.approved_total += payment.amount;
                }
                PaymentStatus::Failed => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.failed
    }
}

/// Enrollment and tute shipment counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub enrolled: usize,
    pub tutes_preparing: usize,
    pub tutes_dispatched: usize,
    pub tutes_delivered: usize,
}

impl DashboardSummary {
    pub fn from_enrollments(enrolled: &[Enrollment]) -> Self {
        let mut summary = Self {
            enrolled: enrolled.len(),
            ..Self::default()
        };
        for shipment in shipments(enrolled) {
            match shipment.status {
                ShipmentStatus::Preparing => summary.tutes_preparing += 1,
                ShipmentStatus::Dispatched => summary.tutes_dispatched += 1,
                ShipmentStatus::Delivered => summary.tutes_delivered += 1,
            }
        }
        summary
    }

    /// Parcels not yet delivered
    pub fn tutes_in_progress(&self) -> usize {
        self.tutes_preparing + self.tutes_dispatched
    }
}

/// Shipment of every enrollment that ships a tute
pub fn shipments(enrolled: &[Enrollment]) -> impl Iterator<Item = &TuteShipment> {
    enrolled.iter().filter_map(|e| e.tute.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Course, PaymentMethod};

    fn payment(status: PaymentStatus, amount: f64) -> Payment {
        Payment {
            id: format!("p-{}", amount),
            course_title: "Physics".to_string(),
            amount,
            method: PaymentMethod::BankSlip,
            status,
            transaction_number: None,
            created_at: None,
        }
    }

    fn enrollment(status: Option<ShipmentStatus>) -> Enrollment {
        Enrollment {
            course: Course {
                id: "c-1".to_string(),
                title: "Physics".to_string(),
                description: String::new(),
                price: 0.0,
                category_id: None,
                subcategory_id: None,
                thumbnail: None,
                has_tute: status.is_some(),
            },
            enrolled_at: None,
            tute: status.map(|status| TuteShipment {
                tracking_number: None,
                courier: None,
                status,
            }),
        }
    }

    #[test]
    fn test_payment_summary() {
        let payments = vec![
            payment(PaymentStatus::Approved, 2500.0),
            payment(PaymentStatus::Approved, 3000.0),
            payment(PaymentStatus::Pending, 1500.0),
            payment(PaymentStatus::Failed, 1000.0),
        ];
        let summary = PaymentSummary::from_payments(&payments);

        assert_eq!(summary.approved, 2);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.approved_total, 5500.0);
    }

    #[test]
    fn test_dashboard_summary() {
        let enrolled = vec![
            enrollment(Some(ShipmentStatus::Preparing)),
            enrollment(Some(ShipmentStatus::Dispatched)),
            enrollment(Some(ShipmentStatus::Delivered)),
            enrollment(None),
        ];
        let summary = DashboardSummary::from_enrollments(&enrolled);

        assert_eq!(summary.enrolled, 4);
        assert_eq!(summary.tutes_in_progress(), 2);
        assert_eq!(summary.tutes_delivered, 1);
        assert_eq!(shipments(&enrolled).count(), 3);
    }
}
