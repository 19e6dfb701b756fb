//! Unit tests for backend status mapping

use crate::domain::entities::{
    NicRecord, NicStatus, Payment, PaymentMethod, PaymentStatus, ShipmentStatus, TuteShipment,
};

#[test]
fn test_nic_status_never_invents_a_third_state() {
    let pending: NicRecord = serde_json::from_str(r#"{"status":"pending","imageUrl":"/nic/1.jpg"}"#).unwrap();
    assert_eq!(pending.status, NicStatus::Pending);
    assert_eq!(pending.image_url.as_deref(), Some("/nic/1.jpg"));

    for raw in ["failed", "approved", "verified", "", "PENDING?"] {
        let json = format!(r#"{{"status":"{}"}}"#, raw);
        let record: NicRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.status, NicStatus::Failed, "status {:?}", raw);
    }

    let upper: NicRecord = serde_json::from_str(r#"{"status":"Pending"}"#).unwrap();
    assert!(upper.status.is_pending());
}

#[test]
fn test_payment_parsing() {
    let json = r#"{
        "_id": "p1",
        "courseTitle": "Combined Maths 2026 Theory",
        "amount": 3500,
        "method": "bank-slip",
        "status": "weird",
        "transactionNumber": "TX123"
    }"#;
    let payment: Payment = serde_json::from_str(json).unwrap();
    assert_eq!(payment.method, PaymentMethod::BankSlip);
    assert_eq!(payment.status, PaymentStatus::Failed);
    assert_eq!(payment.amount, 3500.0);
}

#[test]
fn test_tute_tracking_link() {
    let shipment = TuteShipment {
        tracking_number: Some("CX-889".to_string()),
        courier: Some("Domex".to_string()),
        status: ShipmentStatus::from("shipped".to_string()),
    };
    assert_eq!(shipment.status, ShipmentStatus::Dispatched);
    assert_eq!(
        shipment.tracking_link("https://track.example/?id={tracking}").as_deref(),
        Some("https://track.example/?id=CX-889")
    );

    let unshipped = TuteShipment {
        tracking_number: Some("  ".to_string()),
        courier: None,
        status: ShipmentStatus::Preparing,
    };
    assert_eq!(unshipped.tracking_link("{tracking}"), None);
}
