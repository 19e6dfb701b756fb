//! Unit tests for the user profile entity

use crate::domain::entities::user::{District, ExamYear, Gender, Stream, UserProfile};

#[test]
fn test_profile_deserializes_backend_shape() {
    let json = r#"{
        "_id": "665f1c",
        "name": "Nimal Perera",
        "phone": "0711234567",
        "nic": "200012345678",
        "isNicVerified": true,
        "district": "Nuwara Eliya",
        "examYear": "2026",
        "stream": "Physical Science",
        "gender": "male"
    }"#;

    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.id, "665f1c");
    assert_eq!(profile.nic_number.as_deref(), Some("200012345678"));
    assert!(profile.nic_verified);
    assert_eq!(profile.district(), Some(District::NuwaraEliya));
    assert_eq!(profile.exam_year(), Some(ExamYear::Y2026));
    assert_eq!(profile.stream(), Some(Stream::PhysicalScience));
    assert_eq!(profile.gender(), Some(Gender::Male));
    assert_eq!(profile.first_name(), "Nimal");
}

#[test]
fn test_unknown_enumerated_value_does_not_break_profile() {
    let json = r#"{"id":"1","name":"A","phone":"0711234567","district":"Atlantis"}"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.district.as_deref(), Some("Atlantis"));
    assert_eq!(profile.district(), None);
}

#[test]
fn test_enumerated_sets() {
    assert_eq!(District::ALL.len(), 25);
    assert_eq!("colombo".parse::<District>().unwrap(), District::Colombo);
    assert!("Mars".parse::<District>().is_err());
    assert_eq!("2027".parse::<ExamYear>().unwrap(), ExamYear::Y2027);
    assert!("1999".parse::<ExamYear>().is_err());
    assert_eq!("commerce".parse::<Stream>().unwrap(), Stream::Commerce);

    let err = "other".parse::<Gender>().unwrap_err();
    assert_eq!(err.to_string(), "'other' is not a valid gender");
}
