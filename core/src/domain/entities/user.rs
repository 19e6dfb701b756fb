//! Student profile as held by the portal backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender options offered at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// A/L examination years a student can register for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamYear {
    #[serde(rename = "2025")]
    Y2025,
    #[serde(rename = "2026")]
    Y2026,
    #[serde(rename = "2027")]
    Y2027,
    #[serde(rename = "2028")]
    Y2028,
}

impl ExamYear {
    pub const ALL: [ExamYear; 4] = [ExamYear::Y2025, ExamYear::Y2026, ExamYear::Y2027, ExamYear::Y2028];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamYear::Y2025 => "2025",
            ExamYear::Y2026 => "2026",
            ExamYear::Y2027 => "2027",
            ExamYear::Y2028 => "2028",
        }
    }
}

/// Subject stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    #[serde(rename = "Physical Science")]
    PhysicalScience,
    #[serde(rename = "Biological Science")]
    BiologicalScience,
    Commerce,
    Arts,
    Technology,
}

impl Stream {
    pub const ALL: [Stream; 5] = [
        Stream::PhysicalScience,
        Stream::BiologicalScience,
        Stream::Commerce,
        Stream::Arts,
        Stream::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::PhysicalScience => "Physical Science",
            Stream::BiologicalScience => "Biological Science",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts",
            Stream::Technology => "Technology",
        }
    }
}

/// Administrative districts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum District {
    Ampara,
    Anuradhapura,
    Badulla,
    Batticaloa,
    Colombo,
    Galle,
    Gampaha,
    Hambantota,
    Jaffna,
    Kalutara,
    Kandy,
    Kegalle,
    Kilinochchi,
    Kurunegala,
    Mannar,
    Matale,
    Matara,
    Monaragala,
    Mullaitivu,
    #[serde(rename = "Nuwara Eliya")]
    NuwaraEliya,
    Polonnaruwa,
    Puttalam,
    Ratnapura,
    Trincomalee,
    Vavuniya,
}

impl District {
    pub const ALL: [District; 25] = [
        District::Ampara,
        District::Anuradhapura,
        District::Badulla,
        District::Batticaloa,
        District::Colombo,
        District::Galle,
        District::Gampaha,
        District::Hambantota,
        District::Jaffna,
        District::Kalutara,
        District::Kandy,
        District::Kegalle,
        District::Kilinochchi,
        District::Kurunegala,
        District::Mannar,
        District::Matale,
        District::Matara,
        District::Monaragala,
        District::Mullaitivu,
        District::NuwaraEliya,
        District::Polonnaruwa,
        District::Puttalam,
        District::Ratnapura,
        District::Trincomalee,
        District::Vavuniya,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            District::Ampara => "Ampara",
            District::Anuradhapura => "Anuradhapura",
            District::Badulla => "Badulla",
            District::Batticaloa => "Batticaloa",
            District::Colombo => "Colombo",
            District::Galle => "Galle",
            District::Gampaha => "Gampaha",
            District::Hambantota => "Hambantota",
            District::Jaffna => "Jaffna",
            District::Kalutara => "Kalutara",
            District::Kandy => "Kandy",
            District::Kegalle => "Kegalle",
            District::Kilinochchi => "Kilinochchi",
            District::Kurunegala => "Kurunegala",
            District::Mannar => "Mannar",
            District::Matale => "Matale",
            District::Matara => "Matara",
            District::Monaragala => "Monaragala",
            District::Mullaitivu => "Mullaitivu",
            District::NuwaraEliya => "Nuwara Eliya",
            District::Polonnaruwa => "Polonnaruwa",
            District::Puttalam => "Puttalam",
            District::Ratnapura => "Ratnapura",
            District::Trincomalee => "Trincomalee",
            District::Vavuniya => "Vavuniya",
        }
    }
}

/// Error returned when a value is outside one of the enumerated sets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

fn parse_option<T: Copy>(
    all: &[T],
    as_str: fn(&T) -> &'static str,
    kind: &'static str,
    value: &str,
) -> Result<T, UnknownOption> {
    let value = value.trim();
    all.iter()
        .find(|candidate| as_str(candidate).eq_ignore_ascii_case(value))
        .copied()
        .ok_or_else(|| UnknownOption {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for Gender {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(&Self::ALL, Self::as_str, "gender", s)
    }
}

impl FromStr for ExamYear {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(&Self::ALL, Self::as_str, "exam year", s)
    }
}

impl FromStr for Stream {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(&Self::ALL, Self::as_str, "stream", s)
    }
}

impl FromStr for District {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(&Self::ALL, Self::as_str, "district", s)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Student profile cached by the client.
///
/// Enumerated attributes are kept as the raw strings the backend sends so an
/// unexpected value never prevents the session from loading; use the typed
/// accessors to interpret them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    /// Primary mobile number (local format)
    pub phone: String,

    #[serde(default)]
    pub secondary_phone: Option<String>,

    #[serde(default, alias = "nic")]
    pub nic_number: Option<String>,

    /// Set by the backend once an administrator approved the NIC
    #[serde(default, alias = "isNicVerified")]
    pub nic_verified: bool,

    #[serde(default)]
    pub district: Option<String>,

    #[serde(default)]
    pub exam_year: Option<String>,

    #[serde(default)]
    pub stream: Option<String>,

    #[serde(default)]
    pub school: Option<String>,

    #[serde(default)]
    pub institute: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub birth_date: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub guardian_name: Option<String>,

    #[serde(default)]
    pub guardian_phone: Option<String>,
}

impl UserProfile {
    pub fn district(&self) -> Option<District> {
        self.district.as_deref().and_then(|d| d.parse().ok())
    }

    pub fn exam_year(&self) -> Option<ExamYear> {
        self.exam_year.as_deref().and_then(|y| y.parse().ok())
    }

    pub fn stream(&self) -> Option<Stream> {
        self.stream.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(|g| g.parse().ok())
    }

    /// First name for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}
