//! Printed course material shipments.

use serde::{Deserialize, Serialize};

/// Courier progress of a tute parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipmentStatus {
    Preparing,
    Dispatched,
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Preparing => "preparing",
            ShipmentStatus::Dispatched => "dispatched",
            ShipmentStatus::Delivered => "delivered",
        }
    }
}

// Anything unrecognised is shown as not yet shipped.
impl From<String> for ShipmentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dispatched" | "shipped" | "in_transit" => ShipmentStatus::Dispatched,
            "delivered" => ShipmentStatus::Delivered,
            _ => ShipmentStatus::Preparing,
        }
    }
}

impl From<ShipmentStatus> for String {
    fn from(value: ShipmentStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Tute parcel tracked through a third-party courier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuteShipment {
    #[serde(default)]
    pub tracking_number: Option<String>,

    #[serde(default)]
    pub courier: Option<String>,

    pub status: ShipmentStatus,
}

impl TuteShipment {
    /// Courier tracking link built from a template containing `{tracking}`.
    ///
    /// `None` until the parcel has a tracking number.
    pub fn tracking_link(&self, template: &str) -> Option<String> {
        self.tracking_number
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| template.replace("{tracking}", t))
    }
}
