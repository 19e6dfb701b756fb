//! Offline checkout and shipment tracking settings

use serde::{Deserialize, Serialize};
use std::env;

/// Settings for WhatsApp checkout and courier tracking links
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutConfig {
    /// Number that receives WhatsApp orders, international digits without `+`
    pub whatsapp_number: String,

    /// Courier tracking page; `{tracking}` is replaced by the tracking number
    pub courier_tracking_url: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: String::from("94700000000"),
            courier_tracking_url: String::from("https://track.courier.lk/?tracking={tracking}"),
        }
    }
}

impl CheckoutConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            whatsapp_number: env::var("CHECKOUT_WHATSAPP_NUMBER")
                .map(|n| n.trim_start_matches('+').to_string())
                .unwrap_or(defaults.whatsapp_number),
            courier_tracking_url: env::var("COURIER_TRACKING_URL")
                .unwrap_or(defaults.courier_tracking_url),
        }
    }
}
