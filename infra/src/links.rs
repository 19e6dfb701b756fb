//! Outbound links: WhatsApp checkout and courier tracking.

use lp_core::domain::entities::{Course, TuteShipment, UserProfile};
use lp_core::services::catalog::checkout::whatsapp_message;
use lp_shared::config::CheckoutConfig;
use reqwest::Url;

use crate::InfrastructureError;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// `https://wa.me/<number>?text=<message>` with the message URL-encoded
pub fn whatsapp_link(number: &str, message: &str) -> Result<Url, InfrastructureError> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(InfrastructureError::Config(format!("invalid WhatsApp number: {}", number)));
    }
    let mut url = Url::parse(WHATSAPP_BASE)
        .and_then(|base| base.join(&digits))
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

/// Checkout link for buying `course` offline
pub fn checkout_link(
    config: &CheckoutConfig,
    course: &Course,
    user: &UserProfile,
) -> Result<Url, InfrastructureError> {
    whatsapp_link(&config.whatsapp_number, &whatsapp_message(course, user))
}

/// Courier tracking page for a shipment; `None` until a tracking number exists
pub fn tracking_url(config: &CheckoutConfig, shipment: &TuteShipment) -> Option<Url> {
    let link = shipment.tracking_link(&config.courier_tracking_url)?;
    match Url::parse(&link) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!(error = %err, "courier tracking link is not a valid URL");
            None
        }
    }
}
