//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Local mobile number: 07 followed by 8 digits
pub static LOCAL_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^07[0-9]{8}$").unwrap());

// A local mobile number, or nothing for optional fields
pub static OPTIONAL_LOCAL_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(07[0-9]{8})?$").unwrap());

/// Check if a phone number is a valid local mobile number.
///
/// The check is applied to the input exactly as typed; formatting characters
/// such as spaces or dashes make the number invalid.
pub fn is_valid_local_mobile(phone: &str) -> bool {
    LOCAL_MOBILE_REGEX.is_match(phone)
}

/// Convert a local mobile number (`07XXXXXXXX`) to the international
/// form without the plus sign (`947XXXXXXXX`), as used by chat links.
pub fn to_international_digits(phone: &str) -> Option<String> {
    if is_valid_local_mobile(phone) {
        Some(format!("94{}", &phone[1..]))
    } else {
        None
    }
}

/// Mask a phone number for display and logs (e.g., 071****567)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
