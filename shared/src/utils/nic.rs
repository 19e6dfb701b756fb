//! National identity card number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Old format: 9 digits followed by V or X
static OLD_NIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}[VvXx]$").unwrap());

// New format: 12 digits
static NEW_NIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").unwrap());

/// Which card generation a NIC number belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicFormat {
    Old,
    New,
}

/// Detect the format of a NIC number, `None` when it matches neither
pub fn nic_format(nic: &str) -> Option<NicFormat> {
    let nic = nic.trim();
    if OLD_NIC_REGEX.is_match(nic) {
        Some(NicFormat::Old)
    } else if NEW_NIC_REGEX.is_match(nic) {
        Some(NicFormat::New)
    } else {
        None
    }
}

pub fn is_valid_nic(nic: &str) -> bool {
    nic_format(nic).is_some()
}
