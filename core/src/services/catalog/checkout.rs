//! WhatsApp checkout message.

use crate::domain::entities::{Course, UserProfile};

/// Order text pre-filled in the WhatsApp chat
pub fn whatsapp_message(course: &Course, user: &UserProfile) -> String {
    let mut lines = vec![
        "Hello, I would like to enroll in the following course.".to_string(),
        format!("Course: {}", course.title),
        format!("Course ID: {}", course.id),
        format!("Price: Rs. {:.2}", course.price),
        format!("Name: {}", user.name),
        format!("Phone: {}", user.phone),
    ];
    if let Some(nic) = user.nic_number.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(format!("NIC: {}", nic));
    }
    lines.join("\n")
}
