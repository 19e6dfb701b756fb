//! Moving watermark drawn over the video player.

use std::time::Duration;

use lp_shared::phone::mask_phone_number;

use crate::domain::entities::UserProfile;

/// Time the watermark stays in one corner
pub const WATERMARK_ROTATION: Duration = Duration::from_secs(15);

/// Corner of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkAnchor {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl WatermarkAnchor {
    /// Visiting order, clockwise from the top left
    pub const CYCLE: [WatermarkAnchor; 4] = [
        WatermarkAnchor::TopLeft,
        WatermarkAnchor::TopRight,
        WatermarkAnchor::BottomRight,
        WatermarkAnchor::BottomLeft,
    ];
}

/// Identifies the viewer on every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    text: String,
}

impl Watermark {
    pub fn for_user(user: &UserProfile) -> Self {
        Self {
            text: format!("{} | {}", user.name.trim(), mask_phone_number(&user.phone)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Corner to draw in after `elapsed` playback time
    pub fn position_at(&self, elapsed: Duration) -> WatermarkAnchor {
        let slot = elapsed.as_secs() / WATERMARK_ROTATION.as_secs();
        WatermarkAnchor::CYCLE[(slot % WatermarkAnchor::CYCLE.len() as u64) as usize]
    }
}
