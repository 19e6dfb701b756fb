//! Resend cooldown timer.

use std::time::Duration;

/// Cooldown before a one-time code can be requested again (2 minutes)
pub const OTP_RESEND_COOLDOWN: Duration = Duration::from_millis(120_000);

/// Countdown driven by explicit ticks; it owns no timer of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    initial: Duration,
    remaining: Duration,
}

impl Countdown {
    /// A countdown that has not been started
    pub fn idle(initial: Duration) -> Self {
        Self {
            initial,
            remaining: Duration::ZERO,
        }
    }

    /// (Re)start from the initial value
    pub fn restart(&mut self) {
        self.remaining = self.initial;
    }

    /// Stop without waiting for zero
    pub fn stop(&mut self) {
        self.remaining = Duration::ZERO;
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        !self.remaining.is_zero()
    }

    /// Remaining time as `m:ss`, rounding partial seconds up
    pub fn display(&self) -> String {
        let millis = self.remaining.as_millis();
        let secs = millis.div_ceil(1000);
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle(OTP_RESEND_COOLDOWN)
    }
}
