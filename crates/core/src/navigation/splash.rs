//! Splash gate
//!
//! The splash screen holds for a minimum fixed duration AND until the
//! identity provider has reported its first state, whichever is later. The
//! duration is a deliberate minimum-display floor, not merely "until auth
//! resolves".

use std::time::Duration;

use tokio::time::Instant;

/// Tracks the splash minimum-display floor from the moment it is created.
#[derive(Debug, Clone)]
pub struct SplashGate {
    opened_at: Instant,
    min_duration: Duration,
}

impl SplashGate {
    pub fn new(min_duration: Duration) -> Self {
        Self { opened_at: Instant::now(), min_duration }
    }

    /// True once the minimum display duration has passed.
    pub fn floor_elapsed(&self) -> bool {
        self.opened_at.elapsed() >= self.min_duration
    }

    /// Suspend until the floor has passed.
    pub async fn wait_floor(&self) {
        tokio::time::sleep_until(self.opened_at + self.min_duration).await;
    }

    /// The splash is released only when the floor has passed AND auth has
    /// been checked.
    pub fn is_released(&self, auth_checked: bool) -> bool {
        self.floor_elapsed() && auth_checked
    }
}
