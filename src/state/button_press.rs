//! Press feedback for the save button

use std::time::{Duration, Instant};

/// Tracks a recent button press so it can fade back in
#[derive(Debug, Clone, Copy)]
pub struct ButtonPress {
    started: Instant,
}

impl ButtonPress {
    /// Length of the fade after a press (150ms)
    pub const DURATION: Duration = Duration::from_millis(150);

    pub fn new() -> Self {
        Self::at(Instant::now())
    }

    pub fn at(started: Instant) -> Self {
        Self { started }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= Self::DURATION
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Opacity between 0.6 (just pressed) and 1.0 (fully recovered)
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        let progress = (elapsed.as_secs_f32() / Self::DURATION.as_secs_f32()).min(1.0);
        0.6 + 0.4 * simple_easing::cubic_out(progress)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity_at(Instant::now())
    }
}

impl Default for ButtonPress {
    fn default() -> Self {
        Self::new()
    }
}
