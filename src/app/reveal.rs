//! Reveal-on-visible: a section slides up into place the first time any of
//! its rows enters the viewport, and stays revealed afterwards.

use std::time::Duration;

pub const REVEAL_DURATION: Duration = Duration::from_millis(600);
/// Rows a section starts below its resting place.
pub const REVEAL_RISE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reveal {
    triggered: bool,
    /// 0.0 at trigger, 1.0 once settled.
    progress: f64,
}

impl Reveal {
    /// Mark the section visible.  Returns `true` on the first call only.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn update(&mut self, elapsed: Duration) {
        if self.triggered && self.progress < 1.0 {
            self.progress =
                (self.progress + elapsed.as_secs_f64() / REVEAL_DURATION.as_secs_f64()).min(1.0);
        }
    }

    /// Rows the content is still pushed down by (ease-out).
    pub fn row_shift(&self) -> u16 {
        let eased = 1.0 - (1.0 - self.progress).powi(2);
        ((1.0 - eased) * REVEAL_RISE).round() as u16
    }
}
