//! Skill bars: each bar widens to its percentage once, the first time its
//! row is on screen.

use std::time::Duration;

pub const FILL_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBar {
    percent: u16,
    started: bool,
    /// 0.0 when started, 1.0 once filled.
    progress: f64,
}

impl SkillBar {
    pub fn new(percent: u16) -> Self {
        Self {
            percent: percent.min(100),
            started: false,
            progress: 0.0,
        }
    }

    /// Begin filling.  Later calls are ignored.
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn update(&mut self, elapsed: Duration) {
        if self.started && self.progress < 1.0 {
            self.progress =
                (self.progress + elapsed.as_secs_f64() / FILL_DURATION.as_secs_f64()).min(1.0);
        }
    }

    /// Filled fraction of the full bar, eased out.
    pub fn ratio(&self) -> f64 {
        let eased = 1.0 - (1.0 - self.progress).powi(3);
        f64::from(self.percent) / 100.0 * eased
    }
}
