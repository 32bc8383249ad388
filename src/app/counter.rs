//! Count-up animation for the studio stats.
//!
//! A counter advances by `target / (DURATION / STEP)` every [`STEP`] of
//! elapsed time, shows the floored value while running and `"{target}+"`
//! once it reaches its target.  Each counter runs at most once.

use std::time::Duration;

pub const DURATION: Duration = Duration::from_millis(2000);
pub const STEP: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedCounter {
    target: u32,
    step: f64,
    current: f64,
    started: bool,
    done: bool,
    /// Elapsed time not yet converted into steps.
    carry: Duration,
}

impl AnimatedCounter {
    pub fn new(target: u32) -> Self {
        let steps = (DURATION.as_millis() / STEP.as_millis()) as f64;
        Self {
            target,
            step: f64::from(target) / steps,
            current: 0.0,
            started: false,
            done: false,
            carry: Duration::ZERO,
        }
    }

    /// Begin counting.  Later calls are ignored.
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by `elapsed` wall time.
    pub fn update(&mut self, elapsed: Duration) {
        if !self.started || self.done {
            return;
        }
        self.carry += elapsed;
        while self.carry >= STEP && !self.done {
            self.carry -= STEP;
            self.current += self.step;
            if self.current >= f64::from(self.target) {
                self.done = true;
            }
        }
    }

    pub fn text(&self) -> String {
        if self.done {
            format!("{}+", self.target)
        } else {
            format!("{}", self.current.floor() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut counter = AnimatedCounter::new(100);
        counter.update(Duration::from_secs(5));
        assert_eq!(counter.text(), "0");
        assert!(!counter.is_done());
    }

    #[test]
    fn counts_in_sixteen_ms_steps() {
        let mut counter = AnimatedCounter::new(250);
        counter.start();
        counter.update(Duration::from_millis(15));
        assert_eq!(counter.text(), "0");
        counter.update(Duration::from_millis(1));
        assert_eq!(counter.text(), "2");
        counter.update(Duration::from_millis(160));
        assert_eq!(counter.text(), "22");
    }

    #[test]
    fn finishes_with_plus_suffix_after_duration() {
        let mut counter = AnimatedCounter::new(18);
        counter.start();
        counter.update(Duration::from_millis(1000));
        assert!(!counter.is_done());
        counter.update(Duration::from_millis(1100));
        assert!(counter.is_done());
        assert_eq!(counter.text(), "18+");

        counter.update(Duration::from_secs(1));
        assert_eq!(counter.text(), "18+");
    }
}
