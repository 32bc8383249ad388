//! Page transition played between choosing a menu link and landing on its
//! section.

use std::time::Duration;

use super::page::SectionId;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTransition {
    target: SectionId,
    elapsed: Duration,
}

impl PageTransition {
    pub fn new(target: SectionId) -> Self {
        Self {
            target,
            elapsed: Duration::ZERO,
        }
    }

    pub fn target(&self) -> SectionId {
        self.target
    }

    /// Advance the curtain.  Returns the section to land on once it has
    /// fully closed.
    pub fn update(&mut self, elapsed: Duration) -> Option<SectionId> {
        self.elapsed = (self.elapsed + elapsed).min(TRANSITION_DURATION);
        (self.elapsed >= TRANSITION_DURATION).then_some(self.target)
    }

    /// 0.0 when the link was chosen, 1.0 when navigation happens.
    pub fn progress(&self) -> f64 {
        self.elapsed.as_secs_f64() / TRANSITION_DURATION.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lands_after_600ms() {
        let mut t = PageTransition::new(SectionId::Work);
        assert_eq!(t.update(Duration::from_millis(300)), None);
        assert!((t.progress() - 0.5).abs() < 1e-12);
        assert_eq!(t.update(Duration::from_millis(299)), None);
        assert_eq!(t.update(Duration::from_millis(1)), Some(SectionId::Work));
        assert_eq!(t.progress(), 1.0);
    }
}
