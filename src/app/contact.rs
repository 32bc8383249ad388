//! Simulated contact form.
//!
//! Submitting swaps the button to "Sending..." and disables it.  After
//! [`SENDING_FOR`] the button reads "Message Sent! ✓" and the draft is
//! cleared; after a further [`SENT_FOR`] the original label comes back and
//! the button accepts submits again.  Nothing is actually sent.

use std::time::Duration;

pub const SENDING_FOR: Duration = Duration::from_millis(1500);
pub const SENT_FOR: Duration = Duration::from_millis(3000);

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Message Sent! ✓";

/// Where the submit button is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    draft: String,
    editing: bool,
    phase: SubmitPhase,
    /// Time spent in the current phase.
    elapsed: Duration,
}

impl ContactForm {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// The button ignores submits until the cycle is over.
    pub fn is_disabled(&self) -> bool {
        self.phase != SubmitPhase::Idle
    }

    pub fn label(&self) -> &'static str {
        match self.phase {
            SubmitPhase::Idle => SUBMIT_LABEL,
            SubmitPhase::Sending => SENDING_LABEL,
            SubmitPhase::Sent => SENT_LABEL,
        }
    }

    /// Start a submission.  Returns `false` while the button is disabled.
    pub fn submit(&mut self) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.phase = SubmitPhase::Sending;
        self.elapsed = Duration::ZERO;
        self.editing = false;
        tracing::debug!(chars = self.draft.chars().count(), "contact form submitted");
        true
    }

    pub fn update(&mut self, elapsed: Duration) {
        if self.phase == SubmitPhase::Idle {
            return;
        }
        self.elapsed += elapsed;
        if self.phase == SubmitPhase::Sending && self.elapsed >= SENDING_FOR {
            self.elapsed -= SENDING_FOR;
            self.phase = SubmitPhase::Sent;
            self.draft.clear();
        }
        if self.phase == SubmitPhase::Sent && self.elapsed >= SENT_FOR {
            self.elapsed = Duration::ZERO;
            self.phase = SubmitPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_editing(true);
        "hello".chars().for_each(|c| form.push_char(c));
        form
    }

    #[test]
    fn sending_turns_into_sent_after_1500ms() {
        let mut form = filled();
        assert!(form.submit());
        assert_eq!(form.label(), SENDING_LABEL);
        assert!(!form.is_editing());

        form.update(Duration::from_millis(1499));
        assert_eq!(form.phase(), SubmitPhase::Sending);
        assert_eq!(form.draft(), "hello");

        form.update(Duration::from_millis(1));
        assert_eq!(form.phase(), SubmitPhase::Sent);
        assert_eq!(form.label(), SENT_LABEL);
        assert_eq!(form.draft(), "");
    }

    #[test]
    fn label_returns_3000ms_after_sent() {
        let mut form = filled();
        form.submit();
        form.update(SENDING_FOR);

        form.update(Duration::from_millis(2999));
        assert!(form.is_disabled());
        form.update(Duration::from_millis(1));
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert_eq!(form.label(), SUBMIT_LABEL);
        assert!(!form.is_disabled());
    }

    #[test]
    fn disabled_button_ignores_submits() {
        let mut form = filled();
        assert!(form.submit());
        form.update(Duration::from_millis(1000));
        assert!(!form.submit());

        // The ignored submit did not restart the timer.
        form.update(Duration::from_millis(500));
        assert_eq!(form.phase(), SubmitPhase::Sent);
        assert!(!form.submit());
    }

    #[test]
    fn long_frame_runs_the_whole_cycle() {
        let mut form = filled();
        form.submit();
        form.update(SENDING_FOR + SENT_FOR);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert!(form.submit());
    }
}
