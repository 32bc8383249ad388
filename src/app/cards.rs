//! Portfolio card feedback: a lift while the pointer is over a card and a
//! short press bounce after a click.

use std::time::Duration;

pub const PRESS_DURATION: Duration = Duration::from_millis(300);

/// Card indices are positions in the currently visible card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardEffects {
    hovered: Option<usize>,
    pressed: Option<(usize, Duration)>,
}

impl CardEffects {
    pub fn hover(&mut self, card: Option<usize>) {
        self.hovered = card;
    }

    pub fn press(&mut self, card: usize) {
        self.pressed = Some((card, PRESS_DURATION));
    }

    pub fn update(&mut self, elapsed: Duration) {
        if let Some((card, remaining)) = self.pressed {
            self.pressed = remaining
                .checked_sub(elapsed)
                .filter(|r| !r.is_zero())
                .map(|r| (card, r));
        }
    }

    pub fn is_hovered(&self, card: usize) -> bool {
        self.hovered == Some(card)
    }

    pub fn is_pressed(&self, card: usize) -> bool {
        self.pressed.is_some_and(|(c, _)| c == card)
    }

    /// Forget everything, e.g. when the visible list changes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_bounces_for_300ms() {
        let mut fx = CardEffects::default();
        fx.press(2);
        assert!(fx.is_pressed(2));
        assert!(!fx.is_pressed(1));

        fx.update(Duration::from_millis(299));
        assert!(fx.is_pressed(2));
        fx.update(Duration::from_millis(1));
        assert!(!fx.is_pressed(2));
    }

    #[test]
    fn hover_follows_pointer_and_clears() {
        let mut fx = CardEffects::default();
        fx.hover(Some(1));
        assert!(fx.is_hovered(1));
        fx.hover(None);
        assert!(!fx.is_hovered(1));

        fx.hover(Some(0));
        fx.press(0);
        fx.clear();
        assert!(!fx.is_hovered(0) && !fx.is_pressed(0));
    }
}
