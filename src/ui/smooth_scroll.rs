//! Page scroll position with exponential ease-out.
//!
//! Line and wheel scrolling jump straight to the new offset.  Section jumps
//! set a target instead, and each frame closes a fixed fraction of the gap,
//! so the page glides there and decelerates.  Every intermediate offset is a
//! scroll event as far as the motion effects are concerned.

/// Fraction of the remaining distance covered per frame for section jumps.
pub const SECTION_SCROLL_SPEED: f64 = 0.2;

/// Row-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current top row of the viewport (fractional while animating).
    position: f64,
    target: f64,
    /// Damping: `gap *= (1 - speed)` each tick.
    speed: f64,
    /// Largest valid offset.
    max: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
            max: 0.0,
        }
    }

    /// Update the scrollable range, pulling the position back inside it.
    pub fn set_max(&mut self, max: u16) {
        self.max = f64::from(max);
        self.target = self.target.min(self.max);
        self.position = self.position.min(self.max);
    }

    /// Move immediately, cancelling any glide.
    pub fn jump_to(&mut self, row: f64) {
        let row = row.clamp(0.0, self.max);
        self.position = row;
        self.target = row;
    }

    pub fn jump_by(&mut self, rows: f64) {
        self.jump_to(self.target + rows);
    }

    /// Glide toward `row` over the next frames.
    pub fn scroll_to(&mut self, row: f64) {
        self.target = row.clamp(0.0, self.max);
    }

    /// Advance the glide.  Call once per frame.  Returns `true` if the
    /// position changed.
    pub fn tick(&mut self) -> bool {
        if self.position == self.target {
            return false;
        }
        self.position += (self.target - self.position) * self.speed;
        if (self.target - self.position).abs() < 0.4 {
            self.position = self.target;
        }
        true
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current offset in whole rows.
    pub fn row(&self) -> u16 {
        self.position.round() as u16
    }

    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
