//! The page's motion effects, built on the coalescer and the follower.
//!
//! - Background parallax: the hero image drifts at a fraction of the scroll.
//! - Navbar reveal: the bar hides while scrolling down past a threshold and
//!   comes back on any upward scroll.
//! - Bulb follow: pointer position over the hero tilts the bulb, smoothed.

use super::coalescer::FrameCoalescer;
use super::error::MotionError;
use super::follower::{SmoothedFollower, Smoothing};
use super::frame::FrameScheduler;
use super::stage::Stage;
use super::transform::Transform;

pub const HERO_IMAGE: &str = "hero-image";
pub const NAVBAR: &str = "navbar";
pub const BULB: &str = "bulb";
/// Marker class set on the bulb while the pointer hovers the hero.
pub const MOUSE_ACTIVE: &str = "mouse-active";

pub const PARALLAX_SPEED: f64 = 0.5;
/// Scroll offset below which the navbar never hides.
pub const NAVBAR_HIDE_AFTER: f64 = 100.0;
/// Tilt around X at the top/bottom edge of the hero, in degrees.
pub const MAX_TILT_X: f64 = 15.0;
/// Tilt around Y at the left/right edge of the hero, in degrees.
pub const MAX_TILT_Y: f64 = 20.0;

// ───────────────────────────────────────── parallax ──────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    speed: f64,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            speed: PARALLAX_SPEED,
        }
    }
}

impl Parallax {
    pub fn new(speed: f64) -> Result<Self, MotionError> {
        if !speed.is_finite() {
            return Err(MotionError::InvalidParallaxSpeed(speed));
        }
        Ok(Self { speed })
    }

    pub fn transform(&self, scrolled: f64) -> Transform {
        Transform::TranslateY(scrolled * self.speed)
    }
}

/// Coalesced stream that moves [`HERO_IMAGE`] with the scroll offset.
pub fn parallax_stream<S>(scheduler: S, stage: Stage, parallax: Parallax) -> FrameCoalescer<f64, S>
where
    S: FrameScheduler,
{
    FrameCoalescer::new(scheduler, move |scrolled: f64| {
        stage.apply(HERO_IMAGE, parallax.transform(scrolled));
    })
}

// ───────────────────────────────────────── navbar ────────────

/// Scroll-direction tracker for the navbar.  Owns the last scroll offset.
#[derive(Debug, Clone, PartialEq)]
pub struct NavbarReveal {
    hide_after: f64,
    last_scroll_top: f64,
}

impl Default for NavbarReveal {
    fn default() -> Self {
        Self::new(NAVBAR_HIDE_AFTER)
    }
}

impl NavbarReveal {
    pub fn new(hide_after: f64) -> Self {
        Self {
            hide_after,
            last_scroll_top: 0.0,
        }
    }

    /// Feed the current offset; returns the navbar transform for it.
    pub fn update(&mut self, scroll_top: f64) -> Transform {
        let hidden = scroll_top > self.last_scroll_top && scroll_top > self.hide_after;
        self.last_scroll_top = scroll_top.max(0.0);
        if hidden {
            Transform::TranslateYPercent(-100.0)
        } else {
            Transform::TranslateYPercent(0.0)
        }
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }
}

/// Coalesced stream that shows or hides [`NAVBAR`] by scroll direction.
pub fn navbar_stream<S>(scheduler: S, stage: Stage, mut reveal: NavbarReveal) -> FrameCoalescer<f64, S>
where
    S: FrameScheduler,
{
    FrameCoalescer::new(scheduler, move |scroll_top: f64| {
        let transform = reveal.update(scroll_top);
        stage.apply(NAVBAR, transform);
    })
}

// ───────────────────────────────────────── bulb ──────────────

/// Axis-aligned interactive region, in the same units as pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    /// Rotation target for a pointer at `(x, y)`: tilt around X follows the
    /// vertical offset from centre, tilt around Y the (negated) horizontal.
    pub fn tilt_target(&self, x: f64, y: f64) -> (f64, f64) {
        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;
        if center_x <= 0.0 || center_y <= 0.0 {
            return (0.0, 0.0);
        }
        let dx = x - self.left - center_x;
        let dy = y - self.top - center_y;
        ((dy / center_y) * MAX_TILT_X, (dx / center_x) * -MAX_TILT_Y)
    }
}

/// Pointer-driven tilt of [`BULB`] over a hero region.
pub struct BulbTracker<S> {
    follower: SmoothedFollower<S>,
    stage: Stage,
    region: Region,
    hovering: bool,
}

impl<S> BulbTracker<S>
where
    S: FrameScheduler + Clone + 'static,
{
    pub fn new(scheduler: S, stage: Stage, smoothing: Smoothing) -> Self {
        Self {
            follower: SmoothedFollower::new(scheduler, stage.clone(), BULB, smoothing),
            stage,
            region: Region::default(),
            hovering: false,
        }
    }

    pub fn follower(&self) -> &SmoothedFollower<S> {
        &self.follower
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Update the hero bounds (e.g. after a resize or scroll).
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn start(&self) {
        self.follower.start();
    }

    pub fn stop(&self) {
        self.follower.stop();
    }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        self.stage.set_class(BULB, MOUSE_ACTIVE, true);
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.stage.set_class(BULB, MOUSE_ACTIVE, false);
        self.follower.release();
    }

    /// Pointer moved to `(x, y)`.  Ignored unless hovering.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.hovering {
            return;
        }
        let (tx, ty) = self.region.tilt_target(x, y);
        self.follower.set_target(tx, ty);
    }

    /// Route a raw pointer position, synthesising enter/leave at the region
    /// boundary.
    pub fn pointer_at(&mut self, x: f64, y: f64) {
        let inside = self.region.contains(x, y);
        match (self.hovering, inside) {
            (false, true) => self.pointer_enter(),
            (true, false) => self.pointer_leave(),
            _ => {}
        }
        self.pointer_move(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::follower::FollowState;
    use crate::core::frame::FrameQueue;

    fn stage() -> Stage {
        let stage = Stage::new();
        for name in [HERO_IMAGE, NAVBAR, BULB] {
            stage.register(name);
        }
        stage
    }

    #[test]
    fn parallax_uses_latest_scroll() {
        let queue = FrameQueue::new();
        let stage = stage();
        let stream = parallax_stream(queue.clone(), stage.clone(), Parallax::default());
        for offset in [10.0, 20.0, 30.0] {
            stream.on_event(offset);
        }
        queue.run_frame();
        assert_eq!(stage.transform(HERO_IMAGE), Some(Transform::TranslateY(15.0)));
        assert_eq!(stream.updates_applied(), 1);
    }

    #[test]
    fn torn_down_parallax_leaves_stage_alone() {
        let queue = FrameQueue::new();
        let stage = stage();
        let stream = parallax_stream(queue.clone(), stage.clone(), Parallax::default());
        stream.on_event(100.0);
        drop(stream);

        queue.run_frame();
        assert_eq!(stage.transform(HERO_IMAGE), Some(Transform::Identity));
    }

    #[test]
    fn navbar_hides_only_when_scrolling_down_past_threshold() {
        let mut nav = NavbarReveal::default();
        let shown = Transform::TranslateYPercent(0.0);
        let hidden = Transform::TranslateYPercent(-100.0);

        assert_eq!(nav.update(50.0), shown);
        assert_eq!(nav.update(90.0), shown);
        assert_eq!(nav.update(150.0), hidden);
        assert_eq!(nav.update(200.0), hidden);
        assert_eq!(nav.update(180.0), shown);
        assert_eq!(nav.update(180.0), shown);
        assert_eq!(nav.update(-20.0), shown);
        assert_eq!(nav.last_scroll_top(), 0.0);
    }

    #[test]
    fn navbar_stream_compares_against_last_applied_offset() {
        let queue = FrameQueue::new();
        let stage = stage();
        let stream = navbar_stream(queue.clone(), stage.clone(), NavbarReveal::default());

        stream.on_event(300.0);
        queue.run_frame();
        assert_eq!(stage.transform(NAVBAR), Some(Transform::TranslateYPercent(-100.0)));

        // Down then up within one frame: only the final offset counts.
        stream.on_event(400.0);
        stream.on_event(250.0);
        queue.run_frame();
        assert_eq!(stage.transform(NAVBAR), Some(Transform::TranslateYPercent(0.0)));
    }

    #[test]
    fn parallax_and_navbar_do_not_share_state() {
        let queue = FrameQueue::new();
        let stage = stage();
        let parallax = parallax_stream(queue.clone(), stage.clone(), Parallax::default());
        let navbar = navbar_stream(queue.clone(), stage.clone(), NavbarReveal::default());

        parallax.on_event(40.0);
        assert!(parallax.is_pending());
        assert!(!navbar.is_pending());
        queue.run_frame();
        assert_eq!(stage.transform(NAVBAR), Some(Transform::Identity));
        assert_eq!(navbar.updates_applied(), 0);
    }

    #[test]
    fn streams_tolerate_missing_elements() {
        let queue = FrameQueue::new();
        let stage = Stage::new();
        let stream = parallax_stream(queue.clone(), stage.clone(), Parallax::default());
        stream.on_event(10.0);
        queue.run_frame();
        assert!(!stream.is_pending());
        assert_eq!(stage.transform(HERO_IMAGE), None);
    }

    #[test]
    fn tilt_target_at_edges_and_centre() {
        let hero = Region::new(10.0, 0.0, 100.0, 40.0);
        assert_eq!(hero.tilt_target(60.0, 20.0), (0.0, 0.0));
        assert_eq!(hero.tilt_target(110.0, 40.0), (MAX_TILT_X, -MAX_TILT_Y));
        assert_eq!(hero.tilt_target(10.0, 0.0), (-MAX_TILT_X, MAX_TILT_Y));
        assert_eq!(Region::default().tilt_target(3.0, 3.0), (0.0, 0.0));
    }

    #[test]
    fn bulb_tracks_while_hovering_and_releases_on_leave() {
        let queue = FrameQueue::new();
        let stage = stage();
        let mut bulb = BulbTracker::new(queue.clone(), stage.clone(), Smoothing::default());
        bulb.set_region(Region::new(0.0, 0.0, 100.0, 40.0));

        // Not hovering yet: moves are ignored.
        bulb.pointer_move(100.0, 40.0);
        assert_eq!(bulb.follower().state(), FollowState::Idle);

        bulb.pointer_at(100.0 - 1e-9, 40.0 - 1e-9);
        assert!(bulb.is_hovering());
        assert!(stage.has_class(BULB, MOUSE_ACTIVE));
        assert_eq!(bulb.follower().state(), FollowState::Tracking);

        bulb.pointer_at(150.0, 10.0);
        assert!(!bulb.is_hovering());
        assert!(!stage.has_class(BULB, MOUSE_ACTIVE));
        assert_eq!(bulb.follower().state(), FollowState::Idle);
        assert_eq!(bulb.follower().target(), (0.0, 0.0));
    }

    #[test]
    fn bulb_loop_writes_rotation_each_frame() {
        let queue = FrameQueue::new();
        let stage = stage();
        let mut bulb = BulbTracker::new(queue.clone(), stage.clone(), Smoothing::default());
        bulb.set_region(Region::new(0.0, 0.0, 80.0, 20.0));
        bulb.start();
        bulb.pointer_at(0.0, 0.0);
        queue.run_frame();

        match stage.transform(BULB) {
            Some(Transform::Rotate3d {
                rotate_x, rotate_y, ..
            }) => {
                assert!(rotate_x < 0.0);
                assert!(rotate_y > 0.0);
            }
            other => panic!("unexpected bulb transform {other:?}"),
        }

        bulb.stop();
        queue.run_frame();
        assert_eq!(queue.pending(), 0);
    }
}
