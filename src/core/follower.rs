//! Exponentially smoothed follow animation.
//!
//! The input side writes a target pair whenever it likes; a loop driven by
//! the frame scheduler moves the current pair a fixed fraction of the way
//! toward the target on every repaint and applies the resulting rotation to
//! one stage element.  The loop runs until [`SmoothedFollower::stop`] is
//! called or the follower is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::MotionError;
use super::frame::FrameScheduler;
use super::stage::Stage;
use super::transform::Transform;

/// Fraction of the remaining distance covered per tick.
pub const DEFAULT_ALPHA: f64 = 0.08;
/// Scale gained per degree of total displacement.
pub const DEFAULT_INTENSITY_SCALE: f64 = 0.002;
/// Perspective distance used for the rotation transform.
pub const PERSPECTIVE_PX: f64 = 1000.0;

/// Tuning for the follow animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    alpha: f64,
    intensity_scale: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            intensity_scale: DEFAULT_INTENSITY_SCALE,
        }
    }
}

impl Smoothing {
    pub fn new(alpha: f64, intensity_scale: f64) -> Result<Self, MotionError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(MotionError::InvalidAlpha(alpha));
        }
        if !intensity_scale.is_finite() || intensity_scale < 0.0 {
            return Err(MotionError::InvalidIntensityScale(intensity_scale));
        }
        Ok(Self {
            alpha,
            intensity_scale,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn intensity_scale(&self) -> f64 {
        self.intensity_scale
    }

    /// One interpolation step on a single axis.
    pub fn step(&self, current: f64, target: f64) -> f64 {
        current + (target - current) * self.alpha
    }

    /// Derive the visual pose for a current rotation pair.
    pub fn pose(&self, current: (f64, f64)) -> Pose {
        let intensity = current.0.abs() + current.1.abs();
        Pose {
            rotate_x: current.0,
            rotate_y: current.1,
            intensity,
            scale: 1.0 + intensity * self.intensity_scale,
        }
    }
}

/// What the follower applies each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotate_x: f64,
    pub rotate_y: f64,
    /// `|rotate_x| + |rotate_y|`.
    pub intensity: f64,
    pub scale: f64,
}

impl Pose {
    pub fn transform(&self) -> Transform {
        Transform::Rotate3d {
            perspective: PERSPECTIVE_PX,
            rotate_x: self.rotate_x,
            rotate_y: self.rotate_y,
            scale: self.scale,
        }
    }
}

/// Where the target is coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    /// Target pinned to the neutral pose.
    #[default]
    Idle,
    /// Target driven by live pointer input.
    Tracking,
}

#[derive(Debug)]
struct FollowerCore {
    target: (f64, f64),
    current: (f64, f64),
    state: FollowState,
    smoothing: Smoothing,
    running: bool,
    /// Bumped on every start so callbacks from an earlier run die quietly.
    generation: u64,
    ticks: u64,
}

impl FollowerCore {
    fn advance(&mut self) -> Pose {
        let s = self.smoothing;
        self.current = (
            s.step(self.current.0, self.target.0),
            s.step(self.current.1, self.target.1),
        );
        self.ticks += 1;
        s.pose(self.current)
    }
}

/// Drives one stage element toward a moving rotation target.
pub struct SmoothedFollower<S> {
    core: Rc<RefCell<FollowerCore>>,
    stage: Stage,
    element: &'static str,
    scheduler: S,
}

impl<S> SmoothedFollower<S>
where
    S: FrameScheduler + Clone + 'static,
{
    pub fn new(scheduler: S, stage: Stage, element: &'static str, smoothing: Smoothing) -> Self {
        Self {
            core: Rc::new(RefCell::new(FollowerCore {
                target: (0.0, 0.0),
                current: (0.0, 0.0),
                state: FollowState::Idle,
                smoothing,
                running: false,
                generation: 0,
                ticks: 0,
            })),
            stage,
            element,
            scheduler,
        }
    }

    /// Point the follower at a new target.  Moves the state to `Tracking`.
    pub fn set_target(&self, x: f64, y: f64) {
        let mut core = self.core.borrow_mut();
        core.target = (x, y);
        core.state = FollowState::Tracking;
    }

    /// The pointer left the interactive region: glide back to neutral.
    pub fn release(&self) {
        let mut core = self.core.borrow_mut();
        core.target = (0.0, 0.0);
        core.state = FollowState::Idle;
    }

    pub fn state(&self) -> FollowState {
        self.core.borrow().state
    }

    pub fn target(&self) -> (f64, f64) {
        self.core.borrow().target
    }

    pub fn current(&self) -> (f64, f64) {
        self.core.borrow().current
    }

    pub fn pose(&self) -> Pose {
        let core = self.core.borrow();
        core.smoothing.pose(core.current)
    }

    pub fn ticks(&self) -> u64 {
        self.core.borrow().ticks
    }

    pub fn is_running(&self) -> bool {
        self.core.borrow().running
    }

    /// Advance one step and apply it, outside the frame loop.
    pub fn tick(&self) -> Pose {
        let pose = self.core.borrow_mut().advance();
        self.stage.apply(self.element, pose.transform());
        pose
    }

    /// Start the per-repaint loop.  Starting a running follower does nothing.
    pub fn start(&self) {
        let generation = {
            let mut core = self.core.borrow_mut();
            if core.running {
                return;
            }
            core.running = true;
            core.generation += 1;
            core.generation
        };
        tracing::debug!(element = self.element, generation, "follow loop started");
        schedule_tick(
            Rc::clone(&self.core),
            self.stage.clone(),
            self.element,
            self.scheduler.clone(),
            generation,
        );
    }

    /// Stop the loop.  A tick already queued becomes a no-op and nothing
    /// further is requested.
    pub fn stop(&self) {
        let mut core = self.core.borrow_mut();
        if core.running {
            core.running = false;
            tracing::debug!(element = self.element, ticks = core.ticks, "follow loop stopped");
        }
    }
}

impl<S> Drop for SmoothedFollower<S> {
    fn drop(&mut self) {
        if let Ok(mut core) = self.core.try_borrow_mut() {
            core.running = false;
        }
    }
}

fn schedule_tick<S>(
    core: Rc<RefCell<FollowerCore>>,
    stage: Stage,
    element: &'static str,
    scheduler: S,
    generation: u64,
) where
    S: FrameScheduler + Clone + 'static,
{
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move || {
        let pose = {
            let mut state = core.borrow_mut();
            if !state.running || state.generation != generation {
                return;
            }
            state.advance()
        };
        stage.apply(element, pose.transform());
        schedule_tick(core, stage, element, next, generation);
    }));
}
