//! Repaint-aligned callback scheduling.
//!
//! Everything animated in this crate hangs off one capability: "run this
//! closure once, right before the next repaint".  [`FrameScheduler`] is that
//! seam.  [`FrameQueue`] is the implementation the terminal event loop pumps
//! right before each draw, and the one the tests pump by hand.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// A callback deferred until the next repaint.
pub type FrameCallback = Box<dyn FnOnce() + 'static>;

/// Something that can run a callback before the next repaint.
pub trait FrameScheduler {
    /// Queue `callback` to run exactly once before the next repaint.
    fn request_frame(&self, callback: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) {
        (**self).request_frame(callback)
    }
}

#[derive(Default)]
struct QueueInner {
    callbacks: RefCell<VecDeque<FrameCallback>>,
    frames_run: Cell<u64>,
}

/// Single-threaded frame callback queue.
///
/// Cloning yields another handle onto the same queue.  Callbacks requested
/// while [`FrameQueue::run_frame`] is executing land in the *next* frame,
/// which is what lets an animation loop re-request itself without spinning.
#[derive(Clone, Default)]
pub struct FrameQueue {
    inner: Rc<QueueInner>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }

    /// Frames pumped so far.
    pub fn frames_run(&self) -> u64 {
        self.inner.frames_run.get()
    }

    /// Run every callback queued before this call.  Returns how many ran.
    pub fn run_frame(&self) -> usize {
        // Take the batch first: callbacks may request frames while running.
        let batch: Vec<FrameCallback> = self.inner.callbacks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        self.inner.frames_run.set(self.inner.frames_run.get() + 1);
        if count > 0 {
            tracing::trace!(frame = self.inner.frames_run.get(), callbacks = count, "frame pumped");
        }
        count
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.inner.callbacks.borrow_mut().push_back(callback);
    }
}
