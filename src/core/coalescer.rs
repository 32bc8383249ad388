//! Collapse a high-frequency sample stream into one update per repaint.
//!
//! Every [`FrameCoalescer::on_event`] overwrites a single latest-sample slot.
//! The first event after a repaint also requests a frame callback; later
//! events in the same window only overwrite the slot.  When the callback
//! runs it reads the slot *then*, so the update always reflects the newest
//! sample even if it arrived after the request was made.
//!
//! The queued callback only holds weak handles, so dropping the coalescer
//! cancels an update that is still waiting for its frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::frame::FrameScheduler;

struct Slot<T> {
    latest: Option<T>,
    pending: bool,
}

#[derive(Default)]
struct Stats {
    events: Cell<u64>,
    updates: Cell<u64>,
}

/// One coalesced stream.  Each instance owns its own slot, pending flag and
/// update handler; instances never share state.
pub struct FrameCoalescer<T, S> {
    slot: Rc<RefCell<Slot<T>>>,
    handler: Rc<RefCell<dyn FnMut(T)>>,
    stats: Rc<Stats>,
    scheduler: S,
}

impl<T, S> FrameCoalescer<T, S>
where
    T: 'static,
    S: FrameScheduler,
{
    /// Create a stream whose update work is `handler`, run at most once per
    /// repaint with the newest sample.
    pub fn new(scheduler: S, handler: impl FnMut(T) + 'static) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                latest: None,
                pending: false,
            })),
            handler: Rc::new(RefCell::new(handler)),
            stats: Rc::new(Stats::default()),
            scheduler,
        }
    }

    /// Record `sample` and make sure exactly one update is queued.
    pub fn on_event(&self, sample: T) {
        self.stats.events.set(self.stats.events.get() + 1);
        let mut slot = self.slot.borrow_mut();
        slot.latest = Some(sample);
        if slot.pending {
            return;
        }
        slot.pending = true;
        drop(slot);

        let slot = Rc::downgrade(&self.slot);
        let handler = Rc::downgrade(&self.handler);
        let stats = Rc::downgrade(&self.stats);
        self.scheduler.request_frame(Box::new(move || {
            let (Some(slot), Some(handler), Some(stats)) =
                (slot.upgrade(), handler.upgrade(), stats.upgrade())
            else {
                tracing::trace!("coalesced update dropped with its stream");
                return;
            };
            let sample = slot.borrow_mut().latest.take();
            if let Some(sample) = sample {
                (&mut *handler.borrow_mut())(sample);
                stats.updates.set(stats.updates.get() + 1);
            }
            slot.borrow_mut().pending = false;
        }));
    }

    /// Whether an update is queued for the next repaint.
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().pending
    }

    /// Events received so far.
    pub fn events_seen(&self) -> u64 {
        self.stats.events.get()
    }

    /// Updates actually applied so far.
    pub fn updates_applied(&self) -> u64 {
        self.stats.updates.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::FrameQueue;

    fn recording(queue: &FrameQueue) -> (FrameCoalescer<i32, FrameQueue>, Rc<RefCell<Vec<i32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let stream = FrameCoalescer::new(queue.clone(), move |s| sink.borrow_mut().push(s));
        (stream, seen)
    }

    #[test]
    fn burst_between_repaints_runs_once_with_last_sample() {
        let queue = FrameQueue::new();
        let (stream, seen) = recording(&queue);

        for sample in 1..=5 {
            stream.on_event(sample);
        }
        assert!(stream.is_pending());
        assert_eq!(queue.pending(), 1);

        queue.run_frame();
        assert_eq!(*seen.borrow(), vec![5]);
        assert!(!stream.is_pending());
        assert_eq!(stream.events_seen(), 5);
        assert_eq!(stream.updates_applied(), 1);
    }

    #[test]
    fn quiet_frames_schedule_nothing() {
        let queue = FrameQueue::new();
        let (stream, seen) = recording(&queue);

        assert_eq!(queue.run_frame(), 0);
        stream.on_event(1);
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(queue.run_frame(), 0);
        assert_eq!(queue.run_frame(), 0);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn callback_reads_sample_at_execution_time() {
        let queue = FrameQueue::new();
        let (stream, seen) = recording(&queue);

        stream.on_event(1);
        // Arrives after the frame was requested but before it runs.
        stream.on_event(2);
        queue.run_frame();
        stream.on_event(3);
        queue.run_frame();

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn streams_keep_independent_flags() {
        let queue = FrameQueue::new();
        let (a, seen_a) = recording(&queue);
        let (b, seen_b) = recording(&queue);

        a.on_event(10);
        assert!(a.is_pending());
        assert!(!b.is_pending());

        b.on_event(20);
        a.on_event(11);
        b.on_event(21);
        assert_eq!(queue.pending(), 2);

        queue.run_frame();
        assert_eq!(*seen_a.borrow(), vec![11]);
        assert_eq!(*seen_b.borrow(), vec![21]);
        assert!(!a.is_pending() && !b.is_pending());

        b.on_event(22);
        assert!(!a.is_pending());
        assert!(b.is_pending());
    }

    #[test]
    fn dropped_stream_applies_nothing() {
        let queue = FrameQueue::new();
        let (stream, seen) = recording(&queue);

        stream.on_event(100);
        drop(stream);
        assert_eq!(queue.run_frame(), 1);
        assert!(seen.borrow().is_empty());
        assert_eq!(queue.pending(), 0);
    }
}
