//! Motion core: repaint-aligned coalescing and smoothed follow animation.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All state
//! is single-threaded and owned by the instance that created it.

pub mod coalescer;
pub mod effects;
pub mod error;
pub mod follower;
pub mod frame;
pub mod stage;
pub mod transform;
