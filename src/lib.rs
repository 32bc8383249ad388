//! Frame-coalesced scroll effects and a smoothed pointer-follow animation.
//!
//! [`core`] holds the motion primitives: a frame scheduler abstraction, the
//! per-frame event coalescer, the smoothed follower and the page effects
//! built from them.  [`config`] loads and saves the user's tuning and key
//! bindings.

pub mod config;
pub mod core;
