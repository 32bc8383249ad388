//! Application orchestration: page model, state, event loop input handling.

pub mod cards;
pub mod contact;
pub mod counter;
pub mod event;
pub mod handler;
pub mod page;
pub mod reveal;
pub mod skill;
pub mod state;
pub mod transition;
