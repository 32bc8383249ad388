//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the stage and the page model and turns them into cells
//! on the terminal.  It never writes motion state.

pub mod bulb;
pub mod curtain;
pub mod layout;
pub mod menu;
pub mod page_widget;
pub mod smooth_scroll;
pub mod theme;
