//! Window Manager - fixed three-pane screen management.
//!
//! This module provides the core window management functionality:
//!
//! - **manager**: Top-level `WindowManager` coordinating the panes and
//!   the pager hand-over
//! - **pane**: Pane data model and the `PaneContent` capability trait
//!
//! The pane set is fixed for the process lifetime: a bookmark list, a
//! page list, and a help bar, in that tab-cycle order.

pub mod manager;
pub mod pane;

pub use manager::WindowManager;
pub use pane::{Action, DrawCtx, Pane, PaneContent, PaneRole};
