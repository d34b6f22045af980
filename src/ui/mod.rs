//! Terminal output and input primitives.
//!
//! This module provides the thin layer between the window manager and
//! the terminal:
//!
//! - **screen**: Terminal session lifecycle (raw mode, alternate
//!   screen, suspend/resume around the pager)
//! - **surface**: Rectangular pane drawing regions and color intents
//! - **keys**: Keyboard input to pager byte sequence encoding

pub mod keys;
pub mod screen;
pub mod surface;

pub use keys::KeyEncoder;
pub use screen::{Screen, TerminalControl, TerminalOwner};
pub use surface::{ColorIntent, Rect, Surface};
