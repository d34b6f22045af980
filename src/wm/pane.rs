//! Pane - A single rectangular region of the browser screen

use std::io::{self, Write};

use crossterm::event::KeyEvent;

use crate::app::App;
use crate::ui::surface::{Rect, Surface};

/// Fixed pane roles. The browser always has exactly one pane per role,
/// laid out in this order (which is also the tab-cycle order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRole {
    Bookmarks,
    Pages,
    HelpBar,
}

/// Effect requested by a pane in response to a key, carried back to the
/// input loop for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    OpenPage {
        section: Option<String>,
        page: String,
        line: Option<String>,
    },
}

/// Drawing context handed to pane contents on every redraw.
pub struct DrawCtx {
    /// Whether this pane is the active one.
    pub focused: bool,
    /// Role of the currently active pane (the help bar keys its hints
    /// off this).
    pub active_role: PaneRole,
}

/// Behavior supplied by a pane's content collaborator.
///
/// `draw` and `input` are required; `on_resize` defaults to a no-op for
/// contents with no geometry-dependent state.
pub trait PaneContent {
    /// Redraw the pane interior.
    fn draw(
        &mut self,
        out: &mut dyn Write,
        surface: &Surface,
        app: &App,
        ctx: &DrawCtx,
    ) -> io::Result<()>;

    /// Handle a key routed to this pane.
    ///
    /// Contents of panes that can never become active must not be
    /// reachable through dispatch; their implementations panic rather
    /// than silently ignore the call.
    fn input(&mut self, key: KeyEvent, app: &mut App) -> Action;

    /// Called after the pane's geometry changed.
    fn on_resize(&mut self, rect: Rect) {
        let _ = rect;
    }
}

/// A single pane: role, geometry, and content callbacks.
pub struct Pane {
    pub role: PaneRole,
    /// Whether this pane may receive input focus. The help bar is
    /// permanently excluded.
    pub can_be_active: bool,
    /// Geometry as last stored by the window manager.
    pub rect: Rect,
    /// The drawing region backing this pane.
    pub surface: Surface,
    pub content: Box<dyn PaneContent>,
}

impl Pane {
    pub fn new(role: PaneRole, can_be_active: bool, content: Box<dyn PaneContent>) -> Self {
        Self {
            role,
            can_be_active,
            rect: Rect::default(),
            surface: Surface::new(Rect::default()),
            content,
        }
    }
}
