//! Help bar pane: key hints and status messages.
//!
//! Two borderless rows at the bottom of the screen. The bar can never
//! hold input focus; its input handler is a last-resort invariant
//! guard, not a code path.

use std::io::{self, Write};

use crossterm::event::KeyEvent;

use crate::app::App;
use crate::ui::surface::{fit_to_width, ColorIntent, Surface};
use crate::wm::pane::{Action, DrawCtx, PaneContent, PaneRole};

pub struct HelpBar;

impl HelpBar {
    pub fn new() -> Self {
        Self
    }

    fn hints(active_role: PaneRole) -> &'static str {
        match active_role {
            PaneRole::Bookmarks => {
                " Tab switch  j/k move  Enter open  d delete  q quit"
            }
            PaneRole::Pages => {
                " Tab switch  j/k move  Enter open  b bookmark  q quit"
            }
            PaneRole::HelpBar => " q quit",
        }
    }
}

impl Default for HelpBar {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneContent for HelpBar {
    fn draw(
        &mut self,
        out: &mut dyn Write,
        surface: &Surface,
        app: &App,
        ctx: &DrawCtx,
    ) -> io::Result<()> {
        let rect = surface.rect();
        if rect.rows == 0 || rect.cols == 0 {
            return Ok(());
        }
        let width = rect.cols as usize;

        let hints = Self::hints(ctx.active_role);
        surface.put_str(out, 0, 0, &fit_to_width(hints, width), ColorIntent::Active)?;

        if rect.rows > 1 {
            let status = app.status.as_deref().unwrap_or("");
            surface.put_str(out, 1, 0, &fit_to_width(status, width), ColorIntent::Normal)?;
        }
        Ok(())
    }

    /// Never reachable through normal dispatch: the bar cannot become
    /// active. A call here is a dispatch bug.
    fn input(&mut self, _key: KeyEvent, _app: &mut App) -> Action {
        panic!("help bar cannot receive input");
    }
}
