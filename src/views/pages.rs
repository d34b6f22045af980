//! Installed man page list pane.

use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::scroll_window;
use crate::app::App;
use crate::bookmarks::Bookmark;
use crate::ui::surface::{fit_to_width, ColorIntent, Rect, Surface};
use crate::wm::pane::{Action, DrawCtx, PaneContent};

/// Cursor and scroll state over the page index.
pub struct PagesView {
    cursor: usize,
    scroll: usize,
}

impl PagesView {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll: 0,
        }
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

impl Default for PagesView {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneContent for PagesView {
    fn draw(
        &mut self,
        out: &mut dyn Write,
        surface: &Surface,
        app: &App,
        ctx: &DrawCtx,
    ) -> io::Result<()> {
        let rect = surface.rect();
        if rect.rows < 3 || rect.cols < 4 {
            return Ok(());
        }
        let visible = (rect.rows - 2) as usize;
        let width = (rect.cols - 2) as usize;

        self.clamp(app.pages.len());
        self.scroll = scroll_window(self.cursor, self.scroll, visible);

        let mut drawn = 0;
        if app.pages.is_empty() {
            surface.put_str(out, 1, 1, " page index unavailable ", ColorIntent::Normal)?;
            drawn = 1;
        } else {
            for (i, entry) in app
                .pages
                .iter()
                .enumerate()
                .skip(self.scroll)
                .take(visible)
            {
                let row = (i - self.scroll) as u16 + 1;
                let selected = i == self.cursor;
                let intent = if selected && ctx.focused {
                    ColorIntent::PageHighlight
                } else {
                    ColorIntent::Normal
                };
                let marker = if selected { '>' } else { ' ' };
                let label = format!(
                    "{} {}({})  {}",
                    marker, entry.name, entry.section, entry.description
                );
                surface.put_str(out, row, 1, &fit_to_width(&label, width), intent)?;
                drawn += 1;
            }
        }

        for row in drawn..visible {
            surface.blank_row(out, row as u16 + 1)?;
        }
        Ok(())
    }

    fn input(&mut self, key: KeyEvent, app: &mut App) -> Action {
        let len = app.pages.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 && self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::PageUp => {
                self.cursor = self.cursor.saturating_sub(10);
            }
            KeyCode::PageDown => {
                if len > 0 {
                    self.cursor = (self.cursor + 10).min(len - 1);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                if len > 0 {
                    self.cursor = len - 1;
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = app.pages.get(self.cursor) {
                    return Action::OpenPage {
                        section: Some(entry.section.clone()),
                        page: entry.name.clone(),
                        line: None,
                    };
                }
            }
            KeyCode::Char('b') => {
                if let Some(entry) = app.pages.get(self.cursor) {
                    let bookmark = Bookmark {
                        page: entry.name.clone(),
                        section: Some(entry.section.clone()),
                        line: None,
                    };
                    let label = bookmark.label();
                    app.bookmarks.add(bookmark);
                    if let Err(e) = app.bookmarks.save() {
                        warn!("could not save bookmarks: {:#}", e);
                    }
                    app.status = Some(format!("bookmarked {}", label));
                }
            }
            _ => {}
        }
        Action::None
    }

    fn on_resize(&mut self, rect: Rect) {
        let visible = rect.rows.saturating_sub(2).max(1) as usize;
        self.scroll = scroll_window(self.cursor, self.scroll, visible);
    }
}
