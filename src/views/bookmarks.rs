//! Bookmark list pane.

use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::scroll_window;
use crate::app::App;
use crate::ui::surface::{fit_to_width, ColorIntent, Rect, Surface};
use crate::wm::pane::{Action, DrawCtx, PaneContent};

/// Cursor and scroll state over the bookmark store.
pub struct BookmarksView {
    cursor: usize,
    scroll: usize,
}

impl BookmarksView {
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

impl Default for BookmarksView {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneContent for BookmarksView {
    fn draw(
        &mut self,
        out: &mut dyn Write,
        surface: &Surface,
        app: &App,
        ctx: &DrawCtx,
    ) -> io::Result<()> {
        let rect = surface.rect();
        // The border occupies the outer cell ring
        if rect.rows < 3 || rect.cols < 4 {
            return Ok(());
        }
        let visible = (rect.rows - 2) as usize;
        let width = (rect.cols - 2) as usize;

        self.clamp(app.bookmarks.len());
        self.scroll = scroll_window(self.cursor, self.scroll, visible);

        let mut drawn = 0;
        if app.bookmarks.is_empty() {
            surface.put_str(out, 1, 1, " no bookmarks yet ", ColorIntent::Normal)?;
            drawn = 1;
        } else {
            for (i, bookmark) in app
                .bookmarks
                .iter()
                .enumerate()
                .skip(self.scroll)
                .take(visible)
            {
                let row = (i - self.scroll) as u16 + 1;
                let selected = i == self.cursor;
                let intent = if selected && ctx.focused {
                    ColorIntent::BookmarkHighlight
                } else {
                    ColorIntent::Normal
                };
                let marker = if selected { '>' } else { ' ' };
                let label = format!("{} {}", marker, bookmark.label());
                surface.put_str(out, row, 1, &fit_to_width(&label, width), intent)?;
                drawn += 1;
            }
        }

        // Blank rows the list no longer reaches (e.g. after a delete)
        for row in drawn..visible {
            surface.blank_row(out, row as u16 + 1)?;
        }
        Ok(())
    }

    fn input(&mut self, key: KeyEvent, app: &mut App) -> Action {
        let len = app.bookmarks.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 && self.cursor + 1 < len {
                    self.cursor += 1;
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
                if let Some(bookmark) = app.bookmarks.get(self.cursor) {
                    return Action::OpenPage {
                        section: bookmark.section.clone(),
                        page: bookmark.page.clone(),
                        line: bookmark.line.clone(),
                    };
                }
            }
            KeyCode::Char('d') => {
                if let Some(removed) = app.bookmarks.remove(self.cursor) {
                    if let Err(e) = app.bookmarks.save() {
                        warn!("could not save bookmarks: {:#}", e);
                    }
                    app.status = Some(format!("deleted {}", removed.label()));
                    self.clamp(app.bookmarks.len());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::{Bookmark, BookmarkStore};
    use crossterm::event::KeyModifiers;

    fn app_with_bookmarks(n: usize) -> App {
        let mut store = BookmarkStore::default();
        for i in 0..n {
            store.add(Bookmark {
                page: format!("page{}", i),
                section: Some("1".to_string()),
                line: None,
            });
        }
        App::new(store, Default::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = app_with_bookmarks(3);
        let mut view = BookmarksView::new();

        view.input(key(KeyCode::Up), &mut app);
        assert_eq!(view.cursor, 0);

        for _ in 0..10 {
            view.input(key(KeyCode::Down), &mut app);
        }
        assert_eq!(view.cursor, 2);
    }

    #[test]
    fn test_enter_opens_selected_bookmark() {
        let mut app = app_with_bookmarks(2);
        let mut view = BookmarksView::new();
        view.input(key(KeyCode::Down), &mut app);

        let action = view.input(key(KeyCode::Enter), &mut app);
        assert_eq!(
            action,
            Action::OpenPage {
                section: Some("1".to_string()),
                page: "page1".to_string(),
                line: None,
            }
        );
    }

    #[test]
    fn test_delete_reclamps_cursor() {
        let mut app = app_with_bookmarks(2);
        let mut view = BookmarksView::new();
        view.input(key(KeyCode::Char('G')), &mut app);
        assert_eq!(view.cursor, 1);

        view.input(key(KeyCode::Char('d')), &mut app);
        assert_eq!(app.bookmarks.len(), 1);
        assert_eq!(view.cursor, 0);
        assert!(app.status.as_deref().unwrap().starts_with("deleted"));
    }

    #[test]
    fn test_enter_on_empty_store_is_noop() {
        let mut app = app_with_bookmarks(0);
        let mut view = BookmarksView::new();
        assert_eq!(view.input(key(KeyCode::Enter), &mut app), Action::None);
    }
}
