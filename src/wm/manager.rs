//! Window Manager - owns the fixed pane set and the pager hand-over

use std::io::{self, Write};

use crossterm::event::KeyEvent;
use tracing::debug;

use super::pane::{Action, DrawCtx, Pane, PaneRole};
use crate::app::App;
use crate::config::Config;
use crate::pty::PtyProcess;
use crate::ui::screen::TerminalControl;
use crate::ui::surface::{ColorIntent, Rect};
use crate::views::{BookmarksView, HelpBar, PagesView};

/// Window Manager - tracks the active pane, applies layout, dispatches
/// draw/input, and brackets the pager run with terminal suspend/resume.
pub struct WindowManager {
    /// All panes, in tab-cycle order. Fixed at construction.
    panes: Vec<Pane>,
    /// Index of the pane currently receiving input. Always points at a
    /// pane with `can_be_active == true`.
    active_idx: usize,
    /// Base command for opening pages (normally `man`).
    man_command: String,
    /// Pager selection flag passed to the base command.
    pager_flag: String,
}

/// Pane positions in the fixed tab-cycle order.
pub const IDX_BOOKMARKS: usize = 0;
pub const IDX_PAGES: usize = 1;
pub const IDX_HELPBAR: usize = 2;

impl WindowManager {
    /// Build the three panes in role order and pick the initial active
    /// pane: bookmarks if any exist, otherwise the page list.
    pub fn new(config: &Config, bookmarks_present: bool) -> Self {
        let panes = vec![
            Pane::new(PaneRole::Bookmarks, true, Box::new(BookmarksView::new())),
            Pane::new(PaneRole::Pages, true, Box::new(PagesView::new())),
            Pane::new(PaneRole::HelpBar, false, Box::new(HelpBar::new())),
        ];
        debug_assert_eq!(panes[IDX_BOOKMARKS].role, PaneRole::Bookmarks);
        debug_assert_eq!(panes[IDX_PAGES].role, PaneRole::Pages);
        debug_assert_eq!(panes[IDX_HELPBAR].role, PaneRole::HelpBar);
        let mut wm = Self::with_panes(
            panes,
            IDX_BOOKMARKS,
            config.man_command.clone(),
            config.pager_flag.clone(),
        );
        if !bookmarks_present {
            wm.set_active(IDX_PAGES);
        }
        wm
    }

    fn with_panes(
        panes: Vec<Pane>,
        active_idx: usize,
        man_command: String,
        pager_flag: String,
    ) -> Self {
        debug_assert!(panes[active_idx].can_be_active);
        Self {
            panes,
            active_idx,
            man_command,
            pager_flag,
        }
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    /// Resize and reposition one pane, store the new geometry, and let
    /// the content react. Safe to call at any time; calling twice with
    /// the same rect yields the same state (the content's resize hook
    /// still runs on every call).
    pub fn layout(&mut self, idx: usize, rect: Rect) {
        let pane = &mut self.panes[idx];
        pane.surface.set_rect(rect);
        pane.rect = rect;
        pane.content.on_resize(rect);
    }

    /// Apply the fixed three-pane arrangement to the whole screen:
    /// bookmarks on the left, pages on the right, help bar at the
    /// bottom.
    pub fn layout_all(&mut self, cols: u16, rows: u16) {
        for (idx, rect) in layout_rects(cols, rows).into_iter().enumerate() {
            self.layout(idx, rect);
        }
    }

    /// Overwrite one row of a pane with blanks, sized to its stored
    /// column count.
    #[allow(dead_code)]
    pub fn clear_row<W: Write>(&self, out: &mut W, idx: usize, row: u16) -> io::Result<()> {
        self.panes[idx].surface.blank_row(out, row)
    }

    /// Blank every row of every pane.
    ///
    /// Each pane's live surface size is re-queried and stored first:
    /// the terminal layer may have resized surfaces out-of-band, and
    /// rows beyond the current size must never be addressed.
    pub fn clear_all<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        for pane in &mut self.panes {
            pane.rect = pane.surface.rect();
            for row in 0..pane.rect.rows {
                pane.surface.blank_row(out, row)?;
            }
        }
        Ok(())
    }

    /// Advance the active index (wrapping) to the next pane that can be
    /// active. Leaves the index unchanged when no other pane qualifies.
    pub fn cycle_active(&mut self) {
        let n = self.panes.len();
        let mut idx = (self.active_idx + 1) % n;
        while idx != self.active_idx {
            if self.panes[idx].can_be_active {
                self.active_idx = idx;
                return;
            }
            idx = (idx + 1) % n;
        }
    }

    /// Unconditionally set the active index. Callers are responsible
    /// for only passing activatable indices.
    pub fn set_active(&mut self, idx: usize) {
        self.active_idx = idx;
    }

    pub fn active_idx(&self) -> usize {
        self.active_idx
    }

    pub fn active_pane(&self) -> &Pane {
        &self.panes[self.active_idx]
    }

    /// Route a key to the active pane's content.
    pub fn dispatch_input(&mut self, key: KeyEvent, app: &mut App) -> Action {
        self.panes[self.active_idx].content.input(key, app)
    }

    /// Redraw every pane in order. Each pane's surface size is
    /// re-queried and stored before its draw callback runs. Border
    /// decoration is a separate pass (`draw_border`).
    pub fn draw_all<W: Write>(&mut self, out: &mut W, app: &App) -> io::Result<()> {
        let active_role = self.panes[self.active_idx].role;
        for (idx, pane) in self.panes.iter_mut().enumerate() {
            pane.rect = pane.surface.rect();
            let ctx = DrawCtx {
                focused: idx == self.active_idx,
                active_role,
            };
            let Pane {
                surface, content, ..
            } = pane;
            content.draw(out, surface, app, &ctx)?;
        }
        Ok(())
    }

    /// Draw one pane's border, in the Active intent if it is the
    /// active pane and Normal otherwise.
    pub fn draw_border<W: Write>(&self, out: &mut W, idx: usize) -> io::Result<()> {
        let intent = if idx == self.active_idx {
            ColorIntent::Active
        } else {
            ColorIntent::Normal
        };
        self.panes[idx].surface.draw_border(out, intent)
    }

    /// Open a man page in an interactive pager.
    ///
    /// The UI is torn down before the pager starts and restored after
    /// it exits; stale pager output is cleared before the caller
    /// repaints. The child's exit code is returned uninterpreted -
    /// including the runner's could-not-start code. Suspend or resume
    /// failures leave the terminal in an unknown state and propagate as
    /// errors.
    pub fn open_page<W: Write>(
        &mut self,
        out: &mut W,
        term: &mut dyn TerminalControl,
        runner: &mut dyn PtyProcess,
        section: Option<&str>,
        page: &str,
        line: Option<&str>,
    ) -> io::Result<i32> {
        let argv = vec![
            self.man_command.clone(),
            self.pager_flag.clone(),
            section.unwrap_or("").to_string(),
            page.to_string(),
        ];
        let input = jump_command(line);
        debug!(page, ?section, input = %input, "opening page");

        term.suspend()?;
        let code = runner.run(&argv, &input);
        term.resume()?;
        term.request_repaint()?;
        self.clear_all(out)?;

        Ok(code)
    }
}

/// Keystrokes pre-fed to the pager: jump to the requested line, or to
/// the top of the page when no line was recorded.
fn jump_command(line: Option<&str>) -> String {
    match line {
        Some(line) => format!("{}g", line),
        None => "0g".to_string(),
    }
}

/// The fixed arrangement: two columns over a two-row help bar.
fn layout_rects(cols: u16, rows: u16) -> [Rect; 3] {
    let bar_rows = 2u16.min(rows);
    let body_rows = rows - bar_rows;
    let left_cols = cols / 2;
    let right_cols = cols - left_cols;
    [
        Rect::new(0, 0, body_rows, left_cols),
        Rect::new(left_cols, 0, body_rows, right_cols),
        Rect::new(0, body_rows, bar_rows, cols),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Surface;
    use crate::wm::pane::PaneContent;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Inert content for exercising the manager itself.
    struct TestContent {
        resizes: Rc<Cell<usize>>,
    }

    impl TestContent {
        fn new() -> Self {
            Self {
                resizes: Rc::new(Cell::new(0)),
            }
        }
    }

    impl PaneContent for TestContent {
        fn draw(
            &mut self,
            _out: &mut dyn Write,
            _surface: &Surface,
            _app: &App,
            _ctx: &DrawCtx,
        ) -> io::Result<()> {
            Ok(())
        }

        fn input(&mut self, _key: KeyEvent, _app: &mut App) -> Action {
            Action::None
        }

        fn on_resize(&mut self, _rect: Rect) {
            self.resizes.set(self.resizes.get() + 1);
        }
    }

    fn test_pane(role: PaneRole, can_be_active: bool) -> Pane {
        Pane::new(role, can_be_active, Box::new(TestContent::new()))
    }

    fn browser_panes() -> Vec<Pane> {
        vec![
            test_pane(PaneRole::Bookmarks, true),
            test_pane(PaneRole::Pages, true),
            test_pane(PaneRole::HelpBar, false),
        ]
    }

    fn manager(panes: Vec<Pane>, active_idx: usize) -> WindowManager {
        WindowManager::with_panes(
            panes,
            active_idx,
            "man".to_string(),
            "--pager=less".to_string(),
        )
    }

    fn assert_active_invariant(wm: &WindowManager) {
        assert!(wm.panes()[wm.active_idx()].can_be_active);
    }

    #[test]
    fn test_initial_active_pane_follows_bookmark_hint() {
        let config = Config::default();
        let wm = WindowManager::new(&config, true);
        assert_eq!(wm.active_pane().role, PaneRole::Bookmarks);
        assert_active_invariant(&wm);

        let wm = WindowManager::new(&config, false);
        assert_eq!(wm.active_pane().role, PaneRole::Pages);
        assert_active_invariant(&wm);
    }

    #[test]
    fn test_cycle_skips_help_bar() {
        let mut wm = manager(browser_panes(), 0);
        wm.cycle_active();
        assert_eq!(wm.active_pane().role, PaneRole::Pages);
        assert_active_invariant(&wm);

        wm.cycle_active();
        assert_eq!(wm.active_pane().role, PaneRole::Bookmarks);
        assert_active_invariant(&wm);
    }

    #[test]
    fn test_cycle_full_round_returns_to_start() {
        // Two activatable panes: a full round over them is two steps
        for start in [IDX_BOOKMARKS, IDX_PAGES] {
            let mut wm = manager(browser_panes(), start);
            wm.cycle_active();
            assert_active_invariant(&wm);
            wm.cycle_active();
            assert_eq!(wm.active_idx(), start);
        }
    }

    #[test]
    fn test_cycle_single_activatable_is_noop() {
        let panes = vec![
            test_pane(PaneRole::Bookmarks, true),
            test_pane(PaneRole::Pages, false),
            test_pane(PaneRole::HelpBar, false),
        ];
        let mut wm = manager(panes, 0);
        wm.cycle_active();
        assert_eq!(wm.active_idx(), 0);
        assert_active_invariant(&wm);
    }

    #[test]
    fn test_set_active_is_unconditional() {
        let mut wm = manager(browser_panes(), 0);
        wm.set_active(1);
        assert_eq!(wm.active_idx(), 1);
        assert_active_invariant(&wm);
    }

    #[test]
    fn test_layout_stores_geometry_and_fires_resize() {
        let content = TestContent::new();
        let resizes = content.resizes.clone();
        let panes = vec![Pane::new(PaneRole::Bookmarks, true, Box::new(content))];
        let mut wm = manager(panes, 0);

        let rect = Rect::new(0, 0, 10, 40);
        wm.layout(0, rect);
        assert_eq!(wm.panes()[0].rect, rect);
        assert_eq!(wm.panes()[0].surface.rect(), rect);
        assert_eq!(resizes.get(), 1);

        // Idempotent on state, but the hook still fires per call
        wm.layout(0, rect);
        assert_eq!(wm.panes()[0].rect, rect);
        assert_eq!(resizes.get(), 2);
    }

    #[test]
    fn test_layout_all_partitions_screen() {
        let mut wm = manager(browser_panes(), 0);
        wm.layout_all(80, 24);
        let rects: Vec<Rect> = wm.panes().iter().map(|p| p.rect).collect();
        assert_eq!(rects[0], Rect::new(0, 0, 22, 40));
        assert_eq!(rects[1], Rect::new(40, 0, 22, 40));
        assert_eq!(rects[2], Rect::new(0, 22, 2, 80));
    }

    #[test]
    fn test_clear_all_tracks_out_of_band_resize() {
        let panes = vec![test_pane(PaneRole::Bookmarks, true)];
        let mut wm = manager(panes, 0);
        wm.layout(0, Rect::new(0, 0, 5, 8));

        // Shrink the surface behind the manager's back
        wm.panes[0].surface.set_rect(Rect::new(0, 0, 2, 8));

        let mut out = Vec::new();
        wm.clear_all(&mut out).unwrap();

        // Geometry was re-queried before blanking
        assert_eq!(wm.panes()[0].rect.rows, 2);
        // One cursor move per blanked row: exactly the live row count
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('H').count(), 2);
    }

    #[test]
    fn test_clear_row_respects_stored_cols() {
        let panes = vec![test_pane(PaneRole::Bookmarks, true)];
        let mut wm = manager(panes, 0);
        wm.layout(0, Rect::new(0, 0, 3, 6));

        let mut out = Vec::new();
        wm.clear_row(&mut out, 0, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("      "));

        // Out-of-range rows are ignored
        let mut out = Vec::new();
        wm.clear_row(&mut out, 0, 3).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_jump_command() {
        assert_eq!(jump_command(Some("42")), "42g");
        assert_eq!(jump_command(None), "0g");
    }

    /// What the recording doubles observed, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Suspend,
        Run(Vec<String>, String),
        Resume,
        Repaint,
    }

    struct RecordingTerm {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl TerminalControl for RecordingTerm {
        fn suspend(&mut self) -> io::Result<()> {
            self.calls.borrow_mut().push(Call::Suspend);
            Ok(())
        }

        fn resume(&mut self) -> io::Result<()> {
            self.calls.borrow_mut().push(Call::Resume);
            Ok(())
        }

        fn request_repaint(&mut self) -> io::Result<()> {
            self.calls.borrow_mut().push(Call::Repaint);
            Ok(())
        }
    }

    struct RecordingPty {
        calls: Rc<RefCell<Vec<Call>>>,
        exit_code: i32,
    }

    impl PtyProcess for RecordingPty {
        fn run(&mut self, argv: &[String], initial_input: &str) -> i32 {
            self.calls
                .borrow_mut()
                .push(Call::Run(argv.to_vec(), initial_input.to_string()));
            self.exit_code
        }
    }

    #[test]
    fn test_open_page_sequence() {
        let mut wm = manager(browser_panes(), 0);
        wm.layout_all(80, 24);

        let calls = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut term = RecordingTerm {
            calls: calls.clone(),
        };
        let mut pty = RecordingPty {
            calls: calls.clone(),
            exit_code: 0,
        };

        let mut out = Vec::new();
        let code = wm
            .open_page(&mut out, &mut term, &mut pty, Some("1"), "ls", Some("10"))
            .unwrap();

        assert_eq!(code, 0);
        let argv = vec![
            "man".to_string(),
            "--pager=less".to_string(),
            "1".to_string(),
            "ls".to_string(),
        ];
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Suspend,
                Call::Run(argv, "10g".to_string()),
                Call::Resume,
                Call::Repaint,
            ]
        );
        // clear_all ran after the repaint request: every pane row was
        // blanked into the sink
        assert!(!out.is_empty());
    }

    #[test]
    fn test_open_page_defaults() {
        let mut wm = manager(browser_panes(), 0);

        let calls = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut term = RecordingTerm {
            calls: calls.clone(),
        };
        let mut pty = RecordingPty {
            calls: calls.clone(),
            exit_code: 3,
        };

        let mut out = Vec::new();
        let code = wm
            .open_page(&mut out, &mut term, &mut pty, None, "printf", None)
            .unwrap();

        // Exit codes pass through uninterpreted
        assert_eq!(code, 3);
        let argv = vec![
            "man".to_string(),
            "--pager=less".to_string(),
            "".to_string(),
            "printf".to_string(),
        ];
        assert_eq!(calls.borrow()[1], Call::Run(argv, "0g".to_string()));
    }

    #[test]
    fn test_layout_tiny_terminal_does_not_underflow() {
        let mut wm = manager(browser_panes(), 0);
        wm.layout_all(1, 1);
        assert_eq!(wm.panes()[2].rect.rows, 1);
        assert_eq!(wm.panes()[0].rect.rows, 0);
    }
}
