//! Terminal session lifecycle.
//!
//! [`Screen`] owns the terminal device on behalf of the UI: raw mode,
//! the alternate screen, and the suspend/resume bracket around an
//! interactive child process. At any moment the terminal belongs to
//! exactly one side, tracked by [`TerminalOwner`]; the window manager
//! never draws while a child owns it.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    style::ResetColor,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

/// Who currently owns the terminal device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOwner {
    /// Normal operation: the UI renders and reads input.
    Ui,
    /// A spawned interactive process has the terminal until it exits.
    Child,
}

/// Terminal hand-over operations used by the page-open sequence.
///
/// Split out as a trait so the sequence can be verified against a
/// recording double without touching a real terminal.
pub trait TerminalControl {
    /// Tear down the UI rendering completely before a child takes over.
    fn suspend(&mut self) -> io::Result<()>;

    /// Take the terminal back after the child has exited.
    fn resume(&mut self) -> io::Result<()>;

    /// Force a full repaint of the restored UI.
    fn request_repaint(&mut self) -> io::Result<()>;
}

/// The real terminal session.
pub struct Screen {
    initialized: bool,
    owner: TerminalOwner,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            initialized: false,
            owner: TerminalOwner::Ui,
        }
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// Failure here is unrecoverable for the caller: without a drawing
    /// surface the program cannot run its input loop at all.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        stdout.flush()?;
        self.initialized = true;
        self.owner = TerminalOwner::Ui;
        Ok(())
    }

    /// Restore the terminal for the shell that started us.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current terminal size as (cols, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn owner(&self) -> TerminalOwner {
        self.owner
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalControl for Screen {
    fn suspend(&mut self) -> io::Result<()> {
        debug_assert_eq!(self.owner, TerminalOwner::Ui);
        let mut stdout = io::stdout();
        execute!(stdout, ResetColor, Show, LeaveAlternateScreen)?;
        stdout.flush()?;
        self.owner = TerminalOwner::Child;
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        debug_assert_eq!(self.owner, TerminalOwner::Child);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        stdout.flush()?;
        self.owner = TerminalOwner::Ui;
        Ok(())
    }

    fn request_repaint(&mut self) -> io::Result<()> {
        debug_assert_eq!(self.owner, TerminalOwner::Ui);
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All))?;
        stdout.flush()?;
        Ok(())
    }
}
