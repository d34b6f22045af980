//! Pane drawing surface.
//!
//! A [`Surface`] is one rectangular region of the terminal that a pane
//! draws into. It knows its own origin and size and translates
//! pane-relative coordinates into absolute screen positions. All output
//! goes through a generic `Write` sink so rendering can be exercised
//! against an in-memory buffer.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    style::{Color, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Named color pairings selected by state, never by raw value.
///
/// The mapping is fixed for the process lifetime: there is no runtime
/// palette switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorIntent {
    /// Unfocused borders and ordinary text.
    Normal,
    /// Border of the pane currently receiving input.
    Active,
    /// Selected row in the bookmark list.
    BookmarkHighlight,
    /// Selected row in the page list.
    PageHighlight,
}

impl ColorIntent {
    pub fn foreground(self) -> Color {
        match self {
            ColorIntent::Normal => Color::White,
            ColorIntent::Active => Color::Green,
            ColorIntent::BookmarkHighlight => Color::Blue,
            ColorIntent::PageHighlight => Color::Green,
        }
    }
}

/// Position and size of a pane, in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub rows: u16,
    pub cols: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, rows: u16, cols: u16) -> Self {
        Self { x, y, rows, cols }
    }
}

/// Border characters (single line style)
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderChars {
    fn single() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

/// One rectangular drawing region of the terminal.
pub struct Surface {
    rect: Rect,
}

impl Surface {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Current geometry as the terminal layer knows it.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Resize and reposition in one step.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Overwrite one row with spaces, sized to the stored column count.
    ///
    /// Rows outside the surface are ignored.
    pub fn blank_row(&self, out: &mut dyn Write, row: u16) -> io::Result<()> {
        if row >= self.rect.rows || self.rect.cols == 0 {
            return Ok(());
        }
        out.queue(MoveTo(self.rect.x, self.rect.y + row))?.flush()?;
        write!(out, "{:width$}", "", width = self.rect.cols as usize)?;
        Ok(())
    }

    /// Overwrite the whole surface with spaces.
    pub fn blank_all(&self, out: &mut dyn Write) -> io::Result<()> {
        for row in 0..self.rect.rows {
            self.blank_row(out, row)?;
        }
        Ok(())
    }

    /// Write `text` at a pane-relative position in the given intent,
    /// clipped to the surface width.
    pub fn put_str(
        &self,
        out: &mut dyn Write,
        row: u16,
        col: u16,
        text: &str,
        intent: ColorIntent,
    ) -> io::Result<()> {
        if row >= self.rect.rows || col >= self.rect.cols {
            return Ok(());
        }
        let avail = (self.rect.cols - col) as usize;
        let clipped = fit_to_width(text, avail);
        out.queue(MoveTo(self.rect.x + col, self.rect.y + row))?
            .queue(SetForegroundColor(intent.foreground()))?
            .flush()?;
        write!(out, "{}", clipped)?;
        out.queue(ResetColor)?.flush()?;
        Ok(())
    }

    /// Draw a box around the surface edge in the given intent.
    ///
    /// The color attribute is enabled before and reset after the box so
    /// nothing leaks into subsequent writes. Surfaces smaller than 2x2
    /// have no room for a border and are left untouched.
    pub fn draw_border(&self, out: &mut dyn Write, intent: ColorIntent) -> io::Result<()> {
        if self.rect.rows < 2 || self.rect.cols < 2 {
            return Ok(());
        }
        let chars = BorderChars::single();
        let Rect { x, y, rows, cols } = self.rect;

        out.queue(SetForegroundColor(intent.foreground()))?.flush()?;

        let horizontal: String = std::iter::repeat(chars.horizontal)
            .take(cols as usize - 2)
            .collect();

        out.queue(MoveTo(x, y))?.flush()?;
        write!(out, "{}{}{}", chars.top_left, horizontal, chars.top_right)?;

        for row in 1..rows - 1 {
            out.queue(MoveTo(x, y + row))?.flush()?;
            write!(out, "{}", chars.vertical)?;
            out.queue(MoveTo(x + cols - 1, y + row))?.flush()?;
            write!(out, "{}", chars.vertical)?;
        }

        out.queue(MoveTo(x, y + rows - 1))?.flush()?;
        write!(
            out,
            "{}{}{}",
            chars.bottom_left, horizontal, chars.bottom_right
        )?;

        out.queue(ResetColor)?.flush()?;
        Ok(())
    }
}

/// Fit a string to an exact display width: pad with spaces, or truncate
/// with a trailing ellipsis when it does not fit.
pub fn fit_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let display = UnicodeWidthStr::width(s);
    if display <= width {
        let mut padded = s.to_string();
        padded.extend(std::iter::repeat(' ').take(width - display));
        return padded;
    }

    let dots = width.min(3);
    let keep = width - dots;
    let mut taken = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > keep {
            break;
        }
        taken.push(ch);
        used += w;
    }
    taken.extend(std::iter::repeat('.').take(width - used));
    taken
}
