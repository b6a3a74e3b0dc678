//! Crossterm-backed driver.
//!
//! Cells are written into a "next" buffer; [`Driver::flush`] diffs it
//! against what is on screen and writes the minimal ANSI sequence in a
//! single call.

use super::Driver;
use crate::buffer::diff::{DiffState, render_diff, render_full};
use crate::buffer::{Attr, Buffer};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// Configuration for the crossterm driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Hide the caret when no view asks for it.
    pub hide_cursor_when_idle: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            enable_mouse: true,
            hide_cursor_when_idle: true,
        }
    }
}

/// A double-buffered terminal driver.
pub struct CrosstermDriver<W: Write = Stdout> {
    /// Terminal output.
    out: W,
    /// Configuration.
    config: DriverConfig,
    /// What the terminal currently shows.
    current: Buffer,
    /// What the next flush should show.
    next: Buffer,
    /// Cursor/attribute tracking for the diff.
    state: DiffState,
    /// Pre-allocated output bytes.
    output: Vec<u8>,
    /// Requested caret position.
    cursor: Option<(u16, u16)>,
    /// Whether the next flush must repaint everything.
    needs_full_redraw: bool,
    /// Whether raw mode and friends are active.
    entered: bool,
}

impl CrosstermDriver<Stdout> {
    /// Take over the process's terminal.
    pub fn stdout(config: DriverConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut driver = Self::new(io::stdout(), width, height, config);
        driver.enter()?;
        Ok(driver)
    }
}

impl<W: Write> CrosstermDriver<W> {
    /// Create a driver writing to `out`, without touching terminal modes.
    pub fn new(out: W, width: u16, height: u16, config: DriverConfig) -> Self {
        Self {
            out,
            config,
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            state: DiffState::new(),
            output: Vec::with_capacity(65536),
            cursor: None,
            needs_full_redraw: true,
            entered: false,
        }
    }

    /// Enter raw mode, the alternate screen and mouse capture.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        if self.config.alternate_screen {
            execute!(self.out, EnterAlternateScreen)?;
        }
        if self.config.enable_mouse {
            execute!(self.out, EnableMouseCapture)?;
        }
        execute!(self.out, cursor::Hide)?;
        self.entered = true;
        self.needs_full_redraw = true;
        Ok(())
    }

    /// Restore the terminal to the state before [`CrosstermDriver::enter`].
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        execute!(self.out, cursor::Show)?;
        if self.config.enable_mouse {
            execute!(self.out, DisableMouseCapture)?;
        }
        if self.config.alternate_screen {
            execute!(self.out, LeaveAlternateScreen)?;
        }
        terminal::disable_raw_mode()
    }

    /// Handle a terminal resize. The next flush repaints everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.next.resize(width, height);
        self.needs_full_redraw = true;
    }

    /// The contents the next flush will present.
    pub const fn screen(&self) -> &Buffer {
        &self.next
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Driver for CrosstermDriver<W> {
    fn size(&self) -> (u16, u16) {
        (self.next.width(), self.next.height())
    }

    fn put(&mut self, col: u16, row: u16, grapheme: &str, attr: Attr) {
        self.next.set_grapheme(col, row, grapheme, attr);
    }

    fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.next, &mut self.output, &mut self.state);
            self.needs_full_redraw = false;
        } else {
            render_diff(&self.current, &self.next, &mut self.output, &mut self.state);
        }

        match self.cursor {
            Some((x, y)) => {
                queue!(self.output, cursor::MoveTo(x, y), cursor::Show)?;
                self.state.invalidate_cursor();
            }
            None if self.config.hide_cursor_when_idle => queue!(self.output, cursor::Hide)?,
            None => {}
        }

        if !self.output.is_empty() {
            self.out.write_all(&self.output)?;
            self.out.flush()?;
        }
        self.current.copy_from(&self.next);
        Ok(())
    }
}

impl<W: Write> Drop for CrosstermDriver<W> {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
