//! Terminal module: the character-grid driver boundary.
//!
//! The view core only ever talks to a [`Driver`]: it asks for the screen
//! size, writes single cells at absolute positions, places the caret, and
//! asks the driver to present what was written. Two drivers ship with the
//! crate:
//!
//! - [`Buffer`]: an in-memory grid, handy for tests and off-screen drawing
//! - [`CrosstermDriver`]: double-buffered output to a real terminal

mod backend;

pub use backend::{CrosstermDriver, DriverConfig};

use crate::buffer::{Attr, Buffer};
use std::io;

/// A character-grid output device.
pub trait Driver {
    /// Current screen size as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Set one cell at an absolute position.
    ///
    /// Callers never pass positions outside [`Driver::size`].
    fn put(&mut self, col: u16, row: u16, grapheme: &str, attr: Attr);

    /// Place the caret, or hide it with `None`.
    fn set_cursor(&mut self, _position: Option<(u16, u16)>) {}

    /// Present everything written since the last flush.
    fn flush(&mut self) -> io::Result<()>;
}

impl Driver for Buffer {
    fn size(&self) -> (u16, u16) {
        (self.width(), self.height())
    }

    fn put(&mut self, col: u16, row: u16, grapheme: &str, attr: Attr) {
        self.set_grapheme(col, row, grapheme, attr);
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
