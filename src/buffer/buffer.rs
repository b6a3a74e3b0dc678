//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::{Attr, Cell};

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to blanks with the default attribute.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a grapheme at (x, y).
    ///
    /// For wide characters this also writes a continuation cell at
    /// (x+1, y). Returns the display width, or 0 if out of bounds.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, attr: Attr) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let cell = Cell::new(grapheme, attr);
        let width = cell.width();
        self.cells[idx] = cell;

        if width == 2
            && let Some(next_idx) = x.checked_add(1).and_then(|nx| self.index_of(nx, y))
        {
            self.cells[next_idx] = Cell::continuation(attr);
        }

        width
    }

    /// Resize the buffer, preserving content where possible.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::new(new_width, new_height);
        let copy_width = usize::from(self.width.min(new_width));
        let copy_height = usize::from(self.height.min(new_height));

        for y in 0..copy_height {
            let old_start = y * usize::from(self.width);
            let new_start = y * usize::from(new_width);
            resized.cells[new_start..new_start + copy_width]
                .clone_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        *self = resized;
    }

    /// Copy content from another buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.clone_from_slice(&other.cells);
    }

    /// The text of one row, skipping continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter_map(Cell::symbol)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
    }

    #[test]
    fn test_buffer_set_grapheme() {
        let mut buffer = Buffer::new(10, 2);
        let attr = Attr::new(Rgb::WHITE, Rgb::BLUE);

        assert_eq!(buffer.set_grapheme(0, 0, "A", attr), 1);
        assert_eq!(buffer.get(0, 0).unwrap().symbol(), Some("A"));
        assert_eq!(buffer.get(0, 0).unwrap().attr(), attr);

        assert_eq!(buffer.set_grapheme(5, 0, "日", attr), 2);
        assert!(buffer.get(6, 0).unwrap().is_continuation());

        assert_eq!(buffer.set_grapheme(10, 0, "B", attr), 0);
    }

    #[test]
    fn test_buffer_resize() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set_grapheme(5, 5, "X", Attr::DEFAULT);

        buffer.resize(100, 30);
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.get(5, 5).unwrap().symbol(), Some("X"));

        buffer.resize(10, 10);
        assert_eq!(buffer.get(5, 5).unwrap().symbol(), Some("X"));
        assert!(buffer.get(15, 15).is_none());
    }

    #[test]
    fn test_buffer_row_text_skips_continuations() {
        let mut buffer = Buffer::new(4, 1);
        buffer.set_grapheme(0, 0, "日", Attr::DEFAULT);
        buffer.set_grapheme(2, 0, "a", Attr::DEFAULT);
        assert_eq!(buffer.row_text(0), "日a ");
    }
}
