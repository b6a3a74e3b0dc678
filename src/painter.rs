//! Painter: a clipped, translating drawing surface.
//!
//! A [`Painter`] is scoped to one view for one redraw call. Its origin is
//! the view's top-left corner and its clip rectangle is the intersection of
//! the parent's clip and the view's frame, so a widget draws in its own
//! local coordinates and can never touch a cell outside its visible area.
//!
//! Writes that fall outside the clip are dropped without error. A label
//! wider than its container is routine, not a bug.
//!
//! ```rust,ignore
//! let mut painter = Painter::new(&mut screen);
//! let mut child = painter.child(Rect::new(2, 1, 10, 3));
//! child.set_attr(scheme.normal);
//! child.goto(0, 0);
//! child.add("Hello");
//! ```

use crate::buffer::Attr;
use crate::layout::Rect;
use crate::terminal::Driver;
use crate::widget::HotLabel;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Box-drawing glyphs used by [`Painter::draw_frame`].
const TOP_LEFT: &str = "┌";
const TOP_RIGHT: &str = "┐";
const BOTTOM_LEFT: &str = "└";
const BOTTOM_RIGHT: &str = "┘";
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// Clip-and-translate drawing surface bound to one view.
pub struct Painter<'a> {
    /// Output device.
    driver: &'a mut dyn Driver,
    /// Screen position of local (0, 0).
    origin: (i32, i32),
    /// Clip rectangle in screen coordinates, always inside the screen.
    clip: Rect,
    /// Local bounds of the view being drawn.
    bounds: Rect,
    /// Local cursor column.
    col: i32,
    /// Local cursor row.
    row: i32,
    /// Attribute used by every write.
    attr: Attr,
}

impl<'a> Painter<'a> {
    /// A painter covering the whole screen of `driver`.
    pub fn new(driver: &'a mut dyn Driver) -> Self {
        let (width, height) = driver.size();
        let screen = Rect::from_size(i32::from(width), i32::from(height));
        Self {
            driver,
            origin: (0, 0),
            clip: screen,
            bounds: screen,
            col: 0,
            row: 0,
            attr: Attr::DEFAULT,
        }
    }

    /// A painter for a child whose frame is given in this painter's local
    /// coordinates. The child's clip never exceeds this one.
    pub fn child(&mut self, frame: Rect) -> Painter<'_> {
        let absolute = frame.offset(self.origin.0, self.origin.1);
        Painter {
            driver: &mut *self.driver,
            origin: (absolute.x, absolute.y),
            clip: self.clip.intersection(&absolute),
            bounds: frame.bounds(),
            col: 0,
            row: 0,
            attr: self.attr,
        }
    }

    /// A painter for the same view, further clipped to a local rectangle.
    pub fn clipped(&mut self, region: Rect) -> Painter<'_> {
        let absolute = region.offset(self.origin.0, self.origin.1);
        Painter {
            driver: &mut *self.driver,
            origin: self.origin,
            clip: self.clip.intersection(&absolute),
            bounds: self.bounds,
            col: self.col,
            row: self.row,
            attr: self.attr,
        }
    }

    /// Local bounds of the view being drawn.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The clip rectangle in local coordinates.
    #[inline]
    pub const fn clip(&self) -> Rect {
        self.clip
            .offset(self.origin.0.saturating_neg(), self.origin.1.saturating_neg())
    }

    /// Move the cursor.
    #[inline]
    pub const fn goto(&mut self, col: i32, row: i32) {
        self.col = col;
        self.row = row;
    }

    /// Current cursor position.
    #[inline]
    pub const fn cursor(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Current drawing attribute.
    #[inline]
    pub const fn attr(&self) -> Attr {
        self.attr
    }

    /// Set the drawing attribute for subsequent writes.
    #[inline]
    pub const fn set_attr(&mut self, attr: Attr) {
        self.attr = attr;
    }

    /// Write text at the cursor and advance it by the text's display width.
    ///
    /// A grapheme is written only if every cell it covers is inside the
    /// clip. Zero-width graphemes are skipped.
    pub fn add(&mut self, text: &str) {
        for grapheme in text.graphemes(true) {
            let width = i32::try_from(grapheme.width()).unwrap_or(0);
            if width == 0 {
                continue;
            }
            self.put(self.col, self.row, width, grapheme);
            self.col = self.col.saturating_add(width);
        }
    }

    /// Fill a local rectangle (the view's bounds by default) with `fill`.
    pub fn clear(&mut self, rect: Option<Rect>, fill: char) {
        let area = rect
            .unwrap_or(self.bounds)
            .intersection(&self.clip());
        if area.is_empty() {
            return;
        }
        let mut buf = [0u8; 4];
        let glyph: &str = fill.encode_utf8(&mut buf);
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                self.put(col, row, 1, glyph);
            }
        }
    }

    /// Draw a box border inset by `padding`, optionally clearing the inside.
    ///
    /// Borders smaller than 2x2 are not drawn.
    pub fn draw_frame(&mut self, rect: Rect, padding: i32, fill: bool) {
        let border = Rect::new(
            rect.x.saturating_add(padding),
            rect.y.saturating_add(padding),
            rect.width.saturating_sub(padding.saturating_mul(2)),
            rect.height.saturating_sub(padding.saturating_mul(2)),
        );
        if border.width < 2 || border.height < 2 {
            return;
        }

        let (left, top) = (border.x, border.y);
        let (right, bottom) = (border.right() - 1, border.bottom() - 1);

        self.put(left, top, 1, TOP_LEFT);
        self.put(right, top, 1, TOP_RIGHT);
        self.put(left, bottom, 1, BOTTOM_LEFT);
        self.put(right, bottom, 1, BOTTOM_RIGHT);
        // Edges only walk the part inside the clip.
        let clip = self.clip();
        for col in left.saturating_add(1).max(clip.x)..right.min(clip.right()) {
            self.put(col, top, 1, HORIZONTAL);
            self.put(col, bottom, 1, HORIZONTAL);
        }
        for row in top.saturating_add(1).max(clip.y)..bottom.min(clip.bottom()) {
            self.put(left, row, 1, VERTICAL);
            self.put(right, row, 1, VERTICAL);
        }

        if fill {
            self.clear(Some(border.shrink(1)), ' ');
        }
    }

    /// Write a mnemonic label at the cursor, its hot letter in `hot` and
    /// the rest in `normal`. Leaves the attribute set to `normal`.
    pub fn draw_hot_label(&mut self, label: &HotLabel, normal: Attr, hot: Attr) {
        for (index, grapheme) in label.text().graphemes(true).enumerate() {
            self.attr = if label.hot_pos() == Some(index) { hot } else { normal };
            self.add(grapheme);
        }
        self.attr = normal;
    }

    /// Write one grapheme covering `width` cells at a local position.
    fn put(&mut self, col: i32, row: i32, width: i32, grapheme: &str) {
        let x = self.origin.0.saturating_add(col);
        let y = self.origin.1.saturating_add(row);
        if !self.clip.contains(x, y) || !self.clip.contains(x.saturating_add(width - 1), y) {
            return;
        }
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
            self.driver.put(x, y, grapheme, self.attr);
        }
    }
}

impl std::fmt::Debug for Painter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("origin", &self.origin)
            .field("clip", &self.clip)
            .field("bounds", &self.bounds)
            .field("cursor", &(self.col, self.row))
            .finish_non_exhaustive()
    }
}
