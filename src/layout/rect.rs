//! Rect: A rectangle primitive for layout calculations.
//!
//! Coordinates are signed: expression arithmetic may legally produce
//! negative offsets or sizes. A rectangle with a non-positive width or
//! height is empty and every operation treats it as covering no cells.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: i32,
    /// Y coordinate (row) of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle anchored at the origin (a view's own bounds).
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells). Empty rectangles have no area.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.width as u64) * (self.height as u64)
        }
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// The same size placed at the origin.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Self {
        Self::from_size(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The overlapping area of two rectangles, or [`Rect::ZERO`].
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other) {
            return Self::ZERO;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Self::new(
            x,
            y,
            self.right().min(other.right()).saturating_sub(x),
            self.bottom().min(other.bottom()).saturating_sub(y),
        )
    }

    /// The smallest rectangle covering both. Empty inputs are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()).saturating_sub(x),
            self.bottom().max(other.bottom()).saturating_sub(y),
        )
    }

    /// Move the rectangle by an offset.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Shrink the rectangle by a margin on all sides.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, margin: i32) -> Self {
        let m2 = margin.saturating_mul(2);
        if self.width <= m2 || self.height <= m2 {
            return Self::ZERO;
        }
        Self::new(
            self.x.saturating_add(margin),
            self.y.saturating_add(margin),
            self.width.saturating_sub(m2),
            self.height.saturating_sub(m2),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(3, 3, -2, 5).is_empty());
        assert_eq!(Rect::new(3, 3, -2, 5).area(), 0);
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Rect::new(5, 5, 5, 5));

        let c = Rect::new(10, 0, 5, 5);
        assert!(!a.intersects(&c));
        assert_eq!(a.intersection(&c), Rect::ZERO);
    }

    #[test]
    fn test_rect_intersection_with_negative_size() {
        let a = Rect::new(0, 0, 10, 10);
        let degenerate = Rect::new(2, 2, -4, 3);
        assert!(!a.intersects(&degenerate));
        assert!(a.intersection(&degenerate).is_empty());
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 1, 1, 4);
        assert_eq!(a.union(&b), Rect::new(0, 0, 6, 5));
        assert_eq!(Rect::ZERO.union(&b), b);
        assert_eq!(a.union(&Rect::ZERO), a);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 3, 4, 1);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 4));
    }

    #[test]
    fn test_rect_offset_and_bounds() {
        let r = Rect::new(4, 6, 3, 2);
        assert_eq!(r.offset(-4, -6), Rect::new(0, 0, 3, 2));
        assert_eq!(r.bounds(), Rect::new(0, 0, 3, 2));
    }

    #[test]
    fn test_rect_shrink() {
        assert_eq!(Rect::new(0, 0, 10, 6).shrink(1), Rect::new(1, 1, 8, 4));
        assert_eq!(Rect::new(0, 0, 2, 6).shrink(1), Rect::ZERO);
        assert_eq!(Rect::new(0, 0, 2, 6).shrink(i32::MAX), Rect::ZERO);
        assert_eq!(
            Rect::new(0, 0, 4, 4).shrink(i32::MIN),
            Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX)
        );
    }

    #[test]
    fn test_far_apart_rects_saturate() {
        let a = Rect::new(i32::MIN, 0, 1, 1);
        let b = Rect::new(i32::MAX - 1, 0, 1, 1);
        assert_eq!(a.union(&b), Rect::new(i32::MIN, 0, i32::MAX, 1));
    }
}
