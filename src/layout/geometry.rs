//! Position and dimension expressions.
//!
//! A view's geometry is declared relative to its container with [`Pos`] and
//! [`Dim`] and resolved into a concrete frame on every layout pass. Each axis
//! resolves its dimension first and its position second, so a position such
//! as [`Pos::Center`] can use the size that was just computed.
//!
//! ```rust,ignore
//! use trellis::{Dim, Pos};
//!
//! // Two columns in from the left, stretched to leave a one column margin.
//! let x = Pos::at(2);
//! let width = Dim::fill(3);
//! // Hug the bottom edge.
//! let y = Pos::anchor_end(1);
//! ```

use super::error::LayoutError;
use super::rect::Rect;
use crate::view::ViewId;
use std::ops::{Add, Sub};

/// Looks up frames of views that an expression may reference.
///
/// During a layout pass this yields the frames of siblings that have
/// already been resolved in the same pass.
pub trait FrameLookup {
    /// The resolved frame of `view`, or `None` if it cannot be referenced.
    fn frame_of(&self, view: ViewId) -> Option<Rect>;
}

/// A lookup with nothing in it, for expressions without view references.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrames;

impl FrameLookup for NoFrames {
    fn frame_of(&self, _view: ViewId) -> Option<Rect> {
        None
    }
}

/// A position along one axis, relative to the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Pos {
    /// A fixed offset from the container's leading edge.
    At(i32),
    /// A percentage of the container's extent.
    Percent(f32),
    /// Centered, using the view's own resolved size.
    Center,
    /// The container's trailing edge minus an offset.
    AnchorEnd(i32),
    /// Left edge of a sibling.
    Left(ViewId),
    /// Right edge (exclusive) of a sibling.
    Right(ViewId),
    /// Top edge of a sibling.
    Top(ViewId),
    /// Bottom edge (exclusive) of a sibling.
    Bottom(ViewId),
    /// Sum of two positions.
    Sum(Box<Pos>, Box<Pos>),
}

/// A size along one axis, relative to the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Dim {
    /// A fixed size.
    Sized(i32),
    /// The container's extent minus a margin.
    Fill(i32),
    /// A percentage of the container's extent.
    Percent(f32),
    /// Width of a sibling.
    Width(ViewId),
    /// Height of a sibling.
    Height(ViewId),
    /// Sum of two sizes.
    Sum(Box<Dim>, Box<Dim>),
}

impl Default for Pos {
    fn default() -> Self {
        Self::At(0)
    }
}

impl Default for Dim {
    fn default() -> Self {
        Self::Sized(0)
    }
}

/// Percentage of an extent, truncated toward zero.
#[allow(clippy::cast_possible_truncation)]
fn percent_of(extent: i32, percent: f32) -> i32 {
    (f64::from(extent) * f64::from(percent) / 100.0).trunc() as i32
}

fn referenced(lookup: &dyn FrameLookup, view: ViewId) -> Result<Rect, LayoutError> {
    lookup
        .frame_of(view)
        .ok_or(LayoutError::Unattached { referenced: view })
}

impl Pos {
    /// Absolute offset.
    pub const fn at(offset: i32) -> Self {
        Self::At(offset)
    }

    /// Percentage of the container.
    pub const fn percent(percent: f32) -> Self {
        Self::Percent(percent)
    }

    /// Centered within the container.
    pub const fn center() -> Self {
        Self::Center
    }

    /// Trailing edge of the container minus `offset`.
    pub const fn anchor_end(offset: i32) -> Self {
        Self::AnchorEnd(offset)
    }

    /// Left edge of a sibling (also usable as its `x`).
    pub const fn left(view: ViewId) -> Self {
        Self::Left(view)
    }

    /// Right edge of a sibling.
    pub const fn right(view: ViewId) -> Self {
        Self::Right(view)
    }

    /// Top edge of a sibling (also usable as its `y`).
    pub const fn top(view: ViewId) -> Self {
        Self::Top(view)
    }

    /// Bottom edge of a sibling.
    pub const fn bottom(view: ViewId) -> Self {
        Self::Bottom(view)
    }

    /// Resolve against the container's extent on this axis.
    ///
    /// `own_size` is the view's size on the same axis, resolved just before.
    pub fn resolve(
        &self,
        container: i32,
        own_size: i32,
        lookup: &dyn FrameLookup,
    ) -> Result<i32, LayoutError> {
        Ok(match self {
            Self::At(n) => *n,
            Self::Percent(p) => percent_of(container, *p),
            Self::Center => container.saturating_sub(own_size) / 2,
            Self::AnchorEnd(n) => container.saturating_sub(*n),
            Self::Left(v) => referenced(lookup, *v)?.x,
            Self::Right(v) => referenced(lookup, *v)?.right(),
            Self::Top(v) => referenced(lookup, *v)?.y,
            Self::Bottom(v) => referenced(lookup, *v)?.bottom(),
            Self::Sum(a, b) => a
                .resolve(container, own_size, lookup)?
                .saturating_add(b.resolve(container, own_size, lookup)?),
        })
    }

    /// Append every view this expression references.
    pub fn dependencies(&self, out: &mut Vec<ViewId>) {
        match self {
            Self::Left(v) | Self::Right(v) | Self::Top(v) | Self::Bottom(v) => out.push(*v),
            Self::Sum(a, b) => {
                a.dependencies(out);
                b.dependencies(out);
            }
            Self::At(_) | Self::Percent(_) | Self::Center | Self::AnchorEnd(_) => {}
        }
    }
}

impl Dim {
    /// A fixed size.
    pub const fn sized(n: i32) -> Self {
        Self::Sized(n)
    }

    /// Container extent minus `margin`.
    pub const fn fill(margin: i32) -> Self {
        Self::Fill(margin)
    }

    /// Percentage of the container.
    pub const fn percent(percent: f32) -> Self {
        Self::Percent(percent)
    }

    /// Same width as a sibling.
    pub const fn width(view: ViewId) -> Self {
        Self::Width(view)
    }

    /// Same height as a sibling.
    pub const fn height(view: ViewId) -> Self {
        Self::Height(view)
    }

    /// Resolve against the container's extent on this axis.
    pub fn resolve(&self, container: i32, lookup: &dyn FrameLookup) -> Result<i32, LayoutError> {
        Ok(match self {
            Self::Sized(n) => *n,
            Self::Fill(margin) => container.saturating_sub(*margin),
            Self::Percent(p) => percent_of(container, *p),
            Self::Width(v) => referenced(lookup, *v)?.width,
            Self::Height(v) => referenced(lookup, *v)?.height,
            Self::Sum(a, b) => a
                .resolve(container, lookup)?
                .saturating_add(b.resolve(container, lookup)?),
        })
    }

    /// Append every view this expression references.
    pub fn dependencies(&self, out: &mut Vec<ViewId>) {
        match self {
            Self::Width(v) | Self::Height(v) => out.push(*v),
            Self::Sum(a, b) => {
                a.dependencies(out);
                b.dependencies(out);
            }
            Self::Sized(_) | Self::Fill(_) | Self::Percent(_) => {}
        }
    }
}

/// The four expressions that place one view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    /// Column of the top-left corner.
    pub x: Pos,
    /// Row of the top-left corner.
    pub y: Pos,
    /// Width.
    pub width: Dim,
    /// Height.
    pub height: Dim,
}

impl Geometry {
    /// Absolute geometry equivalent to a concrete frame.
    pub const fn absolute(frame: Rect) -> Self {
        Self {
            x: Pos::At(frame.x),
            y: Pos::At(frame.y),
            width: Dim::Sized(frame.width),
            height: Dim::Sized(frame.height),
        }
    }

    /// Resolve to a frame inside a container of the given size.
    ///
    /// Dimensions resolve before positions on each axis.
    pub fn resolve(&self, container: Rect, lookup: &dyn FrameLookup) -> Result<Rect, LayoutError> {
        let width = self.width.resolve(container.width, lookup)?;
        let height = self.height.resolve(container.height, lookup)?;
        let x = self.x.resolve(container.width, width, lookup)?;
        let y = self.y.resolve(container.height, height, lookup)?;
        Ok(Rect::new(x, y, width, height))
    }

    /// Every view referenced by any of the four expressions.
    pub fn dependencies(&self) -> Vec<ViewId> {
        let mut out = Vec::new();
        self.x.dependencies(&mut out);
        self.y.dependencies(&mut out);
        self.width.dependencies(&mut out);
        self.height.dependencies(&mut out);
        out
    }
}

impl Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::Sum(Box::new(self), Box::new(rhs))
    }
}

impl Add<i32> for Pos {
    type Output = Self;

    fn add(self, rhs: i32) -> Self {
        self + Self::At(rhs)
    }
}

impl Sub<i32> for Pos {
    type Output = Self;

    fn sub(self, rhs: i32) -> Self {
        self + Self::At(rhs.saturating_neg())
    }
}

impl Add for Dim {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::Sum(Box::new(self), Box::new(rhs))
    }
}

impl Add<i32> for Dim {
    type Output = Self;

    fn add(self, rhs: i32) -> Self {
        self + Self::Sized(rhs)
    }
}

impl Sub<i32> for Dim {
    type Output = Self;

    fn sub(self, rhs: i32) -> Self {
        self + Self::Sized(rhs.saturating_neg())
    }
}

impl From<i32> for Pos {
    fn from(n: i32) -> Self {
        Self::At(n)
    }
}

impl From<i32> for Dim {
    fn from(n: i32) -> Self {
        Self::Sized(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    struct Frames(HashMap<ViewId, Rect>);

    impl FrameLookup for Frames {
        fn frame_of(&self, view: ViewId) -> Option<Rect> {
            self.0.get(&view).copied()
        }
    }

    fn ids(n: usize) -> Vec<ViewId> {
        let mut map: SlotMap<ViewId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_anchor_end_and_fill() {
        assert_eq!(Pos::anchor_end(2).resolve(80, 0, &NoFrames), Ok(78));
        assert_eq!(Dim::fill(2).resolve(80, &NoFrames), Ok(78));
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(Dim::percent(33.0).resolve(10, &NoFrames), Ok(3));
        assert_eq!(Pos::percent(50.0).resolve(7, 0, &NoFrames), Ok(3));
        assert_eq!(Dim::percent(50.0).resolve(-7, &NoFrames), Ok(-3));
    }

    #[test]
    fn test_center_uses_own_size() {
        assert_eq!(Pos::center().resolve(80, 20, &NoFrames), Ok(30));
        assert_eq!(Pos::center().resolve(9, 4, &NoFrames), Ok(2));
    }

    #[test]
    fn test_sum_allows_negative() {
        let pos = Pos::at(1) - 5;
        assert_eq!(pos.resolve(10, 0, &NoFrames), Ok(-4));
        let dim = Dim::fill(0) + Dim::sized(-20);
        assert_eq!(dim.resolve(10, &NoFrames), Ok(-10));
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        assert_eq!(Pos::anchor_end(i32::MIN).resolve(10, 0, &NoFrames), Ok(i32::MAX));
        assert_eq!((Pos::at(i32::MAX) + 1).resolve(10, 0, &NoFrames), Ok(i32::MAX));
        assert_eq!((Pos::at(i32::MIN) - 1).resolve(10, 0, &NoFrames), Ok(i32::MIN));
        assert_eq!(Pos::center().resolve(i32::MIN, i32::MAX, &NoFrames), Ok(i32::MIN / 2));
        assert_eq!(Dim::fill(i32::MIN).resolve(10, &NoFrames), Ok(i32::MAX));
        assert_eq!((Dim::sized(i32::MAX) + 5).resolve(0, &NoFrames), Ok(i32::MAX));
        assert_eq!((Dim::fill(0) - i32::MIN).resolve(0, &NoFrames), Ok(i32::MAX));
    }

    #[test]
    fn test_geometry_resolves_dimension_first() {
        let geometry = Geometry {
            x: Pos::center(),
            y: Pos::anchor_end(1),
            width: Dim::sized(4),
            height: Dim::sized(1),
        };
        let frame = geometry.resolve(Rect::from_size(10, 5), &NoFrames);
        assert_eq!(frame, Ok(Rect::new(3, 4, 4, 1)));
    }

    #[test]
    fn test_view_references() {
        let v = ids(2);
        let frames = Frames(HashMap::from([(v[0], Rect::new(2, 1, 5, 3))]));

        assert_eq!(Pos::right(v[0]).resolve(80, 0, &frames), Ok(7));
        assert_eq!((Pos::bottom(v[0]) + 1).resolve(80, 0, &frames), Ok(5));
        assert_eq!(Dim::width(v[0]).resolve(80, &frames), Ok(5));
        assert_eq!(
            Dim::height(v[1]).resolve(80, &frames),
            Err(LayoutError::Unattached { referenced: v[1] })
        );
    }

    #[test]
    fn test_dependencies() {
        let v = ids(3);
        let geometry = Geometry {
            x: Pos::right(v[0]) + Pos::at(1),
            y: Pos::at(0),
            width: Dim::width(v[1]) + Dim::sized(2),
            height: Dim::fill(0),
        };
        assert_eq!(geometry.dependencies(), vec![v[0], v[1]]);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(
            w in any::<i32>(),
            h in any::<i32>(),
            margin in any::<i32>(),
            offset in any::<i32>(),
            pct in 0.0f32..200.0,
        ) {
            let geometry = Geometry {
                x: Pos::anchor_end(offset) + Pos::percent(pct),
                y: Pos::center(),
                width: Dim::fill(margin),
                height: Dim::percent(pct) - offset,
            };
            let container = Rect::from_size(w, h);
            let first = geometry.resolve(container, &NoFrames);
            let second = geometry.resolve(container, &NoFrames);
            prop_assert_eq!(first, second);
        }
    }
}
