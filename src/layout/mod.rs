//! Layout module: rectangles and the relative geometry algebra.
//!
//! Views describe where they go with [`Pos`] and [`Dim`] expressions; the
//! layout engine in [`crate::view`] turns those into [`Rect`] frames.

mod error;
mod geometry;
mod rect;

pub use error::LayoutError;
pub use geometry::{Dim, FrameLookup, Geometry, NoFrames, Pos};
pub use rect::Rect;
