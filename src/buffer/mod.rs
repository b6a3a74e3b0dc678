//! Buffer module: the character grid behind the driver boundary.
//!
//! This module contains:
//! - [`Cell`]: one grapheme plus its [`Attr`]
//! - [`Buffer`]: a grid of cells representing the terminal screen
//! - [`Rgb`] and [`Modifiers`]: the pieces of an attribute
//! - [`diff`]: diffing engine for generating minimal ANSI sequences

#[allow(clippy::module_inception)]
mod buffer;
mod cell;
pub mod diff;

pub use buffer::Buffer;
pub use cell::{Attr, Cell, Modifiers, Rgb};
