//! Widgets: the behavior attached to views.
//!
//! A [`Widget`] draws one view and reacts to the keys and mouse events the
//! tree routes to it. The tree owns geometry, focus and invalidation, so
//! the widgets here only keep their own content and a redraw flag.
//!
//! - [`Label`]: static text
//! - [`Checkbox`]: a toggle with a mnemonic
//! - [`RadioGroup`]: one-of-many selection
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis::{Checkbox, ViewTree};
//!
//! let mut tree = ViewTree::new(80, 24);
//! let wrap = tree.create(Checkbox::new("_Wrap lines").on_toggled(|_, on| {
//!     tracing::info!(on, "wrap toggled");
//! }));
//! tree.add_subview(tree.root(), wrap);
//! ```

mod checkbox;
mod hotkey;
mod label;
mod radio_group;
mod traits;

pub use checkbox::{Checkbox, ToggledCallback};
pub use hotkey::{HOT_MARKER, HotLabel};
pub use label::Label;
pub use radio_group::{RadioGroup, SelectionCallback};
pub use traits::Widget;
