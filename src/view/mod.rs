//! View tree: composable nodes with relative geometry.
//!
//! Views live in one arena owned by a [`ViewTree`] and are addressed by
//! [`ViewId`] handles. A view's widget supplies drawing and input behavior;
//! the tree supplies everything else:
//!
//! - **Layout**: geometry expressions resolved top-down into frames
//! - **Redraw**: dirty regions repainted through clipped [`crate::Painter`]s
//! - **Focus**: one focus chain from the root to a leaf, plus key and
//!   mouse dispatch along it
//!
//! All of it runs on the thread that owns the tree. Hooks may mutate the
//! tree; the changes show up on the next layout or redraw pass.
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis::{Buffer, Dim, Label, Pos, ViewTree};
//!
//! let mut tree = ViewTree::new(80, 24);
//! let label = tree.create(Label::new("Hello"));
//! tree.set_x(label, Pos::center());
//! tree.set_width(label, Dim::sized(5));
//! tree.set_height(label, Dim::sized(1));
//! tree.add_subview(tree.root(), label);
//!
//! let mut screen = Buffer::new(80, 24);
//! tree.present(&mut screen)?;
//! ```

mod context;
mod focus;
mod layout;
mod node;
mod redraw;
mod tree;

pub use context::EventContext;
pub use node::{ColorScheme, ViewState};
pub use redraw::RedrawReport;
pub use tree::{TreeConfig, ViewTree};

slotmap::new_key_type! {
    /// Handle to a view in a [`ViewTree`].
    pub struct ViewId;
}
