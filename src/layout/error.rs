//! Layout errors.

use crate::view::ViewId;

/// A layout pass could not resolve a geometry expression.
///
/// The pass that produced this error is abandoned as a whole; frames from
/// the previous successful pass stay in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// An expression references a view that is not a live sibling of the
    /// view being laid out (removed, detached, or in another container).
    #[error("geometry references view {referenced:?}, which is not attached next to it")]
    Unattached {
        /// The view named by the expression.
        referenced: ViewId,
    },

    /// Subviews of a container reference each other in a loop.
    #[error("subviews of {container:?} have a circular geometry dependency")]
    Cycle {
        /// The container whose children could not be ordered.
        container: ViewId,
    },
}
