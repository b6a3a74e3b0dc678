//! Access to the tree from inside a widget hook.

use super::node::ViewState;
use super::tree::ViewTree;
use super::ViewId;
use crate::layout::Rect;

/// Handed to event hooks: the tree, and which view the hook belongs to.
///
/// The hook's own widget is out of the tree while it runs, so
/// [`ViewTree::widget`] returns `None` for [`EventContext::view`]. Every
/// other mutation is allowed, including removing the view itself; layout
/// and redraw pick the changes up on their next pass.
pub struct EventContext<'a> {
    tree: &'a mut ViewTree,
    view: ViewId,
}

impl<'a> EventContext<'a> {
    pub(crate) const fn new(tree: &'a mut ViewTree, view: ViewId) -> Self {
        Self { tree, view }
    }

    /// The view whose hook is running.
    #[inline]
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// The whole tree.
    #[inline]
    pub fn tree(&mut self) -> &mut ViewTree {
        &mut *self.tree
    }

    /// Snapshot of the view's state.
    pub fn state(&self) -> ViewState {
        self.tree.view_state(self.view)
    }

    /// Whether the view is on the focus chain.
    pub fn has_focus(&self) -> bool {
        self.tree.has_focus(self.view)
    }

    /// Focus the view.
    pub fn focus(&mut self) {
        self.tree.focus(self.view);
    }

    /// Repaint the whole view.
    pub fn set_needs_display(&mut self) {
        self.tree.set_needs_display(self.view);
    }

    /// Repaint part of the view, in local coordinates.
    pub fn set_needs_display_rect(&mut self, rect: Rect) {
        self.tree.set_needs_display_rect(self.view, rect);
    }
}

impl std::fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
