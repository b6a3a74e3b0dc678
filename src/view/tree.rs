//! The view arena: structure, state and dirty-region bookkeeping.

use super::context::EventContext;
use super::node::{ColorScheme, ViewNode, ViewState};
use super::ViewId;
use crate::layout::{Dim, Geometry, Pos, Rect};
use crate::widget::Widget;
use slotmap::SlotMap;
use std::any::Any;

/// Configuration for a [`ViewTree`].
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Scheme used by views that neither set one nor inherit one.
    pub default_scheme: ColorScheme,
    /// Move focus with Tab / `BackTab` when no view handles them.
    pub tab_moves_focus: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_scheme: ColorScheme::default(),
            tab_moves_focus: true,
        }
    }
}

/// A tree of views owned by one arena.
///
/// Parents own their children through the arena; the `superview` link is a
/// plain handle. Every operation on a stale or foreign [`ViewId`] is a
/// no-op, and queries on one return a neutral value.
pub struct ViewTree {
    pub(super) nodes: SlotMap<ViewId, ViewNode>,
    pub(super) root: ViewId,
    /// Screen size the root is laid out against.
    pub(super) screen: Rect,
    pub(super) config: TreeConfig,
    /// Focus notifications not yet delivered to their widget.
    pub(super) focus_notes: Vec<(ViewId, bool)>,
    /// Views whose widget is out of its node running a hook.
    pub(super) in_hook: Vec<ViewId>,
}

impl ViewTree {
    /// Create a tree whose root fills a `width` x `height` screen.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(width, height, TreeConfig::default())
    }

    /// Create a tree with custom configuration.
    pub fn with_config(width: u16, height: u16, config: TreeConfig) -> Self {
        let screen = Rect::from_size(i32::from(width), i32::from(height));
        let mut nodes = SlotMap::with_key();
        let mut root = ViewNode::new(None);
        root.geometry = Geometry {
            x: Pos::At(0),
            y: Pos::At(0),
            width: Dim::Fill(0),
            height: Dim::Fill(0),
        };
        root.frame = screen;
        root.needs_display = screen;
        let root = nodes.insert(root);
        Self {
            nodes,
            root,
            screen,
            config,
            focus_notes: Vec::new(),
            in_hook: Vec::new(),
        }
    }

    /// The root view.
    #[inline]
    pub const fn root(&self) -> ViewId {
        self.root
    }

    /// Current configuration.
    #[inline]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Screen size the root is laid out against.
    #[inline]
    pub const fn screen(&self) -> Rect {
        self.screen
    }

    /// Whether `view` is alive in this tree.
    pub fn contains(&self, view: ViewId) -> bool {
        self.nodes.contains_key(view)
    }

    /// Number of live views, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root exists for the tree's lifetime.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a detached view driven by `widget`.
    pub fn create(&mut self, widget: impl Widget) -> ViewId {
        self.create_boxed(Box::new(widget))
    }

    /// Create a detached view from a boxed widget.
    pub fn create_boxed(&mut self, widget: Box<dyn Widget>) -> ViewId {
        self.nodes.insert(ViewNode::new(Some(widget)))
    }

    /// Create a detached view with no widget of its own.
    pub fn create_container(&mut self) -> ViewId {
        self.nodes.insert(ViewNode::new(None))
    }

    /// Append `child` to `parent`'s subviews.
    ///
    /// No-op if `child` already has a superview, is the root, or is an
    /// ancestor of `parent`.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        if child == self.root
            || !self.nodes.contains_key(parent)
            || self.nodes.get(child).is_none_or(|node| node.superview.is_some())
            || self.is_ancestor(child, parent)
        {
            return;
        }

        self.nodes[parent].subviews.push(child);
        self.nodes[child].superview = Some(parent);

        if self.nodes[child].can_focus {
            self.propagate_can_focus(parent);
        }

        self.nodes[parent].needs_layout = true;
        self.nodes[child].needs_layout = true;
        self.set_needs_display(parent);
        self.set_needs_display(child);
        tracing::trace!(?parent, ?child, "subview added");
    }

    /// Detach `child` from `parent`.
    ///
    /// The detached subtree loses its focus and dirty state and the area it
    /// covered is repainted. If it held the focus, focus moves to the first
    /// focusable view left in the tree. No-op unless `child` is a subview of
    /// `parent`.
    pub fn remove_subview(&mut self, parent: ViewId, child: ViewId) {
        if self.nodes.get(child).and_then(|node| node.superview) != Some(parent) {
            return;
        }

        let held_focus = self.nodes[child].has_focus;
        let old_frame = self.nodes[child].frame;

        let node = &mut self.nodes[parent];
        node.subviews.retain(|&id| id != child);
        node.needs_layout = true;
        if node.focused == Some(child) {
            node.focused = None;
        }
        self.nodes[child].superview = None;

        for id in self.preorder(child, false) {
            let node = &mut self.nodes[id];
            if node.has_focus {
                node.has_focus = false;
                self.focus_notes.push((id, false));
            }
            let node = &mut self.nodes[id];
            node.focused = None;
            node.needs_display = Rect::ZERO;
            node.child_needs_display = false;
        }

        self.set_needs_display_rect(parent, old_frame);
        if held_focus {
            self.reassign_focus();
        }
        self.deliver_focus_notes();
        tracing::trace!(?parent, ?child, "subview removed");
    }

    /// Free a detached view and its subtree. Returns `false` for the root,
    /// attached views and stale ids.
    pub fn destroy(&mut self, view: ViewId) -> bool {
        if view == self.root || self.nodes.get(view).is_none_or(|node| node.superview.is_some()) {
            return false;
        }
        for id in self.preorder(view, false) {
            self.nodes.remove(id);
        }
        true
    }

    // =========================================================================
    // Structure queries
    // =========================================================================

    /// The parent of `view`.
    pub fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(view)?.superview
    }

    /// Children of `view` in paint order.
    pub fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.nodes.get(view).map_or(&[], |node| node.subviews.as_slice())
    }

    /// Whether `view` is connected to the root.
    pub fn is_attached(&self, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(id).and_then(|node| node.superview);
        }
        false
    }

    /// Whether `ancestor` is `view` or one of its superviews.
    pub fn is_ancestor(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|node| node.superview);
        }
        false
    }

    /// `from` and its descendants in pre-order.
    pub(super) fn preorder(&self, from: ViewId, visible_only: bool) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if visible_only && !node.visible {
                continue;
            }
            out.push(id);
            stack.extend(node.subviews.iter().rev());
        }
        out
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Resolved frame in the parent's coordinates.
    pub fn frame(&self, view: ViewId) -> Rect {
        self.nodes.get(view).map_or(Rect::ZERO, |node| node.frame)
    }

    /// Local bounds, `(0, 0, width, height)`.
    pub fn bounds(&self, view: ViewId) -> Rect {
        self.nodes.get(view).map_or(Rect::ZERO, ViewNode::bounds)
    }

    /// Screen position of `view`'s top-left corner.
    pub fn screen_origin(&self, view: ViewId) -> (i32, i32) {
        let mut origin = (0, 0);
        let mut current = Some(view);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            origin.0 = node.frame.x.saturating_add(origin.0);
            origin.1 = node.frame.y.saturating_add(origin.1);
            current = node.superview;
        }
        origin
    }

    /// The geometry expressions of `view`.
    pub fn geometry(&self, view: ViewId) -> Option<&Geometry> {
        self.nodes.get(view).map(|node| &node.geometry)
    }

    /// Replace all four expressions.
    pub fn set_geometry(&mut self, view: ViewId, geometry: Geometry) {
        self.update_geometry(view, |g| *g = geometry);
    }

    /// Set the column expression.
    pub fn set_x(&mut self, view: ViewId, x: impl Into<Pos>) {
        let x = x.into();
        self.update_geometry(view, |g| g.x = x);
    }

    /// Set the row expression.
    pub fn set_y(&mut self, view: ViewId, y: impl Into<Pos>) {
        let y = y.into();
        self.update_geometry(view, |g| g.y = y);
    }

    /// Set the width expression.
    pub fn set_width(&mut self, view: ViewId, width: impl Into<Dim>) {
        let width = width.into();
        self.update_geometry(view, |g| g.width = width);
    }

    /// Set the height expression.
    pub fn set_height(&mut self, view: ViewId, height: impl Into<Dim>) {
        let height = height.into();
        self.update_geometry(view, |g| g.height = height);
    }

    fn update_geometry(&mut self, view: ViewId, update: impl FnOnce(&mut Geometry)) {
        if let Some(node) = self.nodes.get_mut(view) {
            update(&mut node.geometry);
            node.needs_layout = true;
        }
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Whether `view` is drawn and receives input.
    pub fn is_visible(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|node| node.visible)
    }

    /// Show or hide `view`. Hiding a view that holds the focus moves the
    /// focus elsewhere.
    pub fn set_visible(&mut self, view: ViewId, visible: bool) {
        let Some(node) = self.nodes.get_mut(view) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        let frame = node.frame;
        let held_focus = node.has_focus;
        let superview = node.superview;

        if visible {
            self.set_needs_display(view);
        } else {
            self.clear_needs_display(view);
            if held_focus {
                self.reassign_focus();
                self.deliver_focus_notes();
            }
        }
        if let Some(parent) = superview {
            self.set_needs_display_rect(parent, frame);
        }
    }

    /// Set the color scheme of `view` and the descendants that inherit it.
    pub fn set_color_scheme(&mut self, view: ViewId, scheme: Option<ColorScheme>) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.color_scheme = scheme;
            self.set_needs_display(view);
        }
    }

    /// Effective color scheme: the nearest one set on `view` or an ancestor.
    pub fn color_scheme(&self, view: ViewId) -> ColorScheme {
        let mut current = Some(view);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            if let Some(scheme) = node.color_scheme {
                return scheme;
            }
            current = node.superview;
        }
        self.config.default_scheme
    }

    /// Snapshot handed to drawing hooks.
    pub fn view_state(&self, view: ViewId) -> ViewState {
        ViewState {
            id: view,
            bounds: self.bounds(view),
            has_focus: self.has_focus(view),
            scheme: self.color_scheme(view),
        }
    }

    // =========================================================================
    // Dirty regions
    // =========================================================================

    /// Mark the whole of `view` for repaint.
    pub fn set_needs_display(&mut self, view: ViewId) {
        let bounds = self.bounds(view);
        self.set_needs_display_rect(view, bounds);
    }

    /// Mark part of `view` (local coordinates) for repaint.
    ///
    /// The area is clipped to the bounds. Children under it are marked too,
    /// since the repaint clears them, and every ancestor learns it has a
    /// dirty descendant. Siblings are never marked.
    pub fn set_needs_display_rect(&mut self, view: ViewId, rect: Rect) {
        if !self.mark_region(view, rect) {
            return;
        }
        let mut current = self.superview(view);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.child_needs_display = true;
            current = node.superview;
        }
    }

    fn mark_region(&mut self, view: ViewId, rect: Rect) -> bool {
        let Some(node) = self.nodes.get_mut(view) else {
            return false;
        };
        let area = rect.intersection(&node.bounds());
        if area.is_empty() || !node.visible {
            return false;
        }
        node.needs_display = node.needs_display.union(&area);

        let children = node.subviews.clone();
        let mut any_child = false;
        for child in children {
            let frame = self.frame(child);
            if frame.intersects(&area) {
                let local = area
                    .intersection(&frame)
                    .offset(frame.x.saturating_neg(), frame.y.saturating_neg());
                any_child |= self.mark_region(child, local);
            }
        }
        if any_child {
            self.nodes[view].child_needs_display = true;
        }
        true
    }

    /// Whether any part of `view` is waiting for repaint.
    pub fn needs_display(&self, view: ViewId) -> bool {
        self.nodes
            .get(view)
            .is_some_and(|node| !node.needs_display.is_empty())
    }

    /// The area of `view` waiting for repaint, in local coordinates.
    pub fn dirty_region(&self, view: ViewId) -> Rect {
        self.nodes.get(view).map_or(Rect::ZERO, |node| node.needs_display)
    }

    /// Whether some descendant of `view` is waiting for repaint.
    pub fn has_dirty_descendant(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|node| node.child_needs_display)
    }

    /// Drop all pending repaint state of `view` and its subtree.
    pub(super) fn clear_needs_display(&mut self, view: ViewId) {
        for id in self.preorder(view, false) {
            let node = &mut self.nodes[id];
            node.needs_display = Rect::ZERO;
            node.child_needs_display = false;
        }
    }

    /// Collect self-reported invalidations from every widget.
    pub(super) fn poll_widgets(&mut self) {
        let dirty: Vec<ViewId> = self
            .nodes
            .iter_mut()
            .filter_map(|(id, node)| {
                node.widget
                    .as_mut()
                    .is_some_and(|widget| widget.take_needs_display())
                    .then_some(id)
            })
            .collect();
        for id in dirty {
            self.set_needs_display(id);
        }
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// The widget of `view`, if it is a `W`.
    ///
    /// Returns `None` while one of the widget's own hooks is running.
    pub fn widget<W: Widget>(&self, view: ViewId) -> Option<&W> {
        let widget: &dyn Any = self.nodes.get(view)?.widget.as_deref()?;
        widget.downcast_ref::<W>()
    }

    /// Mutable access to the widget of `view`, if it is a `W`.
    ///
    /// Changes made here are picked up on the next redraw if the widget
    /// reports them through [`Widget::take_needs_display`].
    pub fn widget_mut<W: Widget>(&mut self, view: ViewId) -> Option<&mut W> {
        let widget: &mut dyn Any = self.nodes.get_mut(view)?.widget.as_deref_mut()?;
        widget.downcast_mut::<W>()
    }

    /// Run a hook of `view`'s widget with access to the tree.
    ///
    /// The widget is taken out of its node for the duration, so the hook
    /// may freely mutate the tree, including removing `view` itself.
    pub(super) fn with_widget<R>(
        &mut self,
        view: ViewId,
        hook: impl FnOnce(&mut dyn Widget, &mut EventContext<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.nodes.get_mut(view)?.widget.take()?;
        self.in_hook.push(view);
        let result = hook(widget.as_mut(), &mut EventContext::new(self, view));
        self.in_hook.pop();
        let dirty = widget.take_needs_display();
        if let Some(node) = self.nodes.get_mut(view) {
            node.widget = Some(widget);
            if dirty {
                self.set_needs_display(view);
            }
        }
        self.deliver_focus_notes();
        Some(result)
    }
}

impl std::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTree")
            .field("root", &self.root)
            .field("screen", &self.screen)
            .field("views", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::Spy;

    fn sized(tree: &mut ViewTree, x: i32, y: i32, w: i32, h: i32) -> ViewId {
        let id = tree.create_container();
        tree.set_geometry(
            id,
            Geometry {
                x: Pos::at(x),
                y: Pos::at(y),
                width: Dim::sized(w),
                height: Dim::sized(h),
            },
        );
        id
    }

    fn settle(tree: &mut ViewTree) {
        tree.layout().unwrap();
        tree.clear_needs_display(tree.root());
    }

    #[test]
    fn test_new_view_defaults() {
        let mut tree = ViewTree::new(10, 5);
        let view = tree.create_container();
        assert_eq!(tree.geometry(view), Some(&Geometry::default()));
        assert_eq!(tree.frame(view), Rect::ZERO);
        assert_eq!(tree.superview(view), None);
        assert!(tree.is_visible(view));
        assert_eq!(tree.frame(tree.root()), Rect::new(0, 0, 10, 5));
        assert!(tree.needs_display(tree.root()));
    }

    #[test]
    fn test_add_subview_sets_superview_and_order() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let a = tree.create_container();
        let b = tree.create_container();
        tree.add_subview(root, a);
        tree.add_subview(root, b);

        assert_eq!(tree.subviews(root), &[a, b]);
        assert_eq!(tree.superview(b), Some(root));
        assert!(tree.needs_layout(a));
    }

    #[test]
    fn test_add_subview_rejects_cycles_and_reparenting() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let a = tree.create_container();
        let b = tree.create_container();
        tree.add_subview(root, a);
        tree.add_subview(a, b);

        tree.add_subview(b, a);
        tree.add_subview(root, b);
        tree.add_subview(b, root);
        tree.add_subview(b, b);

        assert_eq!(tree.subviews(root), &[a]);
        assert_eq!(tree.subviews(a), &[b]);
        assert!(tree.subviews(b).is_empty());
    }

    #[test]
    fn test_can_focus_chains_through_containers() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let outer = tree.create_container();
        let inner = tree.create_container();
        tree.add_subview(root, outer);
        tree.add_subview(outer, inner);
        assert!(!tree.can_focus(outer));

        let leaf = tree.create(Spy::focusable());
        tree.add_subview(inner, leaf);
        assert!(tree.can_focus(inner));
        assert!(tree.can_focus(outer));
    }

    #[test]
    fn test_invalidate_leaf_marks_ancestors_not_siblings() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let panel = sized(&mut tree, 0, 0, 10, 10);
        let leaf = sized(&mut tree, 1, 1, 3, 1);
        let sibling = sized(&mut tree, 10, 0, 10, 10);
        let cousin = sized(&mut tree, 0, 0, 2, 2);
        tree.add_subview(root, panel);
        tree.add_subview(panel, leaf);
        tree.add_subview(root, sibling);
        tree.add_subview(sibling, cousin);
        settle(&mut tree);

        tree.set_needs_display(leaf);

        assert_eq!(tree.dirty_region(leaf), Rect::new(0, 0, 3, 1));
        assert!(tree.has_dirty_descendant(panel));
        assert!(tree.has_dirty_descendant(root));
        assert!(!tree.needs_display(panel));
        assert!(!tree.needs_display(root));
        assert!(!tree.needs_display(sibling));
        assert!(!tree.has_dirty_descendant(sibling));
        assert!(!tree.needs_display(cousin));
    }

    #[test]
    fn test_invalidate_is_clipped_to_bounds() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let view = sized(&mut tree, 2, 2, 4, 3);
        tree.add_subview(root, view);
        settle(&mut tree);

        tree.set_needs_display_rect(view, Rect::new(-5, 1, 100, 1));
        assert_eq!(tree.dirty_region(view), Rect::new(0, 1, 4, 1));

        tree.set_needs_display_rect(view, Rect::new(10, 10, 2, 2));
        assert_eq!(tree.dirty_region(view), Rect::new(0, 1, 4, 1));
    }

    #[test]
    fn test_invalidate_parent_marks_children_underneath() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let left = sized(&mut tree, 0, 0, 5, 5);
        let right = sized(&mut tree, 10, 0, 5, 5);
        tree.add_subview(root, left);
        tree.add_subview(root, right);
        settle(&mut tree);

        tree.set_needs_display_rect(root, Rect::new(3, 0, 2, 1));
        assert_eq!(tree.dirty_region(left), Rect::new(3, 0, 2, 1));
        assert!(!tree.needs_display(right));
    }

    #[test]
    fn test_remove_subview_clears_state_and_repaints_parent() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let view = sized(&mut tree, 2, 2, 4, 3);
        tree.add_subview(root, view);
        settle(&mut tree);
        tree.set_needs_display(view);

        tree.remove_subview(root, view);

        assert_eq!(tree.superview(view), None);
        assert!(tree.subviews(root).is_empty());
        assert!(!tree.needs_display(view));
        assert_eq!(tree.dirty_region(root), Rect::new(2, 2, 4, 3));
        assert!(tree.needs_layout(root));
    }

    #[test]
    fn test_remove_focused_subview_moves_focus() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let first = tree.create(Spy::focusable());
        let second = tree.create(Spy::focusable());
        tree.add_subview(root, first);
        tree.add_subview(root, second);
        tree.set_focus(root, first);
        assert_eq!(tree.focused_leaf(), Some(first));

        tree.remove_subview(root, first);

        assert!(!tree.has_focus(first));
        assert_eq!(tree.focused_leaf(), Some(second));
        assert_eq!(tree.widget::<Spy>(first).unwrap().focus_events, vec![true, false]);
    }

    #[test]
    fn test_remove_from_wrong_parent_is_noop() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let a = tree.create_container();
        let b = tree.create_container();
        tree.add_subview(root, a);
        tree.add_subview(a, b);

        tree.remove_subview(root, b);
        assert_eq!(tree.superview(b), Some(a));
    }

    #[test]
    fn test_destroy_only_detached() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let parent = tree.create_container();
        let child = tree.create_container();
        tree.add_subview(parent, child);
        tree.add_subview(root, parent);

        assert!(!tree.destroy(parent));
        assert!(!tree.destroy(root));

        tree.remove_subview(root, parent);
        assert!(tree.destroy(parent));
        assert!(!tree.contains(parent));
        assert!(!tree.contains(child));
        assert!(!tree.destroy(parent));
    }

    #[test]
    fn test_color_scheme_is_inherited() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let panel = tree.create_container();
        let leaf = tree.create_container();
        tree.add_subview(root, panel);
        tree.add_subview(panel, leaf);

        assert_eq!(tree.color_scheme(leaf), ColorScheme::default());

        let mut scheme = ColorScheme::default();
        scheme.normal = crate::buffer::Attr::DEFAULT;
        tree.set_color_scheme(panel, Some(scheme));
        assert_eq!(tree.color_scheme(leaf), scheme);
        assert_eq!(tree.color_scheme(root), ColorScheme::default());
    }

    #[test]
    fn test_typed_widget_access() {
        let mut tree = ViewTree::new(10, 5);
        let view = tree.create(Spy::default());
        let container = tree.create_container();

        assert!(tree.widget::<Spy>(view).is_some());
        assert!(tree.widget::<crate::widget::Label>(view).is_none());
        assert!(tree.widget::<Spy>(container).is_none());

        tree.widget_mut::<Spy>(view).unwrap().fill = '*';
        assert_eq!(tree.widget::<Spy>(view).unwrap().fill, '*');
    }

    #[test]
    fn test_hidden_view_is_not_marked() {
        let mut tree = ViewTree::new(20, 10);
        let root = tree.root();
        let view = sized(&mut tree, 0, 0, 4, 4);
        tree.add_subview(root, view);
        settle(&mut tree);

        tree.set_visible(view, false);
        assert_eq!(tree.dirty_region(root), Rect::new(0, 0, 4, 4));
        tree.set_needs_display(view);
        assert!(!tree.needs_display(view));

        tree.set_visible(view, true);
        assert!(tree.needs_display(view));
    }
}
