//! Layout engine: resolves geometry expressions into frames.
//!
//! A pass runs top-down. Each container resolves its children against its
//! own freshly resolved bounds, in an order where every view comes after
//! the siblings its expressions reference. The pass plans all frames into
//! scratch space first and commits only if nothing failed, so a
//! [`LayoutError`] leaves every frame exactly as it was.

use super::tree::ViewTree;
use super::ViewId;
use crate::layout::{FrameLookup, Geometry, LayoutError, NoFrames, Rect};
use slotmap::SecondaryMap;

/// Frames planned so far, visible only for siblings of the view resolving.
struct SiblingFrames<'a> {
    siblings: &'a [ViewId],
    planned: &'a SecondaryMap<ViewId, Rect>,
}

impl FrameLookup for SiblingFrames<'_> {
    fn frame_of(&self, view: ViewId) -> Option<Rect> {
        if self.siblings.contains(&view) {
            self.planned.get(view).copied()
        } else {
            None
        }
    }
}

impl ViewTree {
    /// Lay out the whole tree against the screen.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] met; no frame changes in that case.
    pub fn layout(&mut self) -> Result<(), LayoutError> {
        self.layout_subtree(self.root)
    }

    /// Lay out only if some attached view asked for it.
    ///
    /// # Errors
    ///
    /// See [`ViewTree::layout`].
    pub fn layout_if_needed(&mut self) -> Result<(), LayoutError> {
        let pending = self
            .preorder(self.root, false)
            .into_iter()
            .any(|id| self.nodes[id].needs_layout);
        if pending { self.layout() } else { Ok(()) }
    }

    /// Ask for a layout pass covering `view`.
    pub fn set_needs_layout(&mut self, view: ViewId) {
        if let Some(node) = self.nodes.get_mut(view) {
            node.needs_layout = true;
        }
    }

    /// Whether `view` changed since its last successful layout.
    pub fn needs_layout(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|node| node.needs_layout)
    }

    /// Change the screen size the root fills.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::from_size(i32::from(width), i32::from(height));
        self.set_needs_layout(self.root);
        tracing::debug!(width, height, "screen resized");
    }

    /// Place `view` at a concrete frame.
    ///
    /// The view's expressions are replaced by their absolute equivalents and
    /// its subtree is laid out again right away. When a sibling references
    /// `view`, the whole container is laid out instead so that sibling
    /// follows the new frame.
    ///
    /// # Errors
    ///
    /// Returns an error if any view in the pass fails to resolve. The frame
    /// assignment itself is then not applied either.
    pub fn set_frame(&mut self, view: ViewId, frame: Rect) -> Result<(), LayoutError> {
        let Some(node) = self.nodes.get_mut(view) else {
            return Ok(());
        };
        let previous = std::mem::replace(&mut node.geometry, Geometry::absolute(frame));
        let target = match self.superview(view) {
            Some(parent) if self.is_referenced(parent, view) => parent,
            _ => view,
        };
        let result = self.layout_subtree(target);
        if result.is_err()
            && let Some(node) = self.nodes.get_mut(view)
        {
            node.geometry = previous;
        }
        result
    }

    /// Whether a child of `container` other than `view` references `view`.
    fn is_referenced(&self, container: ViewId, view: ViewId) -> bool {
        self.nodes[container]
            .subviews
            .iter()
            .filter(|&&child| child != view)
            .any(|&child| self.nodes[child].geometry.dependencies().contains(&view))
    }

    /// Plan and commit `view` and everything below it.
    fn layout_subtree(&mut self, view: ViewId) -> Result<(), LayoutError> {
        let container = match self.superview(view) {
            Some(parent) => self.bounds(parent),
            None => self.screen,
        };

        let mut planned = SecondaryMap::new();
        let result = self.nodes[view]
            .geometry
            .resolve(container, &NoFrames)
            .and_then(|frame| {
                planned.insert(view, frame);
                self.plan_children(view, frame, &mut planned)
            });

        match result {
            Ok(()) => {
                let changed = self.commit(&planned);
                tracing::trace!(?view, views = planned.len(), changed, "layout pass");
                Ok(())
            }
            Err(error) => {
                tracing::debug!(?view, %error, "layout pass failed");
                Err(error)
            }
        }
    }

    fn plan_children(
        &self,
        view: ViewId,
        frame: Rect,
        planned: &mut SecondaryMap<ViewId, Rect>,
    ) -> Result<(), LayoutError> {
        let container = frame.bounds();
        let siblings = &self.nodes[view].subviews;
        for child in self.child_order(view)? {
            let child_frame = {
                let lookup = SiblingFrames { siblings, planned };
                self.nodes[child].geometry.resolve(container, &lookup)?
            };
            planned.insert(child, child_frame);
            self.plan_children(child, child_frame, planned)?;
        }
        Ok(())
    }

    /// Children of `view` ordered so references resolve before use.
    ///
    /// Independent siblings keep their insertion order.
    fn child_order(&self, view: ViewId) -> Result<Vec<ViewId>, LayoutError> {
        let subviews = &self.nodes[view].subviews;
        let mut dependencies = Vec::with_capacity(subviews.len());
        for &child in subviews {
            let deps = self.nodes[child].geometry.dependencies();
            for &dep in &deps {
                if dep == child {
                    return Err(LayoutError::Cycle { container: view });
                }
                if !subviews.contains(&dep) {
                    return Err(LayoutError::Unattached { referenced: dep });
                }
            }
            dependencies.push(deps);
        }

        let mut placed = vec![false; subviews.len()];
        let mut order = Vec::with_capacity(subviews.len());
        while order.len() < subviews.len() {
            let next = (0..subviews.len()).find(|&i| {
                !placed[i]
                    && dependencies[i].iter().all(|dep| {
                        subviews
                            .iter()
                            .position(|s| s == dep)
                            .is_some_and(|j| placed[j])
                    })
            });
            let Some(i) = next else {
                return Err(LayoutError::Cycle { container: view });
            };
            placed[i] = true;
            order.push(subviews[i]);
        }
        Ok(order)
    }

    /// Apply planned frames and repaint what moved. Returns how many
    /// frames changed.
    fn commit(&mut self, planned: &SecondaryMap<ViewId, Rect>) -> usize {
        let mut changed = Vec::new();
        for (id, &frame) in planned {
            let node = &mut self.nodes[id];
            node.needs_layout = false;
            if node.frame != frame {
                changed.push((id, node.frame, frame));
                node.frame = frame;
            }
        }

        for &(id, old, new) in &changed {
            if let Some(parent) = self.superview(id) {
                self.set_needs_display_rect(parent, old.union(&new));
            }
            self.set_needs_display(id);
        }
        changed.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;
    use crate::layout::{Dim, LayoutError, Pos, Rect};
    use crate::view::ViewTree;

    #[test]
    fn test_fill_child_follows_container() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let container = tree.create_container();
        tree.set_width(container, Dim::sized(10));
        tree.set_height(container, Dim::sized(3));
        let child = tree.create_container();
        tree.set_x(child, Pos::at(1));
        tree.set_width(child, Dim::fill(2));
        tree.set_height(child, Dim::sized(1));
        tree.add_subview(root, container);
        tree.add_subview(container, child);

        tree.layout().unwrap();
        assert_eq!(tree.frame(child), Rect::new(1, 0, 8, 1));

        tree.set_width(container, Dim::sized(6));
        tree.layout().unwrap();
        assert_eq!(tree.frame(child), Rect::new(1, 0, 4, 1));
    }

    #[test]
    fn test_root_follows_screen_resize() {
        let mut tree = ViewTree::new(10, 4);
        let root = tree.root();
        let child = tree.create_container();
        tree.set_x(child, 1);
        tree.set_width(child, Dim::fill(2));
        tree.set_height(child, 1);
        tree.add_subview(root, child);
        tree.layout().unwrap();
        assert_eq!(tree.frame(child), Rect::new(1, 0, 8, 1));

        tree.resize(6, 4);
        assert!(tree.needs_layout(root));
        tree.layout_if_needed().unwrap();
        assert_eq!(tree.frame(root), Rect::new(0, 0, 6, 4));
        assert_eq!(tree.frame(child), Rect::new(1, 0, 4, 1));
        assert!(!tree.needs_layout(root));
    }

    #[test]
    fn test_sibling_references_resolve_out_of_order() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let label = tree.create_container();
        let field = tree.create_container();
        tree.add_subview(root, field);
        tree.add_subview(root, label);

        tree.set_x(label, 2);
        tree.set_width(label, 6);
        tree.set_height(label, 1);
        tree.set_x(field, Pos::right(label) + 1);
        tree.set_y(field, Pos::top(label));
        tree.set_width(field, Dim::fill(0) - 9 - 2);
        tree.set_height(field, Dim::height(label));

        tree.layout().unwrap();
        assert_eq!(tree.frame(field), Rect::new(9, 0, 29, 1));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let a = tree.create_container();
        let b = tree.create_container();
        tree.add_subview(root, a);
        tree.add_subview(root, b);
        tree.set_x(a, Pos::right(b));
        tree.set_x(b, Pos::right(a));

        assert_eq!(tree.layout(), Err(LayoutError::Cycle { container: root }));

        tree.set_x(b, Pos::left(b));
        assert_eq!(tree.layout(), Err(LayoutError::Cycle { container: root }));
    }

    #[test]
    fn test_reference_to_detached_view_fails_and_keeps_frames() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let anchor = tree.create_container();
        let view = tree.create_container();
        tree.set_width(anchor, 5);
        tree.set_width(view, Dim::width(anchor));
        tree.set_x(view, 3);
        tree.add_subview(root, anchor);
        tree.add_subview(root, view);
        tree.layout().unwrap();
        assert_eq!(tree.frame(view), Rect::new(3, 0, 5, 0));

        tree.remove_subview(root, anchor);
        tree.set_x(view, 7);
        assert_eq!(
            tree.layout(),
            Err(LayoutError::Unattached { referenced: anchor })
        );
        assert_eq!(tree.frame(view), Rect::new(3, 0, 5, 0));
        assert!(tree.needs_layout(view));
    }

    #[test]
    fn test_failed_pass_is_atomic() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let good = tree.create_container();
        tree.set_width(good, 4);
        tree.add_subview(root, good);
        tree.layout().unwrap();

        let stranger = tree.create_container();
        let bad = tree.create_container();
        tree.set_x(bad, Pos::left(stranger));
        tree.add_subview(root, bad);
        tree.set_width(good, 9);
        tree.resize(20, 5);

        assert!(tree.layout().is_err());
        assert_eq!(tree.frame(root), Rect::new(0, 0, 40, 10));
        assert_eq!(tree.frame(good), Rect::new(0, 0, 4, 0));
    }

    #[test]
    fn test_frame_change_repaints_old_and_new_area() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let view = tree.create_container();
        tree.set_x(view, 2);
        tree.set_width(view, 3);
        tree.set_height(view, 1);
        tree.add_subview(root, view);
        tree.layout().unwrap();
        tree.clear_needs_display(root);

        tree.set_x(view, 6);
        tree.layout().unwrap();

        assert_eq!(tree.dirty_region(root), Rect::new(2, 0, 7, 1));
        assert_eq!(tree.dirty_region(view), Rect::new(0, 0, 3, 1));
    }

    #[test]
    fn test_unchanged_layout_marks_nothing() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let view = tree.create_container();
        tree.set_width(view, 3);
        tree.set_height(view, 1);
        tree.add_subview(root, view);
        tree.layout().unwrap();
        tree.clear_needs_display(root);

        tree.layout().unwrap();
        assert!(!tree.needs_display(root));
        assert!(!tree.needs_display(view));
    }

    #[test]
    fn test_set_frame_relays_subtree() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let panel = tree.create_container();
        let inner = tree.create_container();
        tree.set_width(inner, Dim::fill(1));
        tree.set_height(inner, Dim::percent(50.0));
        tree.add_subview(root, panel);
        tree.add_subview(panel, inner);
        tree.layout().unwrap();

        tree.set_frame(panel, Rect::new(5, 2, 11, 4)).unwrap();

        assert_eq!(tree.frame(panel), Rect::new(5, 2, 11, 4));
        assert_eq!(tree.frame(inner), Rect::new(0, 0, 10, 2));
        assert_eq!(
            tree.geometry(panel).map(|g| g.width.clone()),
            Some(Dim::Sized(11))
        );

        tree.layout().unwrap();
        assert_eq!(tree.frame(panel), Rect::new(5, 2, 11, 4));
    }

    #[test]
    fn test_set_frame_moves_dependent_sibling() {
        let mut tree = ViewTree::new(40, 10);
        let root = tree.root();
        let a = tree.create_container();
        let b = tree.create_container();
        tree.set_width(a, 5);
        tree.set_height(a, 1);
        tree.set_x(b, Pos::right(a));
        tree.set_width(b, 3);
        tree.set_height(b, 1);
        tree.add_subview(root, a);
        tree.add_subview(root, b);
        tree.layout().unwrap();
        assert_eq!(tree.frame(b), Rect::new(5, 0, 3, 1));
        tree.clear_needs_display(root);

        tree.set_frame(a, Rect::new(0, 0, 12, 1)).unwrap();

        assert_eq!(tree.frame(a), Rect::new(0, 0, 12, 1));
        assert_eq!(tree.frame(b), Rect::new(12, 0, 3, 1));
        assert!(!tree.needs_layout(root));
        assert!(!tree.needs_layout(b));
        assert!(tree.dirty_region(root).contains(14, 0));
    }

    #[test]
    fn test_extreme_expressions_do_not_panic() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let view = tree.create_container();
        tree.set_x(view, Pos::at(i32::MAX) + 1);
        tree.set_y(view, Pos::anchor_end(i32::MIN));
        tree.set_width(view, Dim::fill(i32::MIN));
        tree.set_height(view, Dim::sized(i32::MIN) - 1);
        tree.add_subview(root, view);

        tree.layout().unwrap();
        assert_eq!(tree.frame(view), Rect::new(i32::MAX, i32::MAX, i32::MAX, i32::MIN));

        let mut screen = Buffer::new(10, 5);
        tree.redraw(&mut screen);
        assert_eq!(screen.row_text(0), "          ");
    }

    #[test]
    fn test_negative_sizes_are_legal() {
        let mut tree = ViewTree::new(10, 5);
        let root = tree.root();
        let view = tree.create_container();
        tree.set_width(view, Dim::fill(15));
        tree.set_height(view, 2);
        tree.add_subview(root, view);

        tree.layout().unwrap();
        assert_eq!(tree.frame(view).width, -5);
        assert!(tree.frame(view).is_empty());
    }
}
