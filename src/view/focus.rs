//! Focus chain and input dispatch.
//!
//! Every container remembers which child is on its focus chain; following
//! those links from the root while `has_focus` holds leads to the focused
//! leaf. Keys travel through three passes:
//!
//! 1. **Cold**: every visible view, pre-order, for unmodified mnemonics.
//! 2. **Normal**: the focused leaf, then each superview up to the root.
//! 3. **Hot**: every visible view again, for modifier mnemonics.
//!
//! The first hook that reports the key as handled ends the dispatch.

use super::tree::ViewTree;
use super::ViewId;
use crate::actor::{InputEvent, KeyCode, KeyEvent, MouseEvent, MouseFlags};

/// Button flags that move focus to the view under the pointer.
const FOCUSING_BUTTONS: MouseFlags = MouseFlags::BUTTON1_PRESSED
    .union(MouseFlags::BUTTON1_CLICKED)
    .union(MouseFlags::BUTTON2_PRESSED)
    .union(MouseFlags::BUTTON2_CLICKED)
    .union(MouseFlags::BUTTON3_PRESSED)
    .union(MouseFlags::BUTTON3_CLICKED);

impl ViewTree {
    /// Whether `view` or something inside it can take the focus.
    pub fn can_focus(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|node| node.can_focus)
    }

    /// Allow or forbid focusing `view`. Allowing also marks every ancestor
    /// as focusable. Forbidding it while `view` is on the focus chain moves
    /// the focus to the first focusable leaf, as hiding it would.
    pub fn set_can_focus(&mut self, view: ViewId, can_focus: bool) {
        let Some(node) = self.nodes.get_mut(view) else {
            return;
        };
        let held_focus = node.has_focus;
        node.can_focus = can_focus;
        match (can_focus, node.superview) {
            (true, Some(parent)) => self.propagate_can_focus(parent),
            (false, _) if held_focus => {
                self.reassign_focus();
                self.deliver_focus_notes();
            }
            _ => {}
        }
    }

    pub(super) fn propagate_can_focus(&mut self, from: ViewId) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            if node.can_focus {
                break;
            }
            node.can_focus = true;
            current = node.superview;
        }
    }

    /// Whether `view` is on the focus chain.
    pub fn has_focus(&self, view: ViewId) -> bool {
        self.nodes.get(view).is_some_and(|node| node.has_focus)
    }

    /// The deepest view on the focus chain.
    pub fn focused_leaf(&self) -> Option<ViewId> {
        let mut current = self.root;
        while let Some(child) = self.nodes[current].focused {
            if !self.has_focus(child) {
                break;
            }
            current = child;
        }
        (current != self.root).then_some(current)
    }

    /// Focus `target` anywhere in the tree.
    pub fn focus(&mut self, target: ViewId) {
        self.set_focus(self.root, target);
    }

    /// Focus `target`, which must be `container` or inside it.
    ///
    /// A container target passes the focus down to its remembered child, or
    /// to its first focusable child, until a leaf is reached. No-op when
    /// the target cannot take focus, is hidden or detached, or already has
    /// it.
    pub fn set_focus(&mut self, container: ViewId, target: ViewId) {
        if !self.is_focus_candidate(target)
            || !self.is_ancestor(container, target)
            || !self.is_attached(target)
            || !self.is_shown(target)
        {
            return;
        }
        let leaf = self.descend_focus(target);
        if self.focused_leaf() == Some(leaf) {
            return;
        }
        self.focus_path(leaf);
        self.deliver_focus_notes();
        tracing::debug!(?leaf, "focus moved");
    }

    /// Move the focus to the next focusable leaf inside `container`,
    /// wrapping around. Returns whether the focus moved.
    pub fn focus_next(&mut self, container: ViewId) -> bool {
        self.cycle_focus(container, true)
    }

    /// Move the focus to the previous focusable leaf inside `container`,
    /// wrapping around. Returns whether the focus moved.
    pub fn focus_prev(&mut self, container: ViewId) -> bool {
        self.cycle_focus(container, false)
    }

    fn cycle_focus(&mut self, container: ViewId, forward: bool) -> bool {
        let leaves = self.focusable_leaves(container);
        if leaves.is_empty() {
            return false;
        }
        let current = self.focused_leaf();
        let position = current.and_then(|leaf| leaves.iter().position(|&l| l == leaf));
        let next = match (position, forward) {
            (Some(i), true) => leaves[(i + 1) % leaves.len()],
            (Some(i), false) => leaves[(i + leaves.len() - 1) % leaves.len()],
            (None, true) => leaves[0],
            (None, false) => leaves[leaves.len() - 1],
        };
        if current == Some(next) {
            return false;
        }
        self.set_focus(container, next);
        true
    }

    /// Visible focusable views inside `container` with no focusable
    /// visible child, in pre-order.
    fn focusable_leaves(&self, container: ViewId) -> Vec<ViewId> {
        self.preorder(container, true)
            .into_iter()
            .filter(|&id| {
                id != self.root
                    && self.nodes[id].can_focus
                    && !self.nodes[id]
                        .subviews
                        .iter()
                        .any(|&child| self.is_focus_candidate(child))
            })
            .collect()
    }

    fn is_focus_candidate(&self, view: ViewId) -> bool {
        self.nodes
            .get(view)
            .is_some_and(|node| node.can_focus && node.visible)
    }

    fn is_shown(&self, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            let Some(node) = self.nodes.get(id) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            current = node.superview;
        }
        true
    }

    fn descend_focus(&self, view: ViewId) -> ViewId {
        let mut current = view;
        loop {
            let node = &self.nodes[current];
            let remembered = node
                .focused
                .filter(|&child| node.subviews.contains(&child) && self.is_focus_candidate(child));
            let next = remembered.or_else(|| {
                node.subviews
                    .iter()
                    .copied()
                    .find(|&child| self.is_focus_candidate(child))
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Put `leaf` and its ancestors on the focus chain, taking the focus
    /// away from whatever chain held it.
    fn focus_path(&mut self, leaf: ViewId) {
        let mut path = vec![leaf];
        let mut current = leaf;
        while let Some(parent) = self.superview(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();

        for pair in path.windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            let previous = self.nodes[parent].focused;
            if previous != Some(child) {
                if let Some(old) = previous {
                    self.blur(old);
                }
                self.nodes[parent].focused = Some(child);
            }
        }

        for &id in &path[1..] {
            let node = &mut self.nodes[id];
            if !node.has_focus {
                node.has_focus = true;
                self.focus_notes.push((id, true));
                self.set_needs_display(id);
            }
        }
    }

    /// Take the focus away from `view` and the chain below it.
    fn blur(&mut self, view: ViewId) {
        let mut current = Some(view);
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(id) else {
                break;
            };
            if !node.has_focus {
                break;
            }
            node.has_focus = false;
            current = node.focused;
            self.focus_notes.push((id, false));
            self.set_needs_display(id);
        }
    }

    /// Drop the current focus chain and focus the first focusable leaf.
    pub(super) fn reassign_focus(&mut self) {
        let root = self.root;
        if let Some(first) = self.nodes[root].focused.take() {
            self.blur(first);
        }
        if let Some(&leaf) = self.focusable_leaves(root).first() {
            self.focus_path(leaf);
            tracing::debug!(?leaf, "focus reassigned");
        }
    }

    /// Hand queued focus notifications to their widgets.
    ///
    /// A notification for a widget busy in a hook waits until the hook
    /// returns.
    pub(super) fn deliver_focus_notes(&mut self) {
        if self.focus_notes.is_empty() {
            return;
        }
        let notes = std::mem::take(&mut self.focus_notes);
        for (id, focused) in notes {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if let Some(widget) = node.widget.as_mut() {
                widget.focus_changed(focused);
                if widget.take_needs_display() {
                    self.set_needs_display(id);
                }
            } else if self.in_hook.contains(&id) {
                self.focus_notes.push((id, focused));
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route a key or mouse event. Returns whether anything handled it.
    ///
    /// [`InputEvent::Resize`] is left to the host, which must resize both
    /// the driver and the tree; [`ViewTree::present`] otherwise sizes the
    /// tree back to the driver.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.process_key(*key),
            InputEvent::Mouse(mouse) => self.process_mouse(*mouse),
            _ => false,
        }
    }

    /// Route a key through the cold, normal and hot passes.
    ///
    /// Unhandled Tab and `BackTab` cycle the focus when
    /// [`super::TreeConfig::tab_moves_focus`] is set.
    pub fn process_key(&mut self, key: KeyEvent) -> bool {
        let handled = self.dispatch_key(key);
        tracing::trace!(?key, handled, "key dispatched");
        handled
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        for id in self.preorder(self.root, true) {
            if self.is_attached(id)
                && self.with_widget(id, |widget, cx| widget.process_cold_key(&key, cx)) == Some(true)
            {
                return true;
            }
        }

        let mut current = self.focused_leaf();
        while let Some(id) = current {
            if self.with_widget(id, |widget, cx| widget.process_key(&key, cx)) == Some(true) {
                return true;
            }
            current = self.superview(id);
        }

        for id in self.preorder(self.root, true) {
            if self.is_attached(id)
                && self.with_widget(id, |widget, cx| widget.process_hot_key(&key, cx)) == Some(true)
            {
                return true;
            }
        }

        if self.config.tab_moves_focus {
            match key.code {
                KeyCode::Tab => return self.focus_next(self.root),
                KeyCode::BackTab => return self.focus_prev(self.root),
                _ => {}
            }
        }
        false
    }

    /// The topmost visible view under a screen position.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ViewId> {
        self.hit(x, y).map(|(view, _, _)| view)
    }

    /// Hit-test and the position local to the view that was hit.
    fn hit(&self, x: i32, y: i32) -> Option<(ViewId, i32, i32)> {
        let root = &self.nodes[self.root];
        if !root.visible || !root.frame.contains(x, y) {
            return None;
        }
        let (mut x, mut y) = (x - root.frame.x, y - root.frame.y);
        let mut current = self.root;
        while let Some(child) = self.nodes[current]
            .subviews
            .iter()
            .rev()
            .copied()
            .find(|&child| {
                let node = &self.nodes[child];
                node.visible && node.frame.contains(x, y)
            })
        {
            let frame = self.nodes[child].frame;
            x -= frame.x;
            y -= frame.y;
            current = child;
        }
        Some((current, x, y))
    }

    /// Deliver a mouse event to the topmost view under it.
    ///
    /// A button press or click on a focusable view that lacks the focus
    /// focuses it first, so the same click both focuses and activates.
    /// The event reaches the widget in its local coordinates.
    pub fn process_mouse(&mut self, event: MouseEvent) -> bool {
        let Some((view, x, y)) = self.hit(event.x, event.y) else {
            return false;
        };
        if event.flags.intersects(FOCUSING_BUTTONS) && self.can_focus(view) && !self.has_focus(view) {
            self.set_focus(self.root, view);
        }
        let local = MouseEvent { x, y, ..event };
        self.with_widget(view, |widget, cx| widget.mouse_event(&local, cx))
            .unwrap_or(false)
    }
}
