//! Checkbox Widget: a toggle with a mnemonic label.
//!
//! Toggles on Space or Enter while focused, on its mnemonic letter from
//! anywhere (Alt plus the letter also takes the focus), and on every click.

use super::hotkey::HotLabel;
use super::traits::Widget;
use crate::actor::{KeyCode, KeyEvent, MouseEvent};
use crate::layout::Rect;
use crate::painter::Painter;
use crate::view::{EventContext, ViewState};

/// Called after each toggle with the new state.
pub type ToggledCallback = Box<dyn FnMut(&mut EventContext<'_>, bool)>;

/// A `[x] Label` toggle.
pub struct Checkbox {
    /// Label after the box.
    label: HotLabel,
    /// Current state.
    checked: bool,
    /// Needs redraw flag.
    dirty: bool,
    /// Toggle callback.
    on_toggled: Option<ToggledCallback>,
}

impl Checkbox {
    /// Create an unchecked checkbox. A `_` in `label` marks the mnemonic.
    pub fn new(label: &str) -> Self {
        Self {
            label: HotLabel::new(label),
            checked: false,
            dirty: false,
            on_toggled: None,
        }
    }

    /// Set the toggle callback (builder pattern).
    #[must_use]
    pub fn on_toggled(mut self, callback: impl FnMut(&mut EventContext<'_>, bool) + 'static) -> Self {
        self.on_toggled = Some(Box::new(callback));
        self
    }

    /// Whether the box is checked.
    pub const fn checked(&self) -> bool {
        self.checked
    }

    /// Set the state without running the callback.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.dirty = true;
        }
    }

    /// The label.
    pub const fn label(&self) -> &HotLabel {
        &self.label
    }

    /// Flip the state and run the callback.
    pub fn toggle(&mut self, cx: &mut EventContext<'_>) {
        self.checked = !self.checked;
        self.dirty = true;
        if let Some(callback) = self.on_toggled.as_mut() {
            callback(cx, self.checked);
        }
    }
}

impl Widget for Checkbox {
    fn draw(&mut self, view: &ViewState, _region: Rect, painter: &mut Painter<'_>) {
        painter.goto(0, 0);
        painter.add(if self.checked { "[x] " } else { "[ ] " });
        painter.draw_hot_label(&self.label, view.attr(), view.hot_attr());
    }

    fn process_cold_key(&mut self, key: &KeyEvent, cx: &mut EventContext<'_>) -> bool {
        if key.plain_char().is_some_and(|c| self.label.matches(c)) {
            self.toggle(cx);
            return true;
        }
        false
    }

    fn process_key(&mut self, key: &KeyEvent, cx: &mut EventContext<'_>) -> bool {
        if key.modifiers.is_empty() && matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
            self.toggle(cx);
            return true;
        }
        false
    }

    fn process_hot_key(&mut self, key: &KeyEvent, cx: &mut EventContext<'_>) -> bool {
        if key.alt_char().is_some_and(|c| self.label.matches(c)) {
            cx.focus();
            self.toggle(cx);
            return true;
        }
        false
    }

    fn mouse_event(&mut self, event: &MouseEvent, cx: &mut EventContext<'_>) -> bool {
        if event.is_click() {
            self.toggle(cx);
            return true;
        }
        false
    }

    fn position_cursor(&self, _view: &ViewState) -> Option<(i32, i32)> {
        Some((1, 0))
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl std::fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkbox")
            .field("label", &self.label.text())
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyModifiers, MouseFlags};
    use crate::buffer::{Buffer, Cell};
    use crate::view::{ViewId, ViewTree};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup(label: &str) -> (ViewTree, ViewId, ViewId, Rc<RefCell<Vec<bool>>>) {
        let mut tree = ViewTree::new(20, 3);
        let root = tree.root();
        let toggles = Rc::new(RefCell::new(Vec::new()));
        let seen = toggles.clone();
        let checkbox = tree.create(
            Checkbox::new(label).on_toggled(move |_, checked| seen.borrow_mut().push(checked)),
        );
        tree.set_width(checkbox, 12);
        tree.set_height(checkbox, 1);
        let other = tree.create(Checkbox::new("Other"));
        tree.set_y(other, 1);
        tree.set_width(other, 12);
        tree.set_height(other, 1);
        tree.add_subview(root, checkbox);
        tree.add_subview(root, other);
        tree.layout().unwrap();
        (tree, checkbox, other, toggles)
    }

    fn checked(tree: &ViewTree, view: ViewId) -> bool {
        tree.widget::<Checkbox>(view).unwrap().checked()
    }

    #[test]
    fn test_draws_box_and_hot_letter() {
        let (mut tree, checkbox, _, _) = setup("_Toggle");
        let mut screen = Buffer::new(20, 3);
        tree.redraw(&mut screen);

        assert_eq!(screen.row_text(0).trim_end(), "[ ] Toggle");
        let scheme = tree.color_scheme(checkbox);
        assert_eq!(screen.get(4, 0).map(Cell::attr), Some(scheme.hot_normal));
        assert_eq!(screen.get(5, 0).map(Cell::attr), Some(scheme.normal));
    }

    #[test]
    fn test_mnemonic_in_cold_pass_while_unfocused() {
        let (mut tree, checkbox, other, toggles) = setup("_Toggle");
        tree.focus(other);

        assert!(tree.process_key(KeyEvent::char('t')));
        assert!(checked(&tree, checkbox));
        assert!(tree.process_key(KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT)));
        assert!(!checked(&tree, checkbox));

        assert_eq!(*toggles.borrow(), vec![true, false]);
        assert_eq!(tree.focused_leaf(), Some(other));
    }

    #[test]
    fn test_space_toggles_focused_only() {
        let (mut tree, checkbox, other, _) = setup("_Toggle");
        tree.focus(other);

        assert!(tree.process_key(KeyEvent::char(' ')));
        assert!(checked(&tree, other));
        assert!(!checked(&tree, checkbox));
    }

    #[test]
    fn test_alt_mnemonic_focuses_and_toggles() {
        let (mut tree, checkbox, other, toggles) = setup("Toggle");
        tree.focus(other);
        assert!(tree.process_key(KeyEvent::alt('t')));
        assert!(checked(&tree, checkbox));
        assert_eq!(tree.focused_leaf(), Some(checkbox));
        assert_eq!(*toggles.borrow(), vec![true]);
    }

    #[test]
    fn test_every_click_toggles() {
        let (mut tree, checkbox, _, toggles) = setup("_Toggle");
        let click = MouseEvent::new(2, 0, MouseFlags::BUTTON1_CLICKED);

        assert!(tree.process_mouse(click));
        assert_eq!(tree.focused_leaf(), Some(checkbox));
        assert!(tree.process_mouse(click));
        assert!(!tree.process_mouse(MouseEvent::new(2, 0, MouseFlags::BUTTON1_PRESSED)));

        assert_eq!(*toggles.borrow(), vec![true, false]);
    }

    #[test]
    fn test_toggle_repaints() {
        let (mut tree, checkbox, _, _) = setup("_Toggle");
        let mut screen = Buffer::new(20, 3);
        tree.redraw(&mut screen);

        tree.process_key(KeyEvent::char('t'));
        assert!(tree.needs_display(checkbox));
        tree.redraw(&mut screen);
        assert_eq!(screen.row_text(0).trim_end(), "[x] Toggle");
    }

    #[test]
    fn test_callback_may_change_the_tree() {
        let mut tree = ViewTree::new(20, 3);
        let root = tree.root();
        let checkbox = tree.create(Checkbox::new("_Details").on_toggled(|cx, checked| {
            let tree = cx.tree();
            let root = tree.root();
            if let Some(details) = tree.subviews(root).get(1).copied() {
                tree.set_visible(details, checked);
            }
        }));
        let details = tree.create_container();
        tree.add_subview(root, checkbox);
        tree.add_subview(root, details);
        tree.set_visible(details, false);

        tree.process_key(KeyEvent::char('d'));
        assert!(tree.is_visible(details));
    }
}
