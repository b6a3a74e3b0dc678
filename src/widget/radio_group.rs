//! RadioGroup Widget: pick one of several labels.

use super::hotkey::HotLabel;
use super::traits::Widget;
use crate::actor::{KeyCode, KeyEvent, MouseEvent};
use crate::layout::Rect;
use crate::painter::Painter;
use crate::view::{EventContext, ViewState};

/// Called with `(previous, selected)` after the selection changes.
pub type SelectionCallback = Box<dyn FnMut(usize, usize)>;

/// A vertical list of `(*) Label` rows with one selected.
///
/// Up and Down move a cursor; Space or Enter selects the row under it.
/// Each row's mnemonic selects it from anywhere, Alt plus the mnemonic
/// also takes the focus.
pub struct RadioGroup {
    /// One label per row.
    items: Vec<HotLabel>,
    /// Selected row.
    selected: usize,
    /// Cursor row while focused.
    cursor: usize,
    /// Needs redraw flag.
    dirty: bool,
    /// Selection callback.
    on_selection_changed: Option<SelectionCallback>,
}

impl RadioGroup {
    /// Create a group with the first row selected.
    pub fn new<S: AsRef<str>>(items: &[S]) -> Self {
        Self {
            items: items.iter().map(|item| HotLabel::new(item.as_ref())).collect(),
            selected: 0,
            cursor: 0,
            dirty: false,
            on_selection_changed: None,
        }
    }

    /// Set the selection callback (builder pattern).
    #[must_use]
    pub fn on_selection_changed(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_selection_changed = Some(Box::new(callback));
        self
    }

    /// Row labels.
    pub fn items(&self) -> &[HotLabel] {
        &self.items
    }

    /// Selected row.
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Cursor row.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Select row `index` and move the cursor there.
    ///
    /// Returns false, without running the callback, when `index` is out of
    /// range or already selected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || index == self.selected {
            return false;
        }
        let previous = self.selected;
        self.selected = index;
        self.cursor = index;
        self.dirty = true;
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(previous, index);
        }
        true
    }

    fn move_cursor(&mut self, down: bool) -> bool {
        let next = if down {
            (self.cursor + 1).min(self.items.len().saturating_sub(1))
        } else {
            self.cursor.saturating_sub(1)
        };
        if next != self.cursor {
            self.cursor = next;
            self.dirty = true;
        }
        true
    }

    fn mnemonic_row(&self, c: char) -> Option<usize> {
        self.items.iter().position(|item| item.matches(c))
    }
}

impl Widget for RadioGroup {
    fn draw(&mut self, view: &ViewState, _region: Rect, painter: &mut Painter<'_>) {
        for (row, item) in (0..).zip(&self.items) {
            let current = usize::try_from(row).is_ok_and(|r| r == self.cursor) && view.has_focus;
            let (normal, hot) = if current {
                (view.scheme.focus, view.scheme.hot_focus)
            } else {
                (view.scheme.normal, view.scheme.hot_normal)
            };
            let selected = usize::try_from(row).is_ok_and(|r| r == self.selected);
            painter.goto(0, row);
            painter.set_attr(normal);
            painter.add(if selected { "(*) " } else { "( ) " });
            painter.draw_hot_label(item, normal, hot);
        }
    }

    fn process_cold_key(&mut self, key: &KeyEvent, _cx: &mut EventContext<'_>) -> bool {
        match key.plain_char().and_then(|c| self.mnemonic_row(c)) {
            Some(row) => {
                self.select(row);
                true
            }
            None => false,
        }
    }

    fn process_key(&mut self, key: &KeyEvent, _cx: &mut EventContext<'_>) -> bool {
        if !key.modifiers.is_empty() {
            return false;
        }
        match key.code {
            KeyCode::Up => self.move_cursor(false),
            KeyCode::Down => self.move_cursor(true),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.select(self.cursor);
                true
            }
            _ => false,
        }
    }

    fn process_hot_key(&mut self, key: &KeyEvent, cx: &mut EventContext<'_>) -> bool {
        match key.alt_char().and_then(|c| self.mnemonic_row(c)) {
            Some(row) => {
                cx.focus();
                self.select(row);
                true
            }
            None => false,
        }
    }

    fn mouse_event(&mut self, event: &MouseEvent, _cx: &mut EventContext<'_>) -> bool {
        if !event.is_click() {
            return false;
        }
        match usize::try_from(event.y) {
            Ok(row) if row < self.items.len() => {
                self.select(row);
                true
            }
            _ => false,
        }
    }

    fn position_cursor(&self, _view: &ViewState) -> Option<(i32, i32)> {
        Some((1, i32::try_from(self.cursor).ok()?))
    }

    fn focus_changed(&mut self, _focused: bool) {
        self.dirty = true;
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl std::fmt::Debug for RadioGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioGroup")
            .field("items", &self.items.len())
            .field("selected", &self.selected)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::MouseFlags;
    use crate::buffer::{Buffer, Cell};
    use crate::view::{ViewId, ViewTree};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Changes = Rc<RefCell<Vec<(usize, usize)>>>;

    fn group(items: &[&str]) -> (RadioGroup, Changes) {
        let changes = Changes::default();
        let seen = changes.clone();
        let group = RadioGroup::new(items)
            .on_selection_changed(move |prev, next| seen.borrow_mut().push((prev, next)));
        (group, changes)
    }

    fn mount(group: RadioGroup) -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new(20, 5);
        let root = tree.root();
        let view = tree.create(group);
        tree.set_x(view, 2);
        tree.set_y(view, 1);
        tree.set_width(view, 12);
        tree.set_height(view, 3);
        tree.add_subview(root, view);
        tree.layout().unwrap();
        (tree, view)
    }

    fn selected(tree: &ViewTree, view: ViewId) -> usize {
        tree.widget::<RadioGroup>(view).unwrap().selected()
    }

    #[test]
    fn test_select_reports_once() {
        let (mut group, changes) = group(&["_One", "_Two", "T_hree"]);

        assert!(group.select(2));
        assert!(!group.select(2));
        assert!(!group.select(3));
        assert!(group.select(0));

        assert_eq!(*changes.borrow(), vec![(0, 2), (2, 0)]);
        assert_eq!(group.cursor(), 0);
    }

    #[test]
    fn test_out_of_range_leaves_it_clean() {
        let (mut group, _) = group(&["_One"]);
        assert!(!group.select(7));
        assert!(!group.take_needs_display());
    }

    #[test]
    fn test_cursor_then_space() {
        let (group, changes) = group(&["_One", "_Two", "T_hree"]);
        let (mut tree, view) = mount(group);
        tree.focus(view);

        tree.process_key(KeyEvent::plain(KeyCode::Down));
        tree.process_key(KeyEvent::plain(KeyCode::Down));
        tree.process_key(KeyEvent::plain(KeyCode::Down));
        assert_eq!(tree.widget::<RadioGroup>(view).unwrap().cursor(), 2);
        assert_eq!(selected(&tree, view), 0);

        assert!(tree.process_key(KeyEvent::char(' ')));
        assert_eq!(selected(&tree, view), 2);
        assert_eq!(*changes.borrow(), vec![(0, 2)]);
    }

    #[test]
    fn test_mnemonics_select_rows() {
        let (group, changes) = group(&["_One", "_Two", "T_hree"]);
        let (mut tree, view) = mount(group);

        assert!(tree.process_key(KeyEvent::char('h')));
        assert_eq!(selected(&tree, view), 2);
        assert!(!tree.has_focus(view));

        assert!(tree.process_key(KeyEvent::alt('t')));
        assert_eq!(selected(&tree, view), 1);
        assert!(tree.has_focus(view));

        assert_eq!(*changes.borrow(), vec![(0, 2), (2, 1)]);
    }

    #[test]
    fn test_click_selects_row() {
        let (group, changes) = group(&["_One", "_Two", "T_hree"]);
        let (mut tree, view) = mount(group);

        assert!(tree.process_mouse(MouseEvent::new(4, 2, MouseFlags::BUTTON1_CLICKED)));
        assert_eq!(selected(&tree, view), 1);
        assert!(tree.has_focus(view));
        assert_eq!(*changes.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn test_draw_marks_selection_and_cursor() {
        let (group, _) = group(&["_One", "_Two"]);
        let (mut tree, view) = mount(group);
        tree.focus(view);
        tree.process_key(KeyEvent::plain(KeyCode::Down));

        let mut screen = Buffer::new(20, 5);
        tree.redraw(&mut screen);

        assert_eq!(screen.row_text(1).trim_end(), "  (*) One");
        assert_eq!(screen.row_text(2).trim_end(), "  ( ) Two");
        let scheme = tree.color_scheme(view);
        assert_eq!(screen.get(2, 1).map(Cell::attr), Some(scheme.normal));
        assert_eq!(screen.get(2, 2).map(Cell::attr), Some(scheme.focus));
        assert_eq!(screen.get(6, 2).map(Cell::attr), Some(scheme.hot_focus));
    }
}
