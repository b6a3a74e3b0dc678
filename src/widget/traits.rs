//! The widget contract.

use crate::actor::{KeyEvent, MouseEvent};
use crate::layout::Rect;
use crate::painter::Painter;
use crate::view::{EventContext, ViewState};
use std::any::Any;

/// Drawing and input behavior of one view.
///
/// Every hook is optional: the defaults draw nothing and handle nothing, so
/// a widget only overrides what it needs. Event hooks return `true` when
/// they consumed the event.
///
/// The tree calls hooks on the UI thread only. Event hooks get an
/// [`EventContext`] and may change the tree through it; [`Widget::draw`]
/// gets a [`Painter`] and nothing else.
pub trait Widget: Any {
    /// Paint `region` (local coordinates) of the view.
    ///
    /// The painter is already clipped to `region`, cleared, and set to the
    /// view's normal or focus attribute.
    fn draw(&mut self, view: &ViewState, region: Rect, painter: &mut Painter<'_>) {
        let _ = (view, region, painter);
    }

    /// Mnemonic pass offered to every view before the focused one.
    fn process_cold_key(&mut self, _key: &KeyEvent, _cx: &mut EventContext<'_>) -> bool {
        false
    }

    /// Key pass through the focused view and its ancestors.
    fn process_key(&mut self, _key: &KeyEvent, _cx: &mut EventContext<'_>) -> bool {
        false
    }

    /// Last-resort pass offered to every view, for modifier shortcuts.
    fn process_hot_key(&mut self, _key: &KeyEvent, _cx: &mut EventContext<'_>) -> bool {
        false
    }

    /// A mouse event over this view, in local coordinates.
    fn mouse_event(&mut self, _event: &MouseEvent, _cx: &mut EventContext<'_>) -> bool {
        false
    }

    /// Where the caret goes while this view is the focused leaf.
    fn position_cursor(&self, _view: &ViewState) -> Option<(i32, i32)> {
        None
    }

    /// The view joined or left the focus chain.
    fn focus_changed(&mut self, _focused: bool) {}

    /// Whether the view accepts focus. Read once, when the view is created.
    fn can_focus(&self) -> bool {
        false
    }

    /// Report and clear a self-set "needs redraw" flag.
    ///
    /// Polled after every hook and before every redraw pass, so widgets
    /// changed by the host through [`crate::ViewTree::widget_mut`] repaint
    /// without an explicit invalidation.
    fn take_needs_display(&mut self) -> bool {
        false
    }
}
