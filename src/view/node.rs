//! View nodes and the values handed to widget hooks.

use super::ViewId;
use crate::buffer::{Attr, Rgb};
use crate::layout::{Geometry, Rect};
use crate::widget::Widget;

/// Named attribute sets a view draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Text of an unfocused view.
    pub normal: Attr,
    /// Text of a focused view.
    pub focus: Attr,
    /// Mnemonic letter of an unfocused view.
    pub hot_normal: Attr,
    /// Mnemonic letter of a focused view.
    pub hot_focus: Attr,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            normal: Attr::new(Rgb::WHITE, Rgb::BLUE),
            focus: Attr::new(Rgb::BLACK, Rgb::CYAN),
            hot_normal: Attr::new(Rgb::YELLOW, Rgb::BLUE),
            hot_focus: Attr::new(Rgb::BLUE, Rgb::CYAN),
        }
    }
}

/// Snapshot of a view's state, passed to widget hooks that draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// The view being drawn.
    pub id: ViewId,
    /// Local bounds, `(0, 0, width, height)`.
    pub bounds: Rect,
    /// Whether the view is on the focus chain.
    pub has_focus: bool,
    /// Effective color scheme, inherited if the view sets none.
    pub scheme: ColorScheme,
}

impl ViewState {
    /// `focus` when focused, otherwise `normal`.
    pub const fn attr(&self) -> Attr {
        if self.has_focus {
            self.scheme.focus
        } else {
            self.scheme.normal
        }
    }

    /// `hot_focus` when focused, otherwise `hot_normal`.
    pub const fn hot_attr(&self) -> Attr {
        if self.has_focus {
            self.scheme.hot_focus
        } else {
            self.scheme.hot_normal
        }
    }
}

/// One node of the view arena.
pub(crate) struct ViewNode {
    /// Client behavior. Taken out while one of its hooks runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Non-owning link to the parent.
    pub(crate) superview: Option<ViewId>,
    /// Children in paint order; last is topmost.
    pub(crate) subviews: Vec<ViewId>,
    pub(crate) geometry: Geometry,
    /// Resolved frame in the parent's coordinates.
    pub(crate) frame: Rect,
    pub(crate) can_focus: bool,
    pub(crate) has_focus: bool,
    /// The child on the focus chain, remembered while unfocused.
    pub(crate) focused: Option<ViewId>,
    pub(crate) visible: bool,
    pub(crate) color_scheme: Option<ColorScheme>,
    /// Pending repaint area in local coordinates, inside the bounds.
    pub(crate) needs_display: Rect,
    pub(crate) child_needs_display: bool,
    pub(crate) needs_layout: bool,
}

impl ViewNode {
    pub(crate) fn new(widget: Option<Box<dyn Widget>>) -> Self {
        let can_focus = widget.as_ref().is_some_and(|w| w.can_focus());
        Self {
            widget,
            superview: None,
            subviews: Vec::new(),
            geometry: Geometry::default(),
            frame: Rect::ZERO,
            can_focus,
            has_focus: false,
            focused: None,
            visible: true,
            color_scheme: None,
            needs_display: Rect::ZERO,
            child_needs_display: false,
            needs_layout: true,
        }
    }

    #[inline]
    pub(crate) const fn bounds(&self) -> Rect {
        self.frame.bounds()
    }
}
