//! Label Widget: static text.

use super::traits::Widget;
use crate::layout::Rect;
use crate::painter::Painter;
use crate::view::ViewState;

/// Text drawn with the view's attribute, one line per `\n`.
#[derive(Debug, Clone)]
pub struct Label {
    /// Text content.
    text: String,
    /// Needs redraw flag.
    dirty: bool,
}

impl Label {
    /// Create a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dirty: false,
        }
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn draw(&mut self, _view: &ViewState, _region: Rect, painter: &mut Painter<'_>) {
        for (row, line) in (0..).zip(self.text.lines()) {
            painter.goto(0, row);
            painter.add(line);
        }
    }

    fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
