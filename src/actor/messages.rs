//! Input event types.
//!
//! These are produced by the input actor (or by tests) and consumed by
//! [`crate::ViewTree::process_key`] and [`crate::ViewTree::process_mouse`].

use bitflags::bitflags;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0001;
        /// Control key held.
        const CONTROL = 0b0010;
        /// Alt/Option key held.
        const ALT = 0b0100;
        /// Super/Command/Windows key held.
        const SUPER = 0b1000;
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the press.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A key press with modifiers.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// A character key without modifiers.
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Alt plus a character.
    pub const fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    /// The character, if this is a character key with no Control, Alt or
    /// Super modifier. Shift is allowed since it only changes case.
    pub fn plain_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// The character, if this is Alt plus a character.
    pub fn alt_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::ALT) => Some(c),
            _ => None,
        }
    }
}

bitflags! {
    /// Mouse button state and event kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseFlags: u16 {
        /// Left button went down.
        const BUTTON1_PRESSED = 1 << 0;
        /// Left button went up.
        const BUTTON1_RELEASED = 1 << 1;
        /// Left button click.
        const BUTTON1_CLICKED = 1 << 2;
        /// Middle button went down.
        const BUTTON2_PRESSED = 1 << 3;
        /// Middle button went up.
        const BUTTON2_RELEASED = 1 << 4;
        /// Middle button click.
        const BUTTON2_CLICKED = 1 << 5;
        /// Right button went down.
        const BUTTON3_PRESSED = 1 << 6;
        /// Right button went up.
        const BUTTON3_RELEASED = 1 << 7;
        /// Right button click.
        const BUTTON3_CLICKED = 1 << 8;
        /// Wheel scrolled up.
        const WHEELED_UP = 1 << 9;
        /// Wheel scrolled down.
        const WHEELED_DOWN = 1 << 10;
        /// Pointer moved.
        const REPORT_POSITION = 1 << 11;
    }
}

/// A mouse event.
///
/// Coordinates are screen-absolute when produced by a driver; the view
/// tree rewrites them to the receiving view's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Buttons and event kind.
    pub flags: MouseFlags,
    /// Key modifiers held during the event.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// A mouse event without modifiers.
    pub const fn new(x: i32, y: i32, flags: MouseFlags) -> Self {
        Self {
            x,
            y,
            flags,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Whether this event is a left click.
    pub const fn is_click(&self) -> bool {
        self.flags.contains(MouseFlags::BUTTON1_CLICKED)
    }
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyEvent),

    /// Mouse activity.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Terminal focus gained.
    FocusGained,

    /// Terminal focus lost.
    FocusLost,

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}
