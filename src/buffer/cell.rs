//! Cell: The atomic unit of terminal display.
//!
//! A cell holds one grapheme cluster and the [`Attr`] it is drawn with.
//! Wide graphemes (CJK, most emoji) occupy their own cell plus a
//! continuation cell to the right.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Blue, the classic dialog background.
    pub const BLUE: Self = Self::new(0, 0, 170);
    /// Cyan, used for focused controls.
    pub const CYAN: Self = Self::new(0, 170, 170);
    /// Yellow, used for mnemonics.
    pub const YELLOW: Self = Self::new(255, 255, 85);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use trellis::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A drawing attribute: colors plus style modifiers.
///
/// The view core treats attributes as opaque values handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attr {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Style modifiers.
    pub modifiers: Modifiers,
}

impl Attr {
    /// White on black, no modifiers.
    pub const DEFAULT: Self = Self::new(Rgb::WHITE, Rgb::BLACK);

    /// Create an attribute without modifiers.
    #[inline]
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single terminal cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Cell {
    /// The grapheme cluster shown in this cell (empty for continuations).
    symbol: String,
    /// Display width of the grapheme (0=continuation, 1=normal, 2=wide).
    width: u8,
    /// Colors and modifiers.
    attr: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Attr::DEFAULT)
    }
}

impl Cell {
    /// A space drawn with `attr`.
    pub fn blank(attr: Attr) -> Self {
        Self {
            symbol: String::from(" "),
            width: 1,
            attr,
        }
    }

    /// Create a cell from a grapheme cluster.
    ///
    /// Zero-width input (controls, lone combining marks) is shown as one
    /// column so the cursor always advances.
    pub fn new(grapheme: &str, attr: Attr) -> Self {
        let width = unicode_width::UnicodeWidthStr::width(grapheme).clamp(1, 2);
        Self {
            symbol: grapheme.to_string(),
            width: u8::try_from(width).unwrap_or(1),
            attr,
        }
    }

    /// Create a wide-character continuation cell.
    pub const fn continuation(attr: Attr) -> Self {
        Self {
            symbol: String::new(),
            width: 0,
            attr,
        }
    }

    /// The grapheme, or `None` for a continuation cell.
    #[inline]
    pub fn symbol(&self) -> Option<&str> {
        if self.is_continuation() {
            None
        } else {
            Some(&self.symbol)
        }
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Get the drawing attribute.
    #[inline]
    pub const fn attr(&self) -> Attr {
        self.attr
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            write!(f, "Cell(<cont> {:?}/{:?})", self.attr.fg, self.attr.bg)
        } else {
            write!(f, "Cell({:?} {:?}/{:?})", self.symbol, self.attr.fg, self.attr.bg)
        }
    }
}
