//! Mnemonic labels.
//!
//! A marker character in front of a letter picks that letter as the
//! label's mnemonic and is not shown: `"_Toggle"` reads `Toggle` with `T`
//! as its hot key. Without a marker the first uppercase letter is used.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Default marker character.
pub const HOT_MARKER: char = '_';

/// A label with an optional mnemonic letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotLabel {
    /// Visible text, marker removed.
    text: String,
    /// Grapheme index of the mnemonic in `text`.
    hot_pos: Option<usize>,
    /// The mnemonic as written.
    hot_key: Option<char>,
}

impl HotLabel {
    /// Parse with the default `_` marker.
    pub fn new(text: &str) -> Self {
        Self::parse(text, HOT_MARKER)
    }

    /// Parse with a custom marker.
    ///
    /// Only the first marker counts. A marker at the very end is shown as
    /// is.
    pub fn parse(text: &str, marker: char) -> Self {
        let mut visible = String::with_capacity(text.len());
        let mut hot: Option<(usize, char)> = None;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c == marker
                && hot.is_none()
                && let Some(&next) = chars.peek()
            {
                hot = Some((visible.len(), next));
                visible.push(next);
                chars.next();
                continue;
            }
            visible.push(c);
        }

        let hot = hot.or_else(|| visible.char_indices().find(|(_, c)| c.is_uppercase()));
        let hot_pos = hot.and_then(|(byte, _)| {
            visible
                .grapheme_indices(true)
                .position(|(start, _)| start == byte)
        });

        Self {
            text: visible,
            hot_pos,
            hot_key: hot.map(|(_, c)| c),
        }
    }

    /// Visible text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grapheme index of the mnemonic.
    #[inline]
    pub const fn hot_pos(&self) -> Option<usize> {
        self.hot_pos
    }

    /// The mnemonic letter.
    #[inline]
    pub const fn hot_key(&self) -> Option<char> {
        self.hot_key
    }

    /// Display width of the visible text.
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Whether `c` triggers this label, ignoring case.
    pub fn matches(&self, c: char) -> bool {
        self.hot_key
            .is_some_and(|hot| hot.to_lowercase().eq(c.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_picks_mnemonic() {
        let label = HotLabel::new("_Toggle");
        assert_eq!(label.text(), "Toggle");
        assert_eq!(label.hot_key(), Some('T'));
        assert_eq!(label.hot_pos(), Some(0));
        assert!(label.matches('t'));
        assert!(label.matches('T'));
        assert!(!label.matches('o'));
    }

    #[test]
    fn test_marker_in_the_middle() {
        let label = HotLabel::new("E_xit");
        assert_eq!(label.text(), "Exit");
        assert_eq!(label.hot_key(), Some('x'));
        assert_eq!(label.hot_pos(), Some(1));
        assert!(label.matches('X'));
    }

    #[test]
    fn test_inferred_from_case() {
        let label = HotLabel::new("save As");
        assert_eq!(label.hot_key(), Some('A'));
        assert_eq!(label.hot_pos(), Some(5));

        let none = HotLabel::new("lowercase only");
        assert_eq!(none.hot_key(), None);
        assert!(!none.matches('l'));
    }

    #[test]
    fn test_only_first_marker_counts() {
        let label = HotLabel::new("_a_b");
        assert_eq!(label.text(), "a_b");
        assert_eq!(label.hot_key(), Some('a'));
    }

    #[test]
    fn test_trailing_marker_is_literal() {
        let label = HotLabel::new("Menu_");
        assert_eq!(label.text(), "Menu_");
        assert_eq!(label.hot_key(), Some('M'));
    }

    #[test]
    fn test_custom_marker_and_wide_text() {
        let label = HotLabel::parse("中&Quit", '&');
        assert_eq!(label.text(), "中Quit");
        assert_eq!(label.hot_pos(), Some(1));
        assert_eq!(label.width(), 6);
    }
}
