//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the Current and Next buffers cell by cell
//! 2. Skip cursor moves when the next changed cell is adjacent
//! 3. Emit SGR sequences only when the attribute actually changes
//!
//! All output is accumulated in a single byte buffer so the driver can
//! flush it with one write.

use super::{Attr, Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// Terminal state tracked across diff calls.
#[derive(Debug, Clone)]
pub struct DiffState {
    /// Last known cursor position, `None` when unknown.
    cursor: Option<(u16, u16)>,
    /// Last emitted attribute, `None` when unknown.
    attr: Option<Attr>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            attr: None,
        }
    }

    /// Forget everything (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.cursor = None;
        self.attr = None;
    }

    /// Forget the cursor position after something else moved it.
    pub const fn invalidate_cursor(&mut self) {
        self.cursor = None;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of attribute change sequences emitted.
    pub attr_changes: usize,
}

/// Render the difference between two same-sized buffers.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    for y in 0..next.height() {
        for x in 0..next.width() {
            let (Some(old), Some(new)) = (current.get(x, y), next.get(x, y)) else {
                continue;
            };
            if old == new || new.is_continuation() {
                continue;
            }
            emit_cell(output, state, &mut result, x, y, new);
        }
    }
    result
}

/// Generate a full redraw sequence (no diffing).
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) -> DiffResult {
    output.extend_from_slice(b"\x1b[0m\x1b[2J");
    state.reset();

    let mut result = DiffResult::default();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if let Some(cell) = buffer.get(x, y)
                && !cell.is_continuation()
            {
                emit_cell(output, state, &mut result, x, y, cell);
            }
        }
    }
    result
}

fn emit_cell(
    output: &mut Vec<u8>,
    state: &mut DiffState,
    result: &mut DiffResult,
    x: u16,
    y: u16,
    cell: &Cell,
) {
    result.cells_changed += 1;

    if state.cursor != Some((x, y)) {
        emit_cursor_move(output, x, y);
        result.cursor_moves += 1;
    }

    let attr = cell.attr();
    if state.attr != Some(attr) {
        emit_attr(output, attr);
        state.attr = Some(attr);
        result.attr_changes += 1;
    }

    output.extend_from_slice(cell.symbol().unwrap_or(" ").as_bytes());
    state.cursor = Some((x.saturating_add(u16::from(cell.width().max(1))), y));
}

/// Emit a cursor move (ANSI positions are 1-indexed).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;
    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a complete SGR sequence for an attribute.
///
/// Always starts from a reset so removed modifiers do not linger.
fn emit_attr(output: &mut Vec<u8>, attr: Attr) {
    output.extend_from_slice(b"\x1b[0");
    for (flag, code) in [
        (Modifiers::BOLD, "1"),
        (Modifiers::DIM, "2"),
        (Modifiers::ITALIC, "3"),
        (Modifiers::UNDERLINE, "4"),
        (Modifiers::BLINK, "5"),
        (Modifiers::REVERSED, "7"),
        (Modifiers::HIDDEN, "8"),
        (Modifiers::STRIKETHROUGH, "9"),
    ] {
        if attr.modifiers.contains(flag) {
            output.push(b';');
            output.extend_from_slice(code.as_bytes());
        }
    }
    emit_color(output, 38, attr.fg);
    emit_color(output, 48, attr.bg);
    output.push(b'm');
}

#[inline]
fn emit_color(output: &mut Vec<u8>, selector: u8, color: Rgb) {
    let _ = write!(output, ";{selector};2;{};{};{}", color.r, color.g, color.b);
}
