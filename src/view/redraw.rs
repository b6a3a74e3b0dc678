//! Redraw engine: repaints dirty regions through clipped painters.
//!
//! The walk starts at the root and only descends into children that are
//! dirty themselves or hold a dirty descendant, and whose frame overlaps
//! the visible region. A child that fails either test costs nothing: no
//! painter, no hook call.

use super::tree::ViewTree;
use super::ViewId;
use crate::layout::Rect;
use crate::painter::Painter;
use crate::terminal::Driver;
use std::io;

/// What one redraw pass touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawReport {
    /// Views the walk entered, in visiting order.
    pub visited: Vec<ViewId>,
    /// Views whose dirty region was cleared and drawn.
    pub drawn: Vec<ViewId>,
}

impl RedrawReport {
    /// Whether the pass drew anything.
    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}

impl ViewTree {
    /// Repaint everything that is dirty onto `driver`, then place the caret.
    ///
    /// Does not flush the driver; see [`ViewTree::present`].
    pub fn redraw(&mut self, driver: &mut dyn Driver) -> RedrawReport {
        self.poll_widgets();

        let mut report = RedrawReport::default();
        let root = self.root;
        {
            let mut screen = Painter::new(driver);
            let frame = self.nodes[root].frame;
            let mut painter = screen.child(frame);
            self.redraw_view(root, frame.bounds(), &mut painter, &mut report);
        }

        let cursor = self.caret_position(driver.size());
        driver.set_cursor(cursor);

        tracing::trace!(
            visited = report.visited.len(),
            drawn = report.drawn.len(),
            "redraw pass"
        );
        report
    }

    /// Run a pending layout pass, redraw and flush `driver`.
    ///
    /// A layout failure is logged and the previous frames are drawn.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the driver.
    pub fn present(&mut self, driver: &mut dyn Driver) -> io::Result<RedrawReport> {
        let (width, height) = driver.size();
        if self.screen != Rect::from_size(i32::from(width), i32::from(height)) {
            self.resize(width, height);
        }
        if let Err(error) = self.layout_if_needed() {
            tracing::debug!(%error, "presenting stale layout");
        }
        let report = self.redraw(driver);
        driver.flush()?;
        Ok(report)
    }

    /// Paint `view` and recurse. `region` and `painter` are both local to
    /// `view`.
    fn redraw_view(
        &mut self,
        view: ViewId,
        region: Rect,
        painter: &mut Painter<'_>,
        report: &mut RedrawReport,
    ) {
        report.visited.push(view);

        let dirty = self.nodes[view].needs_display.intersection(&region);
        if !dirty.is_empty() {
            let state = self.view_state(view);
            let mut clipped = painter.clipped(dirty);
            clipped.set_attr(state.attr());
            clipped.clear(Some(dirty), ' ');
            if let Some(widget) = self.nodes[view].widget.as_mut() {
                widget.draw(&state, dirty, &mut clipped);
            }
            report.drawn.push(view);
        }
        self.nodes[view].needs_display = Rect::ZERO;

        let children = self.nodes[view].subviews.clone();
        for child in children {
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            let frame = node.frame;
            let wants_paint = !node.needs_display.is_empty() || node.child_needs_display;
            if !wants_paint {
                continue;
            }
            let visible = region.intersection(&frame);
            if !node.visible || visible.is_empty() {
                self.clear_needs_display(child);
                continue;
            }
            let mut child_painter = painter.child(frame);
            let child_region =
                visible.offset(frame.x.saturating_neg(), frame.y.saturating_neg());
            self.redraw_view(child, child_region, &mut child_painter, report);
        }

        self.nodes[view].child_needs_display = false;
    }

    /// Screen position of the focused leaf's caret, if it is on screen.
    fn caret_position(&self, (width, height): (u16, u16)) -> Option<(u16, u16)> {
        let leaf = self.focused_leaf()?;
        let state = self.view_state(leaf);
        let (col, row) = self.nodes[leaf]
            .widget
            .as_ref()?
            .position_cursor(&state)?;
        if !state.bounds.contains(col, row) {
            return None;
        }
        let (x, y) = self.screen_origin(leaf);
        let (x, y) = (x.saturating_add(col), y.saturating_add(row));
        if !Rect::from_size(i32::from(width), i32::from(height)).contains(x, y) {
            return None;
        }
        Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
    }
}
