//! Virtual-scroll window arithmetic.
//!
//! Only the rows inside the window materialize into the document; spacer
//! rows above and below keep the scrollbar geometry honest. Pure functions,
//! tested without a DOM.

use serde::Serialize;

/// Which slice of the row list gets rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowWindow {
    pub start: usize,
    /// Exclusive
    pub end: usize,
    /// Spacer height above the window, px
    pub pad_top: f64,
    /// Spacer height below the window, px
    pub pad_bottom: f64,
}

impl RowWindow {
    /// Window covering every row (used when no scroll container exists).
    pub fn all(total_rows: usize) -> Self {
        RowWindow { start: 0, end: total_rows, pad_top: 0.0, pad_bottom: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

pub fn compute_window(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    total_rows: usize,
    overscan: usize,
) -> RowWindow {
    if total_rows == 0 || row_height <= 0.0 {
        return RowWindow { start: 0, end: 0, pad_top: 0.0, pad_bottom: 0.0 };
    }

    let first_visible = (scroll_top.max(0.0) / row_height).floor() as usize;
    // +1 covers the partially visible row at the bottom edge
    let visible_rows = (viewport_height.max(0.0) / row_height).ceil() as usize + 1;

    let start = first_visible.saturating_sub(overscan).min(total_rows);
    let end = first_visible
        .saturating_add(visible_rows)
        .saturating_add(overscan)
        .min(total_rows);
    let end = end.max(start);

    RowWindow {
        start,
        end,
        pad_top: start as f64 * row_height,
        pad_bottom: (total_rows - end) as f64 * row_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_list() {
        let w = compute_window(0.0, 200.0, 20.0, 1000, 0);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 11); // 10 visible + 1 partial
        assert_eq!(w.pad_top, 0.0);
        assert_eq!(w.pad_bottom, (1000 - 11) as f64 * 20.0);
    }

    #[test]
    fn mid_list_window() {
        let w = compute_window(400.0, 200.0, 20.0, 1000, 0);
        assert_eq!(w.start, 20);
        assert_eq!(w.end, 31);
        assert_eq!(w.pad_top, 400.0);
    }

    #[test]
    fn overscan_pads_both_sides() {
        let w = compute_window(400.0, 200.0, 20.0, 1000, 5);
        assert_eq!(w.start, 15);
        assert_eq!(w.end, 36);
    }

    #[test]
    fn clamps_at_the_end() {
        let w = compute_window(1_000_000.0, 200.0, 20.0, 100, 5);
        assert_eq!(w.end, 100);
        assert!(w.start <= w.end);
        assert_eq!(w.pad_bottom, 0.0);
    }

    #[test]
    fn empty_list() {
        let w = compute_window(0.0, 200.0, 20.0, 0, 5);
        assert!(w.is_empty());
        assert_eq!(w.pad_top, 0.0);
        assert_eq!(w.pad_bottom, 0.0);
    }

    #[test]
    fn fewer_rows_than_viewport() {
        let w = compute_window(0.0, 600.0, 20.0, 5, 5);
        assert_eq!(w.start, 0);
        assert_eq!(w.end, 5);
        assert_eq!(w.pad_bottom, 0.0);
    }

    #[test]
    fn negative_scroll_is_treated_as_zero() {
        let w = compute_window(-50.0, 200.0, 20.0, 100, 0);
        assert_eq!(w.start, 0);
    }

    #[test]
    fn spacer_heights_preserve_total() {
        let total = 1000;
        let row_h = 20.0;
        let w = compute_window(777.0, 350.0, row_h, total, 3);
        let rendered = (w.end - w.start) as f64 * row_h;
        assert_eq!(w.pad_top + rendered + w.pad_bottom, total as f64 * row_h);
    }
}
