//! Selection outline geometry.
//!
//! Kept free of any drawing API so the outline math can be tested natively.

use serde::Serialize;

use crate::layout::{GridGeometry, Viewport};
use crate::types::{CellRange, Point};

/// Outline of a rectangular selection, clipped to the rendered window.
///
/// An edge flag is false when that side of the range lies outside the window,
/// so hosts do not draw a border where the selection actually continues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub draw_top: bool,
    pub draw_bottom: bool,
    pub draw_left: bool,
    pub draw_right: bool,
}

pub fn selection_rect(
    range: CellRange,
    geometry: &GridGeometry,
    viewport: &Viewport,
    scroll: Point,
) -> Option<SelectionRect> {
    let (min_row, min_col, max_row, max_col) = range.bounds();
    if viewport.row_count() == 0 || viewport.col_count() == 0 {
        return None;
    }

    let row_start = min_row.max(viewport.start_row);
    let row_end = max_row.min(viewport.end_row - 1);
    let col_start = min_col.max(viewport.start_col);
    let col_end = max_col.min(viewport.end_col - 1);
    if row_start > row_end || col_start > col_end {
        return None;
    }

    let top_left = geometry.cell_rect((row_start, col_start).into(), scroll);
    let bottom_right = geometry.cell_rect((row_end, col_end).into(), scroll);
    Some(SelectionRect {
        x: top_left.x,
        y: top_left.y,
        w: bottom_right.right() - top_left.x,
        h: bottom_right.bottom() - top_left.y,
        draw_top: row_start == min_row,
        draw_bottom: row_end == max_row,
        draw_left: col_start == min_col,
        draw_right: col_end == max_col,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::types::{GridExtent, Size};

    fn setup(scroll: Point) -> (GridGeometry, Viewport) {
        let geometry = GridGeometry::new(&GridConfig::default(), GridExtent::new(100, 26));
        let input = geometry.viewport_input(scroll, Size::new(848.0, 432.0), 0);
        (geometry, Viewport::compute(&input))
    }

    #[test]
    fn selection_rect_inside_window() {
        let (geometry, viewport) = setup(Point::default());
        let range = CellRange::new((1, 1).into(), (2, 3).into());
        let rect = selection_rect(range, &geometry, &viewport, Point::default()).unwrap();
        assert_eq!((rect.x, rect.y), (48.0 + 128.0, 32.0 + 32.0));
        assert_eq!((rect.w, rect.h), (3.0 * 128.0, 2.0 * 32.0));
        assert!(rect.draw_top && rect.draw_bottom && rect.draw_left && rect.draw_right);
    }

    #[test]
    fn selection_rect_clipped_by_scroll() {
        let scroll = Point::new(0.0, 320.0);
        let (geometry, viewport) = setup(scroll);
        // rows 5..=20, window starts at row 10
        let range = CellRange::new((5, 0).into(), (20, 0).into());
        let rect = selection_rect(range, &geometry, &viewport, scroll).unwrap();
        assert!(!rect.draw_top);
        assert!(rect.draw_bottom);
        assert_eq!(rect.y, 32.0);
    }

    #[test]
    fn selection_rect_outside_window() {
        let (geometry, viewport) = setup(Point::default());
        let range = CellRange::single((90, 0).into());
        assert!(selection_rect(range, &geometry, &viewport, Point::default()).is_none());
    }
}
