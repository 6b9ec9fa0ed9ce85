//! Visible cell window computed from scroll position and container size.

use serde::Serialize;

use crate::types::{GridExtent, Point, Size};

/// Inputs to the viewport calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInput {
    /// Scroll offset of the cell area in pixels
    pub scroll: Point,
    /// Size of the cell area (container minus headers) in pixels
    pub container: Size,
    /// Uniform cell size in pixels
    pub cell: Size,
    /// Sheet size
    pub extent: GridExtent,
    /// Extra rows/cols past the visible edge
    pub buffer: u32,
}

/// Half-open `[start, end)` window of rows and columns eligible for rendering.
///
/// Always satisfies `start_row <= end_row <= extent.rows` (same for columns).
/// `visible_rows`/`visible_cols` are the unclamped window dimensions including
/// the buffer; the cell pool is sized from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
    pub visible_rows: u32,
    pub visible_cols: u32,
}

impl Viewport {
    /// Recompute the window from scratch.
    ///
    /// Negative or non-finite scroll offsets are treated as zero, and a start
    /// index past the end of the sheet is pulled back to the extent, so the
    /// invariant holds for any input.
    pub fn compute(input: &ViewportInput) -> Self {
        let start_col = first_index(input.scroll.x, input.cell.width).min(input.extent.cols);
        let start_row = first_index(input.scroll.y, input.cell.height).min(input.extent.rows);

        let visible_cols =
            span(input.container.width, input.cell.width).saturating_add(input.buffer);
        let visible_rows =
            span(input.container.height, input.cell.height).saturating_add(input.buffer);

        Self {
            start_row,
            end_row: start_row.saturating_add(visible_rows).min(input.extent.rows),
            start_col,
            end_col: start_col.saturating_add(visible_cols).min(input.extent.cols),
            visible_rows,
            visible_cols,
        }
    }

    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row
    }

    pub fn col_count(&self) -> u32 {
        self.end_col - self.start_col
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.start_row..self.end_row).contains(&row) && (self.start_col..self.end_col).contains(&col)
    }
}

/// `floor(offset / size)`, saturating; zero for bad input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn first_index(offset: f32, size: f32) -> u32 {
    if !offset.is_finite() || offset <= 0.0 || !size.is_finite() || size <= 0.0 {
        return 0;
    }
    // `as` saturates for out-of-range floats
    (offset / size).floor() as u32
}

/// `ceil(length / size)`, saturating; zero for bad input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn span(length: f32, size: f32) -> u32 {
    if !length.is_finite() || length <= 0.0 || !size.is_finite() || size <= 0.0 {
        return 0;
    }
    (length / size).ceil() as u32
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn input(scroll_x: f32, scroll_y: f32) -> ViewportInput {
        ViewportInput {
            scroll: Point::new(scroll_x, scroll_y),
            container: Size::new(800.0, 400.0),
            cell: Size::new(128.0, 32.0),
            extent: GridExtent::new(100, 26),
            buffer: 5,
        }
    }

    #[test]
    fn test_viewport_at_origin() {
        let vp = Viewport::compute(&input(0.0, 0.0));
        assert_eq!((vp.start_row, vp.end_row), (0, 18));
        assert_eq!((vp.start_col, vp.end_col), (0, 12));
        assert_eq!((vp.visible_rows, vp.visible_cols), (18, 12));
    }

    #[test]
    fn test_viewport_clamps_at_bottom_edge() {
        let vp = Viewport::compute(&input(0.0, 3100.0));
        assert_eq!(vp.start_row, 96);
        assert_eq!(vp.end_row, 100);
    }

    #[test]
    fn test_start_past_extent_is_pulled_back() {
        let vp = Viewport::compute(&input(1.0e9, 1.0e9));
        assert_eq!((vp.start_row, vp.end_row), (100, 100));
        assert_eq!((vp.start_col, vp.end_col), (26, 26));
    }

    #[test]
    fn test_bad_scroll_treated_as_zero() {
        let vp = Viewport::compute(&input(f32::NAN, -50.0));
        assert_eq!(vp.start_row, 0);
        assert_eq!(vp.start_col, 0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = Viewport::compute(&input(333.0, 777.0));
        let b = Viewport::compute(&input(333.0, 777.0));
        assert_eq!(a, b);
    }
}
