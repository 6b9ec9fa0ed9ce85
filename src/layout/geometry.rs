//! Pixel geometry of a uniform grid: hit testing, cell rectangles, scroll limits.
//!
//! All points are relative to the scroll container's top-left corner, which
//! includes the header bands when headers are shown.

use crate::cell_ref::CellCoord;
use crate::config::GridConfig;
use crate::types::{GridExtent, Point, Rect, Size};

use super::ViewportInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Uniform cell size
    pub cell: Size,
    /// Row header width / column header height (zero when headers are hidden)
    pub header: Size,
    pub extent: GridExtent,
}

impl GridGeometry {
    pub fn new(config: &GridConfig, extent: GridExtent) -> Self {
        Self {
            cell: config.cell_size(),
            header: config.header_offset(),
            extent,
        }
    }

    /// Total width of all columns.
    #[allow(clippy::cast_precision_loss)]
    pub fn total_width(&self) -> f32 {
        self.extent.cols as f32 * self.cell.width
    }

    /// Total height of all rows.
    #[allow(clippy::cast_precision_loss)]
    pub fn total_height(&self) -> f32 {
        self.extent.rows as f32 * self.cell.height
    }

    /// Part of the container left for cells once headers are drawn.
    pub fn cell_area(&self, container: Size) -> Size {
        Size::new(
            (container.width - self.header.width).max(0.0),
            (container.height - self.header.height).max(0.0),
        )
    }

    /// Largest scroll offset that still fills the cell area.
    pub fn max_scroll(&self, container: Size) -> Point {
        let area = self.cell_area(container);
        Point::new(
            (self.total_width() - area.width).max(0.0),
            (self.total_height() - area.height).max(0.0),
        )
    }

    /// Clamp a scroll offset into `[0, max_scroll]`. Non-finite values become zero.
    pub fn clamp_scroll(&self, scroll: Point, container: Size) -> Point {
        let max = self.max_scroll(container);
        let clamp = |v: f32, hi: f32| if v.is_finite() { v.clamp(0.0, hi) } else { 0.0 };
        Point::new(clamp(scroll.x, max.x), clamp(scroll.y, max.y))
    }

    /// Inputs for [`super::Viewport::compute`].
    pub fn viewport_input(&self, scroll: Point, container: Size, buffer: u32) -> ViewportInput {
        ViewportInput {
            scroll,
            container: self.cell_area(container),
            cell: self.cell,
            extent: self.extent,
            buffer,
        }
    }

    /// Cell under a container-relative point.
    ///
    /// Each axis is clamped independently into the sheet, so points over the
    /// headers or past the last row/column resolve to the nearest edge cell.
    /// `None` only when the sheet is empty.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_at(&self, point: Point, scroll: Point) -> Option<CellCoord> {
        let axis = |pos: f32, header: f32, offset: f32, size: f32| -> u32 {
            let sheet_pos = (pos - header).max(0.0) + offset.max(0.0);
            if !sheet_pos.is_finite() || size <= 0.0 {
                return 0;
            }
            // `as` saturates, the extent clamp below handles the rest
            (sheet_pos / size).floor() as u32
        };
        let col = axis(point.x, self.header.width, scroll.x, self.cell.width);
        let row = axis(point.y, self.header.height, scroll.y, self.cell.height);
        self.extent.clamp(CellCoord::new(row, col))
    }

    /// Cell strictly under a container-relative point.
    ///
    /// Unlike [`Self::cell_at`], points over the header bands or past the last
    /// row/column miss.
    pub fn hit_cell(&self, point: Point, scroll: Point) -> Option<CellCoord> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        if point.x < self.header.width || point.y < self.header.height {
            return None;
        }
        let sheet_x = point.x - self.header.width + scroll.x.max(0.0);
        let sheet_y = point.y - self.header.height + scroll.y.max(0.0);
        if sheet_x >= self.total_width() || sheet_y >= self.total_height() {
            return None;
        }
        self.cell_at(point, scroll)
    }

    /// Container-relative rectangle of a cell at the given scroll offset.
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_rect(&self, cell: CellCoord, scroll: Point) -> Rect {
        Rect::new(
            self.header.width + cell.col as f32 * self.cell.width - scroll.x,
            self.header.height + cell.row as f32 * self.cell.height - scroll.y,
            self.cell.width,
            self.cell.height,
        )
    }

    /// Smallest scroll change that brings `cell` fully into the cell area.
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_to_reveal(&self, cell: CellCoord, scroll: Point, container: Size) -> Point {
        let area = self.cell_area(container);
        let reveal = |offset: f32, index: u32, size: f32, visible: f32| {
            let start = index as f32 * size;
            let end = start + size;
            if start < offset {
                start
            } else if end > offset + visible {
                (end - visible).max(0.0)
            } else {
                offset
            }
        };
        let target = Point::new(
            reveal(scroll.x, cell.col, self.cell.width, area.width),
            reveal(scroll.y, cell.row, self.cell.height, area.height),
        );
        self.clamp_scroll(target, container)
    }
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

    fn geometry() -> GridGeometry {
        GridGeometry::new(&GridConfig::default(), GridExtent::new(100, 26))
    }

    #[test]
    fn test_cell_at_accounts_for_headers_and_scroll() {
        let g = geometry();
        // header 48x32, cells 128x32
        let cell = g.cell_at(Point::new(48.0 + 130.0, 32.0 + 70.0), Point::default());
        assert_eq!(cell, Some(CellCoord::new(2, 1)));
        let cell = g.cell_at(Point::new(60.0, 40.0), Point::new(256.0, 320.0));
        assert_eq!(cell, Some(CellCoord::new(10, 2)));
    }

    #[test]
    fn test_cell_at_clamps_outside_points() {
        let g = geometry();
        assert_eq!(
            g.cell_at(Point::new(-500.0, -500.0), Point::default()),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            g.cell_at(Point::new(1.0e7, 1.0e7), Point::default()),
            Some(CellCoord::new(99, 25))
        );
        assert_eq!(
            g.cell_at(Point::new(f32::NAN, 40.0), Point::default()),
            Some(CellCoord::new(0, 0))
        );
    }

    #[test]
    fn test_hit_cell_misses_headers_and_blank_area() {
        let g = GridGeometry::new(&GridConfig::default(), GridExtent::new(3, 2));
        assert_eq!(g.hit_cell(Point::new(10.0, 100.0), Point::default()), None);
        assert_eq!(g.hit_cell(Point::new(100.0, 10.0), Point::default()), None);
        // two columns end at x = 48 + 256
        assert_eq!(g.hit_cell(Point::new(310.0, 40.0), Point::default()), None);
        assert_eq!(
            g.hit_cell(Point::new(300.0, 40.0), Point::default()),
            Some(CellCoord::new(0, 1))
        );
    }

    #[test]
    fn test_max_scroll() {
        let g = geometry();
        let max = g.max_scroll(Size::new(848.0, 432.0));
        assert_eq!(max.x, 26.0 * 128.0 - 800.0);
        assert_eq!(max.y, 100.0 * 32.0 - 400.0);
    }

    #[test]
    fn test_clamp_scroll() {
        let g = geometry();
        let container = Size::new(848.0, 432.0);
        let clamped = g.clamp_scroll(Point::new(-10.0, 1.0e9), container);
        assert_eq!(clamped, Point::new(0.0, 2800.0));
    }

    #[test]
    fn test_cell_rect_round_trips_with_cell_at() {
        let g = geometry();
        let scroll = Point::new(100.0, 45.0);
        let rect = g.cell_rect(CellCoord::new(4, 3), scroll);
        let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        assert_eq!(g.cell_at(center, scroll), Some(CellCoord::new(4, 3)));
    }

    #[test]
    fn test_scroll_to_reveal() {
        let g = geometry();
        let container = Size::new(848.0, 432.0);
        // row 20 is below a 400px area at scroll 0: bottom edge 672 => scroll 272
        let scroll = g.scroll_to_reveal(CellCoord::new(20, 0), Point::default(), container);
        assert_eq!(scroll, Point::new(0.0, 272.0));
        // already visible: unchanged
        let same = g.scroll_to_reveal(CellCoord::new(15, 0), scroll, container);
        assert_eq!(same, scroll);
        // above: snap to its top
        let up = g.scroll_to_reveal(CellCoord::new(2, 0), scroll, container);
        assert_eq!(up, Point::new(0.0, 64.0));
    }
}
