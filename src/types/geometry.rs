use serde::{Deserialize, Serialize};

use crate::cell_ref::CellCoord;

/// A point in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Number of rows and columns in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridExtent {
    pub rows: u32,
    pub cols: u32,
}

impl GridExtent {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub const fn contains(self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Clamp each axis independently into the extent. `None` for an empty sheet.
    pub fn clamp(self, coord: CellCoord) -> Option<CellCoord> {
        if self.is_empty() {
            return None;
        }
        Some(CellCoord::new(
            coord.row.min(self.rows - 1),
            coord.col.min(self.cols - 1),
        ))
    }

    /// Last addressable cell, if any.
    pub fn last_cell(self) -> Option<CellCoord> {
        self.clamp(CellCoord::new(u32::MAX, u32::MAX))
    }

    pub const fn cell_count(self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_each_axis() {
        let extent = GridExtent::new(100, 26);
        assert_eq!(
            extent.clamp(CellCoord::new(500, 3)),
            Some(CellCoord::new(99, 3))
        );
        assert_eq!(
            extent.clamp(CellCoord::new(4, 40)),
            Some(CellCoord::new(4, 25))
        );
        assert_eq!(GridExtent::new(0, 26).clamp(CellCoord::new(0, 0)), None);
    }

    #[test]
    fn test_contains_is_half_open() {
        let extent = GridExtent::new(2, 2);
        assert!(extent.contains(CellCoord::new(1, 1)));
        assert!(!extent.contains(CellCoord::new(2, 0)));
        assert!(!extent.contains(CellCoord::new(0, 2)));
    }
}
