use serde::{Deserialize, Serialize};

use crate::cell_ref::{CellCoord, CellId};

/// Axis-aligned rectangle of cells between two corners, inclusive on both ends.
///
/// The corners may be given in any order; [`CellRange::bounds`] normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    pub const fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    pub const fn single(cell: CellCoord) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Get normalized bounds (min_row, min_col, max_row, max_col)
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.start.row.min(self.end.row),
            self.start.col.min(self.end.col),
            self.start.row.max(self.end.row),
            self.start.col.max(self.end.col),
        )
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row).contains(&cell.row) && (min_col..=max_col).contains(&cell.col)
    }

    pub fn row_span(&self) -> u64 {
        let (min_row, _, max_row, _) = self.bounds();
        u64::from(max_row - min_row) + 1
    }

    pub fn col_span(&self) -> u64 {
        let (_, min_col, _, max_col) = self.bounds();
        u64::from(max_col - min_col) + 1
    }

    pub fn cell_count(&self) -> u64 {
        self.row_span() * self.col_span()
    }

    /// Every cell id in the rectangle, row-major.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| CellId::new(row, col)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_any_corner() {
        let a = CellCoord::new(2, 3);
        let b = CellCoord::new(5, 1);
        assert_eq!(CellRange::new(a, b).bounds(), (2, 1, 5, 3));
        assert_eq!(CellRange::new(b, a).bounds(), (2, 1, 5, 3));
    }

    #[test]
    fn test_ids_cover_rectangle() {
        let range = CellRange::new(CellCoord::new(1, 1), CellCoord::new(0, 0));
        let ids: Vec<_> = range.ids().map(|id| (id.row(), id.col())).collect();
        assert_eq!(ids, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(range.cell_count(), 4);
    }

    #[test]
    fn test_single_cell_range() {
        let range = CellRange::single(CellCoord::new(7, 7));
        assert_eq!(range.cell_count(), 1);
        assert!(range.contains(CellCoord::new(7, 7)));
        assert!(!range.contains(CellCoord::new(7, 8)));
    }
}
