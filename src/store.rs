//! Cell data store: the narrow interface the grid reads and commits through,
//! plus a sparse in-memory [`Sheet`] implementation.

use std::collections::HashMap;

use crate::cell_ref::{CellCoord, CellId};
use crate::error::{GridError, Result};
use crate::types::{CellContent, CellValue, GridExtent};

/// Data-model collaborator consumed by the grid core.
///
/// The grid never owns cell content. It reads through [`CellStore::cell`] to
/// render and to seed edit sessions, and writes only when an edit commits.
pub trait CellStore {
    /// Current sheet size.
    fn extent(&self) -> GridExtent;

    /// Content at `(row, col)`, or `None` outside the extent.
    fn cell(&self, row: u32, col: u32) -> Option<&CellContent>;

    /// Write a committed value.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] if `id` is outside the extent.
    fn set_cell(&mut self, id: CellId, value: CellValue, formula: Option<String>) -> Result<()>;
}

static BLANK: CellContent = CellContent::BLANK;

/// Sparse sheet: only non-blank cells are stored, so the extent can be
/// spreadsheet-sized without allocating per coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    extent: GridExtent,
    cells: HashMap<CellCoord, CellContent>,
}

impl Sheet {
    /// Blank sheet of the given size.
    pub fn new(name: impl Into<String>, extent: GridExtent) -> Self {
        Self {
            name: name.into(),
            extent,
            cells: HashMap::new(),
        }
    }

    /// Build a sheet from the row matrix a file parser produces.
    ///
    /// Ragged rows are padded with empty cells up to the widest row.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellContent>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let (Ok(row_count), Ok(col_count)) = (u32::try_from(rows.len()), u32::try_from(width))
        else {
            tracing::warn!(rows = rows.len(), cols = width, "sheet too large, loading empty");
            return Self::new(name, GridExtent::new(0, 0));
        };
        let mut sheet = Self::new(name, GridExtent::new(row_count, col_count));
        for (row, contents) in (0..row_count).zip(rows) {
            for (col, content) in (0..col_count).zip(contents) {
                if !content.is_blank() {
                    sheet.cells.insert(CellCoord::new(row, col), content);
                }
            }
        }
        sheet
    }

    /// Change the extent. Content outside the new extent is dropped.
    pub fn resize(&mut self, extent: GridExtent) {
        self.extent = extent;
        self.cells.retain(|coord, _| extent.contains(*coord));
    }

    /// Number of non-blank cells held.
    pub fn populated(&self) -> usize {
        self.cells.len()
    }

    /// Display text at `(row, col)`; empty outside the extent.
    pub fn display(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(CellContent::display).unwrap_or_default()
    }
}

impl CellStore for Sheet {
    fn extent(&self) -> GridExtent {
        self.extent
    }

    fn cell(&self, row: u32, col: u32) -> Option<&CellContent> {
        let coord = CellCoord::new(row, col);
        if !self.extent.contains(coord) {
            return None;
        }
        Some(self.cells.get(&coord).unwrap_or(&BLANK))
    }

    fn set_cell(&mut self, id: CellId, value: CellValue, formula: Option<String>) -> Result<()> {
        let out_of_bounds = GridError::OutOfBounds {
            row: id.row(),
            col: id.col(),
            rows: self.extent.rows,
            cols: self.extent.cols,
        };
        let coord = id.coord();
        if !self.extent.contains(coord) {
            return Err(out_of_bounds);
        }
        let content = CellContent { value, formula };
        if content.is_blank() {
            self.cells.remove(&coord);
        } else {
            self.cells.insert(coord, content);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::cell_ref::to_id;

    #[test]
    fn test_blank_sheet_has_every_cell() {
        let sheet = Sheet::new("Sheet1", GridExtent::new(100, 26));
        assert_eq!(sheet.extent(), GridExtent::new(100, 26));
        assert!(sheet.cell(99, 25).is_some());
        assert!(sheet.cell(100, 0).is_none());
        assert!(sheet.cell(0, 26).is_none());
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let sheet = Sheet::from_rows(
            "data.csv",
            vec![
                vec![CellContent::new("name"), CellContent::new("score")],
                vec![CellContent::new("ada")],
            ],
        );
        assert_eq!(sheet.extent(), GridExtent::new(2, 2));
        assert_eq!(sheet.display(0, 1), "score");
        assert_eq!(sheet.display(1, 1), "");
    }

    #[test]
    fn test_set_cell_writes_value_and_formula() {
        let mut sheet = Sheet::new("Sheet1", GridExtent::new(3, 3));
        sheet
            .set_cell(to_id(1, 2), CellValue::Number(7.0), Some("=3+4".into()))
            .unwrap();
        let cell = sheet.cell(1, 2).unwrap();
        assert_eq!(cell.display(), "7");
        assert_eq!(cell.formula.as_deref(), Some("=3+4"));
    }

    #[test]
    fn test_excel_sized_blank_sheet_is_sparse() {
        let sheet = Sheet::new("Big", GridExtent::new(1_048_576, 16_384));
        assert_eq!(sheet.populated(), 0);
        assert_eq!(sheet.cell(1_048_575, 16_383), Some(&CellContent::BLANK));
        assert!(sheet.cell(1_048_576, 0).is_none());
    }

    #[test]
    fn test_resize_drops_cells_outside() {
        let mut sheet = Sheet::from_rows(
            "data.csv",
            vec![vec![CellContent::new("a"), CellContent::new("b")]],
        );
        sheet.resize(GridExtent::new(1_000, 1));
        assert_eq!(sheet.display(0, 0), "a");
        assert!(sheet.cell(0, 1).is_none());
        assert_eq!(sheet.populated(), 1);
        assert!(sheet.cell(999, 0).is_some());
    }

    #[test]
    fn test_blank_write_clears_entry() {
        let mut sheet = Sheet::new("Sheet1", GridExtent::new(3, 3));
        sheet
            .set_cell(to_id(0, 0), CellValue::Text("x".into()), None)
            .unwrap();
        assert_eq!(sheet.populated(), 1);
        sheet.set_cell(to_id(0, 0), CellValue::Empty, None).unwrap();
        assert_eq!(sheet.populated(), 0);
        assert_eq!(sheet.display(0, 0), "");
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut sheet = Sheet::new("Sheet1", GridExtent::new(3, 3));
        let err = sheet
            .set_cell(to_id(3, 0), CellValue::Empty, None)
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { row: 3, .. }));
    }
}
