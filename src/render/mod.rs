//! Read-only render projection of the grid.
//!
//! [`project`] walks the cell pool and produces everything a host needs to
//! paint one frame: cell rectangles with their text and state flags, header
//! labels, and the selection outline. Hosts never read engine internals.

pub mod selection;

pub use selection::{selection_rect, SelectionRect};

use serde::Serialize;

use crate::cell_ref::{column_label, CellId};
use crate::controller::GridController;
use crate::store::CellStore;
use crate::types::{CellRange, Rect};

/// One pooled cell, positioned relative to the container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFrame {
    /// Index of the pool slot drawing this cell
    pub slot: usize,
    pub id: CellId,
    pub row: u32,
    pub col: u32,
    pub rect: Rect,
    pub text: String,
    pub selected: bool,
    pub active: bool,
    pub editing: bool,
}

/// A row or column header cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFrame {
    pub index: u32,
    pub label: String,
    pub rect: Rect,
    /// The selection touches this row/column
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub cells: Vec<CellFrame>,
    pub col_headers: Vec<HeaderFrame>,
    pub row_headers: Vec<HeaderFrame>,
    pub selection: Option<SelectionRect>,
    /// Pool generation this frame was built from
    pub generation: u64,
}

/// Build the frame for the controller's current state.
pub fn project<S: CellStore>(grid: &GridController<S>) -> RenderFrame {
    let geometry = grid.geometry();
    let scroll = grid.scroll();
    let selection = grid.selection();
    let active = selection.active();
    let editing = grid.edit().editing_cell();

    let cells = grid
        .pool()
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(slot, pooled)| {
            let coord = pooled.cell?;
            let id = CellId::from(coord);
            let text = grid
                .store()
                .cell(coord.row, coord.col)
                .map(|content| content.display())
                .unwrap_or_default();
            Some(CellFrame {
                slot,
                id,
                row: coord.row,
                col: coord.col,
                rect: geometry.cell_rect(coord, scroll),
                text,
                selected: selection.is_selected(id),
                active: active == Some(id),
                editing: editing == Some(id),
            })
        })
        .collect();

    let viewport = grid.viewport();
    let bounds = selection.bounding_range();
    let header = geometry.header;
    let (mut col_headers, mut row_headers) = (Vec::new(), Vec::new());
    if header.width > 0.0 && header.height > 0.0 {
        col_headers = (viewport.start_col..viewport.end_col)
            .map(|col| {
                let cell = geometry.cell_rect((0, col).into(), scroll);
                HeaderFrame {
                    index: col,
                    label: column_label(col),
                    rect: Rect::new(cell.x, 0.0, cell.width, header.height),
                    highlighted: bounds.is_some_and(|b| {
                        let (_, min_col, _, max_col) = b.bounds();
                        (min_col..=max_col).contains(&col)
                    }),
                }
            })
            .collect();
        row_headers = (viewport.start_row..viewport.end_row)
            .map(|row| {
                let cell = geometry.cell_rect((row, 0).into(), scroll);
                HeaderFrame {
                    index: row,
                    label: (u64::from(row) + 1).to_string(),
                    rect: Rect::new(0.0, cell.y, header.width, cell.height),
                    highlighted: bounds.is_some_and(|b| {
                        let (min_row, _, max_row, _) = b.bounds();
                        (min_row..=max_row).contains(&row)
                    }),
                }
            })
            .collect();
    }

    // Only a fully-filled rectangle gets an outline; toggled sets do not.
    let outline = bounds
        .filter(|range: &CellRange| range.cell_count() == selection.len() as u64)
        .and_then(|range| selection_rect(range, geometry, viewport, scroll));

    RenderFrame {
        cells,
        col_headers,
        row_headers,
        selection: outline,
        generation: grid.pool().generation(),
    }
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
    use crate::config::GridConfig;
    use crate::controller::{Key, Modifiers};
    use crate::store::Sheet;
    use crate::types::{CellContent, Size};

    fn grid() -> GridController<Sheet> {
        let sheet = Sheet::from_rows(
            "Data",
            vec![
                vec![CellContent::new("Name"), CellContent::new(42.0)],
                vec![CellContent::with_formula(2.0, "=1+1")],
            ],
        );
        let mut grid = GridController::new(sheet, GridConfig::default()).unwrap();
        grid.resize(Size::new(848.0, 432.0));
        grid
    }

    #[test]
    fn test_frame_lists_visible_cells_with_text() {
        let grid = grid();
        let frame = project(&grid);
        assert_eq!(frame.cells.len(), 4);
        assert_eq!(frame.cells[0].text, "Name");
        assert_eq!(frame.cells[1].text, "42");
        assert_eq!(frame.cells[2].text, "2");
        assert_eq!(frame.cells[3].text, "");
        assert_eq!(frame.cells[0].rect.x, 48.0);
    }

    #[test]
    fn test_headers_follow_viewport() {
        let grid = grid();
        let frame = project(&grid);
        let labels: Vec<_> = frame.col_headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(frame.row_headers[1].label, "2");
    }

    #[test]
    fn test_flags_and_outline() {
        let mut grid = grid();
        grid.key_down(Key::ArrowDown, Modifiers::NONE);
        grid.key_down(Key::ArrowRight, Modifiers::SHIFT);
        let frame = project(&grid);
        assert_eq!(frame.cells.iter().filter(|c| c.selected).count(), 2);
        let active: Vec<_> = frame.cells.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, crate::cell_ref::to_id(0, 1));
        assert!(frame.selection.is_some());
        assert!(frame.col_headers.iter().all(|h| h.highlighted));
    }

    #[test]
    fn test_hidden_headers_produce_no_labels() {
        let config = GridConfig {
            show_headers: false,
            ..GridConfig::default()
        };
        let grid = GridController::with_blank_sheet(config).unwrap();
        let frame = project(&grid);
        assert!(frame.col_headers.is_empty());
        assert!(frame.row_headers.is_empty());
    }
}
