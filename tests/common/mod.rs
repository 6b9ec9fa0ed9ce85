//! Common test utilities: controller fixtures, input helpers, and assertions.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::{
    to_id, CellCoord, CellId, GridConfig, GridController, Key, Modifiers, Point, PointerButton,
    Sheet, Size,
};

/// Full container size used by every fixture: an 800x400 cell area below
/// the default 48x32 headers.
pub const CONTAINER: Size = Size {
    width: 848.0,
    height: 432.0,
};

/// Route `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default 100x26 grid, sized and ready for input.
#[must_use]
pub fn grid() -> GridController<Sheet> {
    grid_with(GridConfig::default())
}

#[must_use]
pub fn grid_with(config: GridConfig) -> GridController<Sheet> {
    init_tracing();
    let mut grid = GridController::with_blank_sheet(config).expect("valid config");
    grid.resize(CONTAINER);
    grid
}

/// Container-relative center of a cell at the current scroll offset.
#[must_use]
pub fn center(grid: &GridController<Sheet>, row: u32, col: u32) -> Point {
    let rect = grid
        .geometry()
        .cell_rect(CellCoord::new(row, col), grid.scroll());
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

/// Press and release without moving.
pub fn click_with(grid: &mut GridController<Sheet>, row: u32, col: u32, mods: Modifiers) {
    let point = center(grid, row, col);
    grid.pointer_down(point, PointerButton::Primary, mods);
    grid.pointer_up();
}

pub fn click(grid: &mut GridController<Sheet>, row: u32, col: u32) {
    click_with(grid, row, col, Modifiers::NONE);
}

pub fn press(grid: &mut GridController<Sheet>, key: Key, times: usize) {
    for _ in 0..times {
        grid.key_down(key, Modifiers::NONE);
    }
}

#[must_use]
pub fn ids(cells: &[(u32, u32)]) -> Vec<CellId> {
    let mut ids: Vec<CellId> = cells.iter().map(|&(r, c)| to_id(r, c)).collect();
    ids.sort();
    ids
}

/// Every id in the inclusive rectangle, row-major.
#[must_use]
pub fn block(rows: std::ops::RangeInclusive<u32>, cols: std::ops::RangeInclusive<u32>) -> Vec<CellId> {
    rows.flat_map(|r| cols.clone().map(move |c| to_id(r, c)))
        .collect()
}

pub fn assert_selection(grid: &GridController<Sheet>, expected: &[CellId]) {
    assert_eq!(grid.selection().selected_ids(), expected);
}
