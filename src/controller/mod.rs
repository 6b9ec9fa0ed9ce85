//! Interaction controller: the single owner of grid state.
//!
//! Hosts translate raw DOM events into [`Modifiers`], [`PointerButton`],
//! [`Key`] and container-relative [`Point`]s, then call into the controller.
//! Every method is a synchronous state transition; the `bool` returns tell the
//! host whether a repaint is needed.

mod autoscroll;
mod input;

pub use autoscroll::{DragState, EdgeZone};
pub use input::{Key, Modifiers, PointerButton};

use crate::cell_ref::{CellCoord, CellId};
use crate::config::GridConfig;
use crate::editor::mutation::apply_commit;
use crate::editor::{CellCommit, EditSession};
use crate::error::Result;
use crate::layout::{CellPool, GridGeometry, Viewport};
use crate::selection::SelectionEngine;
use crate::store::{CellStore, Sheet};
use crate::types::{GridExtent, Point, Size};

/// Called after a commit has been written to the store.
pub type CommitHook = Box<dyn FnMut(&CellCommit)>;

pub struct GridController<S: CellStore> {
    config: GridConfig,
    store: S,
    geometry: GridGeometry,
    /// Scroll offset of the cell area, always within `[0, max_scroll]`
    scroll: Point,
    /// Full container size, headers included
    container: Size,
    viewport: Viewport,
    pool: CellPool,
    selection: SelectionEngine,
    edit: EditSession,
    drag: DragState,
    commit_hook: Option<CommitHook>,
}

impl GridController<Sheet> {
    /// Controller over a blank sheet sized by `config.default_rows`/`default_cols`.
    pub fn with_blank_sheet(config: GridConfig) -> Result<Self> {
        let sheet = Sheet::new("Sheet1", config.default_extent());
        Self::new(sheet, config)
    }
}

impl<S: CellStore> GridController<S> {
    pub fn new(store: S, config: GridConfig) -> Result<Self> {
        config.validate()?;
        let geometry = GridGeometry::new(&config, store.extent());
        let mut controller = Self {
            config,
            store,
            geometry,
            scroll: Point::default(),
            container: Size::default(),
            viewport: Viewport::default(),
            pool: CellPool::new(),
            selection: SelectionEngine::new(),
            edit: EditSession::new(),
            drag: DragState::default(),
            commit_hook: None,
        };
        controller.refresh_viewport();
        Ok(controller)
    }

    pub fn set_commit_hook(&mut self, hook: Option<CommitHook>) {
        self.commit_hook = hook;
    }

    // ---- Viewport ---------------------------------------------------------

    /// Container was resized. Scroll is re-clamped for the new size and a
    /// running drag re-targets the cell now under the pointer.
    pub fn resize(&mut self, container: Size) -> bool {
        let container = Size::new(
            sanitize_length(container.width),
            sanitize_length(container.height),
        );
        if container == self.container {
            return false;
        }
        self.container = container;
        self.scroll = self.geometry.clamp_scroll(self.scroll, container);
        self.refresh_viewport();
        if self.drag.is_dragging {
            self.extend_drag_to_pointer();
        }
        true
    }

    /// Scroll position reported by the host. Returns the clamped offset so the
    /// host can write it back when it differs.
    pub fn set_scroll(&mut self, scroll: Point) -> Point {
        let clamped = self.geometry.clamp_scroll(scroll, self.container);
        if clamped != self.scroll {
            self.scroll = clamped;
            self.refresh_viewport();
            if self.drag.is_dragging {
                self.extend_drag_to_pointer();
            }
        }
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: Point) -> Point {
        self.set_scroll(Point::new(self.scroll.x + delta.x, self.scroll.y + delta.y))
    }

    /// Recompute the visible window and reassign pool slots.
    fn refresh_viewport(&mut self) {
        let input = self
            .geometry
            .viewport_input(self.scroll, self.container, self.config.buffer);
        self.viewport = Viewport::compute(&input);
        self.pool.reposition(&self.viewport, self.geometry.extent);
    }

    // ---- Pointer ----------------------------------------------------------

    /// Pointer pressed at a container-relative point.
    ///
    /// Only primary presses on a cell do anything. An open edit session is
    /// committed first, as the input would lose focus in a browser anyway.
    pub fn pointer_down(&mut self, point: Point, button: PointerButton, mods: Modifiers) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        let Some(coord) = self.geometry.hit_cell(point, self.scroll) else {
            return false;
        };
        let id = CellId::from(coord);
        if self.edit.is_editing() {
            self.commit_edit();
        }

        if mods.toggles() {
            self.selection.toggle_with_focus(id);
            return true;
        }
        if mods.shift {
            self.selection.extend(id);
        } else {
            self.selection.select_single(id);
        }
        self.drag = DragState {
            is_dragging: true,
            anchor: Some(self.selection.anchor().unwrap_or(id)),
            last_pointer: point,
        };
        tracing::debug!(cell = %id, shift = mods.shift, "drag started");
        true
    }

    /// Pointer moved. Ignored unless a drag is in progress.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.drag.is_dragging {
            return false;
        }
        self.drag.last_pointer = point;
        self.extend_drag_to_pointer()
    }

    /// Pointer released anywhere. Safe to call repeatedly.
    pub fn pointer_up(&mut self) -> bool {
        if !self.drag.is_dragging {
            return false;
        }
        self.drag = DragState::default();
        tracing::debug!("drag ended");
        true
    }

    /// Window lost focus: a pending drag can never see its pointer-up.
    pub fn blur(&mut self) -> bool {
        self.pointer_up()
    }

    /// Re-select from the drag anchor to the cell under the last pointer.
    fn extend_drag_to_pointer(&mut self) -> bool {
        let Some(anchor) = self.drag.anchor else {
            return false;
        };
        let Some(coord) = self.geometry.cell_at(self.drag.last_pointer, self.scroll) else {
            return false;
        };
        let target = CellId::from(coord);
        if self.selection.active() == Some(target) && self.selection.anchor() == Some(anchor) {
            return false;
        }
        self.selection.select_range(anchor, target);
        true
    }

    /// Replace the selection programmatically. Ids outside the sheet are
    /// dropped; the first remaining id becomes active and anchor.
    pub fn select_cells(&mut self, ids: impl IntoIterator<Item = CellId>) {
        let extent = self.geometry.extent;
        let ids: Vec<CellId> = ids
            .into_iter()
            .filter(|id| extent.contains(id.coord()))
            .collect();
        self.selection.select_cells(ids);
    }

    // ---- Autoscroll -------------------------------------------------------

    fn edge_zone(&self) -> EdgeZone {
        EdgeZone {
            threshold: self.config.autoscroll_threshold,
            max_step: self.config.autoscroll_max_step,
        }
    }

    /// Scroll delta the next frame would apply. Zero when not dragging or
    /// when the pointer is outside the edge zones.
    pub fn autoscroll_step(&self) -> Point {
        if !self.drag.is_dragging {
            return Point::default();
        }
        self.edge_zone().step(self.drag.last_pointer, self.container)
    }

    /// Whether the host should keep its frame loop armed.
    pub fn wants_autoscroll(&self) -> bool {
        self.autoscroll_step() != Point::default()
    }

    /// Run one autoscroll frame. Returns `true` when the scroll moved.
    pub fn autoscroll_tick(&mut self) -> bool {
        let step = self.autoscroll_step();
        if step == Point::default() {
            return false;
        }
        let before = self.scroll;
        let after = self.scroll_by(step);
        if after == before {
            return false;
        }
        tracing::trace!(dx = step.x, dy = step.y, "autoscroll step");
        true
    }

    // ---- Keyboard ---------------------------------------------------------

    /// Key pressed while the grid (or its edit input) has focus.
    pub fn key_down(&mut self, key: Key, mods: Modifiers) -> bool {
        if self.edit.is_editing() {
            return match key {
                Key::Escape => self.cancel_edit(),
                Key::Enter => self.commit_edit().is_some(),
                _ => false,
            };
        }
        match key {
            Key::Enter | Key::F2 => self
                .selection
                .active()
                .is_some_and(|active| self.begin_edit(active)),
            _ => match key.direction() {
                Some((dr, dc)) => self.move_active(dr, dc, mods.shift),
                None => false,
            },
        }
    }

    fn move_active(&mut self, dr: i8, dc: i8, extend: bool) -> bool {
        let Some(last) = self.geometry.extent.last_cell() else {
            return false;
        };
        let Some(current) = self.selection.active().or(self.selection.anchor()) else {
            self.selection.select_single(CellId::new(0, 0));
            self.reveal(CellCoord::new(0, 0));
            return true;
        };
        let step = |index: u32, delta: i8, max: u32| -> u32 {
            let moved = i64::from(index) + i64::from(delta);
            u32::try_from(moved.clamp(0, i64::from(max))).unwrap_or(0)
        };
        let target = CellId::new(
            step(current.row(), dr, last.row),
            step(current.col(), dc, last.col),
        );
        if extend {
            self.selection.extend(target);
        } else {
            self.selection.select_single(target);
        }
        self.reveal(target.coord());
        true
    }

    /// Scroll just enough to show `cell` in full.
    fn reveal(&mut self, cell: CellCoord) {
        let target = self
            .geometry
            .scroll_to_reveal(cell, self.scroll, self.container);
        self.set_scroll(target);
    }

    // ---- Editing ----------------------------------------------------------

    /// Double-click opens an edit session on the cell under the pointer.
    pub fn double_click(&mut self, point: Point) -> bool {
        let Some(coord) = self.geometry.hit_cell(point, self.scroll) else {
            return false;
        };
        let id = CellId::from(coord);
        self.pointer_up();
        self.selection.select_single(id);
        self.begin_edit(id)
    }

    /// Open an edit session seeded with the cell's formula, else its display text.
    pub fn begin_edit(&mut self, cell: CellId) -> bool {
        if !self.geometry.extent.contains(cell.coord()) {
            return false;
        }
        let seed = self
            .store
            .cell(cell.row(), cell.col())
            .map(|content| content.raw_text())
            .unwrap_or_default();
        self.edit.begin(cell, seed);
        tracing::debug!(%cell, "edit session opened");
        true
    }

    pub fn set_draft(&mut self, text: &str) -> bool {
        self.edit.set_draft(text)
    }

    /// Write the draft through the store and notify the commit hook.
    ///
    /// A store rejection is logged and the hook is skipped; the session still
    /// closes.
    pub fn commit_edit(&mut self) -> Option<CellCommit> {
        let commit = self.edit.commit()?;
        match apply_commit(&mut self.store, &commit) {
            Ok(()) => {
                tracing::debug!(cell = %commit.cell, "edit committed");
                if let Some(hook) = self.commit_hook.as_mut() {
                    hook(&commit);
                }
            }
            Err(err) => {
                tracing::warn!(cell = %commit.cell, error = %err, "store rejected edit");
            }
        }
        Some(commit)
    }

    /// Close the edit session without writing.
    pub fn cancel_edit(&mut self) -> bool {
        match self.edit.discard() {
            Some(cell) => {
                tracing::debug!(%cell, "edit discarded");
                true
            }
            None => false,
        }
    }

    // ---- Data -------------------------------------------------------------

    /// Swap in a new store. Edits and drags are cancelled, the selection is
    /// revalidated against the new extent, and scroll is re-clamped.
    pub fn load_store(&mut self, store: S) -> S {
        let previous = std::mem::replace(&mut self.store, store);
        self.cancel_edit();
        self.pointer_up();
        self.sync_extent();
        previous
    }

    /// Mutate the store in place, then revalidate against its extent.
    pub fn update_store<R>(&mut self, update: impl FnOnce(&mut S) -> R) -> R {
        let result = update(&mut self.store);
        let extent = self.store.extent();
        if extent != self.geometry.extent {
            if self
                .edit
                .editing_cell()
                .is_some_and(|cell| !extent.contains(cell.coord()))
            {
                self.cancel_edit();
            }
            self.pointer_up();
        }
        self.sync_extent();
        result
    }

    fn sync_extent(&mut self) {
        let extent = self.store.extent();
        self.geometry.extent = extent;
        self.selection.revalidate(extent);
        self.scroll = self.geometry.clamp_scroll(self.scroll, self.container);
        self.refresh_viewport();
    }

    // ---- Accessors --------------------------------------------------------

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn extent(&self) -> GridExtent {
        self.geometry.extent
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pool(&self) -> &CellPool {
        &self.pool
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }
}

fn sanitize_length(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
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
    use crate::cell_ref::to_id;
    use crate::types::{CellContent, CellValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 800x400 cell area below 48x32 headers.
    fn controller() -> GridController<Sheet> {
        let mut grid = GridController::with_blank_sheet(GridConfig::default()).unwrap();
        grid.resize(Size::new(848.0, 432.0));
        grid
    }

    fn center(grid: &GridController<Sheet>, row: u32, col: u32) -> Point {
        let rect = grid.geometry().cell_rect(CellCoord::new(row, col), grid.scroll());
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_click_then_drag_selects_range() {
        let mut grid = controller();
        let p = center(&grid, 1, 1);
        assert!(grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE));
        assert!(grid.is_dragging());
        let p = center(&grid, 3, 2);
        assert!(grid.pointer_move(p));
        assert_eq!(grid.selection().len(), 6);
        assert_eq!(grid.selection().active(), Some(to_id(3, 2)));
        assert_eq!(grid.selection().anchor(), Some(to_id(1, 1)));
        assert!(grid.pointer_up());
        assert!(!grid.pointer_up());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut grid = controller();
        let p = center(&grid, 0, 0);
        assert!(!grid.pointer_down(p, PointerButton::Secondary, Modifiers::NONE));
        assert!(grid.selection().is_empty());
    }

    #[test]
    fn test_header_press_ignored() {
        let mut grid = controller();
        assert!(!grid.pointer_down(Point::new(10.0, 100.0), PointerButton::Primary, Modifiers::NONE));
        assert!(!grid.is_dragging());
    }

    #[test]
    fn test_ctrl_click_does_not_drag() {
        let mut grid = controller();
        let p = center(&grid, 2, 2);
        grid.pointer_down(p, PointerButton::Primary, Modifiers::CTRL);
        assert!(!grid.is_dragging());
        assert_eq!(grid.selection().active(), Some(to_id(2, 2)));
    }

    #[test]
    fn test_autoscroll_extends_selection() {
        let mut grid = controller();
        let p = center(&grid, 0, 0);
        grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
        // pointer on the bottom edge of the container
        grid.pointer_move(Point::new(100.0, 432.0));
        assert!(grid.wants_autoscroll());
        let before = grid.selection().active().unwrap();
        assert!(grid.autoscroll_tick());
        assert_eq!(grid.scroll().y, 20.0);
        assert!(grid.selection().active().unwrap().row() >= before.row());
        grid.pointer_up();
        assert!(!grid.wants_autoscroll());
        assert!(!grid.autoscroll_tick());
    }

    #[test]
    fn test_autoscroll_stops_at_max_scroll() {
        let mut grid = controller();
        grid.set_scroll(Point::new(0.0, 1.0e6));
        let p = center(&grid, 99, 0);
        grid.pointer_down(p, PointerButton::Primary, Modifiers::NONE);
        grid.pointer_move(Point::new(100.0, 500.0));
        assert!(grid.wants_autoscroll());
        assert!(!grid.autoscroll_tick());
    }

    #[test]
    fn test_arrow_keys_scroll_into_view() {
        let mut grid = controller();
        grid.pointer_down(center(&grid, 10, 0), PointerButton::Primary, Modifiers::NONE);
        grid.pointer_up();
        for _ in 0..5 {
            grid.key_down(Key::ArrowDown, Modifiers::NONE);
        }
        // row 15 ends at 512, area height 400
        assert_eq!(grid.selection().active(), Some(to_id(15, 0)));
        assert_eq!(grid.scroll().y, 112.0);
        assert!(grid.viewport().contains(15, 0));
    }

    #[test]
    fn test_arrow_without_selection_starts_at_origin() {
        let mut grid = controller();
        assert!(grid.key_down(Key::ArrowRight, Modifiers::NONE));
        assert_eq!(grid.selection().active(), Some(to_id(0, 0)));
    }

    #[test]
    fn test_enter_edits_and_commits() {
        let mut grid = controller();
        grid.update_store(|sheet| {
            sheet
                .set_cell(to_id(0, 0), CellValue::Number(3.0), Some("=1+2".into()))
                .unwrap();
        });
        let commits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&commits);
        grid.set_commit_hook(Some(Box::new(move |c: &CellCommit| {
            sink.borrow_mut().push(c.clone());
        })));
        grid.key_down(Key::ArrowDown, Modifiers::NONE);
        grid.key_down(Key::ArrowUp, Modifiers::NONE);
        assert!(grid.key_down(Key::Enter, Modifiers::NONE));
        assert_eq!(grid.edit().draft(), Some("=1+2"));
        grid.set_draft("hello");
        assert!(grid.key_down(Key::Enter, Modifiers::NONE));
        assert!(!grid.edit().is_editing());
        assert_eq!(
            grid.store().cell(0, 0),
            Some(&CellContent::new(CellValue::Text("hello".into())))
        );
        assert_eq!(commits.borrow().len(), 1);
    }

    #[test]
    fn test_load_store_revalidates() {
        let mut grid = controller();
        grid.key_down(Key::ArrowRight, Modifiers::NONE);
        grid.set_scroll(Point::new(0.0, 2000.0));
        grid.pointer_down(center(&grid, 70, 5), PointerButton::Primary, Modifiers::NONE);
        grid.begin_edit(to_id(70, 5));
        grid.load_store(Sheet::new("Small", GridExtent::new(10, 3)));
        assert!(!grid.is_dragging());
        assert!(!grid.edit().is_editing());
        assert_eq!(grid.selection().active(), Some(to_id(9, 2)));
        assert_eq!(grid.scroll(), Point::default());
        assert_eq!(grid.viewport().end_row, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig {
            cell_width: 0.0,
            ..GridConfig::default()
        };
        assert!(GridController::with_blank_sheet(config).is_err());
    }
}
