//! Selection engine: selected cells, the active (focused) cell, and the anchor
//! that range operations extend from.
//!
//! Invariants:
//! - `active`, when set, is a member of `selected`
//! - `anchor` only changes on [`SelectionEngine::select_single`], on a toggle
//!   while no anchor exists, or on a bulk [`SelectionEngine::select_cells`]

use std::collections::BTreeSet;

use crate::cell_ref::CellId;
use crate::types::{CellRange, GridExtent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionEngine {
    selected: BTreeSet<CellId>,
    active: Option<CellId>,
    anchor: Option<CellId>,
    revision: u64,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select exactly one cell; it becomes both active and anchor.
    pub fn select_single(&mut self, id: CellId) {
        self.selected.clear();
        self.selected.insert(id);
        self.active = Some(id);
        self.anchor = Some(id);
        self.bump();
    }

    /// Select the inclusive rectangle spanned by `anchor` and `target`.
    ///
    /// `target` becomes active; the stored anchor is left untouched.
    pub fn select_range(&mut self, anchor: CellId, target: CellId) {
        let range = CellRange::new(anchor.coord(), target.coord());
        self.selected = range.ids().collect();
        self.active = Some(target);
        self.bump();
    }

    /// Flip membership of `id` without moving the active cell.
    ///
    /// Sets the anchor when none exists. Returns whether `id` is now selected.
    /// If the active cell itself is removed it is unset, so the active cell
    /// never points outside the selection.
    pub fn toggle(&mut self, id: CellId) -> bool {
        let added = if self.selected.remove(&id) {
            if self.active == Some(id) {
                self.active = None;
            }
            false
        } else {
            self.selected.insert(id);
            true
        };
        if self.anchor.is_none() {
            self.anchor = Some(id);
        }
        self.bump();
        added
    }

    /// Ctrl/cmd-click: toggle `id` and focus it when it was added.
    pub fn toggle_with_focus(&mut self, id: CellId) -> bool {
        let added = self.toggle(id);
        if added {
            self.active = Some(id);
        }
        added
    }

    /// Shift-click / shift+arrow: range from the anchor (or the active cell) to `id`.
    pub fn extend(&mut self, id: CellId) {
        match self.anchor.or(self.active) {
            Some(from) => self.select_range(from, id),
            None => self.select_single(id),
        }
    }

    /// Replace the selection with `ids`; the first one becomes active and anchor.
    pub fn select_cells(&mut self, ids: impl IntoIterator<Item = CellId>) {
        let mut ids = ids.into_iter();
        let Some(first) = ids.next() else {
            self.clear();
            return;
        };
        self.selected.clear();
        self.selected.insert(first);
        self.selected.extend(ids);
        self.active = Some(first);
        self.anchor = Some(first);
        self.bump();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.active = None;
        self.anchor = None;
        self.bump();
    }

    /// Drop or clamp references that no longer fit a (possibly smaller) sheet.
    ///
    /// Selected cells outside the extent are removed. Active and anchor are
    /// clamped to the nearest in-bounds cell, and a clamped active cell is
    /// re-added to the selection. An empty sheet clears everything.
    pub fn revalidate(&mut self, extent: GridExtent) {
        let Some(last) = extent.last_cell() else {
            if !self.selected.is_empty() || self.active.is_some() || self.anchor.is_some() {
                self.clear();
            }
            return;
        };
        let inside = |id: &CellId| extent.contains(id.coord());
        if self.selected.iter().all(inside)
            && self.active.iter().all(inside)
            && self.anchor.iter().all(inside)
        {
            return;
        }

        let clamp = |id: CellId| CellId::new(id.row().min(last.row), id.col().min(last.col));
        let before = self.selected.len();
        self.selected.retain(inside);
        self.anchor = self.anchor.map(clamp);
        if let Some(active) = self.active.map(clamp) {
            self.selected.insert(active);
            self.active = Some(active);
        }
        tracing::debug!(
            removed = before.saturating_sub(self.selected.len()),
            rows = extent.rows,
            cols = extent.cols,
            "selection revalidated against smaller sheet"
        );
        self.bump();
    }

    pub fn is_selected(&self, id: CellId) -> bool {
        self.selected.contains(&id)
    }

    pub fn active(&self) -> Option<CellId> {
        self.active
    }

    pub fn anchor(&self) -> Option<CellId> {
        self.anchor
    }

    /// Selected ids in row-major order.
    pub fn selected_ids(&self) -> Vec<CellId> {
        self.selected.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Smallest rectangle containing the whole selection.
    pub fn bounding_range(&self) -> Option<CellRange> {
        let first = self.selected.first()?;
        let (mut min_row, mut min_col) = (first.row(), first.col());
        let (mut max_row, mut max_col) = (min_row, min_col);
        for id in &self.selected {
            min_row = min_row.min(id.row());
            max_row = max_row.max(id.row());
            min_col = min_col.min(id.col());
            max_col = max_col.max(id.col());
        }
        Some(CellRange::new(
            (min_row, min_col).into(),
            (max_row, max_col).into(),
        ))
    }

    /// Incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
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
    fn test_select_single_sets_everything() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(4, 2));
        assert_eq!(sel.selected_ids(), vec![to_id(4, 2)]);
        assert_eq!(sel.active(), Some(to_id(4, 2)));
        assert_eq!(sel.anchor(), Some(to_id(4, 2)));
    }

    #[test]
    fn test_select_single_is_not_skipped_when_repeated() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(1, 1));
        let rev = sel.revision();
        sel.select_single(to_id(1, 1));
        assert!(sel.revision() > rev);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_range_keeps_anchor() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(0, 0));
        sel.select_range(to_id(0, 0), to_id(2, 2));
        assert_eq!(sel.len(), 9);
        assert_eq!(sel.anchor(), Some(to_id(0, 0)));
        assert_eq!(sel.active(), Some(to_id(2, 2)));
    }

    #[test]
    fn test_toggle_sets_anchor_when_missing() {
        let mut sel = SelectionEngine::new();
        assert!(sel.toggle(to_id(3, 3)));
        assert_eq!(sel.anchor(), Some(to_id(3, 3)));
        assert_eq!(sel.active(), None);
        assert!(!sel.toggle(to_id(3, 3)));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_off_active_unsets_it() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(0, 0));
        sel.toggle_with_focus(to_id(0, 1));
        assert_eq!(sel.active(), Some(to_id(0, 1)));
        sel.toggle_with_focus(to_id(0, 1));
        assert_eq!(sel.active(), None);
        assert_eq!(sel.selected_ids(), vec![to_id(0, 0)]);
        assert_eq!(sel.anchor(), Some(to_id(0, 0)));
    }

    #[test]
    fn test_extend_without_anchor_or_active_selects_single() {
        let mut sel = SelectionEngine::new();
        sel.extend(to_id(5, 5));
        assert_eq!(sel.selected_ids(), vec![to_id(5, 5)]);
        assert_eq!(sel.anchor(), Some(to_id(5, 5)));
    }

    #[test]
    fn test_select_cells_first_becomes_active() {
        let mut sel = SelectionEngine::new();
        sel.select_cells([to_id(9, 0), to_id(1, 1), to_id(9, 0)]);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.active(), Some(to_id(9, 0)));
        assert_eq!(sel.selected_ids(), vec![to_id(1, 1), to_id(9, 0)]);
        sel.select_cells([]);
        assert!(sel.is_empty());
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn test_revalidate_after_shrink() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(1, 1));
        sel.select_range(to_id(1, 1), to_id(8, 8));
        sel.revalidate(GridExtent::new(5, 5));
        assert!(sel.iter().all(|id| id.row() < 5 && id.col() < 5));
        assert_eq!(sel.active(), Some(to_id(4, 4)));
        assert!(sel.is_selected(to_id(4, 4)));
        assert_eq!(sel.anchor(), Some(to_id(1, 1)));
        assert_eq!(sel.len(), 16);
    }

    #[test]
    fn test_revalidate_empty_sheet_clears() {
        let mut sel = SelectionEngine::new();
        sel.select_single(to_id(0, 0));
        sel.revalidate(GridExtent::new(0, 0));
        assert!(sel.is_empty());
        assert_eq!(sel.active(), None);
        assert_eq!(sel.anchor(), None);
    }

    #[test]
    fn test_bounding_range() {
        let mut sel = SelectionEngine::new();
        sel.toggle(to_id(5, 1));
        sel.toggle(to_id(2, 4));
        let range = sel.bounding_range().unwrap();
        assert_eq!(range.bounds(), (2, 1, 5, 4));
    }
}
