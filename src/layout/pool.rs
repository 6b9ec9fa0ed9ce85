//! Fixed-capacity pool of render slots that follows the viewport.
//!
//! Slots are reassigned in place on every scroll tick. The backing vector is
//! only reallocated when the window dimensions change (container resize).

use crate::cell_ref::CellCoord;
use crate::types::GridExtent;

use super::Viewport;

/// One reusable render slot. `cell` is `None` when the slot falls outside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSlot {
    pub cell: Option<CellCoord>,
}

#[derive(Debug, Default)]
pub struct CellPool {
    slots: Vec<PoolSlot>,
    rows: u32,
    cols: u32,
    generation: u64,
}

impl CellPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reposition every slot for `viewport`.
    ///
    /// Returns `true` when the pool had to be resized.
    pub fn reposition(&mut self, viewport: &Viewport, extent: GridExtent) -> bool {
        let resized = self.rows != viewport.visible_rows || self.cols != viewport.visible_cols;
        if resized {
            let len = usize::try_from(u64::from(viewport.visible_rows) * u64::from(viewport.visible_cols))
                .unwrap_or(0);
            self.slots = vec![PoolSlot { cell: None }; len];
            self.rows = viewport.visible_rows;
            self.cols = viewport.visible_cols;
            tracing::trace!(rows = self.rows, cols = self.cols, "cell pool resized");
        }

        let cols = u64::from(self.cols.max(1));
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let i = i as u64;
            let row = u64::from(viewport.start_row) + i / cols;
            let col = u64::from(viewport.start_col) + i % cols;
            slot.cell = match (u32::try_from(row), u32::try_from(col)) {
                (Ok(row), Ok(col)) if extent.contains(CellCoord::new(row, col)) => {
                    Some(CellCoord::new(row, col))
                }
                _ => None,
            };
        }
        self.generation = self.generation.wrapping_add(1);
        resized
    }

    pub fn slots(&self) -> &[PoolSlot] {
        &self.slots
    }

    /// Coordinates of every slot that currently maps to a cell.
    pub fn occupied(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.slots.iter().filter_map(|slot| slot.cell)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Bumped on every reposition; lets renderers skip unchanged frames.
    pub fn generation(&self) -> u64 {
        self.generation
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
    use crate::layout::ViewportInput;
    use crate::types::{Point, Size};

    fn viewport(scroll_y: f32, height: f32) -> Viewport {
        Viewport::compute(&ViewportInput {
            scroll: Point::new(0.0, scroll_y),
            container: Size::new(256.0, height),
            cell: Size::new(128.0, 32.0),
            extent: GridExtent::new(10, 3),
            buffer: 1,
        })
    }

    #[test]
    fn test_slots_follow_viewport() {
        let mut pool = CellPool::new();
        let extent = GridExtent::new(10, 3);
        assert!(pool.reposition(&viewport(0.0, 64.0), extent));
        assert_eq!(pool.dimensions(), (3, 3));
        assert_eq!(pool.slots()[0].cell, Some(CellCoord::new(0, 0)));
        assert_eq!(pool.slots()[4].cell, Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn test_scroll_reuses_slots() {
        let mut pool = CellPool::new();
        let extent = GridExtent::new(10, 3);
        pool.reposition(&viewport(0.0, 64.0), extent);
        let ptr = pool.slots().as_ptr();
        assert!(!pool.reposition(&viewport(96.0, 64.0), extent));
        assert_eq!(pool.slots().as_ptr(), ptr);
        assert_eq!(pool.slots()[0].cell, Some(CellCoord::new(3, 0)));
    }

    #[test]
    fn test_slots_past_extent_are_empty() {
        let mut pool = CellPool::new();
        let extent = GridExtent::new(10, 3);
        pool.reposition(&viewport(9.0 * 32.0, 64.0), extent);
        // start row 9, three pool rows: only row 9 exists
        assert_eq!(pool.occupied().count(), 3);
        assert!(pool.slots()[3..].iter().all(|slot| slot.cell.is_none()));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut pool = CellPool::new();
        let extent = GridExtent::new(10, 3);
        pool.reposition(&viewport(0.0, 64.0), extent);
        assert!(pool.reposition(&viewport(0.0, 128.0), extent));
        assert_eq!(pool.dimensions(), (5, 3));
        assert_eq!(pool.capacity(), 15);
    }
}
