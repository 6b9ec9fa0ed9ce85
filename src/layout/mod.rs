//! Layout engine: viewport window, render-slot pool, and pixel geometry.
//!
//! This module handles:
//! - Translating scroll position and container size into a visible cell window
//! - Repositioning a fixed pool of render slots as the window moves
//! - Hit testing container points to cells and clamping scroll offsets

mod geometry;
mod pool;
mod viewport;

pub use geometry::GridGeometry;
pub use pool::{CellPool, PoolSlot};
pub use viewport::{Viewport, ViewportInput};
