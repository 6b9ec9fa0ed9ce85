//! sheetgrid - virtualized spreadsheet grid core for the web
//!
//! Everything a spreadsheet UI needs between raw browser events and painting:
//! - Reversible cell identifiers and A1 references
//! - Viewport windowing with a reusable cell pool
//! - Multi-cell selection with anchor/active tracking
//! - Pointer drag selection with edge autoscroll
//! - A single-cell edit session that commits through a data store
//!
//! The core is plain Rust and fully testable natively. On `wasm32` the
//! [`GridView`] binding wires it to a DOM scroll container.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'sheetgrid';
//! await init();
//! const view = new GridView(container, { cellHeight: 28 });
//! view.setRenderCallback(() => paint(view.frame()));
//! view.setCommitCallback((commit) => save(commit));
//! view.loadSheet({ name: 'Sheet1', cells });
//! ```

pub mod cell_ref;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod layout;
pub mod render;
pub mod selection;
pub mod store;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use cell_ref::{cell_reference, column_label, from_id, parse_cell_ref, to_id, CellCoord, CellId};
pub use config::GridConfig;
pub use controller::{GridController, Key, Modifiers, PointerButton};
pub use editor::{classify_draft, CellCommit, EditSession, EditState};
pub use error::{GridError, Result};
pub use layout::{CellPool, GridGeometry, Viewport, ViewportInput};
pub use render::{project, RenderFrame};
pub use selection::SelectionEngine;
pub use store::{CellStore, Sheet};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
