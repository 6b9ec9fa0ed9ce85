//! `GridView` - the WASM-exported DOM binding for the grid core.
//!
//! The view owns every raw listener and funnels events into one
//! [`GridController`]. It handles:
//! - Pointer, keyboard, scroll and focus events on the container and window
//! - Container size tracking through a `ResizeObserver`
//! - Drag autoscroll driven by `requestAnimationFrame`
//! - The `<input>` overlay used for cell editing
//!
//! Painting is left to the host: the render callback fires whenever state
//! changed and [`GridView::frame`] returns the projected frame.

mod events;
mod scroll;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlDivElement, HtmlElement, ResizeObserver};

use crate::cell_ref::{cell_reference, CellId};
use crate::config::GridConfig;
use crate::controller::GridController;
use crate::editor::input::InputOverlay;
use crate::editor::CellCommit;
use crate::render;
use crate::store::{CellStore, Sheet};
use crate::types::{CellContent, GridExtent, Point, Size};

/// Shared state reachable from every event closure.
pub(crate) struct SharedState {
    pub(crate) grid: GridController<Sheet>,
    pub(crate) container: HtmlElement,
    pub(crate) spacer: Option<HtmlDivElement>,
    pub(crate) overlay: InputOverlay,
    pub(crate) render_callback: Option<Function>,
    pub(crate) commit_callback: Option<Function>,
    /// Commits recorded by the controller hook, delivered once the borrow is released
    pub(crate) pending_commits: Rc<RefCell<Vec<CellCommit>>>,
    pub(crate) frame_request: Option<i32>,
    pub(crate) frame_closure: Option<Closure<dyn FnMut(f64)>>,
}

/// A registered DOM listener, removed again on drop.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Sheet payload accepted by [`GridView::load_sheet`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SheetData {
    name: Option<String>,
    /// Optional explicit size; cells outside `rows` are padded with blanks
    rows: Option<u32>,
    cols: Option<u32>,
    cells: Vec<Vec<CellContent>>,
}

impl SheetData {
    fn into_sheet(self) -> Sheet {
        let name = self.name.unwrap_or_else(|| "Sheet1".to_string());
        let mut sheet = Sheet::from_rows(name, self.cells);
        let loaded = sheet.extent();
        let extent = GridExtent::new(
            self.rows.unwrap_or(0).max(loaded.rows),
            self.cols.unwrap_or(0).max(loaded.cols),
        );
        sheet.resize(extent);
        sheet
    }
}

/// The grid view exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    state: Rc<RefCell<SharedState>>,
    listeners: Vec<Listener>,
    resize_observer: Option<ResizeObserver>,
    #[allow(dead_code)] // keeps the observer callback alive
    resize_closure: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

#[wasm_bindgen]
impl GridView {
    /// Attach a grid to a scroll container element.
    ///
    /// `options` is an optional `GridConfig` object (camelCase keys).
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if options.is_undefined() || options.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let mut grid = GridController::with_blank_sheet(config)?;

        let pending_commits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending_commits);
        grid.set_commit_hook(Some(Box::new(move |commit: &CellCommit| {
            sink.borrow_mut().push(commit.clone());
        })));

        let style = container.style();
        if style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = style.set_property("position", "relative");
        }
        let _ = style.set_property("overflow", "auto");
        let _ = style.set_property("outline", "none");
        let _ = style.set_property("touch-action", "none");
        let _ = container.set_attribute("tabindex", "0");
        let _ = container.set_attribute("data-sheetgrid", "");

        grid.resize(client_size(&container));
        let spacer = scroll::create_spacer(&container);

        let state = Rc::new(RefCell::new(SharedState {
            grid,
            container: container.clone(),
            spacer,
            overlay: InputOverlay::new(),
            render_callback: None,
            commit_callback: None,
            pending_commits,
            frame_request: None,
            frame_closure: None,
        }));
        let input = {
            let mut s = state.borrow_mut();
            scroll::sync_spacer(&s);
            s.overlay.ensure(&container)
        };

        let mut listeners = events::register(&state, &container);
        if let Some(input) = input {
            listeners.extend(events::register_input(&state, &input));
        }
        let (resize_observer, resize_closure) = scroll::observe_resize(&state, &container);
        tracing::debug!(listeners = listeners.len(), "grid view attached");

        Ok(GridView {
            state,
            listeners,
            resize_observer,
            resize_closure,
        })
    }

    /// Called whenever the grid needs repainting.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Called with `{ cell, value, formula? }` after an edit is written.
    #[wasm_bindgen(js_name = "setCommitCallback")]
    pub fn set_commit_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().commit_callback = callback;
    }

    /// Replace the sheet. Accepts `{ name?, rows?, cols?, cells: CellContent[][] }`.
    #[wasm_bindgen(js_name = "loadSheet")]
    pub fn load_sheet(&mut self, data: JsValue) -> Result<(), JsValue> {
        let data: SheetData = serde_wasm_bindgen::from_value(data)?;
        let sheet = data.into_sheet();
        let dispatch = {
            let mut s = self.state.borrow_mut();
            s.grid.load_store(sheet);
            scroll::sync_spacer(&s);
            scroll::write_scroll(&s);
            events::sync_overlay(&mut s);
            scroll::cancel_autoscroll(&mut s);
            events::Dispatch::collect(&s, true)
        };
        dispatch.run();
        Ok(())
    }

    /// Render frame for the current state (see `RenderFrame`).
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let frame = render::project(&s.grid);
        Ok(serde_wasm_bindgen::to_value(&frame)?)
    }

    pub fn viewport(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        Ok(serde_wasm_bindgen::to_value(s.grid.viewport())?)
    }

    /// Selected cell ids in row-major order.
    pub fn selection(&self) -> Vec<String> {
        let s = self.state.borrow();
        s.grid
            .selection()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[wasm_bindgen(js_name = "activeCell")]
    pub fn active_cell(&self) -> Option<String> {
        let s = self.state.borrow();
        s.grid.selection().active().map(|id| id.to_string())
    }

    /// A1-style reference of the active cell, for a name box.
    #[wasm_bindgen(js_name = "activeReference")]
    pub fn active_reference(&self) -> Option<String> {
        let s = self.state.borrow();
        s.grid
            .selection()
            .active()
            .map(|id| cell_reference(id.row(), id.col()))
    }

    /// Replace the selection with the given ids. Malformed ids are rejected.
    #[wasm_bindgen(js_name = "selectCells")]
    pub fn select_cells(&mut self, ids: Vec<String>) -> Result<(), JsValue> {
        let ids = ids
            .iter()
            .map(|id| id.parse::<CellId>())
            .collect::<crate::error::Result<Vec<_>>>()?;
        let dispatch = {
            let mut s = self.state.borrow_mut();
            s.grid.select_cells(ids);
            events::Dispatch::collect(&s, true)
        };
        dispatch.run();
        Ok(())
    }

    /// Open the editor on the active cell.
    #[wasm_bindgen(js_name = "beginEdit")]
    pub fn begin_edit(&mut self) -> bool {
        let (changed, dispatch) = {
            let mut s = self.state.borrow_mut();
            let changed = s
                .grid
                .selection()
                .active()
                .is_some_and(|active| s.grid.begin_edit(active));
            events::sync_overlay(&mut s);
            (changed, events::Dispatch::collect(&s, changed))
        };
        dispatch.run();
        changed
    }

    #[wasm_bindgen(js_name = "commitEdit")]
    pub fn commit_edit(&mut self) -> bool {
        let (changed, dispatch) = {
            let mut s = self.state.borrow_mut();
            if let Some(value) = s.overlay.value() {
                s.grid.set_draft(&value);
            }
            let changed = s.grid.commit_edit().is_some();
            events::sync_overlay(&mut s);
            (changed, events::Dispatch::collect(&s, changed))
        };
        dispatch.run();
        changed
    }

    #[wasm_bindgen(js_name = "cancelEdit")]
    pub fn cancel_edit(&mut self) -> bool {
        let (changed, dispatch) = {
            let mut s = self.state.borrow_mut();
            let changed = s.grid.cancel_edit();
            events::sync_overlay(&mut s);
            (changed, events::Dispatch::collect(&s, changed))
        };
        dispatch.run();
        changed
    }
}

impl Drop for GridView {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        if let Ok(mut s) = self.state.try_borrow_mut() {
            scroll::cancel_autoscroll(&mut s);
            s.frame_closure = None;
            s.grid.set_commit_hook(None);
            if let Some(spacer) = s.spacer.take() {
                spacer.remove();
            }
        }
        tracing::debug!("grid view detached");
    }
}

/// Inner size of the container, scrollbars excluded.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn client_size(element: &HtmlElement) -> Size {
    Size::new(element.client_width() as f32, element.client_height() as f32)
}

/// Event position relative to the container's top-left corner.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn relative_point(element: &HtmlElement, client_x: i32, client_y: i32) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}
