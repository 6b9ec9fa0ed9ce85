//! Scroll plumbing for `GridView`.
//!
//! Includes the content spacer that gives the container its scroll range,
//! container resize tracking, and the drag autoscroll frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDivElement, HtmlElement, ResizeObserver};

use super::events::{sync_overlay, Dispatch};
use super::{client_size, SharedState};

/// Empty absolutely-positioned child sized to the full sheet.
pub(crate) fn create_spacer(container: &HtmlElement) -> Option<HtmlDivElement> {
    let document = web_sys::window()?.document()?;
    let spacer = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlDivElement>()
        .ok()?;
    let style = spacer.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("top", "0");
    let _ = style.set_property("left", "0");
    let _ = style.set_property("pointer-events", "none");
    let _ = container.append_child(&spacer);
    Some(spacer)
}

/// Size the spacer to headers plus every row and column.
pub(crate) fn sync_spacer(s: &SharedState) {
    let Some(spacer) = s.spacer.as_ref() else {
        return;
    };
    let geometry = s.grid.geometry();
    let width = geometry.header.width + geometry.total_width();
    let height = geometry.header.height + geometry.total_height();
    let style = spacer.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
}

/// Push the controller's scroll offset to the container.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn write_scroll(s: &SharedState) {
    let scroll = s.grid.scroll();
    let (left, top) = (scroll.x.round() as i32, scroll.y.round() as i32);
    if s.container.scroll_left() != left {
        s.container.set_scroll_left(left);
    }
    if s.container.scroll_top() != top {
        s.container.set_scroll_top(top);
    }
}

/// Track container size changes.
pub(crate) fn observe_resize(
    state: &Rc<RefCell<SharedState>>,
    container: &HtmlElement,
) -> (Option<ResizeObserver>, Option<Closure<dyn FnMut(js_sys::Array)>>) {
    let weak_state = Rc::downgrade(state);
    let element = container.clone();
    let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        let Some(state) = weak_state.upgrade() else {
            return;
        };
        let dispatch = {
            let Ok(mut s) = state.try_borrow_mut() else {
                return;
            };
            let changed = s.grid.resize(client_size(&element));
            if changed {
                write_scroll(&s);
                sync_overlay(&mut s);
            }
            Dispatch::collect(&s, changed)
        };
        dispatch.run();
    }) as Box<dyn FnMut(js_sys::Array)>);

    match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(container);
            (Some(observer), Some(closure))
        }
        Err(_) => {
            tracing::warn!("ResizeObserver unavailable, container size is fixed");
            (None, None)
        }
    }
}

/// Arm the autoscroll frame loop unless a frame is already pending.
pub(crate) fn request_autoscroll(state: &Rc<RefCell<SharedState>>, s: &mut SharedState) {
    if s.frame_request.is_some() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    if s.frame_closure.is_none() {
        let weak_state = Rc::downgrade(state);
        let closure = Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(state) = weak_state.upgrade() {
                autoscroll_frame(&state);
            }
        }) as Box<dyn FnMut(f64)>);
        s.frame_closure = Some(closure);
    }
    let Some(callback) = s.frame_closure.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => s.frame_request = Some(id),
        Err(_) => tracing::warn!("requestAnimationFrame failed, autoscroll disabled"),
    }
}

/// Cancel a pending autoscroll frame.
pub(crate) fn cancel_autoscroll(s: &mut SharedState) {
    let Some(id) = s.frame_request.take() else {
        return;
    };
    if let Some(window) = web_sys::window() {
        let _ = window.cancel_animation_frame(id);
    }
    tracing::debug!("autoscroll cancelled");
}

/// One animation frame: scroll, re-extend the selection, re-arm while the
/// pointer stays in an edge zone.
fn autoscroll_frame(state: &Rc<RefCell<SharedState>>) {
    let dispatch = {
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        s.frame_request = None;
        let moved = s.grid.autoscroll_tick();
        if moved {
            write_scroll(&s);
        }
        if s.grid.wants_autoscroll() {
            request_autoscroll(state, &mut s);
        } else {
            tracing::debug!("autoscroll stopped");
        }
        Dispatch::collect(&s, moved)
    };
    dispatch.run();
}
