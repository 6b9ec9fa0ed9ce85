//! DOM event wiring for `GridView`.
//!
//! Every handler follows the same shape: borrow the shared state, translate
//! the event, run one controller transition, collect the callbacks to fire,
//! release the borrow, then call into JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent, PointerEvent};

use super::{relative_point, scroll, Listener, SharedState};
use crate::controller::{Key, Modifiers, PointerButton};
use crate::editor::CellCommit;

/// Callbacks gathered while the state was borrowed.
pub(crate) struct Dispatch {
    render: Option<Function>,
    commit: Option<Function>,
    commits: Vec<CellCommit>,
}

impl Dispatch {
    pub(crate) fn collect(s: &SharedState, changed: bool) -> Self {
        let commits = std::mem::take(&mut *s.pending_commits.borrow_mut());
        Self {
            render: if changed {
                s.render_callback.clone()
            } else {
                None
            },
            commit: s.commit_callback.clone(),
            commits,
        }
    }

    /// Fire the callbacks. Must run with the state borrow released, since
    /// JavaScript is free to call back into the view.
    pub(crate) fn run(self) {
        if let Some(callback) = self.commit {
            for commit in &self.commits {
                match serde_wasm_bindgen::to_value(commit) {
                    Ok(value) => {
                        let _ = callback.call1(&JsValue::NULL, &value);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to serialize commit");
                    }
                }
            }
        }
        if let Some(callback) = self.render {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

fn key_modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

/// Show or hide the input overlay to match the edit session.
pub(crate) fn sync_overlay(s: &mut SharedState) {
    let editing = s
        .grid
        .edit()
        .editing_cell()
        .zip(s.grid.edit().draft().map(str::to_owned));
    match editing {
        Some((cell, draft)) => {
            let rect = s.grid.geometry().cell_rect(cell.coord(), s.grid.scroll());
            #[allow(clippy::cast_precision_loss)]
            let (left, top) = (
                s.container.scroll_left() as f32,
                s.container.scroll_top() as f32,
            );
            if s.overlay.is_visible() {
                s.overlay.place(&rect, left, top);
            } else {
                s.overlay.show(&rect, &draft, left, top);
            }
        }
        None => {
            if s.overlay.is_visible() {
                s.overlay.hide();
                let _ = s.container.focus();
            }
        }
    }
}

/// Run `transition` against the borrowed state and fire resulting callbacks.
///
/// Re-entrant events (a blur raised while the overlay is hidden, say) find the
/// state already borrowed and are dropped; the outer handler covers them.
fn handle(state: &Rc<RefCell<SharedState>>, transition: impl FnOnce(&mut SharedState) -> bool) {
    let dispatch = {
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        let changed = transition(&mut s);
        if changed {
            sync_overlay(&mut s);
        }
        Dispatch::collect(&s, changed)
    };
    dispatch.run();
}

/// Container and window listeners.
pub(crate) fn register(state: &Rc<RefCell<SharedState>>, container: &HtmlElement) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let target: &web_sys::EventTarget = container.as_ref();

    // Pointer down: select and start a drag
    {
        let state = Rc::clone(state);
        let container = container.clone();
        listeners.extend(Listener::attach(target, "pointerdown", move |event: Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if event.target().is_some_and(|t| t.has_type::<HtmlInputElement>()) {
                return;
            }
            let point = relative_point(&container, event.client_x(), event.client_y());
            let button = PointerButton::from_dom(event.button());
            let mods = modifiers(event);
            let _ = container.focus();
            handle(&state, |s| s.grid.pointer_down(point, button, mods));
            if button == PointerButton::Primary {
                // keep native text selection out of the drag
                event.prevent_default();
            }
        }));
    }

    // Double click: open the editor
    {
        let state = Rc::clone(state);
        let container = container.clone();
        listeners.extend(Listener::attach(target, "dblclick", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let point = relative_point(&container, event.client_x(), event.client_y());
            handle(&state, |s| {
                let opened = s.grid.double_click(point);
                if opened {
                    scroll::cancel_autoscroll(s);
                }
                opened
            });
        }));
    }

    // Keyboard navigation and editor keys
    {
        let state = Rc::clone(state);
        listeners.extend(Listener::attach(target, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom(&event.key());
            if key == Key::Other {
                return;
            }
            let mods = key_modifiers(event);
            let mut handled = false;
            handle(&state, |s| {
                if key == Key::Enter || key == Key::Escape {
                    if let Some(value) = s.overlay.value() {
                        if s.grid.edit().is_editing() {
                            s.grid.set_draft(&value);
                        }
                    }
                }
                handled = s.grid.key_down(key, mods);
                if handled {
                    scroll::write_scroll(s);
                }
                handled
            });
            if handled {
                event.prevent_default();
            }
        }));
    }

    // Native scroll: the container is the source of truth for the offset
    {
        let state = Rc::clone(state);
        let container = container.clone();
        listeners.extend(Listener::attach(target, "scroll", move |_event: Event| {
            #[allow(clippy::cast_precision_loss)]
            let offset = crate::types::Point::new(
                container.scroll_left() as f32,
                container.scroll_top() as f32,
            );
            handle(&state, |s| {
                let before = s.grid.scroll();
                let after = s.grid.set_scroll(offset);
                if after != offset {
                    scroll::write_scroll(s);
                }
                if s.grid.edit().is_editing() {
                    sync_overlay(s);
                }
                after != before
            });
        }));
    }

    let Some(window) = web_sys::window() else {
        return listeners;
    };
    let window_target: &web_sys::EventTarget = window.as_ref();

    // Pointer move on the window so drags continue past the grid's edge
    {
        let state = Rc::clone(state);
        let container = container.clone();
        listeners.extend(Listener::attach(window_target, "pointermove", move |event: Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let point = relative_point(&container, event.client_x(), event.client_y());
            let rc = Rc::clone(&state);
            handle(&state, |s| {
                let changed = s.grid.pointer_move(point);
                if s.grid.wants_autoscroll() {
                    scroll::request_autoscroll(&rc, s);
                }
                changed
            });
        }));
    }

    // Pointer up anywhere ends the drag
    {
        let state = Rc::clone(state);
        listeners.extend(Listener::attach(window_target, "pointerup", move |_event: Event| {
            handle(&state, |s| {
                scroll::cancel_autoscroll(s);
                s.grid.pointer_up()
            });
        }));
    }

    // Cancelled pointers behave like a release
    {
        let state = Rc::clone(state);
        listeners.extend(Listener::attach(window_target, "pointercancel", move |_event: Event| {
            handle(&state, |s| {
                scroll::cancel_autoscroll(s);
                s.grid.pointer_up()
            });
        }));
    }

    // Window blur: the pointer-up may never arrive
    {
        let state = Rc::clone(state);
        listeners.extend(Listener::attach(window_target, "blur", move |_event: Event| {
            handle(&state, |s| {
                scroll::cancel_autoscroll(s);
                s.grid.blur()
            });
        }));
    }

    listeners
}

/// Listeners on the editor `<input>`.
pub(crate) fn register_input(
    state: &Rc<RefCell<SharedState>>,
    input: &HtmlInputElement,
) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let target: &web_sys::EventTarget = input.as_ref();

    {
        let state = Rc::clone(state);
        let input = input.clone();
        listeners.extend(Listener::attach(target, "input", move |_event: Event| {
            let value = input.value();
            if let Ok(mut s) = state.try_borrow_mut() {
                s.grid.set_draft(&value);
            }
        }));
    }

    // Losing focus commits, matching a form submit
    {
        let state = Rc::clone(state);
        let input = input.clone();
        listeners.extend(Listener::attach(target, "blur", move |_event: Event| {
            let value = input.value();
            handle(&state, |s| {
                if !s.grid.edit().is_editing() {
                    return false;
                }
                s.grid.set_draft(&value);
                s.grid.commit_edit().is_some()
            });
        }));
    }

    listeners
}
