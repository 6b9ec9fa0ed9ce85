//! DOM `<input>` overlay positioned over the cell being edited.
//!
//! The overlay only owns the element. Its input/keydown/blur listeners are
//! registered by the view so they can reach the shared grid state.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::types::Rect;

pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
}

impl InputOverlay {
    pub(crate) fn new() -> Self {
        InputOverlay { input: None }
    }

    /// Create the element inside `container` if it does not exist yet.
    pub(crate) fn ensure(&mut self, container: &HtmlElement) -> Option<HtmlInputElement> {
        if self.input.is_none() {
            let document: Document = web_sys::window()?.document()?;
            let input = document
                .create_element("input")
                .ok()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            input.set_type("text");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "1000");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", "2px solid #4285f4");
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 8px");
            let _ = style.set_property("font-family", "inherit");
            let _ = style.set_property("font-size", "12px");
            let _ = style.set_property("background", "#fff");
            let _ = style.set_property("display", "none");
            let _ = container.append_child(&input);
            self.input = Some(input);
        }
        self.input.clone()
    }

    /// Show the overlay over `rect` with `value` preselected.
    ///
    /// `rect` is relative to the visible container; the overlay lives in the
    /// scrolled content, so the current scroll offset is added back.
    pub(crate) fn show(&self, rect: &Rect, value: &str, scroll_left: f32, scroll_top: f32) {
        let Some(input) = self.input.as_ref() else {
            return;
        };
        self.place(rect, scroll_left, scroll_top);
        let _ = input.style().set_property("display", "block");
        input.set_value(value);
        let _ = input.focus();
        input.select();
    }

    /// Move the overlay without touching its value or focus.
    pub(crate) fn place(&self, rect: &Rect, scroll_left: f32, scroll_top: f32) {
        let Some(input) = self.input.as_ref() else {
            return;
        };
        let style = input.style();
        let _ = style.set_property("left", &format!("{}px", rect.x + scroll_left));
        let _ = style.set_property("top", &format!("{}px", rect.y + scroll_top));
        let _ = style.set_property("width", &format!("{}px", rect.width));
        let _ = style.set_property("height", &format!("{}px", rect.height));
    }

    /// Hide the overlay without blurring through the commit path.
    pub(crate) fn hide(&self) {
        if let Some(input) = self.input.as_ref() {
            let _ = input.style().set_property("display", "none");
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.input
            .as_ref()
            .and_then(|input| input.style().get_property_value("display").ok())
            .is_some_and(|display| display == "block")
    }

    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(HtmlInputElement::value)
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
