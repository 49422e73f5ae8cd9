//! DOM-backed HUD sinks

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::hud::{StatusSink, TextSink};

/// Sets the text content of an element
pub struct DomText(pub Element);

impl TextSink for DomText {
    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// Sets text content and CSS color of an element
pub struct DomStatus(pub Element);

impl StatusSink for DomStatus {
    fn set_status(&mut self, text: &str, color: &str) {
        self.0.set_text_content(Some(text));
        if let Some(el) = self.0.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property("color", color);
        }
    }
}
