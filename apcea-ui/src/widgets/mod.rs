//! Widget controllers
//!
//! Each controller mirrors one of the core state machines onto the DOM and
//! owns its listeners, so it can be torn down with [`Widget::dispose`].

pub mod accordion;
pub mod counter;
pub mod tabs;

pub use accordion::AccordionController;
pub use counter::CounterController;
pub use tabs::TabsController;

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

/// A bound widget that can be detached from the page
pub trait Widget {
    fn dispose(&mut self);
}

/// Bind every tab container, accordion and counter already on the page
pub fn bind_all(document: &Document, counter_config: &apcea::config::AnimationConfig) -> Vec<Box<dyn Widget>> {
    let mut widgets: Vec<Box<dyn Widget>> = Vec::new();

    for container in dom::query_all(document, tabs::CONTAINER_SELECTOR) {
        push(&mut widgets, TabsController::bind_scope(&container), "tabs");
    }
    for scope in dom::query_all(document, accordion::SCOPE_SELECTOR) {
        push(&mut widgets, AccordionController::bind(&scope), "accordion");
    }
    push(&mut widgets, CounterController::bind(document, counter_config), "counters");

    tracing::debug!(count = widgets.len(), "Widgets bound");
    widgets
}

fn push<W: Widget + 'static>(widgets: &mut Vec<Box<dyn Widget>>, widget: Result<W, JsValue>, kind: &str) {
    match widget {
        Ok(widget) => widgets.push(Box::new(widget)),
        Err(e) => tracing::warn!(kind, error = ?e, "Failed to bind widget"),
    }
}
