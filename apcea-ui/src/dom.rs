//! DOM helpers
//!
//! Thin wrappers over `web-sys` for lookups, classes and event listeners.
//! Listeners are returned as [`Subscription`]s that detach on dispose.

use apcea::Subscription;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// All elements under `scope` matching `selector`
///
/// An invalid selector yields nothing.
pub fn query_all(scope: &impl AsRef<web_sys::Node>, selector: &str) -> Vec<Element> {
    let node: &web_sys::Node = scope.as_ref();
    let list = if let Some(element) = node.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else if let Some(document) = node.dyn_ref::<Document>() {
        document.query_selector_all(selector)
    } else {
        return Vec::new();
    };

    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element in the document matching `selector`
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Add or remove `class` so that its presence matches `on`
pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

/// Current vertical scroll offset
pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Attach `handler` to `event` on `target`
pub fn listen<E, H>(target: &EventTarget, event: &'static str, handler: H) -> Result<Subscription, JsValue>
where
    E: JsCast + 'static,
    H: FnMut(E) + 'static,
{
    attach(target, event, handler, None)
}

/// Same as [`listen`] but registered as passive, for scroll handlers
pub fn listen_passive<E, H>(
    target: &EventTarget,
    event: &'static str,
    handler: H,
) -> Result<Subscription, JsValue>
where
    E: JsCast + 'static,
    H: FnMut(E) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    attach(target, event, handler, Some(options))
}

fn attach<E, H>(
    target: &EventTarget,
    event: &'static str,
    mut handler: H,
    options: Option<AddEventListenerOptions>,
) -> Result<Subscription, JsValue>
where
    E: JsCast + 'static,
    H: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    match &options {
        Some(options) => target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            options,
        )?,
        None => target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?,
    }

    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    }))
}

/// Run `callback` on the next animation frame
pub fn request_animation_frame(callback: impl FnOnce(f64) + 'static) -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure = Closure::once_into_js(callback);
    window.request_animation_frame(closure.unchecked_ref())?;
    Ok(())
}
