//! Entrance animations
//!
//! One shared observer reveals animatable elements as they scroll in.
//! [`Animations::refresh`] may be called any number of times, for example
//! after content is injected: new elements are picked up, known ones are
//! left alone.

use std::time::Duration;

use apcea::animation::{animation_selector, stagger_indices, STAGGER_PROPERTY, STAGGER_SELECTOR, VISIBLE_CLASS};
use apcea::config::AnimationConfig;
use apcea::ObserverOptions;
use wasm_bindgen::JsValue;
use web_sys::{Document, Node};

use crate::dom;
use crate::observer::OnceObserver;

pub struct Animations {
    observer: OnceObserver,
    selector: String,
}

impl Animations {
    pub fn new(config: &AnimationConfig) -> Result<Self, JsValue> {
        let observer = OnceObserver::new(&ObserverOptions::from(config), |element| {
            dom::set_class(element, VISIBLE_CLASS, true);
        })?;
        Ok(Self {
            observer,
            selector: animation_selector(),
        })
    }

    /// Number each stagger container's children, then observe anything new
    pub fn refresh(&self, document: &Document) -> usize {
        apply_stagger(document);
        self.scan(document)
    }

    pub fn scan(&self, document: &Document) -> usize {
        self.scan_within(document)
    }

    /// Observe new animatable elements under `scope`
    ///
    /// Returns how many were not seen before.
    pub fn scan_within(&self, scope: &impl AsRef<Node>) -> usize {
        let candidates = dom::query_all(scope, &self.selector).into_iter().map(|element| {
            let visible = dom::has_class(&element, VISIBLE_CLASS);
            (element, visible)
        });
        let observed = self.observer.observe(candidates);
        tracing::debug!(observed, pending = self.observer.pending(), "Animation scan");
        observed
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

/// Set the stagger index on every child of every stagger container
pub fn apply_stagger(document: &Document) {
    for container in dom::query_all(document, STAGGER_SELECTOR) {
        let children = container.children();
        for (i, value) in stagger_indices(children.length() as usize).enumerate() {
            if let Some(child) = children.item(i as u32) {
                dom::set_style(&child, STAGGER_PROPERTY, &value);
            }
        }
    }
}

/// First scan after layout has settled: one animation frame, then a short
/// delay
pub async fn settle(config: &AnimationConfig) {
    let frame = js_sys::Promise::new(&mut |resolve, _reject| {
        let queued = dom::window().map(|w| w.request_animation_frame(&resolve));
        if !matches!(queued, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(frame).await;
    gloo_timers::future::sleep(Duration::from_millis(config.settle_delay_ms as u64)).await;
}
