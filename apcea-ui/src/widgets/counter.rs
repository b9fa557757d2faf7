//! Counters
//!
//! Elements with a numeric `data-target` count up once, the first time
//! half of them is in view.

use apcea::config::AnimationConfig;
use apcea::widgets::{parse_target, COUNTER_ATTRIBUTE};
use apcea::{CounterAnimation, ObserverOptions};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Node};

use super::Widget;
use crate::dom;
use crate::observer::OnceObserver;

pub struct CounterController {
    observer: OnceObserver,
}

impl CounterController {
    pub fn bind(document: &Document, config: &AnimationConfig) -> Result<Self, JsValue> {
        Self::bind_within(document, config)
    }

    /// Observe the counters under `scope`
    pub fn bind_within(scope: &impl AsRef<Node>, config: &AnimationConfig) -> Result<Self, JsValue> {
        let options = ObserverOptions {
            threshold: config.counter_threshold,
            root_margin: "0px".to_string(),
        };
        let duration_ms = config.counter_duration_ms as f64;
        let observer = OnceObserver::new(&options, move |element| {
            if let Some(target) = target_of(element) {
                run(element.clone(), CounterAnimation::start(target, duration_ms, dom::now_ms()));
            }
        })?;

        // Non-numeric targets are never observed
        let selector = format!("[{}]", COUNTER_ATTRIBUTE);
        let counters = dom::query_all(scope, &selector)
            .into_iter()
            .filter(|el| target_of(el).is_some())
            .map(|el| (el, false));
        let count = observer.observe(counters);
        tracing::debug!(count, "Counters observed");

        Ok(Self { observer })
    }
}

impl CounterController {
    /// Counters waiting for their first intersection
    pub fn pending(&self) -> usize {
        self.observer.pending()
    }
}

impl Widget for CounterController {
    fn dispose(&mut self) {
        self.observer.disconnect();
    }
}

fn target_of(element: &Element) -> Option<i64> {
    element.get_attribute(COUNTER_ATTRIBUTE).as_deref().and_then(parse_target)
}

/// Render one frame, then queue the next until the counter finishes
fn run(element: Element, animation: CounterAnimation) {
    let queued = dom::request_animation_frame(move |now| {
        let frame = animation.frame(now);
        element.set_text_content(Some(&frame.text));
        if !frame.finished {
            run(element, animation);
        }
    });
    if let Err(e) = queued {
        tracing::warn!(error = ?e, "Counter frame not scheduled");
    }
}
