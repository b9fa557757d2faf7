//! One-shot intersection observer
//!
//! Wraps an `IntersectionObserver` around a [`RevealTracker`]: each element
//! fires its callback once, the first time it intersects, and is then
//! unobserved. Elements are keyed by node identity through a `WeakMap`, so
//! a copied element (`cloneNode`, re-parsed markup) is always a new key.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use apcea::{ObserverOptions, RevealTracker};
use js_sys::WeakMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

thread_local! {
    static KEYS: WeakMap = WeakMap::new();
    static NEXT_KEY: Cell<u32> = const { Cell::new(0) };
}

/// Stable key for this exact node, assigned on first sight
pub fn element_key(element: &Element) -> u32 {
    KEYS.with(|keys| {
        if let Some(key) = keys.get(element).as_f64() {
            return key as u32;
        }
        let key = NEXT_KEY.with(|next| {
            let key = next.get();
            next.set(key.wrapping_add(1));
            key
        });
        keys.set(element, &JsValue::from(key));
        key
    })
}

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

pub struct OnceObserver {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<RevealTracker<u32>>>,
    _callback: EntryCallback,
}

impl OnceObserver {
    pub fn new(options: &ObserverOptions, on_enter: impl Fn(&Element) + 'static) -> Result<Self, JsValue> {
        let tracker: Rc<RefCell<RevealTracker<u32>>> = Rc::new(RefCell::new(RevealTracker::new()));

        let callback_tracker = Rc::clone(&tracker);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let mut targets = HashMap::new();
            let mut keyed = Vec::new();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let key = element_key(&target);
                keyed.push((key, entry.is_intersecting()));
                targets.insert(key, target);
            }

            let entered = callback_tracker.borrow_mut().intersect(keyed);
            for key in entered {
                if let Some(target) = targets.get(&key) {
                    observer.unobserve(target);
                    on_enter(target);
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            tracker,
            _callback: callback,
        })
    }

    /// Start observing the candidates not seen before
    ///
    /// `candidates` pairs each element with whether it counts as already
    /// handled. Returns how many new elements are now observed.
    pub fn observe<I>(&self, candidates: I) -> usize
    where
        I: IntoIterator<Item = (Element, bool)>,
    {
        let mut elements = HashMap::new();
        let mut keyed = Vec::new();
        for (element, done) in candidates {
            let key = element_key(&element);
            keyed.push((key, done));
            elements.insert(key, element);
        }

        let fresh = self.tracker.borrow_mut().scan(keyed);
        for key in &fresh {
            if let Some(element) = elements.get(key) {
                self.observer.observe(element);
            }
        }
        fresh.len()
    }

    pub fn pending(&self) -> usize {
        self.tracker.borrow().observed_count()
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for OnceObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
