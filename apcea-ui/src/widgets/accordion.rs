//! Accordion
//!
//! Each `.accordion-header` controls the `.accordion-body` right after it.

use std::cell::RefCell;
use std::rc::Rc;

use apcea::widgets::OPEN_CLASS;
use apcea::{Accordion, SubscriptionSet};
use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};

use super::Widget;
use crate::dom;

pub const SCOPE_SELECTOR: &str = ".accordion";
pub const HEADER_SELECTOR: &str = ".accordion-header";
pub const BODY_SELECTOR: &str = ".accordion-body";

struct Parts {
    headers: Vec<Element>,
    bodies: Vec<Element>,
}

pub struct AccordionController {
    state: Rc<RefCell<Accordion>>,
    subscriptions: SubscriptionSet,
}

impl AccordionController {
    pub fn bind(scope: &Element) -> Result<Self, JsValue> {
        let parts = Rc::new(Parts {
            headers: dom::query_all(scope, HEADER_SELECTOR),
            bodies: dom::query_all(scope, BODY_SELECTOR),
        });
        let state = Rc::new(RefCell::new(Accordion::new(parts.headers.len())));

        let mut subscriptions = SubscriptionSet::new();
        for (index, header) in parts.headers.iter().enumerate() {
            let state = Rc::clone(&state);
            let parts = Rc::clone(&parts);
            subscriptions.push(dom::listen(header, "click", move |_: MouseEvent| {
                let mut state = state.borrow_mut();
                state.toggle(index);
                apply(&state, &parts);
            })?);
        }

        Ok(Self { state, subscriptions })
    }

    pub fn open(&self) -> Option<usize> {
        self.state.borrow().open()
    }
}

impl Widget for AccordionController {
    fn dispose(&mut self) {
        self.subscriptions.dispose();
    }
}

fn apply(state: &Accordion, parts: &Parts) {
    for body in &parts.bodies {
        dom::set_class(body, OPEN_CLASS, false);
    }
    for (i, header) in parts.headers.iter().enumerate() {
        let open = state.is_open(i);
        dom::set_class(header, OPEN_CLASS, open);
        if open {
            if let Some(body) = header.next_element_sibling() {
                dom::set_class(&body, OPEN_CLASS, true);
            }
        }
    }
}
