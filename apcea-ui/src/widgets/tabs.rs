//! Tabs

use std::cell::RefCell;
use std::rc::Rc;

use apcea::widgets::ACTIVE_CLASS;
use apcea::{SubscriptionSet, TabGroup};
use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};

use super::Widget;
use crate::dom;

pub const CONTAINER_SELECTOR: &str = "[data-tabs]";
pub const BUTTON_SELECTOR: &str = ".tab-btn";
pub const PANEL_SELECTOR: &str = ".tab-panel";

pub struct TabsController {
    state: Rc<RefCell<TabGroup>>,
    subscriptions: SubscriptionSet,
}

impl TabsController {
    /// Bind the buttons and panels inside one `[data-tabs]` container
    pub fn bind_scope(container: &Element) -> Result<Self, JsValue> {
        let buttons = dom::query_all(container, BUTTON_SELECTOR);
        let panels = dom::query_all(container, PANEL_SELECTOR);
        Self::bind(buttons, panels)
    }

    /// Bind buttons paired by position with panels
    ///
    /// Classes are synced to the initial state straight away, so exactly one
    /// pair is active even if the markup marked several.
    pub fn bind(buttons: Vec<Element>, panels: Vec<Element>) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(TabGroup::new(buttons.len(), panels.len())));
        let buttons = Rc::new(buttons);
        let panels = Rc::new(panels);
        apply(&state.borrow(), &buttons, &panels);

        let mut subscriptions = SubscriptionSet::new();
        for (index, button) in buttons.iter().enumerate() {
            let state = Rc::clone(&state);
            let all_buttons = Rc::clone(&buttons);
            let all_panels = Rc::clone(&panels);
            subscriptions.push(dom::listen(button, "click", move |_: MouseEvent| {
                let mut state = state.borrow_mut();
                if state.select(index) {
                    apply(&state, &all_buttons, &all_panels);
                }
            })?);
        }

        Ok(Self { state, subscriptions })
    }

    pub fn active(&self) -> Option<usize> {
        self.state.borrow().active()
    }
}

impl Widget for TabsController {
    fn dispose(&mut self) {
        self.subscriptions.dispose();
    }
}

fn apply(state: &TabGroup, buttons: &[Element], panels: &[Element]) {
    for (i, button) in buttons.iter().enumerate() {
        dom::set_class(button, ACTIVE_CLASS, state.is_button_active(i));
    }
    for (i, panel) in panels.iter().enumerate() {
        dom::set_class(panel, ACTIVE_CLASS, state.is_panel_active(i));
    }
}
