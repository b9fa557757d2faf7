//! Page chrome
//!
//! Injects the shared navbar and footer, then binds the behaviour that
//! depends on them: navbar scroll style, back-to-top button, mobile menu,
//! active nav link, anchor scrolling and the footer year.

use std::cell::Cell;
use std::rc::Rc;

use apcea::chrome::{current_year, nav_link_is_active, Fragment, LOADED_ATTRIBUTE};
use apcea::config::{ChromeConfig, SiteConfig};
use apcea::{ChromeLayout, Html, MobileMenu, SubscriptionSet, TemplateInjector};
use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::fetch::GlooFetcher;
use crate::widgets::Widget;

const NAVBAR_SELECTOR: &str = ".navbar";
const SCROLLED_CLASS: &str = "scrolled";
const BACK_TO_TOP_SELECTOR: &str = ".back-to-top";
const HAMBURGER_SELECTOR: &str = ".navbar__hamburger";
const MOBILE_MENU_SELECTOR: &str = ".navbar__mobile-menu";
const OVERLAY_SELECTOR: &str = ".mobile-overlay";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const FOOTER_YEAR_SELECTOR: &str = ".footer-year";

/// Fetch both fragments and splice them into their placeholders
///
/// Resolves once both fetches have settled. A failed fragment leaves its
/// placeholder empty.
pub async fn inject_templates(document: &Document, site: &SiteConfig, root_path: &str) {
    let injector = TemplateInjector::new(GlooFetcher, site, root_path);
    let (navbar, footer) = injector.load_all().await;

    for (fragment, html) in Fragment::ALL.into_iter().zip([navbar, footer]) {
        if let (Some(placeholder), Some(html)) = (dom::query(document, fragment.placeholder_selector()), html) {
            splice(&placeholder, &html);
        }
    }
}

fn splice(placeholder: &Element, html: &Html) {
    placeholder.set_inner_html(html.as_str());
    let _ = placeholder.set_attribute(LOADED_ATTRIBUTE, "true");
}

/// Listeners for the injected chrome
pub struct ChromeController {
    subscriptions: SubscriptionSet,
}

impl ChromeController {
    pub fn bind(document: &Document, config: &ChromeConfig, root_path: &str) -> Result<Self, JsValue> {
        let layout = Rc::new(ChromeLayout::new(config.clone()));
        let mut subscriptions = SubscriptionSet::new();

        bind_navbar(document, &layout, &mut subscriptions)?;
        bind_back_to_top(document, &layout, &mut subscriptions)?;
        bind_mobile_menu(document, &mut subscriptions)?;
        mark_active_nav_links(document, root_path);
        bind_anchor_scroll(document, &layout, &mut subscriptions)?;
        stamp_footer_year(document);

        Ok(Self { subscriptions })
    }
}

impl Widget for ChromeController {
    fn dispose(&mut self) {
        self.subscriptions.dispose();
    }
}

fn bind_navbar(document: &Document, layout: &Rc<ChromeLayout>, subscriptions: &mut SubscriptionSet) -> Result<(), JsValue> {
    let (Some(navbar), Some(window)) = (dom::query(document, NAVBAR_SELECTOR), dom::window()) else {
        return Ok(());
    };
    let layout = Rc::clone(layout);
    let update = move || dom::set_class(&navbar, SCROLLED_CLASS, layout.navbar_scrolled(dom::scroll_y()));
    update();
    subscriptions.push(dom::listen_passive(&window, "scroll", move |_: Event| update())?);
    Ok(())
}

fn bind_back_to_top(document: &Document, layout: &Rc<ChromeLayout>, subscriptions: &mut SubscriptionSet) -> Result<(), JsValue> {
    let (Some(button), Some(window)) = (dom::query(document, BACK_TO_TOP_SELECTOR), dom::window()) else {
        return Ok(());
    };

    let layout = Rc::clone(layout);
    let toggled = button.clone();
    let update = move || dom::set_class(&toggled, "visible", layout.back_to_top_visible(dom::scroll_y()));
    update();
    subscriptions.push(dom::listen_passive(&window, "scroll", move |_: Event| update())?);
    subscriptions.push(dom::listen(&button, "click", |_: MouseEvent| smooth_scroll_to(0.0))?);
    Ok(())
}

fn bind_mobile_menu(document: &Document, subscriptions: &mut SubscriptionSet) -> Result<(), JsValue> {
    let (Some(hamburger), Some(menu)) = (
        dom::query(document, HAMBURGER_SELECTOR),
        dom::query(document, MOBILE_MENU_SELECTOR),
    ) else {
        return Ok(());
    };
    let overlay = dom::query(document, OVERLAY_SELECTOR);
    let body = document.body();
    let state = Rc::new(Cell::new(MobileMenu::new()));

    let apply = {
        let hamburger = hamburger.clone();
        let overlay = overlay.clone();
        Rc::new(move |menu_state: MobileMenu| {
            let open = menu_state.is_open();
            dom::set_class(&hamburger, "open", open);
            dom::set_class(&menu, "open", open);
            if let Some(overlay) = &overlay {
                dom::set_class(overlay, "open", open);
            }
            if let Some(body) = &body {
                let _ = body.style().set_property("overflow", menu_state.body_overflow());
            }
        })
    };

    let close = {
        let state = Rc::clone(&state);
        let apply = Rc::clone(&apply);
        Rc::new(move || {
            let mut menu = state.get();
            if menu.close() {
                state.set(menu);
                apply(menu);
            }
        })
    };

    {
        let state = Rc::clone(&state);
        let apply = Rc::clone(&apply);
        subscriptions.push(dom::listen(&hamburger, "click", move |_: MouseEvent| {
            let mut menu = state.get();
            menu.toggle();
            state.set(menu);
            apply(menu);
        })?);
    }
    if let Some(overlay) = &overlay {
        let close = Rc::clone(&close);
        subscriptions.push(dom::listen(overlay, "click", move |_: MouseEvent| close())?);
    }
    subscriptions.push(dom::listen(document, "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            close();
        }
    })?);
    Ok(())
}

fn mark_active_nav_links(document: &Document, root_path: &str) {
    let Some(current) = dom::window().and_then(|w| w.location().pathname().ok()) else {
        return;
    };
    for link in dom::query_all(document, NAV_LINK_SELECTOR) {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if nav_link_is_active(&href, &current, root_path) {
            dom::set_class(&link, "active", true);
        }
    }
}

fn bind_anchor_scroll(document: &Document, layout: &Rc<ChromeLayout>, subscriptions: &mut SubscriptionSet) -> Result<(), JsValue> {
    for anchor in dom::query_all(document, ANCHOR_SELECTOR) {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let document = document.clone();
        let layout = Rc::clone(layout);
        subscriptions.push(dom::listen(&anchor, "click", move |e: MouseEvent| {
            // A bare "#" is not a valid selector and resolves to nothing
            let Some(target) = dom::query(&document, &href).and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
                return;
            };
            e.prevent_default();
            let navbar_height = dom::query(&document, NAVBAR_SELECTOR)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
                .map(|n| n.offset_height() as f64);
            smooth_scroll_to(layout.anchor_scroll_top(target.offset_top() as f64, navbar_height));
        })?);
    }
    Ok(())
}

fn stamp_footer_year(document: &Document) {
    let year = current_year().to_string();
    for element in dom::query_all(document, FOOTER_YEAR_SELECTOR) {
        element.set_text_content(Some(&year));
    }
}

fn smooth_scroll_to(top: f64) {
    if let Some(window) = dom::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
