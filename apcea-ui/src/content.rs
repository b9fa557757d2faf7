//! Content on the page
//!
//! Puts what the [`ContentLoader`](apcea::ContentLoader) renders into the
//! page's containers. Failures never reach the caller: the loader has
//! already logged them and produced a placeholder where one belongs.

use apcea::content::{query_param, CatalogView, DetailOutcome, ARTICLE_ID_PARAM};
use web_sys::{Document, Element};

use crate::dom;
use crate::site::Site;
use crate::widgets::TabsController;

const TITLE_ID: &str = "article-title";
const META_ID: &str = "article-meta";
const BODY_ID: &str = "article-body";
const BREADCRUMB_ID: &str = "article-breadcrumb";

/// Fill `container_id` with the news list
pub async fn render_news_list(site: &Site, container_id: &str, limit: Option<usize>) {
    let Some(container) = dom::document().and_then(|d| d.get_element_by_id(container_id)) else {
        tracing::debug!(container_id, "News container not on this page");
        return;
    };

    let rendered = site.loader().render_list(limit).await;
    container.set_inner_html(rendered.html().as_str());
    site.refresh_animations();
}

/// Fill the detail page for the article named by the `id` query parameter
pub async fn render_news_article(site: &Site) {
    let Some(document) = dom::document() else {
        return;
    };
    let search = dom::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let Some(id) = query_param(&search, ARTICLE_ID_PARAM) else {
        return;
    };

    match site.loader().render_detail(&id).await {
        DetailOutcome::Found(view) => {
            document.set_title(&view.document_title);
            set_text(&document, TITLE_ID, &view.title);
            set_text(&document, BREADCRUMB_ID, &view.title);
            if let Some(meta) = document.get_element_by_id(META_ID) {
                meta.set_inner_html(view.meta.as_str());
            }
            if let Some(body) = document.get_element_by_id(BODY_ID) {
                body.set_inner_html(view.body.as_str());
            }
        }
        DetailOutcome::NotFound(message) => {
            if let Some(body) = document.get_element_by_id(BODY_ID) {
                body.set_inner_html(message.as_str());
            }
        }
        DetailOutcome::Unavailable => return,
    }
    site.refresh_animations();
}

/// Build the course tabs inside `container_id`
pub async fn render_courses(site: &Site, container_id: &str) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(container) = document.get_element_by_id(container_id) else {
        return;
    };
    if tab_regions(&container).is_none() {
        tracing::debug!(container_id, "Course container has no tab list or panels");
        return;
    }

    let Some(catalog) = site.loader().render_catalog().await else {
        return;
    };
    if let Some(tabs) = build_catalog(&document, &container, &catalog) {
        site.adopt(Box::new(tabs));
    }
    site.refresh_animations();
}

/// Append one button and one panel per tab and wire up the tab group
///
/// Returns `None` when the container lacks `.tab-list` or `.tab-panels`.
pub fn build_catalog(document: &Document, container: &Element, catalog: &CatalogView) -> Option<TabsController> {
    let (tab_list, tab_panels) = tab_regions(container)?;

    let mut buttons = Vec::with_capacity(catalog.tabs.len());
    let mut panels = Vec::with_capacity(catalog.tabs.len());
    for tab in &catalog.tabs {
        let built = create(document, "button", tab.button_class()).and_then(|button| {
            button.set_text_content(Some(&tab.label));
            let panel = create(document, "div", tab.panel_class())?;
            panel.set_inner_html(tab.panel.as_str());
            tab_list.append_child(&button).ok()?;
            tab_panels.append_child(&panel).ok()?;
            Some((button, panel))
        });
        if let Some((button, panel)) = built {
            buttons.push(button);
            panels.push(panel);
        }
    }

    match TabsController::bind(buttons, panels) {
        Ok(tabs) => Some(tabs),
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to bind course tabs");
            None
        }
    }
}

fn tab_regions(container: &Element) -> Option<(Element, Element)> {
    let tab_list = container.query_selector(".tab-list").ok().flatten()?;
    let tab_panels = container.query_selector(".tab-panels").ok().flatten()?;
    Some((tab_list, tab_panels))
}

fn create(document: &Document, tag: &str, class: &str) -> Option<Element> {
    let element = document.create_element(tag).ok()?;
    element.set_class_name(class);
    Some(element)
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}
