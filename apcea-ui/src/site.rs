//! Page context
//!
//! One [`Site`] per page, created at startup and shared by everything that
//! touches the page: it holds the configuration, the resolved root path,
//! the content loader, the shared animation observer and the bound
//! widgets.

use std::cell::RefCell;
use std::rc::Rc;

use apcea::chrome::{normalize_root, root_from_script_url};
use apcea::{Config, ContentLoader};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

use crate::animations::Animations;
use crate::dom;
use crate::fetch::GlooFetcher;
use crate::widgets::Widget;

/// Element carrying the optional JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// File name fragment identifying this module's own script tag
const SCRIPT_MARKER: &str = "apcea_ui";

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct Site {
    inner: Rc<SiteInner>,
}

struct SiteInner {
    config: Config,
    root_path: String,
    loader: ContentLoader<GlooFetcher>,
    animations: Animations,
    widgets: RefCell<Vec<Box<dyn Widget>>>,
}

impl Site {
    /// Create the page context, or return the one already created
    pub fn init(document: &Document, config: Config) -> Result<Site, JsValue> {
        if let Some(site) = Site::current() {
            return Ok(site);
        }

        let root_path = resolve_root(document, &config);
        tracing::info!(root = %root_path, "Site initialised");

        let site = Site {
            inner: Rc::new(SiteInner {
                loader: ContentLoader::new(GlooFetcher, &config.site, &root_path),
                animations: Animations::new(&config.animation)?,
                widgets: RefCell::new(Vec::new()),
                root_path,
                config,
            }),
        };
        SITE.with(|cell| *cell.borrow_mut() = Some(site.clone()));
        Ok(site)
    }

    pub fn current() -> Option<Site> {
        SITE.with(|cell| cell.borrow().clone())
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn root_path(&self) -> &str {
        &self.inner.root_path
    }

    pub fn loader(&self) -> &ContentLoader<GlooFetcher> {
        &self.inner.loader
    }

    pub fn animations(&self) -> &Animations {
        &self.inner.animations
    }

    /// Pick up newly inserted animatable elements
    pub fn refresh_animations(&self) {
        if let Some(document) = dom::document() {
            self.inner.animations.refresh(&document);
        }
    }

    /// Keep a bound widget alive until teardown
    pub fn adopt(&self, widget: Box<dyn Widget>) {
        self.inner.widgets.borrow_mut().push(widget);
    }

    pub fn adopt_all(&self, widgets: impl IntoIterator<Item = Box<dyn Widget>>) {
        self.inner.widgets.borrow_mut().extend(widgets);
    }

    /// Detach every widget and stop observing
    pub fn teardown(&self) {
        let widgets = std::mem::take(&mut *self.inner.widgets.borrow_mut());
        let count = widgets.len();
        for mut widget in widgets {
            widget.dispose();
        }
        self.inner.animations.disconnect();
        tracing::debug!(count, "Site torn down");
    }
}

/// Read the inline JSON config, falling back to defaults
pub fn read_config(document: &Document) -> Config {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };

    match Config::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid site config");
            Config::default()
        }
    }
}

#[wasm_bindgen(inline_js = "export function module_url() { return import.meta.url; }")]
extern "C" {
    #[wasm_bindgen(catch, js_name = module_url)]
    fn import_meta_url() -> Result<String, JsValue>;
}

/// Address this module was loaded from (`import.meta.url`)
///
/// The glue snippet is emitted next to the module, under the same assets
/// directory.
pub fn module_url() -> Option<String> {
    import_meta_url().ok().filter(|url| !url.is_empty())
}

/// Root path: explicit config, then this module's own address, then a
/// `<script src>` naming this module
fn resolve_root(document: &Document, config: &Config) -> String {
    if let Some(root) = &config.site.root_path {
        return normalize_root(root);
    }
    if let Some(root) = module_url().as_deref().and_then(root_from_script_url) {
        return root;
    }

    dom::query_all(document, "script[src]")
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlScriptElement>().ok())
        .map(|script| script.src())
        .filter(|src| src.contains(SCRIPT_MARKER))
        .find_map(|src| root_from_script_url(&src))
        .unwrap_or_else(|| "/".to_string())
}
