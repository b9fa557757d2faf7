//! APCEA site in the browser
//!
//! WebAssembly bindings for the `apcea` core. On start the module:
//!
//! 1. reads the optional `#site-config` JSON and resolves the root path
//! 2. binds tabs, accordions and counters already on the page
//! 3. numbers stagger children and runs the first animation scan once
//!    layout has settled
//! 4. injects the navbar and footer, then binds the chrome behaviour
//!
//! Page scripts reach the rest through [`rescan_animations`] and [`Cms`],
//! also published on `window` as `observeAnimations` and `CMS`.

pub mod animations;
mod chrome;
pub mod content;
pub mod dom;
mod fetch;
mod logging;
mod observer;
pub mod site;
pub mod widgets;

pub use fetch::GlooFetcher;
pub use site::Site;

use apcea::ResourceFetcher;
use wasm_bindgen::prelude::*;
use web_sys::{DocumentReadyState, Event};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let config = site::read_config(&document);
    logging::init(&config.logging.level);
    let site = Site::init(&document, config)?;
    publish_globals()?;

    if document.ready_state() == DocumentReadyState::Loading {
        let ready = dom::listen(&document, "DOMContentLoaded", move |_: Event| boot(&site))?;
        // Fires once per page
        ready.forget();
    } else {
        boot(&site);
    }
    Ok(())
}

fn boot(site: &Site) {
    let Some(document) = dom::document() else {
        return;
    };

    site.adopt_all(widgets::bind_all(&document, &site.config().animation));

    animations::apply_stagger(&document);
    let animation_site = site.clone();
    wasm_bindgen_futures::spawn_local(async move {
        animations::settle(&animation_site.config().animation).await;
        if let Some(document) = dom::document() {
            animation_site.animations().scan(&document);
        }
    });

    let chrome_site = site.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = dom::document() else {
            return;
        };
        let config = chrome_site.config();
        chrome::inject_templates(&document, &config.site, chrome_site.root_path()).await;
        match chrome::ChromeController::bind(&document, &config.chrome, chrome_site.root_path()) {
            Ok(controller) => chrome_site.adopt(Box::new(controller)),
            Err(e) => tracing::warn!(error = ?e, "Failed to bind page chrome"),
        }
    });
}

fn current_site() -> Result<Site, JsValue> {
    Site::current().ok_or_else(|| JsValue::from_str("site not initialised"))
}

/// Observe animatable elements added since the last scan
#[wasm_bindgen(js_name = rescanAnimations)]
pub fn rescan_animations() {
    if let Some(site) = Site::current() {
        site.refresh_animations();
    }
}

/// Detach every listener and observer the module installed
#[wasm_bindgen]
pub fn teardown() {
    if let Some(site) = Site::current() {
        site.teardown();
    }
}

/// Content rendering entry points for page scripts
#[wasm_bindgen]
pub struct Cms;

#[wasm_bindgen]
impl Cms {
    /// Render the news list into `containerId`, at most `limit` cards
    #[wasm_bindgen(js_name = renderNewsList)]
    pub async fn render_news_list(container_id: String, limit: Option<u32>) -> Result<(), JsValue> {
        let site = current_site()?;
        let limit = limit
            .map(|l| l as usize)
            .or(site.config().content.list_limit);
        content::render_news_list(&site, &container_id, limit).await;
        Ok(())
    }

    /// Render the article named by the page's `id` parameter
    #[wasm_bindgen(js_name = renderNewsArticle)]
    pub async fn render_news_article() -> Result<(), JsValue> {
        let site = current_site()?;
        content::render_news_article(&site).await;
        Ok(())
    }

    /// Build the course catalog tabs inside `containerId`
    #[wasm_bindgen(js_name = renderCourses)]
    pub async fn render_courses(container_id: String) -> Result<(), JsValue> {
        let site = current_site()?;
        content::render_courses(&site, &container_id).await;
        Ok(())
    }

    /// Fetch a data file and parse it as JSON
    ///
    /// Rejects on a failed request or a malformed body.
    #[wasm_bindgen(js_name = loadJSON)]
    pub async fn load_json(path: String) -> Result<JsValue, JsValue> {
        let site = current_site()?;
        let loader = site.loader();
        let url = loader.resource_url(&path);
        let body = loader
            .fetcher()
            .fetch_text(&url)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&body).map_err(|_| JsValue::from_str(&format!("Failed to parse {}", url)))
    }
}

/// Publish `window.observeAnimations` and `window.CMS`
fn publish_globals() -> Result<(), JsValue> {
    let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let observe = Closure::wrap(Box::new(rescan_animations) as Box<dyn Fn()>);
    js_sys::Reflect::set(&window, &"observeAnimations".into(), observe.as_ref())?;
    observe.forget();

    let cms = js_sys::Object::new();

    let render_list = Closure::wrap(Box::new(|container_id: String, limit: JsValue| {
        let limit = limit.as_f64().map(|l| l as u32);
        wasm_bindgen_futures::future_to_promise(async move {
            Cms::render_news_list(container_id, limit).await?;
            Ok(JsValue::UNDEFINED)
        })
    }) as Box<dyn Fn(String, JsValue) -> js_sys::Promise>);
    js_sys::Reflect::set(&cms, &"renderNewsList".into(), render_list.as_ref())?;
    render_list.forget();

    let render_article = Closure::wrap(Box::new(|| {
        wasm_bindgen_futures::future_to_promise(async move {
            Cms::render_news_article().await?;
            Ok(JsValue::UNDEFINED)
        })
    }) as Box<dyn Fn() -> js_sys::Promise>);
    js_sys::Reflect::set(&cms, &"renderNewsArticle".into(), render_article.as_ref())?;
    render_article.forget();

    let render_courses = Closure::wrap(Box::new(|container_id: String| {
        wasm_bindgen_futures::future_to_promise(async move {
            Cms::render_courses(container_id).await?;
            Ok(JsValue::UNDEFINED)
        })
    }) as Box<dyn Fn(String) -> js_sys::Promise>);
    js_sys::Reflect::set(&cms, &"renderCourses".into(), render_courses.as_ref())?;
    render_courses.forget();

    let load_json = Closure::wrap(Box::new(|path: String| {
        wasm_bindgen_futures::future_to_promise(Cms::load_json(path))
    }) as Box<dyn Fn(String) -> js_sys::Promise>);
    js_sys::Reflect::set(&cms, &"loadJSON".into(), load_json.as_ref())?;
    load_json.forget();

    js_sys::Reflect::set(&window, &"CMS".into(), &cms)?;
    Ok(())
}
