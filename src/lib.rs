//! # APCEA site
//!
//! Behaviour for the website of the Chinese Asia-Pacific Cultural Exchange
//! Association (社團法人中華亞太文化交流協會): a static site whose pages are
//! progressively enhanced with shared chrome, entrance animations, widgets
//! and JSON-driven content.
//!
//! This crate is the browser-independent core. The `apcea-ui` crate binds it
//! to the DOM; the `apcea` binary uses it to preview and check content from
//! the command line.
//!
//! ## Modules
//!
//! - [`content`]: news and course data, loading, rendering
//! - [`animation`]: one-way reveal tracking for entrance animations
//! - [`widgets`]: tabs, accordion and counter state machines
//! - [`chrome`]: navbar/footer fragments, root paths, scroll behaviour
//! - [`fetch`]: resource fetcher abstraction and implementations
//! - [`config`]: configuration loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apcea::{Config, ContentLoader, DirFetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let loader = ContentLoader::new(DirFetcher::new("./site"), &config.site, "/");
//!
//!     // Pinned first, newest first, at most six cards
//!     let list = loader.render_list(Some(6)).await;
//!     println!("{}", list.html());
//! }
//! ```

pub mod animation;
pub mod chrome;
pub mod config;
pub mod content;
pub mod fetch;
pub mod html;
pub mod subscription;
pub mod widgets;

// Re-export top-level types for convenience
pub use animation::{ObserverOptions, RevealTracker};

pub use chrome::{ChromeLayout, Fragment, MobileMenu, TemplateInjector};

pub use config::{
    AnimationConfig, ChromeConfig, Config, ConfigError, ContentConfig, LoggingConfig, SiteConfig,
};

pub use content::{
    Article, CatalogView, ContentLoader, CourseCatalog, DetailOutcome, NewsFeed, Rendered,
};

pub use fetch::{FetchError, FetchResult, MemoryFetcher, ResourceFetcher};

#[cfg(not(target_arch = "wasm32"))]
pub use fetch::{DirFetcher, HttpFetcher};

pub use html::Html;

pub use subscription::{Subscription, SubscriptionSet};

pub use widgets::{Accordion, CounterAnimation, TabGroup};
