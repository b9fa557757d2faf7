//! Content loader
//!
//! Turns a named JSON resource into rendered markup. Failures never reach
//! the caller as errors: the list falls back to a placeholder, the detail
//! page reports [`DetailOutcome::Unavailable`], the catalog yields `None`,
//! and every one of them logs a warning.

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::config::SiteConfig;
use crate::fetch::{FetchResult, ResourceFetcher};
use crate::html::Html;

use super::model::{CourseCatalog, NewsFeed};
use super::render::{self, ArticleView, CatalogView};

/// Name of the news resource under the data directory
pub const NEWS_RESOURCE: &str = "news.json";

/// Name of the course resource under the data directory
pub const COURSES_RESOURCE: &str = "courses.json";

/// Query parameter selecting the article on the detail page
pub const ARTICLE_ID_PARAM: &str = "id";

/// Result of rendering a region that must always show something
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Markup built from the loaded data
    Content(Html),
    /// Fallback shown because loading failed
    Placeholder(Html),
}

impl Rendered {
    pub fn html(&self) -> &Html {
        match self {
            Rendered::Content(html) | Rendered::Placeholder(html) => html,
        }
    }

    pub fn into_html(self) -> Html {
        match self {
            Rendered::Content(html) | Rendered::Placeholder(html) => html,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, Rendered::Content(_))
    }
}

/// Result of rendering the article detail page
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// The article exists
    Found(ArticleView),
    /// The feed loaded but no article has this id; markup for the body region
    NotFound(Html),
    /// The feed could not be loaded; nothing should change on the page
    Unavailable,
}

/// Loads site data and renders it
pub struct ContentLoader<F> {
    fetcher: F,
    root_path: String,
    data_dir: String,
    title_suffix: String,
    cache_bust: i64,
}

impl<F: ResourceFetcher> ContentLoader<F> {
    /// Create a loader for a site rooted at `root_path`
    ///
    /// The cache-busting value is fixed here, so every request made through
    /// this loader carries the same one.
    pub fn new(fetcher: F, site: &SiteConfig, root_path: &str) -> Self {
        Self {
            fetcher,
            root_path: root_path.to_string(),
            data_dir: site.data_dir.trim_matches('/').to_string(),
            title_suffix: site.title_suffix.clone(),
            cache_bust: Utc::now().timestamp_millis(),
        }
    }

    /// Builder method: pin the cache-busting value
    pub fn cache_bust(mut self, value: i64) -> Self {
        self.cache_bust = value;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Request URL for a resource under the data directory
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}{}/{}?v={}",
            self.root_path,
            self.data_dir,
            path.trim_start_matches('/'),
            self.cache_bust
        )
    }

    /// Fetch and parse a JSON resource from the data directory
    pub async fn load<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let url = self.resource_url(path);
        self.fetcher.fetch_json(&url).await
    }

    /// Fetch a JSON resource without a fixed shape
    pub async fn load_value(&self, path: &str) -> FetchResult<serde_json::Value> {
        self.load(path).await
    }

    pub async fn news_feed(&self) -> FetchResult<NewsFeed> {
        self.load(NEWS_RESOURCE).await
    }

    pub async fn course_catalog(&self) -> FetchResult<CourseCatalog> {
        self.load(COURSES_RESOURCE).await
    }

    /// Render the news list: pinned first, newest first, at most `limit`
    pub async fn render_list(&self, limit: Option<usize>) -> Rendered {
        match self.news_feed().await {
            Ok(feed) => {
                let listing = feed.listing(limit);
                tracing::debug!(count = listing.len(), ?limit, "Rendered news list");
                Rendered::Content(render::news_list(listing, &self.root_path))
            }
            Err(e) => {
                tracing::warn!(error = %e, "消息載入失敗");
                Rendered::Placeholder(render::empty_list())
            }
        }
    }

    /// Render the detail page for `id`
    pub async fn render_detail(&self, id: &str) -> DetailOutcome {
        let feed = match self.news_feed().await {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!(error = %e, id, "Failed to load article");
                return DetailOutcome::Unavailable;
            }
        };

        match feed.find(id) {
            Some(article) => {
                DetailOutcome::Found(ArticleView::from_article(article, &self.title_suffix))
            }
            None => {
                tracing::debug!(id, "No article with this id");
                DetailOutcome::NotFound(render::not_found())
            }
        }
    }

    /// Build the course catalog tabs, or `None` if the data can't be loaded
    pub async fn render_catalog(&self) -> Option<CatalogView> {
        match self.course_catalog().await {
            Ok(catalog) => Some(CatalogView::from_catalog(&catalog)),
            Err(e) => {
                tracing::warn!(error = %e, "課程載入失敗");
                None
            }
        }
    }
}

/// Value of a query-string parameter (`?a=1&id=x`), percent-decoded
///
/// Empty values count as absent.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == name).then(|| decode_component(value))
        })
        .find(|value| !value.is_empty())
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
