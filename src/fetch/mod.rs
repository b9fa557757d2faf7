//! Resource fetching
//!
//! The content loader and template injector never talk to the network
//! directly. They go through [`ResourceFetcher`], which has one
//! implementation per environment:
//!
//! - **http**: `reqwest` against a deployed site (native only)
//! - **dir**: a site checkout on disk (native only)
//! - **memory**: canned responses, for tests and previews
//!
//! The browser implementation lives in the `apcea-ui` crate on top of
//! `gloo-net`.
//!
//! URLs handed to a fetcher are site-relative (`/assets/data/news.json?v=1`);
//! each fetcher decides how to resolve them.

pub mod error;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod dir;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use error::{FetchError, FetchResult};
pub use memory::MemoryFetcher;

#[cfg(not(target_arch = "wasm32"))]
pub use dir::DirFetcher;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpFetcher;

/// Source of site resources
///
/// Futures are not required to be `Send`: the browser fetcher holds
/// JS values across await points.
#[async_trait(?Send)]
pub trait ResourceFetcher {
    /// Fetch the body at a site-relative URL
    ///
    /// Must fail with [`FetchError::Status`] when the response status is
    /// not a success.
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;

    /// Fetch and deserialize a JSON document
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T>
    where
        Self: Sized,
    {
        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::parse(url, e))
    }
}

#[async_trait(?Send)]
impl<F: ResourceFetcher + ?Sized> ResourceFetcher for std::rc::Rc<F> {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        (**self).fetch_text(url).await
    }
}

/// Drop the query string and fragment from a URL
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/assets/data/news.json?v=123"), "/assets/data/news.json");
        assert_eq!(strip_query("/news/#top"), "/news/");
        assert_eq!(strip_query("/plain"), "/plain");
    }

    #[tokio::test]
    async fn test_fetch_json_reports_parse_errors() {
        let fetcher = MemoryFetcher::new().with_body("/bad.json", "{not json");
        let result: FetchResult<serde_json::Value> = fetcher.fetch_json("/bad.json?v=1").await;
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }
}
