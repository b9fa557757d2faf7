//! Browser fetcher
//!
//! [`ResourceFetcher`] over the Fetch API via `gloo-net`.

use apcea::fetch::{FetchError, FetchResult, ResourceFetcher};
use async_trait::async_trait;
use gloo_net::http::Request;

/// Fetches site resources relative to the current page
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooFetcher;

#[async_trait(?Send)]
impl ResourceFetcher for GlooFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        if !response.ok() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.text().await.map_err(|e| FetchError::network(url, e))
    }
}
