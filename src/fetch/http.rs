//! HTTP fetcher
//!
//! Resolves site-relative URLs against the origin of a deployed site and
//! fetches them with `reqwest`.

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, FetchResult, ResourceFetcher};

/// Fetcher for a site served over HTTP
pub struct HttpFetcher {
    client: Client,
    origin: String,
}

impl HttpFetcher {
    /// Create a fetcher for the site at `origin` (e.g. "https://example.org")
    pub fn new(origin: &str) -> Self {
        Self::with_client(Client::new(), origin)
    }

    pub fn with_client(client: Client, origin: &str) -> Self {
        Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a site-relative one
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            format!("{}/{}", self.origin, url)
        }
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let absolute = self.resolve(url);
        tracing::debug!(url = %absolute, "GET");

        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .map_err(|e| FetchError::network(&absolute, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: absolute,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::network(&absolute, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let fetcher = HttpFetcher::new("https://example.org/");
        assert_eq!(
            fetcher.resolve("/assets/data/news.json?v=1"),
            "https://example.org/assets/data/news.json?v=1"
        );
        assert_eq!(
            fetcher.resolve("assets/templates/navbar.html"),
            "https://example.org/assets/templates/navbar.html"
        );
        assert_eq!(fetcher.resolve("https://cdn.example.org/x"), "https://cdn.example.org/x");
    }
}
