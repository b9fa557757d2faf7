//! In-memory fetcher
//!
//! Serves canned responses keyed by path (query strings ignored) and records
//! every requested URL.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{strip_query, FetchError, FetchResult, ResourceFetcher};

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status(u16),
}

/// Fetcher backed by a map of canned responses
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, Canned>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: answer `path` with a 200 and this body
    pub fn with_body(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(path.into(), Canned::Body(body.into()));
        self
    }

    /// Builder method: answer `path` with an error status
    pub fn with_status(mut self, path: impl Into<String>, status: u16) -> Self {
        self.responses.insert(path.into(), Canned::Status(status));
        self
    }

    /// URLs requested so far, in order, query strings included
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.requests.borrow_mut().push(url.to_string());

        match self.responses.get(strip_query(url)) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::network(url, "no route to resource")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_responses() {
        let fetcher = MemoryFetcher::new()
            .with_body("/a.json", "{}")
            .with_status("/b.json", 500);

        assert_eq!(fetcher.fetch_text("/a.json?v=9").await.unwrap(), "{}");
        assert_eq!(fetcher.fetch_text("/b.json").await.unwrap_err().status(), Some(500));
        assert!(matches!(
            fetcher.fetch_text("/c.json").await,
            Err(FetchError::Network { .. })
        ));
        assert_eq!(fetcher.requests(), vec!["/a.json?v=9", "/b.json", "/c.json"]);
    }
}
