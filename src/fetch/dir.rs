//! Directory fetcher
//!
//! Serves site-relative URLs from a site checkout on disk. The site's root
//! path is stripped from the front of each URL before it is joined onto the
//! directory, so `/sub/assets/data/news.json` with root `/sub/` reads
//! `<dir>/assets/data/news.json`.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use super::{strip_query, FetchError, FetchResult, ResourceFetcher};

/// Fetcher reading from a local site directory
#[derive(Debug, Clone)]
pub struct DirFetcher {
    dir: PathBuf,
    root_path: String,
}

impl DirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            root_path: "/".to_string(),
        }
    }

    /// Builder method: site root path to strip from request URLs
    pub fn root_path(mut self, root_path: &str) -> Self {
        self.root_path = root_path.to_string();
        self
    }

    /// Map a site-relative URL to a file under the site directory
    ///
    /// Returns `None` for URLs that would escape the directory.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let path = strip_query(url);
        let relative = path
            .strip_prefix(self.root_path.as_str())
            .unwrap_or(path)
            .trim_start_matches('/');
        let decoded = urlencoding::decode(relative).ok()?;

        let candidate = Path::new(&*decoded);
        if candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }

        let mut full = self.dir.join(candidate);
        if path.ends_with('/') || relative.is_empty() {
            full.push("index.html");
        }
        Some(full)
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for DirFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        // Outside the site directory: answer the way a static server would
        let Some(path) = self.resolve(url) else {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 403,
            });
        };
        tracing::debug!(url, path = %path.display(), "read");

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
            Err(e) => Err(FetchError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_root_and_query() {
        let fetcher = DirFetcher::new("/srv/site").root_path("/sub/");
        assert_eq!(
            fetcher.resolve("/sub/assets/data/news.json?v=42"),
            Some(PathBuf::from("/srv/site/assets/data/news.json"))
        );
        assert_eq!(
            fetcher.resolve("/sub/news/"),
            Some(PathBuf::from("/srv/site/news/index.html"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let fetcher = DirFetcher::new("/srv/site");
        assert_eq!(fetcher.resolve("/../etc/passwd"), None);
        assert_eq!(fetcher.resolve("/assets/%2e%2e/%2e%2e/secret"), None);
    }

    #[tokio::test]
    async fn test_reads_files_and_maps_missing_to_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets/data")).unwrap();
        std::fs::write(dir.path().join("assets/data/news.json"), r#"{"articles":[]}"#).unwrap();

        let fetcher = DirFetcher::new(dir.path());
        let body = fetcher.fetch_text("/assets/data/news.json?v=1").await.unwrap();
        assert_eq!(body, r#"{"articles":[]}"#);

        let missing = fetcher.fetch_text("/assets/data/courses.json").await;
        assert_eq!(missing.unwrap_err().status(), Some(404));
    }
}
