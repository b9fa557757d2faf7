//! Fetch error types
//!
//! Every way a resource request can fail before its body is usable.

use thiserror::Error;

/// Errors raised while loading a site resource
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("Unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// The body was not the expected JSON shape
    #[error("Failed to parse {url}: {message}")]
    Parse { url: String, message: String },

    /// Local file access failed
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn network(url: &str, message: impl ToString) -> Self {
        FetchError::Network {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(url: &str, err: serde_json::Error) -> Self {
        FetchError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
