//! Error types for content resolution.

use thiserror::Error;

/// Errors that can occur while fetching content.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No block or node is stored under the identifier.
    #[error("content not found: {0}")]
    NotFound(String),

    /// The node exists but the path selector does not lead anywhere.
    #[error("path {path} not found in {cid}")]
    PathNotFound { cid: String, path: String },

    /// The backing service failed or could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something that is not the expected content.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ResolveError {
    fn from(e: reqwest::Error) -> Self {
        ResolveError::Transport(e.to_string())
    }
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
