//! Error types for GitHub API calls

use thiserror::Error;

/// Errors that can occur when calling the GitHub REST API
#[derive(Error, Debug)]
pub enum GithubError {
    /// GitHub answered with a non-success status; the body text is kept so
    /// the primary-list path can proxy it back to the caller
    #[error("GitHub API returned HTTP {status}")]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// Upstream response body, read as text
        body: String,
    },

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("request to GitHub failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A per-repository sub-fetch exceeded its deadline
    #[error("request to GitHub timed out")]
    Timeout,
}

/// Result type alias for GitHub operations
pub type GithubResult<T> = Result<T, GithubError>;
