//! GitHub REST API abstraction layer
//!
//! The `GithubApi` trait is the seam between the web layer and the upstream
//! service: the real `GithubClient` talks to api.github.com, tests swap in a
//! fake that never touches the network.

pub mod client;
pub mod error;
pub mod types;

pub use client::GithubClient;
pub use error::{GithubError, GithubResult};
pub use types::Repository;

use async_trait::async_trait;
use std::collections::BTreeMap;

/// Read-only view of the GitHub endpoints this service consumes
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// List a user's repositories, most recently updated first
    async fn list_repos(&self, user: &str) -> GithubResult<Vec<Repository>>;

    /// Per-language byte counts for one repository
    async fn list_languages(&self, user: &str, repo: &str) -> GithubResult<BTreeMap<String, u64>>;

    /// Raw README content for one repository
    async fn fetch_readme(&self, user: &str, repo: &str) -> GithubResult<String>;
}
