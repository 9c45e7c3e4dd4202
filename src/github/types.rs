//! Repository type definitions
//!
//! Structs representing GitHub repository data as returned by the REST API.
//! Unknown fields in the upstream payload are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of the `/users/{user}/repos` listing
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name (without owner)
    pub name: String,

    /// Repository description
    #[serde(default)]
    pub description: Option<String>,

    /// Primary language as reported by GitHub
    #[serde(default)]
    pub language: Option<String>,

    /// Repository URL on GitHub
    pub html_url: String,

    /// Whether repository is a fork
    #[serde(default)]
    pub fork: bool,

    /// Whether repository is archived
    #[serde(default)]
    pub archived: bool,

    /// Whether repository is disabled
    #[serde(default)]
    pub disabled: bool,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
