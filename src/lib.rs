//! GitHub project-enrichment proxy for the portfolio site.
//!
//! One meaningful endpoint: `GET /api/github?user=<login>&limit=<n>` fetches
//! the user's repositories, drops forks and archived/disabled repos, and
//! enriches each survivor with per-language byte percentages and a category
//! tag mined from the README's first line. The browser UI falls back to the
//! public GitHub API when this service is unavailable.

pub mod config;
pub mod enrich;
pub mod github;
pub mod web;
