//! Configuration loading
//!
//! Configuration is layered: defaults, then an optional `portfolio.toml`
//! (found by walking up the directory tree, then the platform config dir),
//! then environment/CLI overrides applied in `main`.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at ~/.config/portfolio-api/
///
/// Returns the path if found, None otherwise.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("portfolio-api").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

/// Resolved process configuration, immutable for the lifetime of the server.
///
/// Handlers only ever read this through `AppState`; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GitHub login used when a request does not name a user
    pub default_user: Option<String>,
    /// Access token for higher rate limits; never exposed in responses or logs
    pub token: Option<String>,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Project count returned when the request omits or mangles `limit`
    pub default_limit: usize,
    /// Hard ceiling on the `limit` query parameter
    pub max_limit: usize,
    /// Deadline for each per-repository sub-fetch (languages, README)
    pub sub_fetch_timeout: Duration,
    /// User-Agent sent on every upstream request
    pub user_agent: String,
}

impl AppConfig {
    /// Assemble the runtime config from a file config plus explicit overrides.
    pub fn from_file(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            default_user: overrides.user.or(file.github.user),
            token: overrides.token.or(file.github.token),
            port: overrides.port.unwrap_or(file.server.port),
            default_limit: file.github.default_limit,
            max_limit: file.github.max_limit,
            sub_fetch_timeout: Duration::from_secs(file.github.sub_fetch_timeout_secs),
            user_agent: file.server.user_agent,
        }
    }
}

/// Values that take precedence over the config file (CLI flags / env vars).
#[derive(Debug, Default)]
pub struct Overrides {
    pub user: Option<String>,
    pub token: Option<String>,
    pub port: Option<u16>,
}

/// Top-level file configuration (from portfolio.toml)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub server: ServerSection,
}

/// GitHub upstream configuration section
#[derive(Debug, Deserialize)]
pub struct GithubSection {
    /// Default GitHub login to proxy for
    pub user: Option<String>,
    /// Access token (prefer the GITHUB_TOKEN env var over checking this in)
    pub token: Option<String>,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_sub_fetch_timeout_secs")]
    pub sub_fetch_timeout_secs: u64,
}

/// HTTP server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_limit() -> usize {
    6
}

fn default_max_limit() -> usize {
    50
}

fn default_sub_fetch_timeout_secs() -> u64 {
    8
}

fn default_port() -> u16 {
    3000
}

fn default_user_agent() -> String {
    "portfolio-site".to_string()
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            sub_fetch_timeout_secs: default_sub_fetch_timeout_secs(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            user_agent: default_user_agent(),
        }
    }
}

impl FileConfig {
    /// Load config from portfolio.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for portfolio.toml
    /// 2. Check ~/.config/portfolio-api/portfolio.toml (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = find_config_file("portfolio.toml") {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        tracing::debug!("No portfolio.toml found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_file_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.github.default_limit, 6);
        assert_eq!(config.github.max_limit, 50);
        assert_eq!(config.github.sub_fetch_timeout_secs, 8);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.user_agent, "portfolio-site");
        assert!(config.github.user.is_none());
    }

    #[test]
    fn load_from_path_parses_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[github]\nuser = \"octocat\"\ndefault_limit = 4\n\n[server]\nport = 8080\n"
        )
        .unwrap();

        let config = FileConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.github.user.as_deref(), Some("octocat"));
        assert_eq!(config.github.default_limit, 4);
        assert_eq!(config.server.port, 8080);
        // Unset keys keep their defaults
        assert_eq!(config.github.max_limit, 50);
    }

    #[test]
    fn overrides_win_over_file() {
        let file: FileConfig = toml::from_str("[github]\nuser = \"from-file\"\n").unwrap();
        let config = AppConfig::from_file(
            file,
            Overrides {
                user: Some("from-env".to_string()),
                token: None,
                port: Some(4000),
            },
        );
        assert_eq!(config.default_user.as_deref(), Some("from-env"));
        assert_eq!(config.port, 4000);
        assert_eq!(config.sub_fetch_timeout, Duration::from_secs(8));
    }
}
