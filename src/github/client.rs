//! reqwest-backed GitHub API client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use super::{GithubApi, GithubError, GithubResult, Repository};
use crate::config::AppConfig;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub REST API client
///
/// The reqwest client is built once with the JSON `Accept` header, the
/// configured User-Agent, and (when a token is present) a bearer
/// `Authorization` header marked sensitive so it never shows up in logs.
pub struct GithubClient {
    client: Client,
    base_url: Url,
    /// Deadline applied to the languages and README sub-fetches only;
    /// the primary listing call inherits the platform deadline
    sub_fetch_timeout: Duration,
}

impl GithubClient {
    /// Create a new client from the process configuration
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_base_url(config, GITHUB_API_BASE)
    }

    /// Create a client against a non-default API base (used by tests)
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            sub_fetch_timeout: config.sub_fetch_timeout,
        })
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("API base URL is a valid base")
            .extend(segments);
        url
    }

    /// Send a GET request and map a non-success status to `GithubError::Api`
    async fn get_checked(&self, url: Url, accept: Option<&'static str>) -> GithubResult<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn list_repos(&self, user: &str) -> GithubResult<Vec<Repository>> {
        let mut url = self.api_url(&["users", user, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", "100")
            .append_pair("sort", "updated")
            .append_pair("direction", "desc");

        let response = self.get_checked(url, None).await?;
        Ok(response.json().await?)
    }

    async fn list_languages(&self, user: &str, repo: &str) -> GithubResult<BTreeMap<String, u64>> {
        let url = self.api_url(&["repos", user, repo, "languages"]);

        timeout(self.sub_fetch_timeout, async {
            let response = self.get_checked(url, None).await?;
            Ok(response.json().await?)
        })
        .await
        .map_err(|_| GithubError::Timeout)?
    }

    async fn fetch_readme(&self, user: &str, repo: &str) -> GithubResult<String> {
        let url = self.api_url(&["repos", user, repo, "readme"]);

        timeout(self.sub_fetch_timeout, async {
            let response = self
                .get_checked(url, Some("application/vnd.github.raw"))
                .await?;
            Ok(response.text().await?)
        })
        .await
        .map_err(|_| GithubError::Timeout)?
    }
}
