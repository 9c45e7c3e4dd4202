//! Repository enrichment pipeline
//!
//! Takes the filtered repository listing and augments each entry with
//! per-language byte percentages and the README category tag. The two
//! sub-fetches per repository run concurrently, all repositories fan out
//! at once, and the output preserves the listing order. Secondary failures
//! degrade to defaults instead of failing the request.

mod tag;

pub use tag::extract_readme_tag;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::github::{GithubApi, GithubError, Repository};

/// An enriched project as served to the UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Repository name
    pub name: String,
    /// Repository description, empty string when GitHub has none
    pub description: String,
    /// Primary language, `"Unknown"` when GitHub reports none
    pub language: String,
    /// Language name -> percentage of total bytes, one decimal place.
    /// Empty when the languages fetch failed or the repo has zero bytes.
    pub languages: BTreeMap<String, f64>,
    /// Category tag from the README's first line, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    /// Repository URL on GitHub
    pub url: String,
    /// Last update timestamp from the listing
    pub updated_at: DateTime<Utc>,
}

/// Resolve the requested project count.
///
/// Parsed as a float to mirror loose numeric query input: non-numeric,
/// non-finite, or non-positive values fall back to `default`; anything
/// larger than `max` is capped; fractional values truncate.
pub fn clamp_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    match raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(n) if n.is_finite() && n > 0.0 => n.min(max as f64) as usize,
        _ => default,
    }
}

/// Drop forks and archived/disabled repositories, then truncate to `limit`.
///
/// Order-preserving: the upstream listing is already sorted by most recent
/// update, and nothing downstream may reorder it.
pub fn filter_repos(repos: Vec<Repository>, limit: usize) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| !repo.fork && !repo.archived && !repo.disabled)
        .take(limit)
        .collect()
}

/// Convert per-language byte counts to one-decimal percentages.
///
/// A zero byte total yields an empty map; otherwise the percentages sum to
/// 100.0 give or take rounding.
pub fn language_percentages(bytes: &BTreeMap<String, u64>) -> BTreeMap<String, f64> {
    let total: u64 = bytes.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }

    bytes
        .iter()
        .map(|(name, &count)| {
            let share = (count as f64 / total as f64 * 1000.0).round() / 10.0;
            (name.clone(), share)
        })
        .collect()
}

/// Resolve a secondary fetch to its value or a fallback.
///
/// This is the degrade-to-default policy for the languages and README
/// sub-fetches: any failure, including a timeout, is logged and absorbed
/// here so it can never fail or delay the rest of the request.
fn or_fallback<T>(result: Result<T, GithubError>, fallback: T, repo: &str, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(repo, "{} fetch degraded to default: {}", what, e);
            fallback
        }
    }
}

/// Enrich each repository with language percentages and the README tag.
///
/// Fan-out/fan-in: one future per repository, each running its two
/// sub-fetches concurrently. A sub-fetch failure affects only its own
/// field on its own repository. The output order equals the input order.
pub async fn enrich_projects(
    api: &dyn GithubApi,
    user: &str,
    repos: Vec<Repository>,
) -> Vec<Project> {
    let tasks = repos.into_iter().map(|repo| async move {
        let (languages, readme) = tokio::join!(
            api.list_languages(user, &repo.name),
            api.fetch_readme(user, &repo.name),
        );

        let bytes = or_fallback(languages, BTreeMap::new(), &repo.name, "languages");
        let project_type = or_fallback(readme.map(|text| extract_readme_tag(&text)), None, &repo.name, "readme");

        Project {
            description: repo.description.unwrap_or_default(),
            language: repo.language.unwrap_or_else(|| "Unknown".to_string()),
            languages: language_percentages(&bytes),
            project_type,
            url: repo.html_url,
            updated_at: repo.updated_at,
            name: repo.name,
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, fork: bool, archived: bool, disabled: bool) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: None,
            html_url: format!("https://github.com/octocat/{name}"),
            fork,
            archived,
            disabled,
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn limit_defaults_for_bad_input() {
        assert_eq!(clamp_limit(None, 6, 50), 6);
        assert_eq!(clamp_limit(Some(""), 6, 50), 6);
        assert_eq!(clamp_limit(Some("abc"), 6, 50), 6);
        assert_eq!(clamp_limit(Some("0"), 6, 50), 6);
        assert_eq!(clamp_limit(Some("-3"), 6, 50), 6);
        assert_eq!(clamp_limit(Some("NaN"), 6, 50), 6);
        assert_eq!(clamp_limit(Some("inf"), 6, 50), 6);
    }

    #[test]
    fn limit_caps_at_max_and_passes_through() {
        assert_eq!(clamp_limit(Some("12"), 6, 50), 12);
        assert_eq!(clamp_limit(Some("50"), 6, 50), 50);
        assert_eq!(clamp_limit(Some("51"), 6, 50), 50);
        assert_eq!(clamp_limit(Some("999"), 6, 50), 50);
        // Fractions truncate after clamping
        assert_eq!(clamp_limit(Some("6.9"), 6, 50), 6);
    }

    #[test]
    fn filter_drops_forks_archived_disabled() {
        let repos = vec![
            repo("keep-1", false, false, false),
            repo("forked", true, false, false),
            repo("archived", false, true, false),
            repo("disabled", false, false, true),
            repo("keep-2", false, false, false),
        ];

        let kept = filter_repos(repos, 10);
        let names: Vec<_> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["keep-1", "keep-2"]);
    }

    #[test]
    fn filter_truncates_preserving_order() {
        let repos = vec![
            repo("a", false, false, false),
            repo("b", true, false, false),
            repo("c", false, false, false),
            repo("d", false, false, false),
        ];

        let kept = filter_repos(repos, 2);
        let names: Vec<_> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let bytes = BTreeMap::from([
            ("TypeScript".to_string(), 300u64),
            ("CSS".to_string(), 100u64),
        ]);

        let percentages = language_percentages(&bytes);
        assert_eq!(percentages["TypeScript"], 75.0);
        assert_eq!(percentages["CSS"], 25.0);
    }

    #[test]
    fn percentages_sum_to_about_100() {
        let bytes = BTreeMap::from([
            ("Rust".to_string(), 1u64),
            ("Shell".to_string(), 1u64),
            ("Make".to_string(), 1u64),
        ]);

        let percentages = language_percentages(&bytes);
        let total: f64 = percentages.values().sum();
        assert!((total - 100.0).abs() < 0.2, "total was {total}");
    }

    #[test]
    fn zero_bytes_yield_empty_map() {
        assert!(language_percentages(&BTreeMap::new()).is_empty());

        let all_zero = BTreeMap::from([("Rust".to_string(), 0u64)]);
        assert!(language_percentages(&all_zero).is_empty());
    }

    #[test]
    fn project_serializes_with_camel_case_keys() {
        let project = Project {
            name: "portfolio".to_string(),
            description: String::new(),
            language: "Unknown".to_string(),
            languages: BTreeMap::new(),
            project_type: Some("WEB".to_string()),
            url: "https://github.com/octocat/portfolio".to_string(),
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["projectType"], "WEB");
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn absent_project_type_is_omitted_from_json() {
        let project = Project {
            name: "portfolio".to_string(),
            description: String::new(),
            language: "Unknown".to_string(),
            languages: BTreeMap::new(),
            project_type: None,
            url: "https://github.com/octocat/portfolio".to_string(),
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("projectType").is_none());
    }
}
