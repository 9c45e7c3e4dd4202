//! REST API handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::enrich::{clamp_limit, enrich_projects, filter_repos, Project};
use crate::github::GithubError;

/// Shared-cache directive set on successful responses only
const CACHE_CONTROL_VALUE: &str = "s-maxage=600, stale-while-revalidate=3600";

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Query parameters for the enrichment endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsParams {
    /// GitHub login; falls back to the configured default when absent
    pub user: Option<String>,
    /// Requested project count, parsed leniently
    pub limit: Option<String>,
}

/// Successful enrichment payload
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub user: String,
    pub projects: Vec<Project>,
}

/// Fetch, filter, and enrich a user's repositories
pub async fn github_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsParams>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    // An explicit user parameter wins over the configured default, even
    // when it is empty, in which case the request is rejected below.
    let user = match params.user {
        Some(user) => user,
        None => state.config.default_user.clone().unwrap_or_default(),
    };
    if user.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing GitHub user.")),
        ));
    }

    let limit = clamp_limit(
        params.limit.as_deref(),
        state.config.default_limit,
        state.config.max_limit,
    );

    let repos = match state.github.list_repos(&user).await {
        Ok(repos) => repos,
        Err(GithubError::Api { status, body }) => {
            // Proxy the upstream status and body back to the caller; only a
            // fully empty body gets the generic message
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = if body.is_empty() {
                "GitHub API error".to_string()
            } else {
                body
            };
            return Err((status, Json(ErrorResponse::new(message))));
        }
        Err(e) => {
            tracing::error!("Repository list fetch failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Unexpected server error.")),
            ));
        }
    };

    let selected = filter_repos(repos, limit);
    let projects = enrich_projects(state.github.as_ref(), &user, selected).await;

    let body = ProjectsResponse { user, projects };
    Ok((
        [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
        Json(body),
    )
        .into_response())
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub default_user: Option<String>,
    /// Whether an upstream token is configured; the token itself is never exposed
    pub authenticated: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        default_user: state.config.default_user.clone(),
        authenticated: state.config.token.is_some(),
    })
}
