//! Authenticated access to the three GitHub REST endpoints the report needs.

use crate::config::AppConfig;
use crate::types::RepoId;
use anyhow::Result;
use axum::http::header::{HeaderName, ACCEPT};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for search and commit requests. Both go through the `search` client.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for repository lookups. Logos are best-effort, so they get more slack.
pub const REPOSITORY_TIMEOUT: Duration = Duration::from_secs(10);

const API_VERSION: &str = "2022-11-28";

/// Query parameters for `GET /search/issues`.
#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub q: &'a str,
    pub sort: &'static str,
    pub order: &'static str,
    pub per_page: u8,
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub html_url: String,
    pub repository_url: String,
    pub number: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryDetails {
    pub owner: Option<RepositoryOwner>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryOwner {
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCommit {
    pub commit: RawCommitData,
}

#[derive(Debug, Deserialize)]
pub struct RawCommitData {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct CommitListParams {
    per_page: u8,
}

/// Thin wrapper over Octocrab. Holds one client per timeout class.
#[derive(Clone)]
pub struct GitHubClient {
    /// Search and pull request commits, bounded by `SEARCH_TIMEOUT`.
    search: Octocrab,
    /// Repository lookups, bounded by `REPOSITORY_TIMEOUT`.
    repository: Octocrab,
    api_base: String,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            search: build_octocrab(config, SEARCH_TIMEOUT)?,
            repository: build_octocrab(config, REPOSITORY_TIMEOUT)?,
            api_base: config.github_api_base.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches one page of issue search results.
    pub async fn search_issues(&self, params: &SearchParams<'_>) -> Result<SearchResponse> {
        let response = self.search.get("/search/issues", Some(params)).await?;
        Ok(response)
    }

    /// Fetches repository metadata, which carries the owner's avatar.
    pub async fn repository(&self, repo_id: &RepoId) -> Result<RepositoryDetails> {
        let route = format!("/repos/{}/{}", repo_id.owner, repo_id.repo);
        let details = self.repository.get(route, None::<&()>).await?;
        Ok(details)
    }

    /// Fetches the first page of commits on a pull request, in upstream order.
    pub async fn pull_request_commits(
        &self,
        repo_id: &RepoId,
        number: u64,
    ) -> Result<Vec<RawCommit>> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/commits",
            repo_id.owner, repo_id.repo, number
        );
        let commits = self
            .search
            .get(route, Some(&CommitListParams { per_page: 100 }))
            .await?;
        Ok(commits)
    }
}

fn build_octocrab(config: &AppConfig, timeout: Duration) -> Result<Octocrab> {
    let octocrab = Octocrab::builder()
        .personal_token(config.github_token.clone())
        .base_uri(config.github_api_base.as_str())?
        .add_header(ACCEPT, "application/vnd.github+json".to_string())
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            API_VERSION.to_string(),
        )
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .set_write_timeout(Some(timeout))
        .build()?;
    Ok(octocrab)
}
