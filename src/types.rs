//! Domain types shared by the aggregation pipeline and the report renderer.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// The owner of the repository (e.g., "rust-lang").
    pub owner: String,
    /// The name of the repository (e.g., "rust").
    pub repo: String,
}

impl RepoId {
    /// Derives the identifier from an API repository URL such as
    /// `https://api.github.com/repos/owner/repo`.
    pub fn from_repository_url(api_base: &str, repository_url: &str) -> Option<Self> {
        let prefix = format!("{}/repos/", api_base.trim_end_matches('/'));
        repository_url.strip_prefix(&prefix)?.parse().ok()
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(format!("expected \"owner/repo\", got {s:?}")),
        }
    }
}

impl Serialize for RepoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of resolving a repository's logo.
///
/// `Failed` is cached for the rest of an aggregation run and never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Logo {
    Resolved(String),
    Failed,
}

impl Logo {
    /// The URL to render, empty when the lookup failed.
    pub fn url(&self) -> &str {
        match self {
            Logo::Resolved(url) => url,
            Logo::Failed => "",
        }
    }
}

impl Serialize for Logo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.url())
    }
}

/// A pull request as returned by one search query, before logo resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub title: String,
    pub html_url: String,
    pub repository: RepoId,
    pub number: u64,
    pub created_at: DateTime<Utc>,
}

impl PullRequestSummary {
    pub fn with_logo(self, logo: Logo) -> PullRequest {
        PullRequest {
            title: self.title,
            html_url: self.html_url,
            repository: self.repository,
            number: self.number,
            created_at: self.created_at,
            logo,
        }
    }
}

/// An aggregated pull request. The logo is always set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub title: String,
    pub html_url: String,
    pub repository: RepoId,
    pub number: u64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "logo_url")]
    pub logo: Logo,
}

/// A commit with its display-ready message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub message: String,
}

/// One report entry: a pull request and its normalized commits, in upstream order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PullRequestDetail {
    pub pull_request: PullRequest,
    pub commits: Vec<Commit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_from_repository_url() {
        let id = RepoId::from_repository_url(
            "https://api.github.com",
            "https://api.github.com/repos/rust-lang/rust",
        )
        .unwrap();
        assert_eq!(id.owner, "rust-lang");
        assert_eq!(id.repo, "rust");
        assert_eq!(id.to_string(), "rust-lang/rust");
    }

    #[test]
    fn test_repo_id_tolerates_trailing_slash_on_base() {
        let id = RepoId::from_repository_url(
            "http://127.0.0.1:8080/",
            "http://127.0.0.1:8080/repos/a/b",
        );
        assert_eq!(id, Some("a/b".parse().unwrap()));
    }

    #[test]
    fn test_repo_id_rejects_foreign_url() {
        assert!(RepoId::from_repository_url(
            "https://api.github.com",
            "https://example.com/repos/a/b"
        )
        .is_none());
        assert!("a".parse::<RepoId>().is_err());
        assert!("a/b/c".parse::<RepoId>().is_err());
        assert!("/b".parse::<RepoId>().is_err());
    }

    #[test]
    fn test_logo_serializes_as_url() {
        let resolved = Logo::Resolved("https://avatars.example/u/1".to_string());
        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            "https://avatars.example/u/1"
        );
        assert_eq!(serde_json::to_value(Logo::Failed).unwrap(), "");
    }

    #[test]
    fn test_pull_request_contract() {
        let pr = PullRequestSummary {
            title: "Fix it".to_string(),
            html_url: "https://github.com/a/b/pull/3".to_string(),
            repository: "a/b".parse().unwrap(),
            number: 3,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
        .with_logo(Logo::Failed);

        let json = serde_json::to_value(&pr).unwrap();
        assert_eq!(json["repository"], "a/b");
        assert_eq!(json["number"], 3);
        assert_eq!(json["logo_url"], "");
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }
}
