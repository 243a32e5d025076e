use crate::github::GitHubClient;
use crate::types::{Logo, RepoId};
use std::collections::HashMap;

/// Looks up the avatar of a repository's owner.
///
/// Failures are logged and reported as `Logo::Failed`; they never propagate.
/// This function does not memoize, see `LogoCache` for that.
pub async fn resolve_logo(client: &GitHubClient, repo_id: &RepoId) -> Logo {
    match client.repository(repo_id).await {
        Ok(details) => match details.owner.and_then(|owner| owner.avatar_url) {
            Some(url) => Logo::Resolved(url),
            None => {
                tracing::warn!(repo = %repo_id, "Repository details carry no owner avatar");
                Logo::Failed
            }
        },
        Err(e) => {
            tracing::warn!(repo = %repo_id, "Failed to fetch logo: {:#}", e);
            Logo::Failed
        }
    }
}

/// Per-run memo of repository logos.
///
/// Lives for a single aggregation and is dropped afterwards. A cached
/// `Logo::Failed` is returned as-is and not retried.
pub struct LogoCache<'a> {
    client: &'a GitHubClient,
    logos: HashMap<RepoId, Logo>,
}

impl<'a> LogoCache<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self {
            client,
            logos: HashMap::new(),
        }
    }

    pub async fn get(&mut self, repo_id: &RepoId) -> Logo {
        if let Some(logo) = self.logos.get(repo_id) {
            return logo.clone();
        }

        let logo = resolve_logo(self.client, repo_id).await;
        self.logos.insert(repo_id.clone(), logo.clone());
        logo
    }

    /// Number of distinct repositories looked up so far in this run.
    pub fn repositories(&self) -> usize {
        self.logos.len()
    }
}
