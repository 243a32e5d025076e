//! Combines the open and merged searches into one list and attaches logos.

use crate::cache::LogoCache;
use crate::github::GitHubClient;
use crate::querier::PullRequestQuerier;
use crate::types::PullRequest;
use anyhow::Result;

/// Qualifiers searched, in output order.
pub const QUALIFIERS: [&str; 2] = ["is:open", "is:merged"];

#[derive(Clone)]
pub struct Aggregator {
    querier: PullRequestQuerier,
    client: GitHubClient,
}

impl Aggregator {
    pub fn new(client: GitHubClient, author: impl Into<String>) -> Self {
        Self {
            querier: PullRequestQuerier::new(client.clone(), author),
            client,
        }
    }

    /// Returns open pull requests followed by merged ones, each with its logo set.
    ///
    /// An empty result is valid. A failed search aborts the whole aggregation.
    /// At most one logo lookup is made per distinct repository.
    pub async fn aggregate(&self) -> Result<Vec<PullRequest>> {
        let mut summaries = Vec::new();
        for qualifier in QUALIFIERS {
            summaries.extend(self.querier.fetch_prs(qualifier).await?);
        }

        let mut logos = LogoCache::new(&self.client);
        let mut prs = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let logo = logos.get(&summary.repository).await;
            prs.push(summary.with_logo(logo));
        }

        tracing::info!(
            pull_requests = prs.len(),
            repositories = logos.repositories(),
            "Aggregated pull requests"
        );
        Ok(prs)
    }
}
