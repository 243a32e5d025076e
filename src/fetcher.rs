use crate::aggregator::Aggregator;
use crate::commits;
use crate::config::AppConfig;
use crate::github::GitHubClient;
use crate::types::PullRequestDetail;
use anyhow::Result;
use futures::stream::{self, StreamExt};

/// Assembles the full report: aggregated pull requests with their commits.
///
/// This separates the logic of data retrieval and processing
/// from the HTTP layer.
#[derive(Clone)]
pub struct ReportFetcher {
    aggregator: Aggregator,
    client: GitHubClient,
    commit_fetch_concurrency: usize,
}

impl ReportFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = GitHubClient::new(config)?;
        Ok(Self {
            aggregator: Aggregator::new(client.clone(), &config.github_username),
            client,
            commit_fetch_concurrency: config.commit_fetch_concurrency.max(1),
        })
    }

    /// Returns one detail per aggregated pull request, in aggregation order.
    ///
    /// An empty report means no pull requests were found.
    pub async fn fetch_report(&self) -> Result<Vec<PullRequestDetail>> {
        let prs = self.aggregator.aggregate().await?;

        // `buffered` yields in input order even when fetches overlap.
        let details: Vec<PullRequestDetail> = stream::iter(prs)
            .map(|pull_request| async move {
                let commits = commits::fetch_commits(
                    &self.client,
                    &pull_request.repository,
                    pull_request.number,
                )
                .await;
                PullRequestDetail {
                    pull_request,
                    commits,
                }
            })
            .buffered(self.commit_fetch_concurrency)
            .collect()
            .await;

        Ok(details)
    }
}
