//! Paginated pull request search.
//!
//! `PullRequestQuerier` runs one search qualifier (e.g. "is:open") for the configured
//! author and walks the result pages in ascending creation order until a short or
//! empty page signals the end. Any failed page aborts the whole query; there is no
//! partial result.

use crate::github::{GitHubClient, SearchItem, SearchParams};
use crate::types::{PullRequestSummary, RepoId};
use anyhow::{anyhow, Result};

/// Results requested per search page. This is the maximum the search API allows.
pub const PAGE_SIZE: u8 = 100;

#[derive(Clone)]
pub struct PullRequestQuerier {
    client: GitHubClient,
    author: String,
}

impl PullRequestQuerier {
    pub fn new(client: GitHubClient, author: impl Into<String>) -> Self {
        Self {
            client,
            author: author.into(),
        }
    }

    /// Builds the search query for a state qualifier.
    pub fn search_query(&self, qualifier: &str) -> String {
        format!("author:{} type:pr {}", self.author, qualifier)
    }

    /// Retrieves every pull request matching the qualifier, oldest first.
    pub async fn fetch_prs(&self, qualifier: &str) -> Result<Vec<PullRequestSummary>> {
        let query = self.search_query(qualifier);
        let mut prs = Vec::new();
        let mut page = 1;

        loop {
            let params = SearchParams {
                q: &query,
                sort: "created",
                order: "asc",
                per_page: PAGE_SIZE,
                page,
            };
            let response = self.client.search_issues(&params).await.map_err(|e| {
                e.context(format!("searching pull requests ({qualifier}), page {page}"))
            })?;

            let received = response.items.len();
            tracing::debug!(qualifier, page, received, "Fetched search page");

            if received == 0 {
                break;
            }

            for item in response.items {
                prs.push(self.to_summary(item)?);
            }

            if received < usize::from(PAGE_SIZE) {
                break;
            }
            page += 1;
        }

        tracing::info!(qualifier, total = prs.len(), "Finished pull request search");
        Ok(prs)
    }

    fn to_summary(&self, item: SearchItem) -> Result<PullRequestSummary> {
        let repository =
            RepoId::from_repository_url(self.client.api_base(), &item.repository_url)
                .ok_or_else(|| anyhow!("unexpected repository url {:?}", item.repository_url))?;

        Ok(PullRequestSummary {
            title: item.title,
            html_url: item.html_url,
            repository,
            number: item.number,
            created_at: item.created_at,
        })
    }
}
