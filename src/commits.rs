//! Commit message cleanup for display.

use crate::github::{GitHubClient, RawCommit};
use crate::types::{Commit, RepoId};

const MERGE_PREFIX: &str = "Merge";
const SIGN_OFF_PREFIX: &str = "Signed-off-by:";

/// Fetches the commits of one pull request and normalizes them.
///
/// A failed fetch is logged and yields an empty list, so one broken pull
/// request never takes down the report.
pub async fn fetch_commits(client: &GitHubClient, repo_id: &RepoId, number: u64) -> Vec<Commit> {
    match client.pull_request_commits(repo_id, number).await {
        Ok(raw) => normalize(raw),
        Err(e) => {
            tracing::warn!(repo = %repo_id, number, "Failed to fetch commits: {:#}", e);
            Vec::new()
        }
    }
}

/// Drops merge commits and strips sign-off trailers, keeping upstream order.
pub fn normalize(raw: Vec<RawCommit>) -> Vec<Commit> {
    raw.into_iter()
        .map(|c| c.commit.message)
        .filter(|message| !message.starts_with(MERGE_PREFIX))
        .map(|message| Commit {
            message: strip_sign_offs(&message),
        })
        .collect()
}

fn strip_sign_offs(message: &str) -> String {
    let mut removed = false;
    let mut lines: Vec<&str> = message
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| {
            let sign_off = line.trim().starts_with(SIGN_OFF_PREFIX);
            removed |= sign_off;
            !sign_off
        })
        .collect();

    // The blank line that separated the trailer block is left dangling.
    if removed {
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
    }

    lines.join("\n")
}
