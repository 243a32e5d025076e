#![allow(dead_code)]

use pr_report::config::AppConfig;
use serde_json::{json, Value};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTHOR: &str = "octocat";

pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        github_api_base: server.uri(),
        ..AppConfig::new(AUTHOR, "test-token")
    }
}

pub fn search_item(server: &MockServer, repo: &str, number: u64) -> Value {
    json!({
        "title": format!("PR {number} in {repo}"),
        "html_url": format!("https://github.com/{repo}/pull/{number}"),
        "repository_url": format!("{}/repos/{repo}", server.uri()),
        "number": number,
        "created_at": "2024-01-01T00:00:00Z",
    })
}

/// A page of `len` items in one repository, numbered from `first`.
pub fn page_of(server: &MockServer, repo: &str, first: u64, len: u64) -> Vec<Value> {
    (first..first + len)
        .map(|number| search_item(server, repo, number))
        .collect()
}

pub async fn mount_search_page(
    server: &MockServer,
    qualifier: &str,
    page: u32,
    items: Vec<Value>,
) {
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(header_exists("authorization"))
        .and(query_param(
            "q",
            format!("author:{AUTHOR} type:pr {qualifier}"),
        ))
        .and(query_param("sort", "created"))
        .and(query_param("order", "asc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": items.len(),
            "items": items,
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_logo(server: &MockServer, repo: &str, avatar_url: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": repo,
            "owner": { "login": repo.split('/').next(), "avatar_url": avatar_url },
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_commits(server: &MockServer, repo: &str, number: u64, messages: &[&str]) {
    let commits: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "sha": "0000000", "commit": { "message": message } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/repos/{repo}/pulls/{number}/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(commits))
        .expect(1)
        .mount(server)
        .await;
}
