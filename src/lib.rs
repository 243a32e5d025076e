pub mod aggregator;
pub mod cache;
pub mod commits;
pub mod config;
pub mod fetcher;
pub mod github;
pub mod querier;
pub mod render;
pub mod types;

use axum::{extract::State, http::StatusCode, response::Html, routing::get, Json, Router};
use config::AppConfig;
use fetcher::ReportFetcher;
use render::ReportRenderer;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use types::PullRequestDetail;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

type HandlerError = (StatusCode, String);

/// Shared application state accessible to all request handlers.
pub struct AppState {
    /// Service that assembles the pull request report.
    pub fetcher: ReportFetcher,
    /// Renders the report as HTML.
    pub renderer: ReportRenderer,
    /// Application configuration loaded from environment variables.
    pub config: AppConfig,
}

impl AppState {
    /// Initializes the application state, including the GitHub clients.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let fetcher = ReportFetcher::new(&config)?;
        let renderer = ReportRenderer::new(config.template_path.clone());
        Ok(Self {
            fetcher,
            renderer,
            config,
        })
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_report_page))
        .route("/api/pull-requests", get(get_report_json))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "pr-report",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_report_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, HandlerError> {
    let report = fetch_non_empty_report(&state).await?;

    match state.renderer.render(&report) {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Error rendering report: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error loading template".to_string(),
            ))
        }
    }
}

pub async fn get_report_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PullRequestDetail>>, HandlerError> {
    fetch_non_empty_report(&state).await.map(Json)
}

async fn fetch_non_empty_report(state: &AppState) -> Result<Vec<PullRequestDetail>, HandlerError> {
    let report = match state.fetcher.fetch_report().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(
                author = %state.config.github_username,
                "Failed to fetch pull requests: {:#}",
                e
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch pull requests".to_string(),
            ));
        }
    };

    if report.is_empty() {
        tracing::debug!(author = %state.config.github_username, "No pull requests found");
        return Err((StatusCode::NOT_FOUND, "No matching PRs found.".to_string()));
    }

    Ok(report)
}
