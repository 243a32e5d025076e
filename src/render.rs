//! HTML rendering of the assembled report.

use crate::types::PullRequestDetail;
use minijinja::{context, Environment};
use std::path::PathBuf;
use thiserror::Error;

const TEMPLATE_NAME: &str = "result.html";
const EMBEDDED_TEMPLATE: &str = include_str!("../templates/result.html");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load template {path}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders reports with either the embedded template or one read from disk.
///
/// A template on disk is re-read on every render so edits show up without a restart.
#[derive(Clone, Debug, Default)]
pub struct ReportRenderer {
    template_path: Option<PathBuf>,
}

impl ReportRenderer {
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }

    pub fn render(&self, prs: &[PullRequestDetail]) -> Result<String, RenderError> {
        let source = self.load_template()?;

        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &source)?;
        let html = env.get_template(TEMPLATE_NAME)?.render(context! { prs => prs })?;
        Ok(html)
    }

    fn load_template(&self) -> Result<String, RenderError> {
        match &self.template_path {
            Some(path) => std::fs::read_to_string(path).map_err(|source| RenderError::Load {
                path: path.clone(),
                source,
            }),
            None => Ok(EMBEDDED_TEMPLATE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Commit, Logo, PullRequestSummary};

    fn detail(logo: Logo, commits: &[&str]) -> PullRequestDetail {
        PullRequestDetail {
            pull_request: PullRequestSummary {
                title: "Escape <b>this</b>".to_string(),
                html_url: "https://github.com/a/b/pull/7".to_string(),
                repository: "a/b".parse().unwrap(),
                number: 7,
                created_at: "2024-03-01T12:00:00Z".parse().unwrap(),
            }
            .with_logo(logo),
            commits: commits
                .iter()
                .map(|m| Commit {
                    message: m.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_embedded_template() {
        let html = ReportRenderer::default()
            .render(&[detail(
                Logo::Resolved("https://avatars.example/a.png".to_string()),
                &["fix bug", "add test"],
            )])
            .unwrap();

        assert!(html.contains("&lt;b&gt;this"));
        assert!(!html.contains("<b>this"));
        assert!(html.contains("avatars.example"));
        assert!(html.contains("#7"));
        assert!(html.contains("<pre>fix bug</pre>"));
        assert!(html.contains("<pre>add test</pre>"));
    }

    #[test]
    fn test_failed_logo_renders_no_image() {
        let html = ReportRenderer::default()
            .render(&[detail(Logo::Failed, &[])])
            .unwrap();

        assert!(!html.contains("<img"));
        assert!(!html.contains("class=\"commits\""));
    }

    #[test]
    fn test_missing_template_file() {
        let renderer = ReportRenderer::new(Some(PathBuf::from("does/not/exist.html")));
        let result = renderer.render(&[]);
        assert!(matches!(result, Err(RenderError::Load { .. })));
    }
}
