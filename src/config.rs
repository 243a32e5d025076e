//! Application configuration and environment variable parsing.
//!
//! This module handles loading configuration settings from the environment (e.g., .env file).
//! It defines the `AppConfig` struct which carries the report author, the API credential,
//! and the knobs for where and how the report is fetched and rendered.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// GitHub login whose pull requests are reported.
    pub github_username: String,

    /// GitHub Personal Access Token sent as a bearer credential.
    pub github_token: String,

    /// Base URL of the GitHub REST API.
    /// Defaults to "https://api.github.com".
    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,

    /// Port the HTTP server listens on. Defaults to 8080.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional path to a report template read on every request.
    /// When unset, the template compiled into the binary is used.
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Maximum number of commit lists fetched at once while assembling a report.
    /// Defaults to 1 (sequential).
    #[serde(default = "default_commit_fetch_concurrency")]
    pub commit_fetch_concurrency: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("COMMIT_FETCH_CONCURRENCY must be at least 1")]
    ZeroConcurrency,
}

fn default_github_api_base() -> String {
    DEFAULT_GITHUB_API_BASE.to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_commit_fetch_concurrency() -> usize {
    1
}

impl AppConfig {
    /// Builds a configuration with defaults for everything but the credentials.
    pub fn new(github_username: impl Into<String>, github_token: impl Into<String>) -> Self {
        Self {
            github_username: github_username.into(),
            github_token: github_token.into(),
            github_api_base: default_github_api_base(),
            port: default_port(),
            template_path: None,
            commit_fetch_concurrency: default_commit_fetch_concurrency(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.github_username.trim().is_empty() {
            return Err(ConfigError::Empty("GITHUB_USERNAME"));
        }
        if self.github_token.trim().is_empty() {
            return Err(ConfigError::Empty("GITHUB_TOKEN"));
        }
        if self.commit_fetch_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}
