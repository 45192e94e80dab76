//! Application configuration and environment variable parsing.
//!
//! This module handles loading configuration settings from the environment (e.g., .env file).
//! It defines the `AppConfig` struct which governs which repositories are reported on,
//! the report title, request deadlines and where the finished report is delivered.

use serde::Deserialize;
use std::fmt;
use std::time::Duration as StdDuration;

/// A unique identifier for a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// The owner of the repository (e.g., "apollographql").
    pub owner: String,
    /// The name of the repository (e.g., "apollo-client").
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Repositories to include in the report, in report order.
    /// Expected format: comma-separated string of "owner/repo" pairs.
    /// Example: "apollographql/apollo-client,apollographql/apollo-server"
    #[serde(rename = "report_repos", deserialize_with = "deserialize_repos")]
    pub repos: Vec<RepoId>,

    /// Title of the aggregated report. The current date is appended when rendering.
    #[serde(rename = "report_title", default = "default_title")]
    pub title: String,

    /// Optional GitHub Personal Access Token, sent as a bearer token.
    pub github_token: Option<String>,

    /// Optional webhook that receives the finished report.
    #[serde(alias = "zapier_webhook_url")]
    pub webhook_url: Option<String>,

    /// Issues updated within this many days count as "active".
    #[serde(default = "default_active_since_days")]
    pub active_since_days: i64,

    /// Overall deadline for a single external request, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Maximum number of repositories queried at the same time.
    /// Defaults to 10 if not specified.
    #[serde(default = "default_concurrency_limit")]
    pub fetch_concurrency_limit: usize,
}

fn default_title() -> String {
    "Health Report for OSS Repositories".to_string()
}

fn default_active_since_days() -> i64 {
    7
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_concurrency_limit() -> usize {
    10
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn request_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.request_timeout_seconds)
    }
}

fn deserialize_repos<'de, D>(deserializer: D) -> Result<Vec<RepoId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(parse_repos(&s))
}

fn parse_repos(s: &str) -> Vec<RepoId> {
    s.split(',')
        .filter_map(|part| {
            let parts: Vec<&str> = part.trim().split('/').collect();
            match parts.as_slice() {
                [owner, repo] if !owner.trim().is_empty() && !repo.trim().is_empty() => {
                    Some(RepoId::new(owner.trim(), repo.trim()))
                }
                _ => {
                    if !part.trim().is_empty() {
                        tracing::warn!(entry = part.trim(), "Skipping malformed repository entry");
                    }
                    None
                }
            }
        })
        .collect()
}
