use crate::config::RepoId;
use thiserror::Error;

/// Failure to obtain a repository's data from the GitHub GraphQL API.
///
/// Every variant is fatal for a report run: the aggregator stops at the first one.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub request for {repo} failed: {source}")]
    Transport {
        repo: RepoId,
        #[source]
        source: octocrab::Error,
    },

    #[error("GitHub GraphQL errors for {repo}: {}", .messages.join("; "))]
    GraphQl { repo: RepoId, messages: Vec<String> },

    #[error("Repository {0} not found or not accessible")]
    NotFound(RepoId),

    #[error("Unexpected GraphQL response shape for {repo}: {source}")]
    Shape {
        repo: RepoId,
        #[source]
        source: serde_json::Error,
    },

    #[error("GitHub request for {repo} timed out after {seconds}s")]
    Timeout { repo: RepoId, seconds: u64 },
}

/// Failure to hand a finished report to the webhook.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook responded with status {0}")]
    Status(reqwest::StatusCode),
}
