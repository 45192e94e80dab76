use crate::config::{AppConfig, RepoId};
use crate::error::FetchError;
use crate::query::{QueryPayload, QueryVariables};
use crate::types::{GraphQlResponse, Repository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::time::Duration as StdDuration;

/// Anything that can produce the data for one repository report.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_repository(
        &self,
        repo_id: &RepoId,
        active_since: DateTime<Utc>,
    ) -> Result<Repository, FetchError>;
}

/// Read-only GitHub GraphQL client, built once and shared by reference.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    timeout: StdDuration,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = &config.github_token {
            builder = builder.personal_token(token.clone());
        } else {
            tracing::warn!("GITHUB_TOKEN is not set; the GraphQL API rejects anonymous requests");
        }

        Ok(Self::from_octocrab(builder.build()?, config.request_timeout()))
    }

    pub fn from_octocrab(octocrab: Octocrab, timeout: StdDuration) -> Self {
        Self { octocrab, timeout }
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_repository(
        &self,
        repo_id: &RepoId,
        active_since: DateTime<Utc>,
    ) -> Result<Repository, FetchError> {
        let payload = QueryPayload::repository(QueryVariables::new(
            &repo_id.owner,
            &repo_id.repo,
            active_since,
        ));

        tracing::debug!(repo = %repo_id, "Querying GitHub GraphQL API");

        let response: serde_json::Value =
            tokio::time::timeout(self.timeout, self.octocrab.graphql(&payload))
                .await
                .map_err(|_| FetchError::Timeout {
                    repo: repo_id.clone(),
                    seconds: self.timeout.as_secs(),
                })?
                .map_err(|source| FetchError::Transport {
                    repo: repo_id.clone(),
                    source,
                })?;

        parse_repository_response(repo_id, response)
    }
}

/// Validates a raw GraphQL response body and extracts the repository.
///
/// Errors take precedence over any partial `data` that came with them.
pub fn parse_repository_response(
    repo_id: &RepoId,
    response: serde_json::Value,
) -> Result<Repository, FetchError> {
    let shape_error = |source: serde_json::Error| FetchError::Shape {
        repo: repo_id.clone(),
        source,
    };

    let response: GraphQlResponse = serde_json::from_value(response).map_err(shape_error)?;

    if !response.errors.is_empty() {
        return Err(FetchError::GraphQl {
            repo: repo_id.clone(),
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    let repository = match response.data {
        Some(serde_json::Value::Object(mut data)) => data.remove("repository"),
        _ => None,
    };

    match repository {
        None | Some(serde_json::Value::Null) => Err(FetchError::NotFound(repo_id.clone())),
        Some(repository) => serde_json::from_value(repository).map_err(shape_error),
    }
}
