//! Typed projections of the GraphQL response for a single repository.
//!
//! Each alias in the repository query has its own node type so that a
//! missing or malformed field fails deserialization instead of surfacing
//! later as an empty value in the report.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GraphQL connection: total size upstream plus the nodes actually returned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub total_count: u64,
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            nodes: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    pub fn new(nodes: Vec<T>) -> Self {
        Self {
            total_count: nodes.len() as u64,
            nodes,
        }
    }
}

/// A connection where only the total was requested.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Count {
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub created_at: DateTime<Utc>,
}

/// A review's state. `Pending` reviews are drafts the author has not
/// submitted yet, so they do not count as a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Commented,
    Pending,
    Approved,
    ChangesRequested,
    Dismissed,
}

impl ReviewState {
    pub fn is_submitted(self) -> bool {
        self != ReviewState::Pending
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: ReviewState,
}

/// An open issue sampled for statistics. Comments are ordered oldest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIssue {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Connection<Comment>,
}

/// A closed issue sampled for statistics, carrying at most its first comment.
///
/// Only the close timestamps feed the report; `comments` mirrors the query
/// projection so a changed projection is caught at deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedIssue {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: Connection<Comment>,
}

/// An issue or pull request listed under "Top Active".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveItem {
    pub title: String,
    pub url: String,
    pub body_text: String,
    pub updated_at: DateTime<Utc>,
    pub reactions: Count,
    pub comments: Count,
}

/// An issue or pull request listed under "Top Stale".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleItem {
    pub title: String,
    pub url: String,
    pub body_text: String,
}

/// An open pull request sampled for the first-review count.
///
/// The timestamps mirror the query projection; only `reviews` is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPullRequest {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Only the most recent review is requested.
    pub reviews: Connection<Review>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPullRequest {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    /// The earliest reviews, oldest first.
    pub reviews: Connection<Review>,
}

/// Everything one repository report is rendered from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(rename = "openPullRequests")]
    pub open_pull_requests: Connection<OpenPullRequest>,
    #[serde(rename = "mergedPullRequests")]
    pub merged_pull_requests: Connection<MergedPullRequest>,
    #[serde(rename = "topTenActivePRs")]
    pub top_active_pull_requests: Connection<ActiveItem>,
    #[serde(rename = "topTenStalePRs")]
    pub top_stale_pull_requests: Connection<StaleItem>,
    #[serde(rename = "openIssuesForStats")]
    pub open_issues: Connection<OpenIssue>,
    #[serde(rename = "closedIssuesForStats")]
    pub closed_issues: Connection<ClosedIssue>,
    #[serde(rename = "topTenActiveIssues")]
    pub top_active_issues: Connection<ActiveItem>,
    #[serde(rename = "topTenStaleIssues")]
    pub top_stale_issues: Connection<StaleItem>,
}

/// A GraphQL response envelope.
///
/// `data` stays untyped until `errors` has been checked: GitHub returns
/// partial data alongside errors, and that partial shape does not match
/// [`Repository`].
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_deserializes_from_graphql_shape() {
        let value = json!({
            "name": "apollo-client",
            "openPullRequests": {
                "totalCount": 1,
                "nodes": [{
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-01-02T00:00:00Z",
                    "reviews": { "totalCount": 1, "nodes": [{
                        "createdAt": "2024-01-02T00:00:00Z",
                        "updatedAt": "2024-01-02T00:00:00Z",
                        "state": "CHANGES_REQUESTED"
                    }]}
                }]
            },
            "mergedPullRequests": { "totalCount": 0, "nodes": [] },
            "topTenActivePRs": { "totalCount": 0, "nodes": [] },
            "topTenStalePRs": { "totalCount": 0, "nodes": [] },
            "openIssuesForStats": { "totalCount": 0, "nodes": [] },
            "closedIssuesForStats": { "totalCount": 1, "nodes": [{
                "createdAt": "2024-01-01T00:00:00Z",
                "closedAt": null,
                "comments": { "totalCount": 0, "nodes": [] }
            }]},
            "topTenActiveIssues": { "totalCount": 0, "nodes": [] },
            "topTenStaleIssues": { "totalCount": 0, "nodes": [] }
        });

        let repo: Repository = serde_json::from_value(value).unwrap();

        assert_eq!(repo.name, "apollo-client");
        assert_eq!(
            repo.open_pull_requests.nodes[0].reviews.nodes[0].state,
            ReviewState::ChangesRequested
        );
        assert!(repo.closed_issues.nodes[0].closed_at.is_none());
    }

    #[test]
    fn test_missing_projection_is_rejected() {
        let value = json!({ "name": "apollo-client" });
        assert!(serde_json::from_value::<Repository>(value).is_err());
    }

    #[test]
    fn test_malformed_timestamp_is_rejected() {
        let value = json!({ "createdAt": "yesterday" });
        assert!(serde_json::from_value::<Comment>(value).is_err());
    }
}
