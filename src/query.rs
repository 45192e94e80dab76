//! The GraphQL document requested for every repository in a report.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

/// Fetches the issue and pull request projections one repository report needs.
///
/// Every connection requests `totalCount` so the response deserializes strictly
/// into [`crate::types::Repository`].
pub const REPOSITORY_QUERY: &str = r#"
fragment openIssue on Issue {
  createdAt
  updatedAt
  comments(first: 100) {
    totalCount
    nodes {
      createdAt
    }
  }
}

fragment closedIssue on Issue {
  createdAt
  closedAt
  comments(first: 1) {
    totalCount
    nodes {
      createdAt
    }
  }
}

fragment activeIssue on Issue {
  updatedAt
  url
  title
  bodyText
  reactions {
    totalCount
  }
  comments {
    totalCount
  }
}

fragment staleIssue on Issue {
  title
  bodyText
  url
}

fragment activePR on PullRequest {
  updatedAt
  url
  title
  bodyText
  reactions {
    totalCount
  }
  comments {
    totalCount
  }
}

fragment stalePR on PullRequest {
  title
  bodyText
  url
}

fragment openPullRequest on PullRequest {
  createdAt
  updatedAt
  reviews(last: 1) {
    totalCount
    nodes {
      createdAt
      updatedAt
      state
    }
  }
}

fragment mergedPullRequest on PullRequest {
  createdAt
  updatedAt
  mergedAt
  reviews(first: 10) {
    totalCount
    nodes {
      createdAt
      updatedAt
      state
    }
  }
}

query RepositoryHealth($org: String!, $repo: String!, $activeSince: DateTime) {
  repository(owner: $org, name: $repo) {
    name
    mergedPullRequests: pullRequests(last: 100, states: MERGED) {
      totalCount
      nodes {
        ...mergedPullRequest
      }
    }
    openPullRequests: pullRequests(last: 100, states: OPEN) {
      totalCount
      nodes {
        ...openPullRequest
      }
    }
    topTenActivePRs: pullRequests(
      last: 10
      states: OPEN
      orderBy: { field: COMMENTS, direction: ASC }
    ) {
      totalCount
      nodes {
        ...activePR
      }
    }
    topTenStalePRs: pullRequests(first: 10, states: OPEN) {
      totalCount
      nodes {
        ...stalePR
      }
    }
    openIssuesForStats: issues(last: 100, states: OPEN) {
      totalCount
      nodes {
        ...openIssue
      }
    }
    closedIssuesForStats: issues(last: 100, states: CLOSED) {
      totalCount
      nodes {
        ...closedIssue
      }
    }
    topTenActiveIssues: issues(
      last: 10
      states: OPEN
      filterBy: { since: $activeSince }
    ) {
      totalCount
      nodes {
        ...activeIssue
      }
    }
    topTenStaleIssues: issues(
      first: 10
      states: OPEN
      filterBy: { assignee: null }
    ) {
      totalCount
      nodes {
        ...staleIssue
      }
    }
  }
}
"#;

/// Variables bound to [`REPOSITORY_QUERY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub org: String,
    pub repo: String,
    /// ISO-8601 cutoff; open issues updated after it are "active".
    pub active_since: String,
}

impl QueryVariables {
    pub fn new(org: &str, repo: &str, active_since: DateTime<Utc>) -> Self {
        Self {
            org: org.to_string(),
            repo: repo.to_string(),
            active_since: active_since.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Request body for a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct QueryPayload<'a> {
    pub query: &'a str,
    pub variables: QueryVariables,
}

impl QueryPayload<'static> {
    pub fn repository(variables: QueryVariables) -> Self {
        Self {
            query: REPOSITORY_QUERY,
            variables,
        }
    }
}

/// The point in time after which an updated issue counts as active.
pub fn active_since_cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}
