use chrono::{TimeZone, Utc};
use octocrab::Octocrab;
use repohealth::config::RepoId;
use repohealth::delivery::{deliver_best_effort, WebhookClient};
use repohealth::error::{DeliveryError, FetchError};
use repohealth::{GitHubClient, RepositorySource};
use serde_json::{json, Value};
use std::time::Duration as StdDuration;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_connection() -> Value {
    json!({ "totalCount": 0, "nodes": [] })
}

fn repository_body() -> Value {
    json!({
        "data": {
            "repository": {
                "name": "apollo-client",
                "mergedPullRequests": {
                    "totalCount": 1,
                    "nodes": [{
                        "createdAt": "2024-01-01T00:00:00Z",
                        "updatedAt": "2024-01-03T00:00:00Z",
                        "mergedAt": "2024-01-03T00:00:00Z",
                        "reviews": { "totalCount": 1, "nodes": [{
                            "createdAt": "2024-01-02T00:00:00Z",
                            "updatedAt": "2024-01-02T00:00:00Z",
                            "state": "APPROVED"
                        }]}
                    }]
                },
                "openPullRequests": { "totalCount": 42, "nodes": [] },
                "topTenActivePRs": {
                    "totalCount": 1,
                    "nodes": [{
                        "title": "Fix #100",
                        "url": "https://github.com/apollographql/apollo-client/pull/101",
                        "bodyText": "Closes #100",
                        "updatedAt": "2024-01-03T00:00:00Z",
                        "reactions": { "totalCount": 3 },
                        "comments": { "totalCount": 2 }
                    }]
                },
                "topTenStalePRs": empty_connection(),
                "openIssuesForStats": {
                    "totalCount": 7,
                    "nodes": [{
                        "createdAt": "2024-01-01T00:00:00Z",
                        "updatedAt": "2024-01-05T00:00:00Z",
                        "comments": { "totalCount": 1, "nodes": [
                            { "createdAt": "2024-01-02T00:00:00Z" }
                        ]}
                    }]
                },
                "closedIssuesForStats": empty_connection(),
                "topTenActiveIssues": empty_connection(),
                "topTenStaleIssues": empty_connection()
            }
        }
    })
}

fn client_for(server: &MockServer, timeout: StdDuration) -> GitHubClient {
    let octocrab = Octocrab::builder()
        .base_uri(server.uri())
        .expect("valid mock server uri")
        .build()
        .expect("octocrab client");
    GitHubClient::from_octocrab(octocrab, timeout)
}

fn repo_id() -> RepoId {
    RepoId::new("apollographql", "apollo-client")
}

#[tokio::test]
async fn test_fetch_repository_sends_variables_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": {
                "org": "apollographql",
                "repo": "apollo-client",
                "activeSince": "2024-01-01T00:00:00Z"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, StdDuration::from_secs(5));
    let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let repository = client
        .fetch_repository(&repo_id(), since)
        .await
        .expect("repository should parse");

    assert_eq!(repository.name, "apollo-client");
    assert_eq!(repository.open_pull_requests.total_count, 42);
    assert_eq!(repository.open_issues.total_count, 7);
    assert_eq!(repository.top_active_pull_requests.nodes[0].reactions.total_count, 3);
}

#[tokio::test]
async fn test_fetch_repository_surfaces_graphql_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": null },
            "errors": [{ "message": "Could not resolve to a Repository" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, StdDuration::from_secs(5));
    let err = client
        .fetch_repository(&repo_id(), Utc::now())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::GraphQl { .. }));
}

#[tokio::test]
async fn test_fetch_repository_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/graphql"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, StdDuration::from_secs(5));
    let err = client
        .fetch_repository(&repo_id(), Utc::now())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn test_fetch_repository_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repository_body())
                .set_delay(StdDuration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, StdDuration::from_millis(50));
    let err = client
        .fetch_repository(&repo_id(), Utc::now())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_webhook_receives_title_and_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/report"))
        .and(body_json(json!({
            "title": "Health Report - October 15th, 2026",
            "report": "# Health Report - October 15th, 2026\n"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let webhook = WebhookClient::new(
        format!("{}/hooks/report", mock_server.uri()),
        StdDuration::from_secs(5),
    )
    .expect("webhook client");

    webhook
        .deliver(
            "Health Report - October 15th, 2026",
            "# Health Report - October 15th, 2026\n",
        )
        .await
        .expect("delivery should succeed");
}

#[tokio::test]
async fn test_webhook_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/report"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let webhook = WebhookClient::new(
        format!("{}/hooks/report", mock_server.uri()),
        StdDuration::from_secs(5),
    )
    .expect("webhook client");

    let err = webhook.deliver("t", "r").await.unwrap_err();

    assert!(matches!(err, DeliveryError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_best_effort_delivery_never_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/hooks/report", mock_server.uri());
    deliver_best_effort(Some(&url), StdDuration::from_secs(5), "t", "r").await;
    deliver_best_effort(None, StdDuration::from_secs(5), "t", "r").await;
}
