use crate::error::DeliveryError;
use serde::Serialize;
use std::time::Duration as StdDuration;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    title: &'a str,
    report: &'a str,
}

/// Posts finished reports to a webhook.
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: StdDuration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Sends `{ "title", "report" }` as a single JSON POST.
    pub async fn deliver(&self, title: &str, report: &str) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.url)
            .json(&WebhookPayload { title, report })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status()));
        }

        Ok(())
    }
}

/// Delivers the report if a webhook is configured. Failures are logged and
/// otherwise ignored; the report has already been produced at this point.
pub async fn deliver_best_effort(
    webhook_url: Option<&str>,
    timeout: StdDuration,
    title: &str,
    report: &str,
) {
    let Some(url) = webhook_url else {
        tracing::debug!("No webhook configured, skipping delivery");
        return;
    };

    let result = match WebhookClient::new(url, timeout) {
        Ok(client) => client.deliver(title, report).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => tracing::info!("Delivered report to webhook"),
        Err(e) => tracing::warn!("Failed to deliver report to webhook: {}", e),
    }
}
