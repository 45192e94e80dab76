//! Fan-out of repository queries and assembly of the aggregated report.
//!
//! `ReportAggregator` is the main entry point for producing a report. It:
//! 1. Queries every configured repository concurrently through a shared source.
//! 2. Keeps the results in configuration order, failing on the first error.
//! 3. Renders each repository and joins the sections under a dated title.

use crate::config::{AppConfig, RepoId};
use crate::error::FetchError;
use crate::github::RepositorySource;
use crate::query;
use crate::report;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};

pub struct ReportAggregator<'a, S: ?Sized> {
    source: &'a S,
    concurrency_limit: usize,
    active_since_days: i64,
}

impl<'a, S> ReportAggregator<'a, S>
where
    S: RepositorySource + ?Sized,
{
    pub fn new(source: &'a S, config: &AppConfig) -> Self {
        Self {
            source,
            concurrency_limit: config.fetch_concurrency_limit.max(1),
            active_since_days: config.active_since_days,
        }
    }

    /// Builds the full report for `repos`, in the given order.
    ///
    /// No partial report is produced: if any repository cannot be fetched the
    /// error is returned and the remaining in-flight requests are dropped.
    pub async fn generate(
        &self,
        title: &str,
        repos: &[RepoId],
        now: DateTime<Utc>,
    ) -> Result<String, FetchError> {
        let active_since = query::active_since_cutoff(now, self.active_since_days);

        tracing::info!(repos = repos.len(), "Fetching repository data");

        let sections: Vec<String> = stream::iter(repos)
            .map(|repo_id| async move {
                let repository = self.source.fetch_repository(repo_id, active_since).await?;
                tracing::info!(repo = %repo_id, "Fetched repository data");
                Ok::<_, FetchError>(report::repository_report(&repository, now))
            })
            .buffered(self.concurrency_limit)
            .try_collect()
            .await?;

        Ok(report::aggregate_report(
            &report::report_title(title, now.date_naive()),
            &sections,
        ))
    }
}
