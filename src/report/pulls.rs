use super::markdown::{bold, bullet_list, count_or_no, format_distance, ListingEntry};
use super::TOP_LIST_LIMIT;
use crate::metrics;
use crate::types::{ActiveItem, Repository, StaleItem};
use chrono::{DateTime, Utc};
use markdown_builder::Markdown;

/// Renders the "Pull Requests" section of a repository report.
///
/// PR titles and bodies frequently reference other PRs (`#123`); every `#` in
/// a listing is escaped so it cannot start a markdown heading.
pub fn pulls_report(repository: &Repository, now: DateTime<Utc>) -> String {
    let merged = &repository.merged_pull_requests.nodes;
    let open = &repository.open_pull_requests;

    let mut doc = Markdown::new();
    doc.header3("Pull Requests");
    doc.paragraph(bullet_list([
        format!("There are {} open PRs currently.", open.total_count),
        time_to_merge_text(metrics::average_days_to_merge(merged)),
        time_to_review_text(&metrics::pull_request_review_stats(merged)),
        format!(
            "{} of the last {} open PRs are waiting for a first review.",
            metrics::awaiting_first_review(&open.nodes),
            open.nodes.len()
        ),
    ]));

    doc.paragraph(bold("Top Active PRs"));
    let active = active_pulls_text(&repository.top_active_pull_requests.nodes, now);
    if !active.is_empty() {
        doc.paragraph(active);
    }

    doc.paragraph(bold("Top Stale PRs"));
    let stale = stale_pulls_text(&repository.top_stale_pull_requests.nodes);
    if !stale.is_empty() {
        doc.paragraph(stale);
    }

    doc.render()
}

fn time_to_merge_text(average_days: Option<i64>) -> String {
    match average_days {
        Some(days) => format!("On average it takes about {days} day(s) to merge a PR."),
        None => "There are no merged PRs to compute an average time to merge.".to_string(),
    }
}

fn time_to_review_text(stats: &metrics::ReviewStats) -> String {
    match stats.average_days {
        Some(days) => format!(
            "On average it takes about {days} day(s) to review a PR. There are currently {} PRs out of the last {} merged that were not reviewed.",
            stats.unreviewed, stats.sample_size
        ),
        None => format!(
            "None of the last {} merged PRs were reviewed.",
            stats.sample_size
        ),
    }
}

fn active_pulls_text(pulls: &[ActiveItem], now: DateTime<Utc>) -> String {
    pulls
        .iter()
        .take(TOP_LIST_LIMIT)
        .map(|pr| {
            let details = format!(
                "There are {} comments on this PR, and it has {} reactions. It was last updated {} ago.",
                count_or_no(pr.comments.total_count),
                count_or_no(pr.reactions.total_count),
                format_distance(pr.updated_at, now),
            );
            ListingEntry {
                title: &pr.title,
                url: &pr.url,
                details: Some(details),
                body: &pr.body_text,
                escape_headings: true,
            }
            .render()
        })
        .collect()
}

fn stale_pulls_text(pulls: &[StaleItem]) -> String {
    pulls
        .iter()
        .take(TOP_LIST_LIMIT)
        .map(|pr| {
            ListingEntry {
                title: &pr.title,
                url: &pr.url,
                details: None,
                body: &pr.body_text,
                escape_headings: true,
            }
            .render()
        })
        .collect()
}
