use super::markdown::{bold, bullet_list, count_or_no, format_distance, ListingEntry};
use super::TOP_LIST_LIMIT;
use crate::metrics;
use crate::types::{ActiveItem, Repository, StaleItem};
use chrono::{DateTime, Utc};
use markdown_builder::Markdown;

/// Renders the "Issues" section of a repository report.
///
/// `now` is the reference point for "last updated ... ago" phrases.
pub fn issues_report(repository: &Repository, now: DateTime<Utc>) -> String {
    let open = &repository.open_issues;
    let closed = &repository.closed_issues;

    let mut doc = Markdown::new();
    doc.header3("Issues");
    doc.paragraph(bullet_list([
        format!("There are {} open issues currently.", open.total_count),
        response_time_text(&metrics::issue_response_stats(&open.nodes)),
        time_since_update_text(metrics::average_days_since_update(&open.nodes)),
        time_to_close_text(metrics::average_days_to_close(&closed.nodes)),
    ]));

    doc.paragraph(bold("Top Active Issues"));
    let active = active_issues_text(&repository.top_active_issues.nodes, now);
    if !active.is_empty() {
        doc.paragraph(active);
    }

    doc.paragraph(bold("Top Stale Issues"));
    let stale = stale_issues_text(&repository.top_stale_issues.nodes);
    if !stale.is_empty() {
        doc.paragraph(stale);
    }

    doc.render()
}

fn response_time_text(stats: &metrics::ResponseStats) -> String {
    let unanswered = format!(
        "There are currently {} issues out of the last {} that have not been responded to.",
        stats.unanswered, stats.sample_size
    );

    match stats.average_days {
        Some(days) => format!(
            "On average it takes about {days} day(s) to respond to an issue. {unanswered}"
        ),
        None => format!(
            "No open issues have been responded to yet, so there is no average response time. {unanswered}"
        ),
    }
}

fn time_since_update_text(average_days: Option<i64>) -> String {
    match average_days {
        Some(days) => format!("On average issues have not been updated in about {days} day(s)."),
        None => {
            "There are no open issues to compute an average time since last update.".to_string()
        }
    }
}

fn time_to_close_text(average_days: Option<i64>) -> String {
    match average_days {
        Some(days) => format!("On average it takes about {days} day(s) to close an issue."),
        None => "There are no closed issues to compute an average time to close.".to_string(),
    }
}

fn active_issues_text(issues: &[ActiveItem], now: DateTime<Utc>) -> String {
    issues
        .iter()
        .take(TOP_LIST_LIMIT)
        .map(|issue| {
            let details = format!(
                "There are {} comments on this issue, and it has {} reactions. It was last updated {} ago.",
                count_or_no(issue.comments.total_count),
                count_or_no(issue.reactions.total_count),
                format_distance(issue.updated_at, now),
            );
            ListingEntry {
                title: &issue.title,
                url: &issue.url,
                details: Some(details),
                body: &issue.body_text,
                escape_headings: false,
            }
            .render()
        })
        .collect()
}

fn stale_issues_text(issues: &[StaleItem]) -> String {
    issues
        .iter()
        .take(TOP_LIST_LIMIT)
        .map(|issue| {
            ListingEntry {
                title: &issue.title,
                url: &issue.url,
                details: None,
                body: &issue.body_text,
                escape_headings: false,
            }
            .render()
        })
        .collect()
}
