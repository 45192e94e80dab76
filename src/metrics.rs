use crate::types::{ClosedIssue, MergedPullRequest, OpenIssue, OpenPullRequest};
use chrono::{DateTime, Utc};

/// Whole days elapsed from `earlier` to `later`, truncated toward zero.
pub fn days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

/// Mean of the day counts rounded to the nearest whole day, or `None` when
/// there is nothing to average.
pub fn rounded_average<I>(days: I) -> Option<i64>
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = days
        .into_iter()
        .fold((0i64, 0usize), |(sum, count), d| (sum + d, count + 1));

    if count == 0 {
        return None;
    }

    Some((sum as f64 / count as f64).round() as i64)
}

/// How quickly sampled open issues get their first comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseStats {
    /// Rounded mean days to first comment; `None` if no issue has one.
    pub average_days: Option<i64>,
    pub unanswered: usize,
    pub sample_size: usize,
}

pub fn issue_response_stats(open_issues: &[OpenIssue]) -> ResponseStats {
    let (answered, unanswered): (Vec<&OpenIssue>, Vec<&OpenIssue>) = open_issues
        .iter()
        .partition(|issue| issue.comments.total_count > 0 && !issue.comments.nodes.is_empty());

    let average_days = rounded_average(answered.iter().filter_map(|issue| {
        issue
            .comments
            .nodes
            .first()
            .map(|first| days_between(first.created_at, issue.created_at))
    }));

    ResponseStats {
        average_days,
        unanswered: unanswered.len(),
        sample_size: open_issues.len(),
    }
}

pub fn average_days_since_update(open_issues: &[OpenIssue]) -> Option<i64> {
    rounded_average(
        open_issues
            .iter()
            .map(|issue| days_between(issue.updated_at, issue.created_at)),
    )
}

/// Closed issues without a `closedAt` timestamp are left out of the sample.
pub fn average_days_to_close(closed_issues: &[ClosedIssue]) -> Option<i64> {
    rounded_average(closed_issues.iter().filter_map(|issue| {
        issue
            .closed_at
            .map(|closed_at| days_between(closed_at, issue.created_at))
    }))
}

pub fn average_days_to_merge(merged: &[MergedPullRequest]) -> Option<i64> {
    rounded_average(merged.iter().filter_map(|pr| {
        pr.merged_at
            .map(|merged_at| days_between(merged_at, pr.created_at))
    }))
}

/// How quickly merged pull requests received their first review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewStats {
    pub average_days: Option<i64>,
    pub unreviewed: usize,
    pub sample_size: usize,
}

/// Pending reviews are skipped when looking for the first one.
pub fn pull_request_review_stats(merged: &[MergedPullRequest]) -> ReviewStats {
    let first_review_days: Vec<i64> = merged
        .iter()
        .filter_map(|pr| {
            pr.reviews
                .nodes
                .iter()
                .find(|review| review.state.is_submitted())
                .map(|review| days_between(review.created_at, pr.created_at))
        })
        .collect();

    ReviewStats {
        unreviewed: merged.len() - first_review_days.len(),
        average_days: rounded_average(first_review_days),
        sample_size: merged.len(),
    }
}

/// Open pull requests that have not received any submitted review yet.
pub fn awaiting_first_review(open: &[OpenPullRequest]) -> usize {
    open.iter()
        .filter(|pr| !pr.reviews.nodes.iter().any(|review| review.state.is_submitted()))
        .count()
}
