//! Rendering of repository data into the markdown health report.

pub mod issues;
pub mod markdown;
pub mod pulls;

use crate::types::Repository;
use chrono::{DateTime, NaiveDate, Utc};
use markdown_builder::Markdown;

/// Active and stale listings never show more than this many entries.
pub const TOP_LIST_LIMIT: usize = 10;

/// Renders one repository: its name, the PR section, the issue section and a
/// closing rule.
pub fn repository_report(repository: &Repository, now: DateTime<Utc>) -> String {
    let mut doc = Markdown::new();
    doc.header2(repository.name.as_str());
    doc.paragraph(pulls::pulls_report(repository, now));
    doc.paragraph(issues::issues_report(repository, now));
    doc.paragraph("___");
    doc.render().trim_end().to_string()
}

/// The title line of the aggregated report, e.g. "Health Report - October 15th, 2026".
pub fn report_title(title: &str, date: NaiveDate) -> String {
    format!("{} - {}", title, markdown::format_long_date(date))
}

/// Joins rendered repository sections, in the given order, under a single title.
pub fn aggregate_report(title: &str, sections: &[String]) -> String {
    let mut doc = Markdown::new();
    doc.header1(title);
    for section in sections {
        doc.paragraph(section.as_str());
    }
    format!("{}\n", doc.render().trim_end())
}
