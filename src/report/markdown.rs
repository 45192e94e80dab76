//! Text helpers shared by the report generators. Document structure itself is
//! assembled with `markdown_builder::Markdown`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Maximum number of characters of an issue or PR body shown in a listing.
pub const BODY_PREVIEW_CHARS: usize = 140;

const ELLIPSIS: &str = "...";

/// Renders items as an unordered markdown list, one `- item` per line.
pub fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps text in `**` so it renders bold.
pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

/// A linked title, optional detail line and body preview, rendered the way the
/// listings in a report expect them.
pub struct ListingEntry<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub details: Option<String>,
    pub body: &'a str,
    pub escape_headings: bool,
}

impl ListingEntry<'_> {
    pub fn render(&self) -> String {
        let title = if self.escape_headings {
            escape_hashes(self.title)
        } else {
            self.title.to_string()
        };
        let preview = truncate_body(self.body);
        let preview = if self.escape_headings {
            escape_hashes(&preview)
        } else {
            preview
        };

        let mut parts = vec![format!("[{}]({})", title, self.url)];
        if let Some(details) = &self.details {
            parts.push(bold(details));
        }
        parts.push(preview);

        format!("{}<br /><br />", parts.join("<br />"))
    }
}

/// Keeps the first [`BODY_PREVIEW_CHARS`] characters, appending an ellipsis only
/// when something was cut.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &body[..cut], ELLIPSIS),
        None => body.to_string(),
    }
}

/// Escapes every `#` so text cannot be read as a markdown heading.
pub fn escape_hashes(text: &str) -> String {
    text.replace('#', "\\#")
}

/// Renders a count, or "no" for zero.
pub fn count_or_no(count: u64) -> String {
    if count == 0 {
        "no".to_string()
    } else {
        count.to_string()
    }
}

/// Human-readable distance between two instants, e.g. "about 2 hours" or "3 days".
pub fn format_distance(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    const MINUTES_IN_DAY: i64 = 1_440;
    const MINUTES_IN_MONTH: i64 = 43_200;
    const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

    let seconds = (to - from).num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 1 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2_520 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Formats a date as "October 15th, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}
