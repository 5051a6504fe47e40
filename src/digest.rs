//! Digest rendering: date-window filtering and the two output formats.

use crate::config::TrustedSource;
use crate::types::Article;
use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};

/// Articles with `published_at` in `[start, end]`, both bounds
/// inclusive. With `require_category`, unclassified articles are
/// dropped unless their source is an always-tag domain (mirroring the
/// ingestion override, so those sources never silently vanish from
/// digests).
pub fn filter_window(
    corpus: &[Article],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    require_category: bool,
    trusted_sources: &[TrustedSource],
) -> Vec<Article> {
    corpus
        .iter()
        .filter(|a| a.published_at >= start && a.published_at <= end)
        .filter(|a| {
            !require_category
                || !a.categories.is_empty()
                || trusted_sources.iter().any(|t| t.domain == a.source)
        })
        .cloned()
        .collect()
}

fn joined_categories(article: &Article) -> String {
    if article.categories.is_empty() {
        "none".to_string()
    } else {
        article.categories.join(", ")
    }
}

/// One line per article, for the console report.
pub fn render_console(articles: &[Article]) -> String {
    let mut out = String::new();
    for article in articles {
        out.push_str(&format!(
            "- {} ({}, {} - {})\n",
            article.title,
            article.source,
            article.published_at.format("%d.%m"),
            joined_categories(article)
        ));
    }
    out
}

/// One `<li>` per article, suitable for embedding in a larger document.
pub fn render_markup(articles: &[Article]) -> String {
    let mut out = String::new();
    for article in articles {
        let categories = joined_categories(article);
        out.push_str(&format!(
            "<li class=\"article\" data-categories=\"{}\"><a href=\"{}\" target=\"_blank\">{}</a> <small>({}, {})</small> <code>{}</code></li>\n",
            categories,
            article.link,
            article.title,
            article.source,
            article.published_at.format("%d.%m"),
            categories
        ));
    }
    out
}

/// Monday and Sunday civil dates of an ISO-8601 week. Week 1 is the
/// week containing the first Thursday of the year; Monday is day 1.
pub fn iso_week_bounds(year: i32, week: u32) -> Option<(NaiveDate, NaiveDate)> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    Some((monday, monday + Duration::days(6)))
}
