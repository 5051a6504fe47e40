use crate::types::{RawEntry, Result, WatchError};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// Entries extracted from one feed body, plus how many were dropped on
/// the floor for missing required fields.
#[derive(Debug, Default)]
pub struct ParsedEntries {
    pub entries: Vec<RawEntry>,
    /// Entries without a publication timestamp cannot be placed in a
    /// date window and are skipped.
    pub skipped_no_date: usize,
    pub skipped_no_link: usize,
}

/// Parse an RSS/Atom body into raw entries.
pub fn parse_entries(body: &str) -> Result<ParsedEntries> {
    let feed = parser::parse(body.as_bytes())
        .map_err(|e| WatchError::Parse(format!("Failed to parse feed: {}", e)))?;

    let mut parsed = ParsedEntries::default();

    for entry in feed.entries {
        let published = match entry.published {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                debug!("Skipping entry without publication date: {}", entry.id);
                parsed.skipped_no_date += 1;
                continue;
            }
        };

        let link = match entry.links.first() {
            Some(link) => link.href.clone(),
            None => {
                debug!("Skipping entry without link: {}", entry.id);
                parsed.skipped_no_link += 1;
                continue;
            }
        };

        let title = entry
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled".to_string());

        // Prefer the summary; fall back to the first content block.
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        parsed.entries.push(RawEntry {
            title,
            link,
            published_raw: published.to_rfc3339(),
            published_at: published,
            summary,
        });
    }

    Ok(parsed)
}
