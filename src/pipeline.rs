use crate::classifier::{Lexicon, MatchMode};
use crate::config::{is_valid_feed_url, TrustedSource, WatchConfig};
use crate::fetcher::Fetcher;
use crate::normalizer::{extract_plain_text, host_of};
use crate::parser::parse_entries;
use crate::types::{Article, RawEntry};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Counters for one ingestion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineStats {
    pub feeds_ok: usize,
    pub feeds_failed: usize,
    pub entries_seen: usize,
    pub skipped_no_date: usize,
    pub outside_window: usize,
}

/// Orchestrates fetch -> parse -> normalize -> classify across the
/// configured feed roster, sequentially and in roster order. Candidate
/// articles are collected across all feeds; merging into the corpus
/// happens afterwards, in one place.
pub struct Pipeline {
    fetcher: Fetcher,
    feeds: Vec<String>,
    lexicon: Lexicon,
    mode: MatchMode,
    trusted_sources: Vec<TrustedSource>,
    fetch_delay: Duration,
}

impl Pipeline {
    pub fn new(config: &WatchConfig, mode: MatchMode) -> Self {
        Self {
            fetcher: Fetcher::new(config.fetch_config()),
            feeds: config.feeds.clone(),
            lexicon: Lexicon::new(&config.lexicon),
            mode,
            trusted_sources: config.trusted_sources.clone(),
            fetch_delay: Duration::from_secs(config.fetch_delay_secs),
        }
    }

    /// Fetch every configured feed and return the candidate articles
    /// whose publication instant falls inside the window (when given).
    /// A failing feed contributes zero candidates and the run continues.
    pub async fn collect(
        &self,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> (Vec<Article>, PipelineStats) {
        let mut candidates = Vec::new();
        let mut stats = PipelineStats::default();

        for (index, feed_url) in self.feeds.iter().enumerate() {
            if !is_valid_feed_url(feed_url) {
                debug!("Skipping invalid feed URL: {}", feed_url);
                continue;
            }

            if index > 0 && !self.fetch_delay.is_zero() {
                sleep(self.fetch_delay).await;
            }

            let body = match self.fetcher.fetch(feed_url).await {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to fetch feed {}: {}", feed_url, e);
                    stats.feeds_failed += 1;
                    continue;
                }
            };

            let parsed = match parse_entries(&body) {
                Ok(parsed) => parsed,
                Err(e) => {
                    error!("Failed to parse feed {}: {}", feed_url, e);
                    stats.feeds_failed += 1;
                    continue;
                }
            };

            stats.feeds_ok += 1;
            stats.skipped_no_date += parsed.skipped_no_date;
            let before = candidates.len();
            self.extend_candidates(&mut candidates, parsed.entries, window, &mut stats);
            info!(
                "Feed {}: {} candidate articles",
                feed_url,
                candidates.len() - before
            );
        }

        (candidates, stats)
    }

    fn extend_candidates(
        &self,
        candidates: &mut Vec<Article>,
        entries: Vec<RawEntry>,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        stats: &mut PipelineStats,
    ) {
        for entry in entries {
            stats.entries_seen += 1;
            if let Some((start, end)) = window {
                if entry.published_at < start || entry.published_at > end {
                    stats.outside_window += 1;
                    continue;
                }
            }
            candidates.push(self.build_article(entry));
        }
    }

    /// Normalize, classify and assemble one candidate article.
    pub fn build_article(&self, entry: RawEntry) -> Article {
        let summary_text = entry
            .summary
            .as_deref()
            .map(extract_plain_text)
            .unwrap_or_default();
        let content = format!("{} {}", entry.title, summary_text);
        let source = host_of(&entry.link);

        let mut categories = self.lexicon.classify(&content, self.mode);
        // Articles from an always-tag domain carry its category even
        // when no keyword matched.
        if let Some(trusted) = self
            .trusted_sources
            .iter()
            .find(|t| t.domain == source)
        {
            if !categories.contains(&trusted.category) {
                categories.push(trusted.category.clone());
            }
        }

        let (iso_year, iso_week, iso_weekday) = Article::iso_fields(entry.published_at);

        Article {
            link: entry.link,
            title: entry.title,
            published_raw: entry.published_raw,
            published_at: entry.published_at,
            source,
            content,
            categories,
            iso_year,
            iso_week,
            iso_weekday,
        }
    }
}
