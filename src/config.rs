use crate::classifier::LexiconEntry;
use crate::types::{FetchConfig, Result, WatchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// A source domain whose articles always receive a fixed category,
/// regardless of keyword matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSource {
    pub domain: String,
    pub category: String,
}

/// Run configuration: the feed roster, the classification lexicon and
/// fetch tuning. Loaded once per run; not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Feed URLs, fetched in this order.
    pub feeds: Vec<String>,
    /// Keyword -> category pairs, scanned in this order.
    pub lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    pub trusted_sources: Vec<TrustedSource>,
    /// Pause between feed fetches, to stay polite with upstreams.
    #[serde(default)]
    pub fetch_delay_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_user_agent() -> String {
    FetchConfig::default().user_agent
}

fn default_timeout_seconds() -> u64 {
    FetchConfig::default().timeout_seconds
}

fn default_max_retries() -> u32 {
    FetchConfig::default().max_retries
}

impl WatchConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config: WatchConfig = serde_json::from_str(&data)?;
        if config.feeds.is_empty() {
            return Err(WatchError::Config(format!(
                "{}: no feeds configured",
                path.display()
            )));
        }
        Ok(config)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
            max_retries: self.max_retries,
            ..FetchConfig::default()
        }
    }
}

/// Validate feed URL format; anything that is not http(s) is skipped by
/// the pipeline rather than fetched.
pub fn is_valid_feed_url(url_str: &str) -> bool {
    if let Ok(url) = Url::parse(url_str) {
        url.scheme() == "http" || url.scheme() == "https"
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_feed_urls() {
        assert!(is_valid_feed_url("https://example.com/feed/"));
        assert!(is_valid_feed_url("http://example.com/rss"));
        assert!(!is_valid_feed_url("ftp://example.com/feed"));
        assert!(!is_valid_feed_url("not a url"));
        assert!(!is_valid_feed_url(""));
    }

    #[test]
    fn config_defaults_fill_in() {
        let config: WatchConfig = serde_json::from_str(
            r#"{
                "feeds": ["https://example.com/feed/"],
                "lexicon": [{"pattern": "hoax", "category": "disinformation"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.fetch_delay_secs, 0);
        assert!(config.trusted_sources.is_empty());
        assert_eq!(config.max_retries, 3);
        assert!(!config.lexicon[0].case_sensitive);
    }
}
