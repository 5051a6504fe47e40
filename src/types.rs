use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A classified news article, the sole persisted entity. The `link` is the
/// dedup key; once an article is stored its fields are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub link: String,
    pub title: String,
    pub published_raw: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub content: String,
    pub categories: Vec<String>,
    pub iso_year: i32,
    pub iso_week: u32,
    pub iso_weekday: u32,
}

impl Article {
    /// ISO year/week/weekday of the given instant (Monday = 1).
    pub fn iso_fields(published_at: DateTime<Utc>) -> (i32, u32, u32) {
        let week = published_at.iso_week();
        (
            week.year(),
            week.week(),
            published_at.weekday().number_from_monday(),
        )
    }
}

/// One feed entry as it comes out of the parser, before normalization
/// and classification.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub published_raw: String,
    pub published_at: DateTime<Utc>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "mediawatch/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 5,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, WatchError>;
