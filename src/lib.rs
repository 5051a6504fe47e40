pub mod classifier;
pub mod config;
pub mod digest;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod types;

pub use classifier::{Lexicon, LexiconEntry, MatchMode};
pub use config::{TrustedSource, WatchConfig};
pub use fetcher::Fetcher;
pub use pipeline::{Pipeline, PipelineStats};
pub use store::{merge, CorpusStore, JsonCorpusStore};
pub use types::{Article, FetchConfig, RawEntry, Result, WatchError};
