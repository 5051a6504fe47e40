//! Corpus persistence and the link-keyed incremental merge.

use crate::types::{Article, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Storage seam for the accumulated corpus. The pipeline only ever
/// loads the full corpus and saves it back whole; a future key-value
/// backend can slot in here without touching the pipeline.
pub trait CorpusStore {
    fn load(&self) -> Result<Vec<Article>>;
    fn save(&self, corpus: &[Article]) -> Result<()>;
}

/// JSON snapshot on disk, rewritten in full on every save. Single
/// writer assumed; a run that dies before `save` leaves the previous
/// snapshot intact.
pub struct JsonCorpusStore {
    path: PathBuf,
}

impl JsonCorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusStore for JsonCorpusStore {
    /// An absent, empty or malformed snapshot yields an empty corpus so
    /// a first run or a corrupted file never blocks ingestion.
    fn load(&self) -> Result<Vec<Article>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&data) {
            Ok(articles) => Ok(articles),
            Err(e) => {
                warn!(
                    "Corpus file {} is malformed, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Write failures are fatal for the run: silently losing the merged
    /// corpus would break the append-only invariant.
    fn save(&self, corpus: &[Article]) -> Result<()> {
        let json = serde_json::to_string_pretty(corpus)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Append candidates whose link is not yet present, in candidate order.
/// Existing articles are never modified; duplicates within the
/// candidate batch collapse to the first occurrence. Returns the merged
/// corpus and how many candidates were actually added.
pub fn merge(existing: Vec<Article>, candidates: Vec<Article>) -> (Vec<Article>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(|a| a.link.clone()).collect();
    let mut merged = existing;
    let mut added = 0;

    for candidate in candidates {
        if seen.insert(candidate.link.clone()) {
            merged.push(candidate);
            added += 1;
        } else {
            debug!("Discarding already-known article: {}", candidate.link);
        }
    }

    (merged, added)
}
