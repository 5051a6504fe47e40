//! Keyword classification against an ordered lexicon.

use serde::{Deserialize, Serialize};

/// One lexicon rule: a keyword or phrase mapped to a category label.
///
/// Matching is case-insensitive substring containment unless
/// `case_sensitive` is set; short acronyms ("AI", "MAGA") need the
/// exact-case rule because lowercased substring matching hits inside
/// ordinary words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub pattern: String,
    pub category: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Return at most one category: the first lexicon entry found in the text.
    FirstMatch,
    /// Return every matching category, duplicates collapsed.
    AllMatches,
}

/// An immutable, ordered lexicon. Insensitive patterns are lowercased
/// once at construction so classification only lowercases the text.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<CompiledEntry>,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    pattern: String,
    category: String,
    case_sensitive: bool,
}

impl Lexicon {
    pub fn new(entries: &[LexiconEntry]) -> Self {
        let entries = entries
            .iter()
            .map(|entry| CompiledEntry {
                pattern: if entry.case_sensitive {
                    entry.pattern.clone()
                } else {
                    entry.pattern.to_lowercase()
                },
                category: entry.category.clone(),
                case_sensitive: entry.case_sensitive,
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Scan `text` against the lexicon. No match yields an empty vec,
    /// never an error.
    pub fn classify(&self, text: &str, mode: MatchMode) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut found: Vec<String> = Vec::new();
        for entry in &self.entries {
            let hit = if entry.case_sensitive {
                text.contains(&entry.pattern)
            } else {
                lowered.contains(&entry.pattern)
            };
            if !hit {
                continue;
            }
            match mode {
                MatchMode::FirstMatch => return vec![entry.category.clone()],
                MatchMode::AllMatches => {
                    if !found.contains(&entry.category) {
                        found.push(entry.category.clone());
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::new(&[
            LexiconEntry {
                pattern: "hoax".to_string(),
                category: "disinformation".to_string(),
                case_sensitive: false,
            },
            LexiconEntry {
                pattern: "propagand".to_string(),
                category: "propaganda".to_string(),
                case_sensitive: false,
            },
            LexiconEntry {
                pattern: "deepfake".to_string(),
                category: "artificial-intelligence".to_string(),
                case_sensitive: false,
            },
            LexiconEntry {
                pattern: "AI".to_string(),
                category: "artificial-intelligence".to_string(),
                case_sensitive: true,
            },
        ])
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let cats = lexicon().classify("New HOAX debunked", MatchMode::AllMatches);
        assert_eq!(cats, vec!["disinformation"]);
    }

    #[test]
    fn first_match_returns_at_most_one() {
        let cats = lexicon().classify(
            "hoax fueled by propaganda",
            MatchMode::FirstMatch,
        );
        assert_eq!(cats, vec!["disinformation"]);
    }

    #[test]
    fn all_matches_collects_and_dedups() {
        let cats = lexicon().classify(
            "deepfake propaganda: new AI hoax",
            MatchMode::AllMatches,
        );
        assert_eq!(
            cats,
            vec!["disinformation", "propaganda", "artificial-intelligence"]
        );
    }

    #[test]
    fn case_sensitive_acronym_requires_exact_case() {
        // "fair" contains "ai" but not "AI" as written.
        let cats = lexicon().classify("This is a fair example", MatchMode::AllMatches);
        assert!(cats.is_empty());

        let cats = lexicon().classify("New AI policy announced", MatchMode::AllMatches);
        assert_eq!(cats, vec!["artificial-intelligence"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let cats = lexicon().classify("quiet news day", MatchMode::AllMatches);
        assert!(cats.is_empty());
        let cats = lexicon().classify("", MatchMode::FirstMatch);
        assert!(cats.is_empty());
    }

    #[test]
    fn monotonicity_in_all_matches_mode() {
        // Any text containing a keyword must carry its category.
        for text in [
            "a hoax",
            "prefix hoax suffix",
            "HoAx in mixed case",
            "propaganda and hoax together",
        ] {
            let cats = lexicon().classify(text, MatchMode::AllMatches);
            assert!(cats.contains(&"disinformation".to_string()), "text: {text}");
        }
    }
}
