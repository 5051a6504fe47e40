use chrono::{TimeZone, Utc};
use mediawatch::{merge, Article, CorpusStore, JsonCorpusStore};

fn article(link: &str) -> Article {
    let published_at = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
    let (iso_year, iso_week, iso_weekday) = Article::iso_fields(published_at);
    Article {
        link: link.to_string(),
        title: format!("Title for {link}"),
        published_raw: published_at.to_rfc3339(),
        published_at,
        source: "example.com".to_string(),
        content: "Title and summary".to_string(),
        categories: vec!["disinformation".to_string()],
        iso_year,
        iso_week,
        iso_weekday,
    }
}

fn links(corpus: &[Article]) -> Vec<&str> {
    corpus.iter().map(|a| a.link.as_str()).collect()
}

#[test]
fn merge_appends_only_unknown_links() {
    let existing = vec![article("https://example.com/a")];
    let candidates = vec![article("https://example.com/a"), article("https://example.com/b")];

    let (merged, added) = merge(existing, candidates);
    assert_eq!(added, 1);
    assert_eq!(links(&merged), vec!["https://example.com/a", "https://example.com/b"]);
}

#[test]
fn merge_is_idempotent() {
    let corpus = vec![article("https://example.com/a")];
    let batch = vec![article("https://example.com/b"), article("https://example.com/c")];

    let (once, _) = merge(corpus.clone(), batch.clone());
    let (twice, added) = merge(once.clone(), batch);
    assert_eq!(added, 0);
    assert_eq!(once, twice);
}

#[test]
fn merge_never_overwrites_existing_articles() {
    let mut original = article("https://example.com/a");
    original.title = "Original title".to_string();
    let mut replacement = article("https://example.com/a");
    replacement.title = "Replacement title".to_string();

    let (merged, added) = merge(vec![original], vec![replacement]);
    assert_eq!(added, 0);
    assert_eq!(merged[0].title, "Original title");
}

#[test]
fn merge_collapses_duplicates_within_a_batch() {
    let batch = vec![
        article("https://example.com/a"),
        article("https://example.com/a"),
        article("https://example.com/b"),
    ];
    let (merged, added) = merge(Vec::new(), batch);
    assert_eq!(added, 2);

    let mut seen = std::collections::HashSet::new();
    for a in &merged {
        assert!(seen.insert(a.link.clone()), "duplicate link: {}", a.link);
    }
}

#[test]
fn no_duplicate_links_after_a_sequence_of_merges() {
    let mut corpus = Vec::new();
    for batch in [
        vec![article("https://example.com/a"), article("https://example.com/b")],
        vec![article("https://example.com/b"), article("https://example.com/c")],
        vec![article("https://example.com/a"), article("https://example.com/c")],
    ] {
        let (next, _) = merge(corpus, batch);
        corpus = next;
    }

    let mut sorted = links(&corpus);
    sorted.sort();
    assert_eq!(
        sorted,
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c"
        ]
    );
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCorpusStore::new(dir.path().join("corpus.json"));

    let mut corpus = vec![
        article("https://example.com/a"),
        article("https://example.com/b"),
    ];
    corpus[1].categories = Vec::new();

    store.save(&corpus).unwrap();
    let mut loaded = store.load().unwrap();

    corpus.sort_by(|a, b| a.link.cmp(&b.link));
    loaded.sort_by(|a, b| a.link.cmp(&b.link));
    assert_eq!(corpus, loaded);
}

#[test]
fn absent_snapshot_is_an_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCorpusStore::new(dir.path().join("missing.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_snapshot_is_an_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonCorpusStore::new(path);
    assert!(store.load().unwrap().is_empty());
}
