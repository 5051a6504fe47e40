use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use mediawatch::digest::{filter_window, iso_week_bounds, render_console, render_markup};
use mediawatch::{merge, CorpusStore, JsonCorpusStore, MatchMode, Pipeline, WatchConfig};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Ingest the configured news feeds, classify new articles, merge them
/// into the corpus and emit a digest for the selected date window.
#[derive(Debug, Parser)]
#[command(name = "mediawatch", version, about)]
struct Cli {
    /// Run configuration (feeds, lexicon, trusted sources).
    #[arg(long, default_value = "mediawatch.json")]
    config: PathBuf,

    /// Corpus snapshot, created on first run.
    #[arg(long, default_value = "corpus.json")]
    corpus: PathBuf,

    /// Markup digest output file.
    #[arg(long, default_value = "monitoring.html")]
    output: PathBuf,

    /// First day of the window (YYYY-MM-DD, UTC). Defaults to today.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD, UTC). Defaults to today.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// ISO week window, e.g. 2024-W05. Overrides --from/--to.
    #[arg(long)]
    week: Option<String>,

    #[arg(long, value_enum, default_value = "all-matches")]
    mode: Mode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Stop at the first matching lexicon entry.
    FirstMatch,
    /// Collect every matching category.
    AllMatches,
}

impl From<Mode> for MatchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::FirstMatch => MatchMode::FirstMatch,
            Mode::AllMatches => MatchMode::AllMatches,
        }
    }
}

fn day_start(date: NaiveDate) -> Result<DateTime<Utc>> {
    Ok(date.and_hms_opt(0, 0, 0).context("invalid day start")?.and_utc())
}

fn day_end(date: NaiveDate) -> Result<DateTime<Utc>> {
    Ok(date
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .context("invalid day end")?
        .and_utc())
}

/// Resolve the digest window: an ISO week if given, otherwise the civil
/// date range, defaulting both ends to today.
fn resolve_window(cli: &Cli) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if let Some(week_spec) = &cli.week {
        let (year, week) = week_spec
            .split_once("-W")
            .with_context(|| format!("invalid week spec {week_spec}, expected YYYY-Www"))?;
        let year: i32 = year.parse().context("invalid ISO year")?;
        let week: u32 = week.parse().context("invalid ISO week number")?;
        let (monday, sunday) = iso_week_bounds(year, week)
            .with_context(|| format!("no such ISO week: {year}-W{week:02}"))?;
        return Ok((day_start(monday)?, day_end(sunday)?));
    }

    let today = Utc::now().date_naive();
    let from = cli.from.unwrap_or(today);
    let to = cli.to.unwrap_or(today);
    if from > to {
        bail!("--from {} is after --to {}", from, to);
    }
    Ok((day_start(from)?, day_end(to)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = WatchConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    let (start, end) = resolve_window(&cli)?;

    info!(
        "Ingesting {} feeds for window {} .. {}",
        config.feeds.len(),
        start,
        end
    );

    let pipeline = Pipeline::new(&config, cli.mode.into());
    let (candidates, stats) = pipeline.collect(Some((start, end))).await;
    info!(
        "Run complete: {} feeds ok, {} failed, {} entries seen, {} without timestamp, {} outside window, {} candidates",
        stats.feeds_ok,
        stats.feeds_failed,
        stats.entries_seen,
        stats.skipped_no_date,
        stats.outside_window,
        candidates.len()
    );

    let store = JsonCorpusStore::new(&cli.corpus);
    let corpus = store.load()?;
    let (merged, added) = merge(corpus, candidates);
    store
        .save(&merged)
        .with_context(|| format!("failed to persist corpus {}", cli.corpus.display()))?;
    info!("Corpus now holds {} articles ({} new)", merged.len(), added);

    let digest = filter_window(&merged, start, end, true, &config.trusted_sources);
    for article in &digest {
        if !article.link.starts_with("https://") {
            warn!("Link {} does not use HTTPS", article.link);
        }
    }

    fs::write(&cli.output, render_markup(&digest))
        .with_context(|| format!("failed to write digest {}", cli.output.display()))?;
    print!("{}", render_console(&digest));
    info!("Digest: {} articles written to {}", digest.len(), cli.output.display());

    Ok(())
}
