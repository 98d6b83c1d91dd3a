//! `analyze`: one analysis run over the selected feeds.

use std::fmt::Write as _;
use std::io::Write;

use clap::Args;
use feedfreq_analyzer::{
    AnalysisRequest, AnalysisResult, Analyzer, AnalyzerError, FeedStatus, StopwordSet,
};
use feedfreq_core::{
    clamp_top_n, default_feeds, AppConfig, FeedSource, JsonFileSettingsStore, Settings,
};

use crate::load_settings;

/// How many ranked words each feed shows in the text report.
const FEED_PREVIEW_WORDS: usize = 10;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Number of ranked words to keep (clamped to 10..=1000)
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Analyze only these feeds (by name); repeatable
    #[arg(long = "feed", value_name = "NAME")]
    pub feeds: Vec<String>,

    /// Print the full result as JSON (includes `word_sources`)
    #[arg(long)]
    pub json: bool,

    /// Also list the articles a word came from
    #[arg(long, value_name = "WORD", conflicts_with = "json")]
    pub sources: Option<String>,

    /// Restrict `--sources` to one feed
    #[arg(long, value_name = "NAME", requires = "sources")]
    pub source_feed: Option<String>,
}

/// Run an analysis and print the report.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, a requested feed is
/// unknown, no feeds are selected, or output cannot be written.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    store: &JsonFileSettingsStore,
    args: &AnalyzeArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let settings = load_settings(store)?;
    let top_n = clamp_top_n(args.top_n.unwrap_or(config.top_n));
    if args.top_n.is_some_and(|n| n != top_n) {
        tracing::info!(requested = ?args.top_n, top_n, "top-n clamped");
    }

    let request = AnalysisRequest::new(
        select_sources(&settings, &args.feeds)?,
        StopwordSet::new(&settings.custom_stopwords),
        top_n,
    );

    let analyzer = Analyzer::from_config(config)?;
    let result = match analyzer.run(&request).await {
        Ok(result) => result,
        Err(AnalyzerError::NoFeedsSelected) => anyhow::bail!(
            "no feeds selected; add one with `feedfreq feeds add NAME URL` or run `feedfreq feeds reset`"
        ),
        Err(e) => return Err(e.into()),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        out.write_all(render_report(&result).as_bytes())?;
    }

    if let Some(word) = &args.sources {
        out.write_all(render_sources(&result, word, args.source_feed.as_deref()).as_bytes())?;
    }
    Ok(())
}

/// Feeds to analyze: the whole selection, or the named subset in the order
/// given. Names outside the selection are looked up in the default catalogue.
///
/// # Errors
///
/// Returns an error naming any feed that is neither selected nor a default.
pub(crate) fn select_sources(
    settings: &Settings,
    requested: &[String],
) -> anyhow::Result<Vec<FeedSource>> {
    if requested.is_empty() {
        return Ok(settings.selected_sources());
    }

    let defaults = default_feeds();
    let mut sources: Vec<FeedSource> = Vec::with_capacity(requested.len());
    for name in requested {
        if sources.iter().any(|s| &s.name == name) {
            continue;
        }
        let url = settings
            .selected_feeds
            .get(name)
            .or_else(|| defaults.get(name))
            .ok_or_else(|| anyhow::anyhow!("unknown feed '{name}'; see `feedfreq feeds list`"))?;
        sources.push(FeedSource::new(name.clone(), url.clone()));
    }
    Ok(sources)
}

/// Plain-text report: totals, global ranking, then per-feed breakdown.
pub(crate) fn render_report(result: &AnalysisResult) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Analyzed {} articles from {} feeds at {}",
        result.total_articles,
        result.feeds.len(),
        result.timestamp.to_rfc3339()
    );
    let _ = writeln!(s, "Unique words: {}", result.total_unique_words);

    if let Some(notice) = result.notice {
        let _ = writeln!(s, "\nNothing to rank: {notice}");
    } else {
        let width = result
            .word_frequency
            .iter()
            .map(|w| w.word.chars().count())
            .max()
            .unwrap_or(4)
            .max(4);
        let _ = writeln!(s, "\n{:>5}  {:<width$}  {:>5}", "RANK", "WORD", "COUNT");
        for (rank, w) in result.word_frequency.iter().enumerate() {
            let _ = writeln!(s, "{:>5}  {:<width$}  {:>5}", rank + 1, w.word, w.frequency);
        }
    }

    let _ = writeln!(s, "\nFeeds:");
    for feed in &result.feeds {
        let status = match &feed.status {
            FeedStatus::Ok => format!("{} articles", feed.article_count),
            FeedStatus::NoArticles => "no articles".to_string(),
            FeedStatus::FetchFailed { error } => format!("fetch failed: {error}"),
        };
        let _ = writeln!(s, "  {} ({status})", feed.name);
        if !feed.words.is_empty() {
            let preview: Vec<String> = feed
                .words
                .iter()
                .take(FEED_PREVIEW_WORDS)
                .map(|w| format!("{} {}", w.word, w.frequency))
                .collect();
            let _ = writeln!(s, "    {}", preview.join(", "));
        }
    }
    s
}

/// Source list for one word from this run.
pub(crate) fn render_sources(result: &AnalysisResult, word: &str, feed: Option<&str>) -> String {
    let mut s = String::new();
    let sources = result.sources_for(word, feed);
    let scope = feed.map(|f| format!(" in {f}")).unwrap_or_default();
    if sources.is_empty() {
        let _ = writeln!(s, "\nNo sources recorded for '{word}'{scope}");
        return s;
    }

    let _ = writeln!(s, "\nSources for '{word}'{scope}:");
    for source in sources {
        let _ = writeln!(s, "  - {} [{}]", source.title, source.feed_name);
        if !source.link.is_empty() {
            let _ = writeln!(s, "    {}", source.link);
        }
        if !source.published.is_empty() {
            let _ = writeln!(s, "    {}", source.published);
        }
    }
    s
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
