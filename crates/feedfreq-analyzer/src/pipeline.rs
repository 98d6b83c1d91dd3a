//! Analysis run orchestration.
//!
//! Fetching may overlap across feeds, but aggregation is a single pass over
//! the collected batches in feed order, so results do not depend on which
//! fetch finished first.

use std::collections::HashSet;

use chrono::Utc;
use feedfreq_core::{AppConfig, FeedSource, Settings};
use futures::stream::{self, StreamExt};

use crate::aggregate::FrequencyTable;
use crate::client::FeedClient;
use crate::error::AnalyzerError;
use crate::parse::ParserChain;
use crate::source_index::SourceIndex;
use crate::stopwords::StopwordSet;
use crate::tokenize::retained_tokens;
use crate::types::{AnalysisNotice, AnalysisResult, Article, FeedBreakdown, FeedStatus};

/// Inputs to one analysis run. `top_n` is expected to be clamped already.
///
/// Feed names are unique: when a name repeats, the first source wins.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    sources: Vec<FeedSource>,
    pub stopwords: StopwordSet,
    pub top_n: usize,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(sources: Vec<FeedSource>, stopwords: StopwordSet, top_n: usize) -> Self {
        let mut seen = HashSet::new();
        let sources = sources
            .into_iter()
            .filter(|source| {
                let first = seen.insert(source.name.clone());
                if !first {
                    tracing::warn!(
                        feed = %source.name,
                        url = %source.url,
                        "duplicate feed name ignored"
                    );
                }
                first
            })
            .collect();
        Self {
            sources,
            stopwords,
            top_n,
        }
    }

    /// Feeds to analyze, in processing order.
    #[must_use]
    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Selected feeds and custom stopwords from persisted settings.
    #[must_use]
    pub fn from_settings(settings: &Settings, top_n: usize) -> Self {
        Self::new(
            settings.selected_sources(),
            StopwordSet::new(&settings.custom_stopwords),
            top_n,
        )
    }
}

/// What came back for one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Articles(Vec<Article>),
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedBatch {
    pub source: FeedSource,
    pub outcome: FeedOutcome,
}

/// Fetches, parses, and aggregates a set of feeds.
#[derive(Debug)]
pub struct Analyzer {
    client: FeedClient,
    parser: ParserChain,
    max_concurrent_feeds: usize,
}

impl Analyzer {
    #[must_use]
    pub fn new(client: FeedClient, parser: ParserChain, max_concurrent_feeds: usize) -> Self {
        Self {
            client,
            parser,
            max_concurrent_feeds: max_concurrent_feeds.max(1),
        }
    }

    /// Builds the client and parser chain from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalyzerError> {
        let client = FeedClient::new(config.fetch_timeout_secs, &config.user_agent)?;
        Ok(Self::new(
            client,
            ParserChain::new(config.max_articles_per_feed),
            config.max_concurrent_feeds,
        ))
    }

    /// Run one analysis over `request.sources`.
    ///
    /// Per-feed fetch and parse failures are logged and recorded in the
    /// feed's status; they never fail the run.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::NoFeedsSelected`] when `request.sources` is
    /// empty.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        if request.sources.is_empty() {
            return Err(AnalyzerError::NoFeedsSelected);
        }

        tracing::info!(
            feeds = request.sources.len(),
            top_n = request.top_n,
            concurrency = self.max_concurrent_feeds,
            "starting feed analysis"
        );

        // `buffered` yields in input order regardless of completion order.
        let batches: Vec<FeedBatch> = stream::iter(request.sources.iter().cloned())
            .map(|source| self.collect_feed(source))
            .buffered(self.max_concurrent_feeds)
            .collect()
            .await;

        let result = aggregate_feeds(batches, &request.stopwords, request.top_n);

        match result.notice {
            Some(notice) => tracing::warn!(
                articles = result.total_articles,
                notice = %notice,
                "analysis finished with empty result"
            ),
            None => tracing::info!(
                articles = result.total_articles,
                unique_words = result.total_unique_words,
                "analysis finished"
            ),
        }

        Ok(result)
    }

    async fn collect_feed(&self, source: FeedSource) -> FeedBatch {
        let outcome = match self.client.fetch(&source.url).await {
            Ok(body) => {
                let articles = self.parser.parse_feed_payload(&body, &source.name);
                tracing::debug!(feed = %source.name, count = articles.len(), "feed parsed");
                FeedOutcome::Articles(articles)
            }
            Err(e) => {
                tracing::warn!(
                    feed = %source.name,
                    url = %source.url,
                    timeout = e.is_timeout(),
                    error = %e,
                    "feed fetch failed; continuing without it"
                );
                FeedOutcome::FetchFailed(e.to_string())
            }
        };
        FeedBatch { source, outcome }
    }
}

/// Aggregate already-collected feed batches into an [`AnalysisResult`].
///
/// Per-feed tables are complete before they are ranked and merged into the
/// global table, and the global table is complete before it is ranked, so
/// truncation never affects counts. A batch whose feed name was already
/// seen is skipped.
#[must_use]
pub fn aggregate_feeds(
    batches: Vec<FeedBatch>,
    stopwords: &StopwordSet,
    top_n: usize,
) -> AnalysisResult {
    let mut global = FrequencyTable::new();
    let mut sources = SourceIndex::new();
    let mut articles = Vec::new();
    let mut feeds = Vec::with_capacity(batches.len());
    let mut seen = HashSet::new();

    for FeedBatch { source, outcome } in batches {
        if !seen.insert(source.name.clone()) {
            tracing::warn!(feed = %source.name, "duplicate feed batch skipped");
            continue;
        }

        let (feed_articles, status) = match outcome {
            FeedOutcome::Articles(list) if list.is_empty() => (list, FeedStatus::NoArticles),
            FeedOutcome::Articles(list) => (list, FeedStatus::Ok),
            FeedOutcome::FetchFailed(error) => (Vec::new(), FeedStatus::FetchFailed { error }),
        };

        let mut table = FrequencyTable::new();
        for article in &feed_articles {
            let tokens = retained_tokens(&article.analysis_text(), stopwords);
            sources.record_article(article, &tokens);
            table.extend(&tokens);
        }
        global.merge(&table);

        feeds.push(FeedBreakdown {
            name: source.name,
            url: source.url,
            article_count: feed_articles.len(),
            status,
            words: table.ranked(top_n),
        });
        articles.extend(feed_articles);
    }

    let notice = if articles.is_empty() {
        Some(AnalysisNotice::NoArticles)
    } else if global.is_empty() {
        Some(AnalysisNotice::NoWordsAfterFiltering)
    } else {
        None
    };

    AnalysisResult {
        total_articles: articles.len(),
        total_unique_words: global.distinct_words(),
        word_frequency: global.ranked(top_n),
        word_sources: sources.into_map(),
        feeds,
        articles,
        timestamp: Utc::now(),
        notice,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
