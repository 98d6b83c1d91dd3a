//! Feed ingestion and word-frequency analysis for feedfreq.
//!
//! Fetches RSS/Atom feeds, extracts article text (structured XML first, a
//! pattern-based fallback second), tokenizes and filters it against a
//! stopword set, ranks words per feed and globally, and keeps a bounded
//! per-word list of the articles each word came from.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod source_index;
pub mod stopwords;
pub mod tokenize;
pub mod types;

pub use aggregate::{rank_words, FrequencyTable};
pub use client::FeedClient;
pub use error::{AnalyzerError, FetchError, ParseError};
pub use normalize::normalize_text;
pub use parse::{FeedParser, ParserChain, PatternParser, StructuredParser};
pub use pipeline::{aggregate_feeds, AnalysisRequest, Analyzer, FeedBatch, FeedOutcome};
pub use source_index::{SourceIndex, MAX_SOURCES_PER_WORD};
pub use stopwords::{StopwordSet, DEFAULT_STOPWORDS};
pub use tokenize::{retained_tokens, words, MIN_WORD_LEN};
pub use types::{
    AnalysisNotice, AnalysisResult, Article, FeedBreakdown, FeedStatus, SourceReference,
    WordCount,
};

pub use feedfreq_core::FeedSource;
