use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry extracted from a feed. All text fields are already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    /// Full body (`content:encoded` or Atom `content`), empty when absent.
    pub content: String,
    pub link: String,
    /// Publication date exactly as it appeared in the feed.
    pub published: String,
    pub feed_name: String,
}

impl Article {
    /// Text the tokenizer sees: title followed by description.
    #[must_use]
    pub fn analysis_text(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub frequency: usize,
}

/// Attribution of a word occurrence back to the article it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReference {
    pub title: String,
    pub link: String,
    pub published: String,
    pub feed_name: String,
}

impl From<&Article> for SourceReference {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            link: article.link.clone(),
            published: article.published.clone(),
            feed_name: article.feed_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedStatus {
    Ok,
    NoArticles,
    FetchFailed { error: String },
}

/// Per-feed slice of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedBreakdown {
    pub name: String,
    pub url: String,
    pub article_count: usize,
    pub status: FeedStatus,
    pub words: Vec<WordCount>,
}

/// Why a completed run has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisNotice {
    /// No selected feed produced any article.
    NoArticles,
    /// Articles were found but every token was filtered out.
    NoWordsAfterFiltering,
}

impl std::fmt::Display for AnalysisNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisNotice::NoArticles => write!(f, "no articles found in any selected feed"),
            AnalysisNotice::NoWordsAfterFiltering => {
                write!(f, "no words remaining after stopword filtering")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub articles: Vec<Article>,
    pub word_frequency: Vec<WordCount>,
    pub feeds: Vec<FeedBreakdown>,
    pub word_sources: BTreeMap<String, Vec<SourceReference>>,
    pub total_articles: usize,
    pub total_unique_words: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<AnalysisNotice>,
}

impl AnalysisResult {
    /// Sources recorded for `word` in this run, optionally limited to one feed.
    ///
    /// The feed filter scans the already-bounded global list, so it can
    /// return fewer entries than the feed actually contributed.
    #[must_use]
    pub fn sources_for(&self, word: &str, feed: Option<&str>) -> Vec<&SourceReference> {
        let key = word.trim().to_lowercase();
        self.word_sources
            .get(&key)
            .map(|sources| {
                sources
                    .iter()
                    .filter(|s| feed.is_none_or(|name| s.feed_name == name))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn feed(&self, name: &str) -> Option<&FeedBreakdown> {
        self.feeds.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notice.is_some()
    }
}
