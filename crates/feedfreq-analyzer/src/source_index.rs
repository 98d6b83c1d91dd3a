use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::{Article, SourceReference};

/// How many attributing articles are kept per word.
pub const MAX_SOURCES_PER_WORD: usize = 5;

/// Global word → articles index with a fixed capacity per word.
///
/// Appends past capacity are ignored; reaching the cap is normal.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    capacity: usize,
    entries: HashMap<String, Vec<SourceReference>>,
}

impl Default for SourceIndex {
    fn default() -> Self {
        Self::with_capacity(MAX_SOURCES_PER_WORD)
    }
}

impl SourceIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
        }
    }

    /// Record `article` as a source of `word`. Returns `false` once the
    /// word's list is full.
    pub fn record(&mut self, word: &str, article: &Article) -> bool {
        let sources = self.entries.entry(word.to_string()).or_default();
        if sources.len() >= self.capacity {
            return false;
        }
        sources.push(SourceReference::from(article));
        true
    }

    /// Record `article` once for each distinct word in `words`.
    pub fn record_article<'a, I>(&mut self, article: &Article, words: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut seen = HashSet::new();
        for word in words {
            if seen.insert(word.as_str()) {
                self.record(word, article);
            }
        }
    }

    /// Sources of `word`; empty when nothing was recorded.
    #[must_use]
    pub fn sources(&self, word: &str) -> &[SourceReference] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sources of `word` that came from `feed_name`, found by scanning the
    /// bounded global list.
    #[must_use]
    pub fn sources_in_feed(&self, word: &str, feed_name: &str) -> Vec<&SourceReference> {
        self.sources(word)
            .iter()
            .filter(|s| s.feed_name == feed_name)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted map for serialization.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Vec<SourceReference>> {
        self.entries.into_iter().collect()
    }
}
