//! Word counting and ranking.
//!
//! Counts are always complete before ranking; truncation to top-N happens
//! only on the ranked output, never on the table itself.

use indexmap::IndexMap;

use crate::types::WordCount;

/// Occurrence counts keyed by word, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_string(), 1);
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add(word.as_ref());
        }
    }

    /// Add every count from `other`. Words new to `self` are appended in
    /// `other`'s order, so merging per-feed tables in feed order gives the
    /// same first-seen order as counting the whole stream at once.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (word, count) in &other.counts {
            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    #[must_use]
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words counted.
    #[must_use]
    pub fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Ranked top-`top_n` words: descending frequency, ties in first-seen order.
    #[must_use]
    pub fn ranked(&self, top_n: usize) -> Vec<WordCount> {
        let words = self
            .counts
            .iter()
            .map(|(word, &frequency)| WordCount {
                word: word.clone(),
                frequency,
            })
            .collect();
        rank_words(words, top_n)
    }
}

/// Sort by descending frequency and keep the first `top_n`.
///
/// The sort is stable, so equal frequencies keep their input order and
/// re-ranking an already ranked list with the same `top_n` is a no-op.
#[must_use]
pub fn rank_words(mut words: Vec<WordCount>, top_n: usize) -> Vec<WordCount> {
    words.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    words.truncate(top_n);
    words
}
