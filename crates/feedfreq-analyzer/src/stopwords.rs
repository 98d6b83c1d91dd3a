use std::collections::HashSet;

/// Built-in English stopwords, lowercase.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them", "my", "your", "his", "its", "our", "their", "am", "said", "says", "say", "get", "go",
    "going", "went", "come", "came", "time", "people", "way", "day", "man", "new", "first",
    "last", "long", "great", "little", "own", "other", "old", "right", "big", "high",
    "different", "small", "large", "next", "early", "young", "important", "few", "public",
    "bad", "same", "able", "also", "back", "after", "use", "than", "now", "look", "only",
    "think", "see", "know", "take", "work", "life", "become", "here", "how", "so", "want",
    "make", "give", "hand", "part", "place", "where", "turn", "put", "end", "why", "try", "good",
    "woman", "through", "down", "up", "out", "many", "then", "some", "like", "into", "two",
    "more", "very", "what", "just", "over", "still", "being", "made", "before", "when", "much",
    "too", "any", "well", "such",
];

/// Union of the built-in stopwords and a user's custom words.
///
/// Membership is case-insensitive: everything is stored lowercase and
/// lookups lowercase their input.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
    custom_count: usize,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl StopwordSet {
    /// Build the active set from the defaults plus `custom`.
    ///
    /// Custom words are trimmed and lowercased; blank entries are ignored.
    pub fn new<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: HashSet<String> =
            DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect();
        let mut custom_count = 0;
        for word in custom {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            custom_count += 1;
            words.insert(word);
        }
        Self {
            words,
            custom_count,
        }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    #[must_use]
    pub fn default_count() -> usize {
        DEFAULT_STOPWORDS.len()
    }

    /// Number of non-blank custom words supplied, duplicates included.
    #[must_use]
    pub fn custom_count(&self) -> usize {
        self.custom_count
    }

    /// Size of the merged set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
