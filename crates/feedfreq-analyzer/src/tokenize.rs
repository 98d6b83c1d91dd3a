//! Article text to retained word tokens.
//!
//! Text is split into maximal runs of word characters (alphanumerics and
//! `_`). Each run is lowercased first; it is kept only if every character of
//! the lowercased form is alphabetic and it is at least [`MIN_WORD_LEN`]
//! characters long, so mixed tokens such as `covid19` or `5g` are dropped
//! whole rather than split.

use crate::stopwords::StopwordSet;

pub const MIN_WORD_LEN: usize = 3;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Candidate words in `text`, lowercased, before stopword filtering.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    // Lowercasing can add characters (`İ` becomes `i` plus a combining dot),
    // so the checks run on the lowercased form.
    text.split(|c: char| !is_word_char(c))
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_WORD_LEN && w.chars().all(char::is_alphabetic))
}

/// Words in `text` that survive the length, alphabetic, and stopword rules.
#[must_use]
pub fn retained_tokens(text: &str, stopwords: &StopwordSet) -> Vec<String> {
    words(text).filter(|w| !stopwords.contains(w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        let tokens: Vec<String> = words("Markets Rally, As Stocks-Climb!").collect();
        assert_eq!(tokens, vec!["markets", "rally", "stocks", "climb"]);
    }

    #[test]
    fn drops_short_words() {
        let tokens: Vec<String> = words("AI is on the go now").collect();
        assert_eq!(tokens, vec!["the", "now"]);
    }

    #[test]
    fn mixed_alphanumeric_tokens_are_dropped_entirely() {
        let tokens: Vec<String> = words("covid19 cases rise 5g mp3 players_2 done").collect();
        assert_eq!(tokens, vec!["cases", "rise", "done"]);
    }

    #[test]
    fn underscores_join_runs_and_are_not_alphabetic() {
        let tokens: Vec<String> = words("snake_case word").collect();
        assert_eq!(tokens, vec!["word"]);
    }

    #[test]
    fn apostrophes_split_contractions() {
        let tokens: Vec<String> = words("don't won't").collect();
        assert_eq!(tokens, vec!["don", "won"]);
    }

    #[test]
    fn unicode_letters_are_alphabetic() {
        let tokens: Vec<String> = words("Café München").collect();
        assert_eq!(tokens, vec!["café", "münchen"]);
    }

    #[test]
    fn lowercasing_that_adds_combining_marks_drops_the_run() {
        let tokens = retained_tokens("İstanbul seçimleri", &StopwordSet::default());
        assert_eq!(tokens, vec!["seçimleri"]);
        for token in &tokens {
            assert!(token.chars().all(char::is_alphabetic), "{token:?} not alphabetic");
        }
    }

    #[test]
    fn retained_tokens_apply_stopwords() {
        let stopwords = StopwordSet::new(["rally"]);
        let tokens = retained_tokens("The markets rally after stocks climb", &stopwords);
        assert_eq!(tokens, vec!["markets", "stocks", "climb"]);
    }

    #[test]
    fn retained_tokens_satisfy_retention_rule() {
        let stopwords = StopwordSet::default();
        let text = "In 2024, the U.S. economy grew 3% -- analysts said growth_rate x2 \
                    would slow; économie REBOUNDS";
        for token in retained_tokens(text, &stopwords) {
            assert!(token.chars().count() >= MIN_WORD_LEN, "{token} too short");
            assert!(token.chars().all(char::is_alphabetic), "{token} not alphabetic");
            assert!(!stopwords.contains(&token), "{token} is a stopword");
        }
    }
}
