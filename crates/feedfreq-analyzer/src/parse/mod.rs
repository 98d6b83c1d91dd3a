//! Feed payload parsing.
//!
//! A [`ParserChain`] runs its strategies in order and returns the first
//! non-empty article list. The default chain is a structured XML parse
//! ([`StructuredParser`]) followed by a tolerant pattern matcher over the raw
//! text ([`PatternParser`]). Failures never escape the chain; a payload no
//! strategy can read yields zero articles.

mod pattern;
mod structured;

pub use pattern::PatternParser;
pub use structured::StructuredParser;

use crate::error::ParseError;
use crate::normalize::normalize_text;
use crate::types::Article;

/// Default per-feed article cap.
pub const DEFAULT_MAX_ARTICLES: usize = 25;

/// One way of turning a feed payload into articles.
pub trait FeedParser: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parse at most `limit` titled articles, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when this strategy cannot read the payload.
    fn parse(&self, payload: &str, feed_name: &str, limit: usize)
        -> Result<Vec<Article>, ParseError>;
}

/// Ordered list of parsing strategies with a shared article cap.
pub struct ParserChain {
    strategies: Vec<Box<dyn FeedParser>>,
    max_articles: usize,
}

impl Default for ParserChain {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ARTICLES)
    }
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("ParserChain")
            .field("strategies", &names)
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

impl ParserChain {
    /// Structured XML first, pattern fallback second.
    #[must_use]
    pub fn new(max_articles: usize) -> Self {
        Self::with_strategies(
            vec![Box::new(StructuredParser), Box::new(PatternParser)],
            max_articles,
        )
    }

    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn FeedParser>>, max_articles: usize) -> Self {
        Self {
            strategies,
            max_articles,
        }
    }

    #[must_use]
    pub fn max_articles(&self) -> usize {
        self.max_articles
    }

    /// Parse a raw payload into at most `max_articles` articles.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Each strategy's
    /// failure is logged and the next one is tried.
    #[must_use]
    pub fn parse_feed_payload(&self, payload: &[u8], feed_name: &str) -> Vec<Article> {
        let text = String::from_utf8_lossy(payload);
        let text = text.trim_start_matches('\u{feff}');

        for strategy in &self.strategies {
            match strategy.parse(text, feed_name, self.max_articles) {
                Ok(articles) if !articles.is_empty() => {
                    tracing::debug!(
                        feed = feed_name,
                        parser = strategy.name(),
                        count = articles.len(),
                        "parsed feed payload"
                    );
                    return articles;
                }
                Ok(_) => {
                    tracing::debug!(
                        feed = feed_name,
                        parser = strategy.name(),
                        "parser found no articles; trying next"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        feed = feed_name,
                        parser = strategy.name(),
                        error = %e,
                        "parser failed; trying next"
                    );
                }
            }
        }

        tracing::warn!(
            feed = feed_name,
            bytes = payload.len(),
            "no parser produced any articles"
        );
        Vec::new()
    }
}

/// Logical fields recognised inside one `<item>`/`<entry>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Title,
    Description,
    Summary,
    Content,
    ContentEncoded,
    Link,
    PubDate,
    Published,
    Updated,
    DcDate,
}

impl Field {
    pub(crate) const ALL: [Field; 10] = [
        Field::Title,
        Field::Description,
        Field::Summary,
        Field::Content,
        Field::ContentEncoded,
        Field::Link,
        Field::PubDate,
        Field::Published,
        Field::Updated,
        Field::DcDate,
    ];

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Summary => "summary",
            Field::Content => "content",
            Field::ContentEncoded => "content:encoded",
            Field::Link => "link",
            Field::PubDate => "pubDate",
            Field::Published => "published",
            Field::Updated => "updated",
            Field::DcDate => "dc:date",
        }
    }

    /// Map an element's qualified name to a field.
    ///
    /// Unprefixed and `atom:` names match by local name; other prefixes only
    /// match the two namespaced fields, so `media:title` is not a title.
    pub(crate) fn from_qualified_name(name: &str) -> Option<Field> {
        let local = match name.split_once(':') {
            None => name,
            Some(("atom", local)) => local,
            Some(_) => {
                return Field::ALL
                    .into_iter()
                    .find(|f| f.tag().contains(':') && f.tag().eq_ignore_ascii_case(name));
            }
        };
        Field::ALL
            .into_iter()
            .find(|f| !f.tag().contains(':') && f.tag() == local)
    }
}

/// Raw fragments collected for one entry, first non-empty value per field.
#[derive(Debug, Default, Clone)]
pub(crate) struct EntryFields {
    title: String,
    description: String,
    summary: String,
    content: String,
    content_encoded: String,
    link: String,
    pub_date: String,
    published: String,
    updated: String,
    dc_date: String,
}

impl EntryFields {
    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
            Field::ContentEncoded => &mut self.content_encoded,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
            Field::DcDate => &mut self.dc_date,
        }
    }

    /// Store `value` unless the field already holds something non-blank.
    pub(crate) fn set_if_empty(&mut self, field: Field, value: &str) {
        let slot = self.slot(field);
        if slot.trim().is_empty() && !value.trim().is_empty() {
            value.clone_into(slot);
        }
    }

    /// Overwrite the field unconditionally.
    pub(crate) fn set(&mut self, field: Field, value: &str) {
        value.clone_into(self.slot(field));
    }

    pub(crate) fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Summary => &self.summary,
            Field::Content => &self.content,
            Field::ContentEncoded => &self.content_encoded,
            Field::Link => &self.link,
            Field::PubDate => &self.pub_date,
            Field::Published => &self.published,
            Field::Updated => &self.updated,
            Field::DcDate => &self.dc_date,
        }
    }

    /// Normalize the collected fragments into an [`Article`].
    ///
    /// Returns `None` when the title is blank after normalization.
    pub(crate) fn into_article(self, feed_name: &str) -> Option<Article> {
        let title = normalize_text(&self.title);
        if title.is_empty() {
            return None;
        }

        let description = first_normalized(&[
            &self.description,
            &self.summary,
            &self.content,
            &self.content_encoded,
        ]);
        let content = first_normalized(&[&self.content_encoded, &self.content]);
        let published = [&self.pub_date, &self.published, &self.updated, &self.dc_date]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string();

        Some(Article {
            title,
            description,
            content,
            link: normalize_text(&self.link),
            published,
            feed_name: feed_name.to_string(),
        })
    }
}

/// First candidate that is non-empty after normalization.
fn first_normalized(candidates: &[&String]) -> String {
    candidates
        .iter()
        .map(|raw| normalize_text(raw))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
