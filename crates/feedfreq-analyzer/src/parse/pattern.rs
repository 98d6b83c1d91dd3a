//! Tolerant block matching over the raw payload text.
//!
//! Used when the structured parse fails. Works on truncated or otherwise
//! malformed documents as long as whole `<item>`/`<entry>` blocks survive.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{EntryFields, FeedParser, Field};
use crate::error::ParseError;
use crate::types::Article;

static CONTROL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex")
});
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item\b[^>]*>(.*?)</item\s*>").expect("valid regex"));
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<entry\b[^>]*>(.*?)</entry\s*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*>").expect("valid regex"));
static HREF_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});
static REL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\brel\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});

/// CDATA-wrapped and plain-text forms of one element.
struct TagPatterns {
    cdata: Regex,
    text: Regex,
}

impl TagPatterns {
    fn for_tag(tag: &str) -> Self {
        let t = regex::escape(tag);
        // The optional attribute group cannot end in '/', so self-closing
        // tags never open a match.
        let open = format!(r"<{t}(?:\s[^>]*[^/>])?\s*>");
        let close = format!(r"</{t}\s*>");
        Self {
            cdata: Regex::new(&format!(
                r"(?is){open}\s*<!\[CDATA\[(.*?)\]\]>\s*{close}"
            ))
            .expect("valid regex"),
            text: Regex::new(&format!(r"(?is){open}([^<]*){close}")).expect("valid regex"),
        }
    }

    /// First non-blank capture, CDATA form first.
    fn extract<'a>(&self, block: &'a str) -> Option<&'a str> {
        [&self.cdata, &self.text].into_iter().find_map(|re| {
            re.captures_iter(block)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .find(|s| !s.trim().is_empty())
        })
    }
}

static TAG_PATTERNS: LazyLock<HashMap<&'static str, TagPatterns>> = LazyLock::new(|| {
    Field::ALL
        .into_iter()
        .map(|f| (f.tag(), TagPatterns::for_tag(f.tag())))
        .collect()
});

/// Regex extraction of item/entry blocks and their fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternParser;

impl PatternParser {
    fn extract_fields(block: &str) -> EntryFields {
        let mut fields = EntryFields::default();
        for field in Field::ALL {
            if let Some(value) = TAG_PATTERNS
                .get(field.tag())
                .and_then(|patterns| patterns.extract(block))
            {
                fields.set_if_empty(field, value);
            }
        }
        if fields.get(Field::Link).trim().is_empty() {
            if let Some(href) = link_href(block) {
                fields.set(Field::Link, href);
            }
        }
        fields
    }
}

impl FeedParser for PatternParser {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn parse(
        &self,
        payload: &str,
        feed_name: &str,
        limit: usize,
    ) -> Result<Vec<Article>, ParseError> {
        let cleaned = CONTROL_CHARS_RE.replace_all(payload, "");

        let mut blocks: Vec<&str> = ITEM_RE
            .captures_iter(&cleaned)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        if blocks.is_empty() {
            blocks = ENTRY_RE
                .captures_iter(&cleaned)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
        }
        if blocks.is_empty() {
            return Err(ParseError::NoBlocks);
        }
        tracing::debug!(feed = feed_name, blocks = blocks.len(), "matched feed blocks");

        Ok(blocks
            .into_iter()
            .filter_map(|block| Self::extract_fields(block).into_article(feed_name))
            .take(limit)
            .collect())
    }
}

/// `href` of the block's `<link>` tags, preferring `rel="alternate"` or no rel.
fn link_href(block: &str) -> Option<&str> {
    let mut fallback = None;
    for tag in LINK_TAG_RE.find_iter(block) {
        let tag = tag.as_str();
        let Some(href) = HREF_ATTR_RE
            .captures(tag)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|h| !h.trim().is_empty())
        else {
            continue;
        };
        let rel = REL_ATTR_RE.captures(tag).and_then(|c| c.get(1));
        if rel.is_none_or(|r| r.as_str().eq_ignore_ascii_case("alternate")) {
            return Some(href);
        }
        fallback.get_or_insert(href);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdata_form_wins_over_text_form() {
        let patterns = TagPatterns::for_tag("title");
        let block = "<title><![CDATA[Rates <b>rise</b>]]></title>";
        assert_eq!(patterns.extract(block), Some("Rates <b>rise</b>"));
    }

    #[test]
    fn tag_name_must_match_exactly() {
        let patterns = TagPatterns::for_tag("content");
        let block = "<content:encoded>encoded body</content:encoded><contents>x</contents>";
        assert_eq!(patterns.extract(block), None);

        let encoded = TagPatterns::for_tag("content:encoded");
        assert_eq!(encoded.extract(block), Some("encoded body"));
    }

    #[test]
    fn self_closing_and_empty_tags_yield_nothing() {
        let patterns = TagPatterns::for_tag("description");
        assert_eq!(patterns.extract("<description/>"), None);
        assert_eq!(patterns.extract(r#"<description type="html" />"#), None);
        assert_eq!(patterns.extract("<description>  </description>"), None);
    }

    #[test]
    fn tag_match_is_case_insensitive_with_attributes() {
        let patterns = TagPatterns::for_tag("pubDate");
        let block = r#"<PUBDATE tz="utc">Tue, 02 Jan 2024 10:00:00 GMT</PUBDATE>"#;
        assert_eq!(
            patterns.extract(block),
            Some("Tue, 02 Jan 2024 10:00:00 GMT")
        );
    }

    #[test]
    fn link_href_prefers_alternate() {
        let block = r#"<link rel="self" href="https://example.com/self"/>
                       <link rel="alternate" href="https://example.com/post"/>"#;
        assert_eq!(link_href(block), Some("https://example.com/post"));
    }

    #[test]
    fn link_href_falls_back_to_any_rel() {
        let block = r#"<link rel="enclosure" href='https://example.com/a.mp3'/>"#;
        assert_eq!(link_href(block), Some("https://example.com/a.mp3"));
        assert_eq!(link_href("<title>no links</title>"), None);
    }

    #[test]
    fn link_text_is_used_before_href() {
        let block = r#"<title>Post</title><link>https://example.com/text</link>"#;
        let fields = PatternParser::extract_fields(block);
        assert_eq!(fields.get(Field::Link), "https://example.com/text");
    }

    #[test]
    fn no_blocks_is_an_error() {
        let err = PatternParser
            .parse("<html><body>not a feed</body></html>", "Feed1", 25)
            .unwrap_err();
        assert!(matches!(err, ParseError::NoBlocks));
    }

    #[test]
    fn entries_are_only_used_when_no_items_match() {
        let payload = "<rss><item><title>Item title</title></item>\
                       <entry><title>Entry title</title></entry></rss>";
        let articles = PatternParser.parse(payload, "Feed1", 25).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Item title");
    }

    #[test]
    fn control_characters_are_stripped() {
        let payload = "<rss><item><title>Clean\u{1}\u{8} headline</title></item></rss>";
        let articles = PatternParser.parse(payload, "Feed1", 25).unwrap();
        assert_eq!(articles[0].title, "Clean headline");
    }
}
