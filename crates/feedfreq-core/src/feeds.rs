use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named feed to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("BBC News", "http://feeds.bbci.co.uk/news/rss.xml"),
    ("Reuters", "http://feeds.reuters.com/reuters/topNews"),
    ("CNN", "http://rss.cnn.com/rss/edition.rss"),
    ("TechCrunch", "http://feeds.feedburner.com/TechCrunch"),
    ("Hacker News", "https://hnrss.org/frontpage"),
    ("Ars Technica", "http://arstechnica.com/feed/"),
    ("The Register", "http://www.theregister.co.uk/headlines.atom"),
    ("Slashdot", "http://rss.slashdot.org/Slashdot/slashdotMain"),
];

/// The built-in feed catalogue, keyed by name in display order.
#[must_use]
pub fn default_feeds() -> IndexMap<String, String> {
    DEFAULT_FEEDS
        .iter()
        .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
        .collect()
}

/// Whether `url` looks like something the fetcher can retrieve.
pub(crate) fn is_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue_keeps_order() {
        let feeds = default_feeds();
        let names: Vec<&str> = feeds.keys().map(String::as_str).collect();
        assert_eq!(names.first(), Some(&"BBC News"));
        assert_eq!(names.last(), Some(&"Slashdot"));
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn http_urls_are_accepted() {
        assert!(is_http_url("https://hnrss.org/frontpage"));
        assert!(is_http_url("HTTP://example.com/feed"));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(!is_http_url("ftp://example.com/feed"));
        assert!(!is_http_url("example.com/feed"));
        assert!(!is_http_url("https://"));
    }
}
