//! Raw feed fragment to plain text.

use std::sync::LazyLock;

use regex::Regex;

static CDATA_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!\[CDATA\[").expect("valid regex"));
static CDATA_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\]>").expect("valid regex"));
// Only things shaped like tags, comments, or declarations. A bare "a < b" survives.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!?][^<>]*>").expect("valid regex")
});

/// Turn a raw fragment into clean plain text.
///
/// CDATA markers are dropped (their content kept), tags are removed, HTML
/// entities are decoded, and whitespace runs collapse to single spaces.
/// Tags are stripped again after decoding so escaped markup such as
/// `&lt;p&gt;` does not leak into the text.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let without_cdata = CDATA_OPEN_RE.replace_all(raw, "");
    let without_cdata = CDATA_CLOSE_RE.replace_all(&without_cdata, "");
    let without_tags = TAG_RE.replace_all(&without_cdata, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    let without_tags = TAG_RE.replace_all(&decoded, " ");

    collapse_whitespace(&without_tags)
}

/// Collapse whitespace runs (including non-breaking spaces) and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
