//! Strict XML reading of RSS 2.0 / RSS 1.0 `<item>` and Atom `<entry>` elements.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{EntryFields, FeedParser, Field};
use crate::error::ParseError;
use crate::types::Article;

/// Event-driven parse with `quick-xml`. Any well-formedness error fails the
/// whole payload so the chain can fall back.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredParser;

/// Text being collected for a field that is a direct child of the entry.
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// The `<item>`/`<entry>` currently being read.
struct OpenEntry {
    depth: usize,
    fields: EntryFields,
    capture: Option<Capture>,
    link_is_alternate: bool,
}

impl OpenEntry {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            fields: EntryFields::default(),
            capture: None,
            link_is_alternate: false,
        }
    }

    /// Atom links carry the URL in `href`; prefer `rel="alternate"` (or no rel).
    fn take_link_href(&mut self, e: &BytesStart<'_>) {
        let Some(href) = attribute(e, "href") else {
            return;
        };
        let is_alternate = attribute(e, "rel").is_none_or(|rel| rel == "alternate");
        if is_alternate && !self.link_is_alternate {
            self.fields.set(Field::Link, &href);
            self.link_is_alternate = true;
        } else {
            self.fields.set_if_empty(Field::Link, &href);
        }
    }

    fn is_direct_child(&self, depth: usize) -> bool {
        self.capture.is_none() && depth == self.depth + 1
    }

    /// A child element opened at stack `depth` inside this entry.
    fn open_child(&mut self, e: &BytesStart<'_>, name: &str, depth: usize) {
        if self.capture.is_some() {
            // Markup nested inside a field: keep words apart.
            self.push_text(" ");
            return;
        }
        if depth != self.depth + 1 {
            return;
        }
        if let Some(field) = Field::from_qualified_name(name) {
            if field == Field::Link {
                self.take_link_href(e);
            }
            self.capture = Some(Capture {
                field,
                depth,
                text: String::new(),
            });
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
    }
}

impl FeedParser for StructuredParser {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn parse(
        &self,
        payload: &str,
        feed_name: &str,
        limit: usize,
    ) -> Result<Vec<Article>, ParseError> {
        let mut reader = Reader::from_str(payload);

        let mut articles = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut entry: Option<OpenEntry> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = element_name(e.name().as_ref());
                    if let Some(state) = entry.as_mut() {
                        state.open_child(&e, &name, open.len());
                    } else if is_entry_element(&name) {
                        entry = Some(OpenEntry::new(open.len()));
                    }
                    open.push(name);
                }
                Event::Empty(e) => {
                    if let Some(state) = entry.as_mut() {
                        let name = element_name(e.name().as_ref());
                        let is_link = Field::from_qualified_name(&name) == Some(Field::Link);
                        if is_link && state.is_direct_child(open.len()) {
                            state.take_link_href(&e);
                        }
                    }
                }
                Event::Text(e) => {
                    if let Some(state) = entry.as_mut() {
                        // Undeclared HTML entities fail XML unescaping; keep them
                        // raw and let the normalizer decode them.
                        let text = e
                            .unescape()
                            .map_or_else(|_| String::from_utf8_lossy(&e).into_owned(), |t| {
                                t.into_owned()
                            });
                        state.push_text(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(state) = entry.as_mut() {
                        state.push_text(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    open.pop();
                    let depth = open.len();
                    let mut finished = false;
                    if let Some(state) = entry.as_mut() {
                        if state.capture.as_ref().is_some_and(|c| c.depth == depth) {
                            if let Some(capture) = state.capture.take() {
                                state.fields.set_if_empty(capture.field, &capture.text);
                            }
                        } else if state.capture.is_some() {
                            state.push_text(" ");
                        }
                        finished = state.depth == depth;
                    }
                    if finished {
                        if let Some(article) =
                            entry.take().and_then(|s| s.fields.into_article(feed_name))
                        {
                            articles.push(article);
                            if articles.len() >= limit {
                                return Ok(articles);
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(ParseError::UnexpectedEof { open: unclosed });
        }
        if articles.is_empty() {
            return Err(ParseError::NoEntries);
        }
        Ok(articles)
    }
}

fn element_name(raw: &[u8]) -> String {
    std::str::from_utf8(raw).unwrap_or("").to_string()
}

fn is_entry_element(name: &str) -> bool {
    let local = name.rsplit(':').next().unwrap_or(name);
    local == "item" || local == "entry"
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(std::borrow::Cow::into_owned))
}
