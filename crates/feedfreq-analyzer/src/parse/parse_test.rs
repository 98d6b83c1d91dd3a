use super::*;

const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:dc="http://purl.org/dc/elements/1.1/"
     xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Example News</title>
    <link>https://news.example.com/</link>
    <item>
      <title>Markets rally on &lt;b&gt;strong&lt;/b&gt; earnings</title>
      <link>https://news.example.com/markets</link>
      <description><![CDATA[<p>Stocks climbed as <em>earnings</em> beat forecasts.</p>]]></description>
      <content:encoded><![CDATA[<p>Full article body.</p>]]></content:encoded>
      <pubDate>Mon, 01 Jan 2024 09:00:00 GMT</pubDate>
      <media:title>Ignored media title</media:title>
    </item>
    <item>
      <title>Central bank holds rates</title>
      <link>https://news.example.com/rates</link>
      <description>Policy makers kept rates unchanged.</description>
      <dc:date>2024-01-02T10:00:00Z</dc:date>
    </item>
  </channel>
</rss>"#;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <entry>
    <title type="html">Election results announced</title>
    <link rel="self" href="https://atom.example.com/self/1"/>
    <link rel="alternate" href="https://atom.example.com/posts/1"/>
    <summary>Voters turned out in record numbers.</summary>
    <updated>2024-02-01T12:00:00Z</updated>
  </entry>
</feed>"#;

fn rss_with_items(count: usize) -> String {
    let items: String = (0..count)
        .map(|i| {
            format!(
                "<item><title>Headline {i}</title><description>Body {i}</description></item>"
            )
        })
        .collect();
    format!("<?xml version=\"1.0\"?><rss><channel>{items}</channel></rss>")
}

#[test]
fn rss_items_are_extracted_and_normalized() {
    let articles = ParserChain::default().parse_feed_payload(RSS_FEED.as_bytes(), "Feed1");
    assert_eq!(articles.len(), 2);

    let first = &articles[0];
    assert_eq!(first.title, "Markets rally on strong earnings");
    assert_eq!(first.description, "Stocks climbed as earnings beat forecasts.");
    assert_eq!(first.content, "Full article body.");
    assert_eq!(first.link, "https://news.example.com/markets");
    assert_eq!(first.published, "Mon, 01 Jan 2024 09:00:00 GMT");
    assert_eq!(first.feed_name, "Feed1");

    assert_eq!(articles[1].published, "2024-01-02T10:00:00Z");
}

#[test]
fn atom_entry_uses_alternate_href_and_summary() {
    let articles = ParserChain::default().parse_feed_payload(ATOM_FEED.as_bytes(), "Atom");
    assert_eq!(articles.len(), 1);

    let entry = &articles[0];
    assert_eq!(entry.title, "Election results announced");
    assert_eq!(entry.link, "https://atom.example.com/posts/1");
    assert_eq!(entry.description, "Voters turned out in record numbers.");
    assert_eq!(entry.published, "2024-02-01T12:00:00Z");
}

#[test]
fn description_falls_back_to_summary() {
    let payload = "<feed><entry><title>Only summary</title>\
                   <summary>Summary text here</summary></entry></feed>";
    let articles = StructuredParser.parse(payload, "Feed1", 25).unwrap();
    assert_eq!(articles[0].description, "Summary text here");
    assert!(articles[0].content.is_empty());
}

#[test]
fn caps_at_max_articles_in_document_order() {
    let payload = rss_with_items(30);
    let articles = ParserChain::default().parse_feed_payload(payload.as_bytes(), "Feed1");
    assert_eq!(articles.len(), DEFAULT_MAX_ARTICLES);
    assert_eq!(articles[0].title, "Headline 0");
    assert_eq!(articles[24].title, "Headline 24");
}

#[test]
fn untitled_entries_are_skipped_and_not_counted() {
    let payload = "<rss><channel>\
                   <item><title>   </title><description>no title</description></item>\
                   <item><description>missing title</description></item>\
                   <item><title>Kept one</title></item>\
                   <item><title>Kept two</title></item>\
                   </channel></rss>";
    let articles = ParserChain::new(2).parse_feed_payload(payload.as_bytes(), "Feed1");
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Kept one", "Kept two"]);
}

#[test]
fn truncated_payload_falls_back_to_pattern_parser() {
    let payload = "<?xml version=\"1.0\"?><rss><channel>\
                   <item><title>First complete</title><description>Alpha text</description></item>\
                   <item><title>Second complete</title></item>\
                   <item><title>Cut off mid";

    assert!(matches!(
        StructuredParser.parse(payload, "Feed1", 25),
        Err(ParseError::Xml(_) | ParseError::UnexpectedEof { .. })
    ));

    let articles = ParserChain::default().parse_feed_payload(payload.as_bytes(), "Feed1");
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["First complete", "Second complete"]);
    assert_eq!(articles[0].description, "Alpha text");
}

#[test]
fn truncated_atom_keeps_summary_and_alternate_href() {
    let payload = "<feed xmlns=\"http://www.w3.org/2005/Atom\">\
                   <entry><title>Launch delayed</title>\
                   <link rel=\"self\" href=\"https://x/self/1\"/>\
                   <link rel=\"alternate\" href=\"https://x/1\"/>\
                   <summary>Summary words</summary></entry>\
                   <entry><title>Cut off mid";

    assert!(StructuredParser.parse(payload, "Feed1", 25).is_err());

    let articles = ParserChain::default().parse_feed_payload(payload.as_bytes(), "Feed1");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Launch delayed");
    assert_eq!(articles[0].description, "Summary words");
    assert_eq!(articles[0].link, "https://x/1");
}

#[test]
fn unclosed_document_is_not_accepted_by_structured_parser() {
    let payload = "<rss><channel><item><title>Done</title></item>";
    let err = StructuredParser.parse(payload, "Feed1", 25).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. } | ParseError::Xml(_)));
}

#[test]
fn mismatched_tags_fall_back_to_pattern_parser() {
    let payload = "<rss><channel><item><title>Broken markup</title>\
                   <description>Text <b>bold</i></description></item></channel></rss>";
    let articles = ParserChain::default().parse_feed_payload(payload.as_bytes(), "Feed1");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Broken markup");
}

#[test]
fn html_entities_unknown_to_xml_survive_structured_parse() {
    let payload = "<rss><channel><item><title>Caf&eacute;&nbsp;opens</title></item>\
                   </channel></rss>";
    let articles = ParserChain::default().parse_feed_payload(payload.as_bytes(), "Feed1");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Café opens");
}

#[test]
fn invalid_utf8_and_bom_are_tolerated() {
    let mut payload = "\u{feff}<rss><channel><item><title>Caf".as_bytes().to_vec();
    payload.push(0xff);
    payload.extend_from_slice(b" news</title></item></channel></rss>");
    let articles = ParserChain::default().parse_feed_payload(&payload, "Feed1");
    assert_eq!(articles.len(), 1);
    assert!(articles[0].title.starts_with("Caf"));
    assert!(articles[0].title.ends_with("news"));
}

#[test]
fn unreadable_payload_yields_no_articles() {
    let chain = ParserChain::default();
    assert!(chain.parse_feed_payload(b"", "Feed1").is_empty());
    assert!(chain
        .parse_feed_payload(b"<html><body>Service unavailable</body></html>", "Feed1")
        .is_empty());
}

#[test]
fn both_strategies_agree_on_well_formed_rss() {
    let structured = StructuredParser.parse(RSS_FEED, "Feed1", 25).unwrap();
    let pattern = PatternParser.parse(RSS_FEED, "Feed1", 25).unwrap();
    assert_eq!(structured, pattern);
}

#[test]
fn chain_uses_strategies_in_order() {
    struct Fixed(&'static str);

    impl FeedParser for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn parse(
            &self,
            _payload: &str,
            feed_name: &str,
            _limit: usize,
        ) -> Result<Vec<Article>, ParseError> {
            Ok(vec![Article {
                title: self.0.to_string(),
                description: String::new(),
                content: String::new(),
                link: String::new(),
                published: String::new(),
                feed_name: feed_name.to_string(),
            }])
        }
    }

    struct Empty;

    impl FeedParser for Empty {
        fn name(&self) -> &'static str {
            "empty"
        }

        fn parse(&self, _: &str, _: &str, _: usize) -> Result<Vec<Article>, ParseError> {
            Ok(Vec::new())
        }
    }

    let chain = ParserChain::with_strategies(
        vec![Box::new(Empty), Box::new(Fixed("second")), Box::new(Fixed("third"))],
        5,
    );
    let articles = chain.parse_feed_payload(b"anything", "Custom");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "second");
    assert_eq!(articles[0].feed_name, "Custom");
    assert_eq!(chain.max_articles(), 5);
    assert!(format!("{chain:?}").contains("\"empty\""));
}

#[test]
fn qualified_names_map_to_fields() {
    assert_eq!(Field::from_qualified_name("title"), Some(Field::Title));
    assert_eq!(Field::from_qualified_name("atom:link"), Some(Field::Link));
    assert_eq!(
        Field::from_qualified_name("content:encoded"),
        Some(Field::ContentEncoded)
    );
    assert_eq!(Field::from_qualified_name("dc:date"), Some(Field::DcDate));
    assert_eq!(Field::from_qualified_name("media:title"), None);
    assert_eq!(Field::from_qualified_name("guid"), None);
}

#[test]
fn entry_fields_keep_first_non_blank_value() {
    let mut fields = EntryFields::default();
    fields.set_if_empty(Field::Title, "  ");
    fields.set_if_empty(Field::Title, "First");
    fields.set_if_empty(Field::Title, "Second");
    assert_eq!(fields.get(Field::Title), "First");

    fields.set(Field::Title, "Replaced");
    assert_eq!(fields.get(Field::Title), "Replaced");
}

#[test]
fn published_uses_first_available_date_field() {
    let mut fields = EntryFields::default();
    fields.set_if_empty(Field::Title, "Dated");
    fields.set_if_empty(Field::Updated, " 2024-03-01T00:00:00Z ");
    fields.set_if_empty(Field::DcDate, "2023-12-31");
    let article = fields.into_article("Feed1").unwrap();
    assert_eq!(article.published, "2024-03-01T00:00:00Z");
}
