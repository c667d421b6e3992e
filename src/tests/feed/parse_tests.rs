use super::*;

const TWO_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Playbook</title>
    <link>https://example.com</link>
    <atom:link href="https://example.com/feed.xml" rel="self" type="application/rss+xml"/>
    <description>Morning news</description>
    <lastBuildDate>Mon, 06 Jan 2025 10:00:00 GMT</lastBuildDate>
    <item>
      <title>A</title>
      <link>http://a</link>
      <description><![CDATA[<p>first <b>story</b></p>]]></description>
      <guid isPermaLink="false">id-a</guid>
      <pubDate>Mon, 06 Jan 2025 09:00:00 GMT</pubDate>
      <dc:creator>Jane Doe</dc:creator>
      <category>politics</category>
    </item>
    <item>
      <title>B</title>
      <link>http://b</link>
      <description>second</description>
      <guid>id-b</guid>
    </item>
  </channel>
</rss>
"#;

#[test]
fn parses_channel_and_items_in_order() {
    let feed = parse_feed(TWO_ITEMS.as_bytes()).unwrap();
    assert_eq!(feed.title, "Playbook");
    assert_eq!(feed.link, "https://example.com");
    assert_eq!(feed.description, "Morning news");
    assert_eq!(feed.last_build_date, "Mon, 06 Jan 2025 10:00:00 GMT");

    assert_eq!(feed.items.len(), 2);
    assert_eq!(feed.items[0].title, "A");
    assert_eq!(feed.items[0].link, "http://a");
    assert_eq!(feed.items[0].description, "<p>first <b>story</b></p>");
    assert_eq!(feed.items[0].id, "id-a");
    assert_eq!(feed.items[0].publish_date, "Mon, 06 Jan 2025 09:00:00 GMT");
    assert_eq!(feed.items[0].creator, "Jane Doe");
    assert_eq!(feed.items[1].title, "B");
    assert_eq!(feed.items[1].link, "http://b");
}

#[test]
fn missing_optional_fields_decode_to_empty() {
    let xml = "<rss><channel><title>T</title><item><title>only title</title></item></channel></rss>";
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.link, "");
    assert_eq!(feed.last_build_date, "");
    assert_eq!(feed.items.len(), 1);
    let item = &feed.items[0];
    assert_eq!(item.title, "only title");
    assert_eq!(item.link, "");
    assert_eq!(item.description, "");
    assert_eq!(item.creator, "");
    assert_eq!(item.publish_date, "");
}

#[test]
fn channel_without_items_is_empty_feed() {
    let xml = "<rss><channel><title>Quiet</title></channel></rss>";
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.title, "Quiet");
    assert!(feed.items.is_empty());
}

#[test]
fn unclosed_tag_is_parse_error() {
    let xml = "<rss><channel><title>A</channel></rss>";
    let err = parse_feed(xml.as_bytes()).unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[test]
fn truncated_document_is_parse_error() {
    let xml = "<rss><channel><title>A</title><item><title>x</title>";
    let err = parse_feed(xml.as_bytes()).unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[test]
fn non_utf8_body_is_parse_error() {
    let err = parse_feed(&[0xff, 0xfe, 0x00]).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn parsing_is_deterministic() {
    let a = parse_feed(TWO_ITEMS.as_bytes()).unwrap();
    let b = parse_feed(TWO_ITEMS.as_bytes()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn atom_link_before_link_is_ignored() {
    let xml = r#"<rss xmlns:atom="http://www.w3.org/2005/Atom"><channel>
        <atom:link href="https://example.com/self.xml" rel="self"/>
        <atom:link rel="hub">https://hub.example.com</atom:link>
        <title>T</title>
        <link>https://example.com</link>
        <item><atom:link>http://wrong</atom:link><link>http://right</link></item>
    </channel></rss>"#;
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.link, "https://example.com");
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].link, "http://right");
}

#[test]
fn namespaced_title_does_not_clash_with_title() {
    let xml = r#"<rss xmlns:media="http://search.yahoo.com/mrss/"><channel>
        <title>T</title>
        <item>
          <title>Real</title>
          <media:title>Thumbnail caption</media:title>
          <media:content url="http://img"><media:title>Nested</media:title></media:content>
        </item>
    </channel></rss>"#;
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.items[0].title, "Real");
}

#[test]
fn creator_matches_qualified_name_only() {
    let xml = r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/"><channel>
        <item><title>x</title><dc:creator>Jane</dc:creator></item>
        <item><title>y</title><creator>Not dublin core</creator></item>
    </channel></rss>"#;
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.items[0].creator, "Jane");
    assert_eq!(feed.items[1].creator, "");
}

#[test]
fn items_need_not_be_contiguous() {
    let xml = "<rss><channel><item><title>1</title></item><title>T</title>\
               <item><title>2</title></item></channel></rss>";
    let feed = parse_feed(xml.as_bytes()).unwrap();
    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["1", "2"]);
    assert_eq!(feed.title, "T");
}

#[test]
fn escaped_markup_and_unknown_entities_survive() {
    let xml = "<rss><channel><item>\
               <description>&lt;p&gt;It&amp;rsquo;s on&lt;/p&gt;</description>\
               <title>Wait &hellip;</title></item></channel></rss>";
    let feed = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(feed.items[0].description, "<p>It&rsquo;s on</p>");
    assert_eq!(feed.items[0].title, "Wait &hellip;");
}

#[test]
fn empty_body_is_parse_error() {
    assert!(parse_feed(b"").unwrap_err().is_parse());
    assert!(parse_feed(b"   ").unwrap_err().is_parse());
}
