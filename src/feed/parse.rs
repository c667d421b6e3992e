use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::{Feed, FeedError, Item};

/// Decode an RSS 2.0 document.
///
/// Elements are matched by qualified name, so `<atom:link>` next to `<link>`
/// or `<media:title>` next to `<title>` are ignored like any other unknown
/// element. Missing fields stay empty; a repeated field keeps its last value.
pub fn parse_feed(bytes: &[u8]) -> Result<Feed, FeedError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| FeedError::Parse(format!("body is not utf-8: {}", err)))?;

    let mut reader = Reader::from_str(text);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut chars = String::new();
    let mut feed = Feed::default();
    let mut item: Option<Item> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if is_channel(&path) && name == b"item" {
                    item = Some(Item::default());
                }
                path.push(name);
                chars.clear();
                saw_root = true;
            }
            Event::Empty(e) => {
                if is_channel(&path) && e.name().as_ref() == b"item" {
                    feed.items.push(Item::default());
                }
                saw_root = true;
            }
            Event::Text(e) => {
                // RSS bodies often carry HTML entities XML does not define.
                match e.unescape() {
                    Ok(s) => chars.push_str(&s),
                    Err(_) => chars.push_str(&String::from_utf8_lossy(&e)),
                }
            }
            Event::CData(e) => chars.push_str(&String::from_utf8_lossy(&e)),
            Event::End(_) => {
                let Some(name) = path.pop() else {
                    return Err(FeedError::Parse("unbalanced end tag".to_string()));
                };
                let value = chars.trim().to_string();
                chars.clear();
                if is_channel(&path) {
                    if name == b"item" {
                        feed.items.extend(item.take());
                    } else {
                        set_channel_field(&mut feed, &name, value);
                    }
                } else if is_item(&path) {
                    if let Some(item) = item.as_mut() {
                        set_item_field(item, &name, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(FeedError::Parse(format!(
            "document ended with {} element(s) open",
            path.len()
        )));
    }
    if !saw_root {
        return Err(FeedError::Parse("document has no root element".to_string()));
    }
    Ok(feed)
}

fn xml_error(err: quick_xml::Error) -> FeedError {
    FeedError::Parse(err.to_string())
}

// `<rss><channel>`; the root name itself is not checked.
fn is_channel(path: &[Vec<u8>]) -> bool {
    path.len() == 2 && path[1] == b"channel"
}

fn is_item(path: &[Vec<u8>]) -> bool {
    path.len() == 3 && path[1] == b"channel" && path[2] == b"item"
}

fn set_channel_field(feed: &mut Feed, name: &[u8], value: String) {
    match name {
        b"title" => feed.title = value,
        b"link" => feed.link = value,
        b"description" => feed.description = value,
        b"lastBuildDate" => feed.last_build_date = value,
        _ => {}
    }
}

fn set_item_field(item: &mut Item, name: &[u8], value: String) {
    match name {
        b"title" => item.title = value,
        b"link" => item.link = value,
        b"description" => item.description = value,
        b"guid" => item.id = value,
        b"pubDate" => item.publish_date = value,
        b"dc:creator" => item.creator = value,
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/feed/parse_tests.rs"]
mod tests;
