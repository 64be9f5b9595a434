//! Reads a written feed back into its header and items.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::builder::{FeedHeader, Item};
use crate::error::FeedError;

/// A feed as found on disk. Field names are local names, prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub header: FeedHeader,
    pub items: Vec<Item>,
}

/// Parses feed XML. Text is kept exactly as written, whitespace included.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] for malformed XML and [`FeedError::Malformed`]
/// if the document is not `rss` → `channel`.
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut header = FeedHeader {
        title: String::new(),
        link: String::new(),
        description: String::new(),
    };
    let mut items: Vec<Item> = Vec::new();
    let mut saw_channel = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(e.local_name().as_ref())?;
                if stack.is_empty() && name != "rss" {
                    return Err(FeedError::Malformed(format!("root element is <{name}>")));
                }
                if is_at(&stack, &["rss"]) && name == "channel" {
                    saw_channel = true;
                }
                if is_at(&stack, &["rss", "channel"]) && name == "item" {
                    items.push(Item::default());
                }
                stack.push(name);
                text.clear();
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref())?;
                record(&stack, name, String::new(), &mut header, &mut items);
            }
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::End(_) => {
                let Some(name) = stack.pop() else {
                    return Err(FeedError::Malformed("unbalanced end tag".to_owned()));
                };
                record(&stack, name, std::mem::take(&mut text), &mut header, &mut items);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(FeedError::Malformed("missing <channel>".to_owned()));
    }
    Ok(ParsedFeed { header, items })
}

/// Stores a closed leaf element according to where it sits.
fn record(
    parents: &[String],
    name: String,
    value: String,
    header: &mut FeedHeader,
    items: &mut [Item],
) {
    if is_at(parents, &["rss", "channel", "item"]) {
        if let Some(item) = items.last_mut() {
            item.fields.push((name, value));
        }
    } else if is_at(parents, &["rss", "channel"]) {
        match name.as_str() {
            "title" => header.title = value,
            "link" => header.link = value,
            "description" => header.description = value,
            _ => {}
        }
    }
}

fn is_at(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}

fn local_name(bytes: &[u8]) -> Result<String, FeedError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| FeedError::Encoding(e.to_string()))
}

/// Reads and parses an uncompressed feed file.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read, otherwise as
/// [`parse_feed`].
pub fn read_feed(path: &Path) -> Result<ParsedFeed, FeedError> {
    let bytes = std::fs::read(path).map_err(|e| FeedError::io(path, e))?;
    let xml = String::from_utf8(bytes).map_err(|e| FeedError::Encoding(e.to_string()))?;
    parse_feed(&xml)
}

/// Decompresses and parses a `.xml.gz` feed file.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read or is not gzip,
/// otherwise as [`parse_feed`].
pub fn read_feed_gz(path: &Path) -> Result<ParsedFeed, FeedError> {
    let file = std::fs::File::open(path).map_err(|e| FeedError::io(path, e))?;
    let mut xml = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut xml)
        .map_err(|e| FeedError::io(path, e))?;
    parse_feed(&xml)
}
