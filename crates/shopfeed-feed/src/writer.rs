//! Serializes a [`FeedDocument`] to RSS XML plus a gzip companion file.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use shopfeed_core::layout::archive_path;

use crate::builder::FeedDocument;
use crate::error::FeedError;

pub const GOOGLE_NAMESPACE: &str = "http://base.google.com/ns/1.0";

/// Outcome of [`write_feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub xml_path: PathBuf,
    pub archive_path: PathBuf,
    pub items: usize,
    pub xml_bytes: usize,
    pub archive_bytes: usize,
}

impl WriteReport {
    /// Compressed size as a fraction of the XML size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.xml_bytes == 0 {
            return 0.0;
        }
        self.archive_bytes as f64 / self.xml_bytes as f64
    }
}

/// Renders `doc` as an indented UTF-8 XML document.
///
/// Empty values are written as self-closing elements so every mapped field
/// is present in every item.
///
/// # Errors
///
/// Returns [`FeedError`] if an event cannot be written.
pub fn render_feed(doc: &FeedDocument) -> Result<Vec<u8>, FeedError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:g", GOOGLE_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &doc.header.title)?;
    write_text_element(&mut writer, "link", &doc.header.link)?;
    write_text_element(&mut writer, "description", &doc.header.description)?;

    for item in &doc.items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        for (field, value) in &item.fields {
            write_text_element(&mut writer, &doc.element_name(field), value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), FeedError> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

/// Writes `doc` to `path` and its gzip companion to `path` + `.gz`,
/// creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if either file cannot be written.
pub fn write_feed(doc: &FeedDocument, path: &Path) -> Result<WriteReport, FeedError> {
    let xml = render_feed(doc)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FeedError::io(parent, e))?;
    }
    std::fs::write(path, &xml).map_err(|e| FeedError::io(path, e))?;

    let archive = archive_path(path);
    let compressed = gzip(&xml).map_err(|e| FeedError::io(&archive, e))?;
    std::fs::write(&archive, &compressed).map_err(|e| FeedError::io(&archive, e))?;

    let report = WriteReport {
        xml_path: path.to_path_buf(),
        archive_path: archive,
        items: doc.items.len(),
        xml_bytes: xml.len(),
        archive_bytes: compressed.len(),
    };
    tracing::debug!(
        path = %report.xml_path.display(),
        items = report.items,
        ratio = report.ratio(),
        "wrote feed"
    );
    Ok(report)
}

fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}
