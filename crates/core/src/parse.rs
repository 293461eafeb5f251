//! HTML parsing.
//!
//! This module wraps [`scraper::Html`] in a [`Document`] type. Parsing is
//! tolerant: html5ever recovers from malformed markup instead of failing,
//! so a broken page still yields whatever `<img>` tags could be recovered.
//!
//! # Example
//!
//! ```rust
//! use thumbscout_core::parse::Document;
//!
//! let html = r#"<html><body><img src="/a.png"><img src="b.jpg"></body></html>"#;
//! let doc = Document::parse(html);
//! assert_eq!(doc.image_sources(), vec!["/a.png", "b.jpg"]);
//! ```

use scraper::{Html, Selector};

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Never fails; unparseable fragments are dropped by the parser.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses raw bytes, replacing invalid UTF-8 sequences.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// Returns the raw `src` of every `<img>` in document order.
    ///
    /// Values are trimmed; empty ones are skipped.
    pub fn image_sources(&self) -> Vec<&str> {
        let Ok(selector) = Selector::parse("img[src]") else {
            return Vec::new();
        };

        self.html
            .select(&selector)
            .filter_map(|el| el.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Gallery</title>
        </head>
        <body>
            <h1>Heading</h1>
            <img src="/hero.jpg" alt="Hero">
            <p><img src="  thumbs/a.png  "></p>
            <img alt="no source">
            <img src="">
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_image_sources_in_document_order() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.image_sources(), vec!["/hero.jpg", "thumbs/a.png"]);
    }

    #[test]
    fn test_malformed_markup_is_recovered() {
        let html = r#"<div><img src="a.png"<p>unclosed <img src='b.png'><table><img src=c.png></div"#;
        let doc = Document::parse(html);
        let sources = doc.image_sources();
        assert!(sources.contains(&"b.png"));
        assert!(sources.contains(&"c.png"));
    }

    #[test]
    fn test_parse_bytes_lossy() {
        let mut bytes = b"<img src=\"x.png\">".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let doc = Document::parse_bytes(&bytes);
        assert_eq!(doc.image_sources(), vec!["x.png"]);
    }
}
