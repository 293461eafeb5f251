//! The output record of a thumbnail lookup.

use serde::{Deserialize, Serialize};

/// What a handler found for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// No thumbnail.
    Nothing,
    /// A single URL, such as an image resource standing for itself.
    One(String),
    /// Ranked URLs from the HTML pipeline.
    Many(Vec<String>),
}

impl From<Found> for Vec<String> {
    fn from(found: Found) -> Self {
        match found {
            Found::Nothing => Vec::new(),
            Found::One(url) => vec![url],
            Found::Many(urls) => urls,
        }
    }
}

/// Final result of a thumbnail lookup.
///
/// Serializes as `{"source": ..., "type": ..., "thumbnails": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    /// Canonical URL of the resource after redirects.
    pub source: String,
    /// MIME type without parameters.
    #[serde(rename = "type")]
    pub mimetype: String,
    /// Absolute image URLs, best first.
    pub thumbnails: Vec<String>,
}

/// Assembles the output record, flattening single and empty results into a list.
pub fn format(url: impl Into<String>, mimetype: impl Into<String>, found: Found) -> Thumbnails {
    Thumbnails { source: url.into(), mimetype: mimetype.into(), thumbnails: found.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalar_becomes_list() {
        let out = format("http://a.com/i.png", "image/png", Found::One("http://a.com/i.png".into()));
        assert_eq!(out.thumbnails, vec!["http://a.com/i.png"]);
    }

    #[test]
    fn test_format_nothing_becomes_empty_list() {
        let out = format("http://a.com/doc.pdf", "application/pdf", Found::Nothing);
        assert!(out.thumbnails.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let out = format("http://a.com/", "text/html", Found::Many(vec!["http://a.com/x.jpg".into()]));
        let value = serde_json::to_value(&out).unwrap();

        assert_eq!(value["source"], "http://a.com/");
        assert_eq!(value["type"], "text/html");
        assert_eq!(value["thumbnails"][0], "http://a.com/x.jpg");
        assert!(value.get("mimetype").is_none());
    }
}
