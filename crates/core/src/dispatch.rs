//! MIME classification and handler selection.
//!
//! A [`MimeTable`] maps a normalized MIME type onto a [`ResourceKind`], and
//! [`Handler::for_kind`] picks the pipeline that produces thumbnails for it.

use crate::{Result, ThumbscoutError};

const IMAGE_TYPES: [&str; 9] = [
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/tiff",
    "image/x-icon",
];

const HTML_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// Coarse classification of a root resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Html,
    Default,
}

/// Static membership tables used by [`MimeTable::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTable {
    /// Types served as images, which are their own thumbnail.
    pub image: Vec<String>,
    /// Types parsed as HTML documents.
    pub html: Vec<String>,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            image: IMAGE_TYPES.iter().map(|s| s.to_string()).collect(),
            html: HTML_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MimeTable {
    /// Classifies a normalized MIME type.
    ///
    /// Unknown types fall through to [`ResourceKind::Default`]. A type that
    /// both tables claim cannot be routed to a single handler and yields
    /// [`ThumbscoutError::UnsupportedType`].
    pub fn classify(&self, mimetype: &str) -> Result<ResourceKind> {
        let is_image = self.image.iter().any(|t| t.eq_ignore_ascii_case(mimetype));
        let is_html = self.html.iter().any(|t| t.eq_ignore_ascii_case(mimetype));

        match (is_image, is_html) {
            (true, false) => Ok(ResourceKind::Image),
            (false, true) => Ok(ResourceKind::Html),
            (false, false) => Ok(ResourceKind::Default),
            (true, true) => Err(ThumbscoutError::UnsupportedType(mimetype.to_string())),
        }
    }

    /// Returns the first type listed in both tables, if any.
    pub fn overlap(&self) -> Option<&str> {
        self.image
            .iter()
            .find(|t| self.html.iter().any(|h| h.eq_ignore_ascii_case(t)))
            .map(String::as_str)
    }
}

/// The pipeline used to produce thumbnails for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// The resource is an image; it is its own thumbnail.
    Image,
    /// Discover, fetch, validate and rank embedded images.
    Html,
    /// Nothing to offer.
    Default,
}

impl Handler {
    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Image => Handler::Image,
            ResourceKind::Html => Handler::Html,
            ResourceKind::Default => Handler::Default,
        }
    }
}
