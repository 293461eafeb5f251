//! Image URL discovery in HTML documents.
//!
//! [`extract_image_urls`] walks every `<img src>` in document order, resolves
//! it against the page URL and drops duplicates, keeping the first occurrence.

use std::collections::HashSet;

use url::Url;

use crate::parse::Document;
use crate::resolve::{has_http_scheme, resolve};

/// Returns the absolute, de-duplicated image URLs referenced by `doc`.
///
/// Relative references are only resolved when `base_url` is an absolute
/// URL with a host; without one, only `http(s)` and protocol-relative
/// references survive. `data:` URIs and other schemes are skipped.
///
/// # Example
///
/// ```rust
/// use thumbscout_core::extract_image_urls;
/// use thumbscout_core::parse::Document;
///
/// let doc = Document::parse(r#"<img src="a.png"><img src="/x/a.png"><img src="a.png">"#);
/// let urls = extract_image_urls(&doc, Some("http://site.com/x/page"));
/// assert_eq!(urls, vec!["http://site.com/x/a.png"]);
/// ```
pub fn extract_image_urls(doc: &Document, base_url: Option<&str>) -> Vec<String> {
    let base = base_url.filter(|base| Url::parse(base).is_ok_and(|url| url.has_host()));

    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for src in doc.image_sources() {
        let resolved = if has_http_scheme(src) || src.starts_with("//") {
            resolve(base.unwrap_or_default(), src)
        } else if looks_like_scheme(src) {
            tracing::trace!(src, "skipping non-http image reference");
            continue;
        } else if let Some(base) = base {
            resolve(base, src)
        } else {
            tracing::trace!(src, "skipping relative image reference without a base URL");
            continue;
        };

        if !is_fetchable(&resolved) {
            tracing::trace!(url = %resolved, "discarding malformed image URL");
            continue;
        }

        if seen.insert(resolved.clone()) {
            urls.push(resolved);
        }
    }

    urls
}

/// Whether the text before the first `:` is a URI scheme such as `data` or `javascript`.
fn looks_like_scheme(src: &str) -> bool {
    let Some((scheme, _)) = src.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_fetchable(url: &str) -> bool {
    Url::parse(url).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}
