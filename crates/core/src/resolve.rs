//! URL resolution for image references.
//!
//! [`resolve`] turns a possibly-relative `src` attribute into an absolute URL
//! using the document's final URL as base. It is a plain string transformation:
//! it never fails, and a base without a host yields a malformed result that the
//! caller is expected to discard.

use url::Url;

const DEFAULT_SCHEME: &str = "http";

/// Whether `reference` starts with an explicit `http://` or `https://` scheme.
pub fn has_http_scheme(reference: &str) -> bool {
    let lower = reference.get(..8).unwrap_or(reference).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves an image reference against the URL of the page it appears on.
///
/// - `http://` / `https://` references are returned unchanged
/// - protocol-relative references (`//cdn/x.png`) get an `http:` prefix
/// - absolute paths (`/x.png`) are joined to `scheme://host`
/// - anything else is joined to the directory of the base path
///
/// # Example
///
/// ```rust
/// use thumbscout_core::resolve;
///
/// assert_eq!(resolve("http://a.com/x/y", "/p/q.png"), "http://a.com/p/q.png");
/// assert_eq!(resolve("http://a.com/x/y", "z.png"), "http://a.com/x/z.png");
/// ```
pub fn resolve(base: &str, reference: &str) -> String {
    let reference = reference.trim();

    if has_http_scheme(reference) {
        return reference.to_string();
    }

    if let Some(rest) = reference.strip_prefix("//") {
        return format!("{}://{}", DEFAULT_SCHEME, rest);
    }

    let (scheme, authority, path) = split_base(base);

    if reference.starts_with('/') {
        return format!("{}://{}{}", scheme, authority, reference);
    }

    let dir = match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    };

    format!("{}://{}{}/{}", scheme, authority, dir, reference)
}

/// Prefixes `http://` onto inputs that carry no scheme.
///
/// ```rust
/// use thumbscout_core::normalize_input;
///
/// assert_eq!(normalize_input("example.com/a"), "http://example.com/a");
/// assert_eq!(normalize_input("https://example.com"), "https://example.com");
/// ```
pub fn normalize_input(input: &str) -> String {
    let input = input.trim();
    if input.contains("://") {
        input.to_string()
    } else if let Some(rest) = input.strip_prefix("//") {
        format!("{}://{}", DEFAULT_SCHEME, rest)
    } else {
        format!("{}://{}", DEFAULT_SCHEME, input)
    }
}

/// Splits a base URL into scheme, authority (host plus port) and path.
///
/// Bases without a scheme are read as `http`. An unparseable base gives
/// an empty authority and path.
fn split_base(base: &str) -> (String, String, String) {
    let parsed = Url::parse(base).ok().filter(Url::has_host).or_else(|| {
        if base.contains("://") { None } else { Url::parse(&format!("{}://{}", DEFAULT_SCHEME, base)).ok() }
    });

    match parsed {
        Some(url) => {
            let mut authority = url.host_str().unwrap_or_default().to_string();
            if let Some(port) = url.port() {
                authority.push_str(&format!(":{}", port));
            }
            (url.scheme().to_string(), authority, url.path().to_string())
        }
        None => (DEFAULT_SCHEME.to_string(), String::new(), String::new()),
    }
}
