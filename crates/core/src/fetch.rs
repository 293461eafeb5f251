//! Resource fetching over HTTP.
//!
//! The [`Fetcher`] retrieves the root resource with a cheap `HEAD` first and
//! only falls back to a full `GET` when the server rejects the method. The
//! returned [`Resource`] always carries the final URL after redirects.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use url::Url;

use crate::{Result, ThumbscoutError};

/// HTTP client configuration for fetching pages and images.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Thumbscout/0.1)".to_string() }
    }
}

/// The root resource of one fetch.
///
/// `url` is the canonical URL after redirects; all relative resolution
/// must use it rather than the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub url: String,
    pub mimetype: String,
    pub body: Vec<u8>,
}

/// Strips parameters (`; charset=...`) from a Content-Type value and lowercases it.
pub fn normalize_mimetype(content_type: &str) -> String {
    content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Whether a status tells us the request method itself was refused.
fn method_rejected(status: StatusCode) -> bool {
    status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED
}

/// Thin wrapper around a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds a client honouring the timeout and User-Agent in `config`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ThumbscoutError::HttpError)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches `url`, trying `HEAD` before falling back to `GET`.
    ///
    /// The fallback only happens when the server answers `405` or `501`.
    /// A `HEAD` response carries no body, so callers that need the
    /// document should follow up with [`Fetcher::fetch_full`].
    pub async fn fetch(&self, url: &str) -> Result<Resource> {
        let parsed = parse_http_url(url)?;

        let response = self.send(Method::HEAD, parsed.clone()).await?;
        let response = if method_rejected(response.status()) {
            tracing::warn!(url = %parsed, status = response.status().as_u16(), "HEAD rejected, retrying with GET");
            self.send(Method::GET, parsed).await?
        } else {
            response
        };

        self.read_resource(response).await
    }

    /// Fetches `url` with a content-retrieving `GET`.
    pub async fn fetch_full(&self, url: &str) -> Result<Resource> {
        let parsed = parse_http_url(url)?;
        let response = self.send(Method::GET, parsed).await?;
        self.read_resource(response).await
    }

    /// Issues a plain `GET` without interpreting the response.
    ///
    /// Candidate fetches use this so they can apply their own gates
    /// before the body is read.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let parsed = parse_http_url(url)?;
        self.send(Method::GET, parsed).await
    }

    async fn send(&self, method: Method, url: Url) -> Result<Response> {
        self.client
            .request(method, url)
            .header("Accept", "text/html,application/xhtml+xml,image/*;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ThumbscoutError::Timeout { timeout: self.config.timeout }
                } else {
                    ThumbscoutError::HttpError(e)
                }
            })
    }

    async fn read_resource(&self, response: Response) -> Result<Resource> {
        let url = response.url().to_string();
        let status = response.status();

        if !status.is_success() {
            return Err(ThumbscoutError::Status { url, status: status.as_u16() });
        }

        let mimetype = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(normalize_mimetype)
            .unwrap_or_default();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() { ThumbscoutError::Timeout { timeout: self.config.timeout } } else { e.into() }
        })?;

        Ok(Resource { url, mimetype, body: body.to_vec() })
    }
}

fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| ThumbscoutError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(ThumbscoutError::InvalidUrl(format!(
            "{}: URL must be http(s) with a host",
            url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Thumbscout"));
    }

    #[test]
    fn test_normalize_mimetype() {
        assert_eq!(normalize_mimetype("text/html; charset=UTF-8"), "text/html");
        assert_eq!(normalize_mimetype("IMAGE/PNG"), "image/png");
        assert_eq!(normalize_mimetype("  application/xhtml+xml ;q=1"), "application/xhtml+xml");
        assert_eq!(normalize_mimetype(""), "");
    }

    #[test]
    fn test_method_rejected() {
        assert!(method_rejected(StatusCode::METHOD_NOT_ALLOWED));
        assert!(method_rejected(StatusCode::NOT_IMPLEMENTED));
        assert!(!method_rejected(StatusCode::NOT_FOUND));
        assert!(!method_rejected(StatusCode::OK));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("http://example.com").is_ok());
        assert!(parse_http_url("https://example.com/a?b=c").is_ok());
        assert!(matches!(parse_http_url("example.com"), Err(ThumbscoutError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("ftp://example.com"), Err(ThumbscoutError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(async move { fetcher.fetch("not-a-url").await })
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(ThumbscoutError::InvalidUrl(_))));
    }
}
