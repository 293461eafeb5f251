//! Main thumbnail lookup API.
//!
//! The [`Thumbnailer`] ties the pipeline together: fetch the resource,
//! classify it, and for HTML documents discover, fetch, validate and rank
//! the embedded images.
//!
//! # Example
//!
//! ```rust,no_run
//! use thumbscout_core::{Thumbnailer, fetch_thumbnails};
//!
//! # #[tokio::main]
//! # async fn main() -> thumbscout_core::Result<()> {
//! let found = fetch_thumbnails("example.com/article").await?;
//! println!("{} -> {:?}", found.source, found.thumbnails);
//!
//! let thumbnailer = Thumbnailer::new()?;
//! let found = thumbnailer.fetch("https://example.com/photo.jpg").await?;
//! assert_eq!(found.thumbnails, vec![found.source.clone()]);
//! # Ok(())
//! # }
//! ```

use crate::batch::CandidateBatcher;
use crate::config::ThumbnailerConfig;
use crate::dispatch::Handler;
use crate::extract::extract_image_urls;
use crate::fetch::{Fetcher, Resource};
use crate::parse::Document;
use crate::resolve::normalize_input;
use crate::select::select;
use crate::thumbnails::{Found, Thumbnails, format};
use crate::{Result, ThumbscoutError};

const HTML_MIMETYPE: &str = "text/html";

/// Entry point for thumbnail lookups.
///
/// Holds the validated configuration and a pooled HTTP client; lookups
/// share nothing else, so one instance can serve concurrent calls.
pub struct Thumbnailer {
    config: ThumbnailerConfig,
    fetcher: Fetcher,
}

impl Thumbnailer {
    /// Creates a new Thumbnailer with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ThumbnailerConfig::default())
    }

    /// Creates a new Thumbnailer with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbscoutError::ConfigError`] or
    /// [`ThumbscoutError::UnsupportedType`] if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use thumbscout_core::{Thumbnailer, ThumbnailerConfig};
    ///
    /// let config = ThumbnailerConfig::builder().min_filesize(0).build();
    /// let thumbnailer = Thumbnailer::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ThumbnailerConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(config.fetch.clone())?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &ThumbnailerConfig {
        &self.config
    }

    /// Looks up thumbnails for `url`.
    ///
    /// Inputs without a scheme are fetched over `http`. The returned
    /// `source` is the final URL after redirects.
    pub async fn fetch(&self, url: &str) -> Result<Thumbnails> {
        let url = normalize_input(url);
        let resource = self.fetcher.fetch(&url).await?;

        let kind = self.config.mime.classify(&resource.mimetype)?;
        tracing::debug!(url = %resource.url, mimetype = %resource.mimetype, ?kind, "classified resource");

        let found = match Handler::for_kind(kind) {
            Handler::Image => Found::One(resource.url.clone()),
            Handler::Html => self.handle_html(&resource).await?,
            Handler::Default => Found::Nothing,
        };

        Ok(format(resource.url, resource.mimetype, found))
    }

    /// Runs the HTML pipeline over a document that is already in hand.
    ///
    /// `base_url` is used both to resolve relative image references and as
    /// the record's `source`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use thumbscout_core::Thumbnailer;
    ///
    /// # async fn run() -> thumbscout_core::Result<()> {
    /// let html = r#"<img src="/hero.jpg"><img src="icon.png">"#;
    /// let found = Thumbnailer::new()?.scan_html(html, Some("https://example.com/post")).await?;
    /// println!("{:?}", found.thumbnails);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scan_html(&self, html: &str, base_url: Option<&str>) -> Result<Thumbnails> {
        let urls = extract_image_urls(&Document::parse(html), base_url);
        let thumbnails = self.rank_urls(urls, base_url.unwrap_or_default()).await;
        Ok(format(base_url.unwrap_or_default(), HTML_MIMETYPE, Found::Many(thumbnails)))
    }

    async fn handle_html(&self, resource: &Resource) -> Result<Found> {
        let refetched;
        let resource = if resource.body.is_empty() {
            tracing::debug!(url = %resource.url, "empty body, refetching with GET");
            refetched = self.fetcher.fetch_full(&resource.url).await?;
            &refetched
        } else {
            resource
        };

        if resource.body.is_empty() {
            return Err(ThumbscoutError::EmptySource(resource.url.clone()));
        }

        // the parsed document is not Send, so it must not live across an await
        let urls = extract_image_urls(&Document::parse_bytes(&resource.body), Some(&resource.url));
        Ok(Found::Many(self.rank_urls(urls, &resource.url).await))
    }

    async fn rank_urls(&self, urls: Vec<String>, source: &str) -> Vec<String> {
        let discovered = urls.len();

        let batcher = CandidateBatcher::new(&self.fetcher, self.config.batch.clone());
        let candidates = batcher.run(urls).await;
        let selected = select(&candidates, &self.config.tiers);

        tracing::info!(
            source,
            discovered,
            validated = candidates.len(),
            selected = selected.len(),
            "ranked image candidates"
        );

        selected
    }
}

/// Convenience function for a one-off lookup with default settings.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> thumbscout_core::Result<()> {
/// let found = thumbscout_core::fetch_thumbnails("https://example.com").await?;
/// # Ok(())
/// # }
/// ```
pub async fn fetch_thumbnails(url: &str) -> Result<Thumbnails> {
    Thumbnailer::new()?.fetch(url).await
}

/// Lookup with a custom configuration.
pub async fn fetch_thumbnails_with_config(url: &str, config: ThumbnailerConfig) -> Result<Thumbnails> {
    Thumbnailer::with_config(config)?.fetch(url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{Tier, TierTable};

    #[test]
    fn test_with_config_validates() {
        let config = ThumbnailerConfig::builder().transfer_width(0).build();
        assert!(matches!(Thumbnailer::with_config(config), Err(ThumbscoutError::ConfigError(_))));
    }

    #[test]
    fn test_new_uses_defaults() {
        let thumbnailer = Thumbnailer::new().unwrap();
        assert_eq!(thumbnailer.config().max_images(), 8);
    }

    #[test]
    fn test_custom_tiers_survive_construction() {
        let tiers = TierTable::new(vec![Tier::new(10, 2)]).unwrap();
        let config = ThumbnailerConfig::builder().tiers(tiers).build();
        let thumbnailer = Thumbnailer::with_config(config).unwrap();
        assert_eq!(thumbnailer.config().max_images(), 2);
    }

    #[tokio::test]
    async fn test_scan_html_without_images() {
        let thumbnailer = Thumbnailer::new().unwrap();
        let found = thumbnailer
            .scan_html("<html><body><p>No pictures</p></body></html>", Some("http://example.com/"))
            .await
            .unwrap();

        assert_eq!(found.source, "http://example.com/");
        assert_eq!(found.mimetype, "text/html");
        assert!(found.thumbnails.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let thumbnailer = Thumbnailer::new().unwrap();
        let result = thumbnailer.fetch("http://").await;
        assert!(matches!(result, Err(ThumbscoutError::InvalidUrl(_))));
    }
}
