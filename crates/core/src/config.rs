//! Configuration for the thumbnail pipeline.
//!
//! Every tunable constant lives in [`ThumbnailerConfig`] and is passed into
//! [`crate::Thumbnailer`] at construction; nothing is read from global state.
//!
//! # Example
//!
//! ```rust
//! use thumbscout_core::ThumbnailerConfig;
//!
//! let config = ThumbnailerConfig::builder()
//!     .min_filesize(1024)
//!     .aspect_band(0.75, 1.5)
//!     .transfer_width(2)
//!     .build();
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use crate::batch::BatchConfig;
use crate::candidate::AspectBand;
use crate::dispatch::MimeTable;
use crate::fetch::FetchConfig;
use crate::select::TierTable;
use crate::{Result, ThumbscoutError};

/// Settings for one [`crate::Thumbnailer`].
#[derive(Debug, Clone, Default)]
pub struct ThumbnailerConfig {
    /// HTTP timeout and User-Agent.
    pub fetch: FetchConfig,

    /// MIME classification tables.
    pub mime: MimeTable,

    /// Candidate concurrency, size gate and aspect band.
    pub batch: BatchConfig,

    /// Area tiers for selection (default: 100000/1, 50000/3, 20000/4, 5000/8).
    pub tiers: TierTable,
}

impl ThumbnailerConfig {
    /// Creates a new builder for ThumbnailerConfig.
    pub fn builder() -> ThumbnailerConfigBuilder {
        ThumbnailerConfigBuilder::new()
    }

    /// Maximum number of thumbnails a lookup can return.
    pub fn max_images(&self) -> usize {
        self.tiers.max_images()
    }

    /// Checks every invariant the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        self.tiers.validate()?;

        let band = self.batch.aspect_band;
        if !(band.min_ratio < band.max_ratio) {
            return Err(ThumbscoutError::ConfigError(format!(
                "aspect band is empty ({} .. {})",
                band.min_ratio, band.max_ratio
            )));
        }

        if self.batch.transfer_width == 0 {
            return Err(ThumbscoutError::ConfigError("transfer width must be at least 1".to_string()));
        }

        if self.batch.flush_threshold == 0 {
            return Err(ThumbscoutError::ConfigError("flush threshold must be at least 1".to_string()));
        }

        if let Some(mimetype) = self.mime.overlap() {
            return Err(ThumbscoutError::UnsupportedType(mimetype.to_string()));
        }

        Ok(())
    }
}

/// Builder for ThumbnailerConfig.
pub struct ThumbnailerConfigBuilder {
    config: ThumbnailerConfig,
}

impl ThumbnailerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ThumbnailerConfig::default() }
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the MIME classification tables.
    pub fn mime_table(mut self, value: MimeTable) -> Self {
        self.config.mime = value;
        self
    }

    /// Sets the minimum declared image size in bytes.
    pub fn min_filesize(mut self, value: u64) -> Self {
        self.config.batch.min_filesize = value;
        self
    }

    /// Sets the exclusive width/height ratio bounds.
    pub fn aspect_band(mut self, min_ratio: f64, max_ratio: f64) -> Self {
        self.config.batch.aspect_band = AspectBand { min_ratio, max_ratio };
        self
    }

    /// Sets the maximum number of concurrent image fetches.
    pub fn transfer_width(mut self, value: usize) -> Self {
        self.config.batch.transfer_width = value;
        self
    }

    /// Sets how many completed fetches form a delivered group.
    pub fn flush_threshold(mut self, value: usize) -> Self {
        self.config.batch.flush_threshold = value;
        self
    }

    /// Sets the directory candidate bodies are spooled to.
    pub fn spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.batch.spool_dir = Some(dir.into());
        self
    }

    /// Sets the selection tiers.
    pub fn tiers(mut self, value: TierTable) -> Self {
        self.config.tiers = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ThumbnailerConfig {
        self.config
    }
}

impl Default for ThumbnailerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
