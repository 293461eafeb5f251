//! Error types for thumbnail discovery.
//!
//! This module defines the main error type [`ThumbscoutError`] which represents
//! every failure that can occur while fetching the root resource, classifying
//! it, and validating image candidates.
//!
//! Only root-level failures reach callers of [`crate::Thumbnailer::fetch`].
//! Candidate-level failures ([`ThumbscoutError::CandidateFetch`] and
//! [`ThumbscoutError::Decode`]) are logged and swallowed by the batcher.
//!
//! # Example
//!
//! ```rust
//! use thumbscout_core::{ThumbscoutError, Result};
//!
//! fn require_body(body: &[u8], url: &str) -> Result<()> {
//!     if body.is_empty() {
//!         return Err(ThumbscoutError::EmptySource(url.to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for thumbnail discovery operations.
///
/// # Example
///
/// ```rust,no_run
/// use thumbscout_core::{ThumbscoutError, fetch_thumbnails};
///
/// # async fn run() {
/// match fetch_thumbnails("example.com").await {
///     Ok(found) => println!("{} thumbnails", found.thumbnails.len()),
///     Err(ThumbscoutError::EmptySource(url)) => println!("{} has no body", url),
///     Err(e) => println!("Error: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ThumbscoutError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and
    /// other transport-level problems while fetching the root resource.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The root resource answered with a non-success status after every method was tried.
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// A MIME type could not be routed to exactly one handler.
    ///
    /// This points at a defective [`crate::MimeTable`], not at bad input.
    #[error("No single handler registered for type: {0}")]
    UnsupportedType(String),

    /// An HTML resource had an empty body even after a full GET.
    #[error("Empty source document: {0}")]
    EmptySource(String),

    /// A single image candidate could not be retrieved.
    #[error("Candidate {url} could not be fetched: {reason}")]
    CandidateFetch { url: String, reason: String },

    /// Image dimensions could not be read from a candidate body.
    #[error("Failed to decode image dimensions: {0}")]
    Decode(String),

    /// Configuration errors.
    ///
    /// Returned when a [`crate::ThumbnailerConfig`] breaks one of its invariants.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File write errors.
    ///
    /// Wraps standard I/O errors for temporary candidate storage and output files.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

impl ThumbscoutError {
    /// Whether the error only concerns a single image candidate.
    pub fn is_candidate_local(&self) -> bool {
        matches!(self, Self::CandidateFetch { .. } | Self::Decode(_))
    }
}

impl From<image::ImageError> for ThumbscoutError {
    fn from(err: image::ImageError) -> Self {
        ThumbscoutError::Decode(err.to_string())
    }
}

/// Result type alias for ThumbscoutError.
pub type Result<T> = std::result::Result<T, ThumbscoutError>;
