//! Concurrent candidate fetching.
//!
//! The [`CandidateBatcher`] fetches every discovered image URL with at most
//! `transfer_width` requests in flight. Finished fetches are grouped and
//! handed to a collector over a bounded channel every `flush_threshold`
//! completions, so results are drained while slower fetches are still
//! running rather than all at once at the end.
//!
//! A failing candidate never affects its siblings: fetch errors, non-2xx
//! responses, undersized bodies and undecodable images are logged and
//! dropped.

use std::collections::HashSet;
use std::mem;
use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::candidate::{AspectBand, ImageCandidate, decode_dimensions};
use crate::fetch::Fetcher;
use crate::{Result, ThumbscoutError};

/// Completed groups the channel holds before the fetch side waits on the collector.
const GROUP_QUEUE_DEPTH: usize = 2;

/// Concurrency and filtering settings for candidate fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of image requests in flight.
    pub transfer_width: usize,
    /// Completed fetches after which a group is delivered to the collector.
    pub flush_threshold: usize,
    /// Declared lengths below this many bytes are discarded undecoded.
    pub min_filesize: u64,
    pub aspect_band: AspectBand,
    /// Directory for body spool files; the system temp directory when unset.
    pub spool_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            transfer_width: 4,
            flush_threshold: 8,
            min_filesize: 4096,
            aspect_band: AspectBand::default(),
            spool_dir: None,
        }
    }
}

/// Fetches and validates image candidates with bounded concurrency.
pub struct CandidateBatcher<'a> {
    fetcher: &'a Fetcher,
    config: BatchConfig,
}

impl<'a> CandidateBatcher<'a> {
    pub fn new(fetcher: &'a Fetcher, config: BatchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetches every URL and returns the candidates that passed validation.
    ///
    /// Results are returned in the order the URLs were given, whatever
    /// order the fetches finished in, with one candidate per final URL.
    pub async fn run(&self, urls: Vec<String>) -> Vec<ImageCandidate> {
        if urls.is_empty() {
            return Vec::new();
        }

        let (tx, mut rx) = mpsc::channel::<Vec<ImageCandidate>>(GROUP_QUEUE_DEPTH);
        let width = self.config.transfer_width.max(1);
        let flush_threshold = self.config.flush_threshold.max(1);

        let produce = async move {
            let mut in_flight = stream::iter(urls.into_iter().enumerate())
                .map(|(position, url)| async move {
                    let outcome = self.fetch_candidate(&url).await;
                    (position, url, outcome)
                })
                .buffer_unordered(width);

            let mut group = Vec::new();
            let mut completed = 0;

            while let Some((position, url, outcome)) = in_flight.next().await {
                completed += 1;

                match outcome {
                    Ok(Some(candidate)) => group.push(candidate.at_position(position)),
                    Ok(None) => {}
                    Err(e) if e.is_candidate_local() => tracing::debug!(url = %url, error = %e, "candidate discarded"),
                    Err(e) => tracing::warn!(url = %url, error = %e, "candidate discarded on local I/O failure"),
                }

                if completed >= flush_threshold {
                    completed = 0;
                    if !group.is_empty() && tx.send(mem::take(&mut group)).await.is_err() {
                        return;
                    }
                }
            }

            if !group.is_empty() {
                let _ = tx.send(group).await;
            }
        };

        let collect = async {
            let mut candidates = Vec::new();
            while let Some(group) = rx.recv().await {
                tracing::trace!(size = group.len(), "candidate group delivered");
                candidates.extend(group);
            }
            candidates
        };

        let ((), mut candidates) = tokio::join!(produce, collect);
        candidates.sort_by_key(|c| c.position);

        // distinct references can redirect to the same image
        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.source_url.clone()));
        candidates
    }

    /// Fetches one candidate.
    ///
    /// `Ok(None)` means the image was fetched but filtered out by the size
    /// gate or had no usable dimensions.
    pub async fn fetch_candidate(&self, url: &str) -> Result<Option<ImageCandidate>> {
        let fetch_failure = |reason: String| ThumbscoutError::CandidateFetch { url: url.to_string(), reason };

        let mut response = self.fetcher.get(url).await.map_err(|e| fetch_failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failure(format!("status {}", status.as_u16())));
        }

        let final_url = response.url().to_string();
        let declared = response.content_length();

        if declared.is_some_and(|length| length < self.config.min_filesize) {
            tracing::debug!(url = %final_url, length = ?declared, min = self.config.min_filesize, "candidate below minimum size");
            return Ok(None);
        }

        let spool = match &self.config.spool_dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };
        let mut file = tokio::fs::File::from_std(spool.reopen()?);
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await.map_err(|e| fetch_failure(e.to_string()))? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        // the spool is dropped, and its file removed, when the closure returns
        let (width, height) = tokio::task::spawn_blocking(move || decode_dimensions(spool.path()))
            .await
            .map_err(|e| ThumbscoutError::Decode(e.to_string()))??;

        let candidate =
            ImageCandidate::new(final_url.clone(), declared.unwrap_or(written), width, height, &self.config.aspect_band);

        if candidate.is_none() {
            tracing::debug!(url = %final_url, width, height, "candidate has no usable dimensions");
        }

        Ok(candidate)
    }
}
