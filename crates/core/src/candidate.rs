//! Validated image candidates.
//!
//! An [`ImageCandidate`] only exists for an image whose dimensions decoded
//! to positive values. Its ratio, area and aspect-band flag are derived once
//! at construction and never change afterwards.

use std::path::Path;

use image::ImageReader;
use serde::Serialize;

use crate::Result;

/// Open interval of acceptable width/height ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectBand {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for AspectBand {
    fn default() -> Self {
        Self { min_ratio: 0.5, max_ratio: 2.0 }
    }
}

impl AspectBand {
    /// Whether `ratio` lies strictly inside the band.
    pub fn contains(&self, ratio: f64) -> bool {
        self.min_ratio < ratio && ratio < self.max_ratio
    }
}

/// An image that was fetched and decoded successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageCandidate {
    /// Final URL of the image after redirects.
    pub source_url: String,
    /// Declared or observed body length in bytes.
    pub content_length: u64,
    pub width: u32,
    pub height: u32,
    pub ratio: f64,
    pub area: u64,
    pub in_aspect_band: bool,
    /// Position of the image in the source document.
    #[serde(skip)]
    pub position: usize,
}

impl ImageCandidate {
    /// Builds a candidate, returning `None` for zero-sized images.
    pub fn new(
        source_url: impl Into<String>, content_length: u64, width: u32, height: u32, band: &AspectBand,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let ratio = f64::from(width) / f64::from(height);
        let area = u64::from(width) * u64::from(height);

        Some(Self {
            source_url: source_url.into(),
            content_length,
            width,
            height,
            ratio,
            area,
            in_aspect_band: band.contains(ratio),
            position: 0,
        })
    }

    /// Sets the document position used to restore discovery order.
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}

/// Reads the pixel dimensions of the image stored at `path`.
///
/// Only the header is decoded; the format is sniffed from the content
/// since temporary files carry no extension.
pub fn decode_dimensions(path: &Path) -> Result<(u32, u32)> {
    let dimensions = ImageReader::open(path)?.with_guessed_format()?.into_dimensions()?;
    Ok(dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::ThumbscoutError;

    #[test]
    fn test_derived_fields() {
        let c = ImageCandidate::new("http://a.com/i.png", 5000, 400, 200, &AspectBand::default()).unwrap();
        assert_eq!(c.area, 80_000);
        assert!((c.ratio - 2.0).abs() < f64::EPSILON);
        assert!(!c.in_aspect_band, "band bounds are exclusive");
        assert_eq!(c.position, 0);
    }

    #[test]
    fn test_band_is_exclusive() {
        let band = AspectBand::default();
        assert!(!band.contains(0.5));
        assert!(!band.contains(2.0));
        assert!(band.contains(1.0));
        assert!(band.contains(1.999));
        assert!(band.contains(0.501));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let band = AspectBand::default();
        assert!(ImageCandidate::new("u", 0, 0, 10, &band).is_none());
        assert!(ImageCandidate::new("u", 0, 10, 0, &band).is_none());
    }

    #[test]
    fn test_custom_band() {
        let band = AspectBand { min_ratio: 1.5, max_ratio: 3.0 };
        let c = ImageCandidate::new("u", 0, 200, 100, &band).unwrap();
        assert!(c.in_aspect_band);
    }

    #[test]
    fn test_decode_dimensions_from_file() {
        let img = image::RgbImage::new(64, 48);
        let mut file = tempfile::NamedTempFile::new().unwrap();

        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        file.write_all(bytes.get_ref()).unwrap();
        file.flush().unwrap();

        assert_eq!(decode_dimensions(file.path()).unwrap(), (64, 48));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not an image").unwrap();
        file.flush().unwrap();

        assert!(matches!(decode_dimensions(file.path()), Err(ThumbscoutError::Decode(_))));
    }
}
