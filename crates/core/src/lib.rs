pub mod batch;
pub mod candidate;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod resolve;
pub mod select;
pub mod thumbnailer;
pub mod thumbnails;

pub use batch::{BatchConfig, CandidateBatcher};
pub use candidate::{AspectBand, ImageCandidate, decode_dimensions};
pub use config::{ThumbnailerConfig, ThumbnailerConfigBuilder};
pub use dispatch::{Handler, MimeTable, ResourceKind};
pub use error::{Result, ThumbscoutError};
pub use extract::extract_image_urls;
pub use fetch::{FetchConfig, Fetcher, Resource, normalize_mimetype};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, convert_to_json, convert_to_text};
pub use parse::Document;
pub use resolve::{normalize_input, resolve};
pub use select::{Tier, TierTable, rank, select};
pub use thumbnailer::{Thumbnailer, fetch_thumbnails, fetch_thumbnails_with_config};
pub use thumbnails::{Found, Thumbnails};
