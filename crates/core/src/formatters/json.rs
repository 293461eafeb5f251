use crate::thumbnails::Thumbnails;
use crate::{Result, ThumbscoutError};

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert a thumbnail record to JSON
pub fn convert_to_json(found: &Thumbnails, config: &JsonConfig) -> Result<String> {
    let rendered = if config.pretty { serde_json::to_string_pretty(found) } else { serde_json::to_string(found) };
    rendered.map_err(|e| ThumbscoutError::ConfigError(format!("JSON serialization failed: {}", e)))
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, found: &Thumbnails) -> Result<String> {
        convert_to_json(found, &self.config)
    }
}
