use crate::thumbnails::Thumbnails;

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Include source and type lines before the URLs
    pub include_header: bool,
}

/// Plain text formatter listing one thumbnail URL per line
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, found: &Thumbnails) -> String {
        convert_to_text(found, &self.config)
    }
}

/// Convert a thumbnail record to plain text
pub fn convert_to_text(found: &Thumbnails, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(found));
        output.push('\n');
    }

    for url in &found.thumbnails {
        output.push_str(url);
        output.push('\n');
    }

    output
}

fn generate_header(found: &Thumbnails) -> String {
    let mimetype = if found.mimetype.is_empty() { "unknown" } else { found.mimetype.as_str() };
    format!(
        "Source: {}\nType: {}\nThumbnails: {}\n",
        found.source,
        mimetype,
        found.thumbnails.len()
    )
}
