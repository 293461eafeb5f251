//! Command-line arguments.
//!
//! Shared with `build.rs`, which generates shell completions from the same
//! definition the binary parses.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Output format for the thumbnail record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Find the best thumbnail images for a web page
#[derive(Parser, Debug)]
#[command(name = "thumbscout")]
#[command(author = "Thumbscout Contributors")]
#[command(version)]
#[command(about = "Find the best thumbnail images for a web page", long_about = None)]
pub struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Base URL for resolving image references in file or stdin input
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Minimum declared image size in bytes
    #[arg(long, default_value = "4096", value_name = "BYTES")]
    pub min_filesize: u64,

    /// Lower bound (exclusive) on width/height
    #[arg(long, default_value = "0.5", value_name = "RATIO")]
    pub min_ratio: f64,

    /// Upper bound (exclusive) on width/height
    #[arg(long, default_value = "2.0", value_name = "RATIO")]
    pub max_ratio: f64,

    /// Maximum number of image fetches in flight
    #[arg(long, default_value = "4", value_name = "NUM")]
    pub transfer_width: usize,

    /// Completed fetches per delivered group
    #[arg(long, default_value = "8", value_name = "NUM")]
    pub flush_threshold: usize,

    /// Directory for temporary image files (default: system temp dir)
    #[arg(long, value_name = "DIR")]
    pub spool_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_long_flags_are_kebab_case() {
        let cmd = Args::command();
        let longs: Vec<&str> = cmd.get_arguments().filter_map(|arg| arg.get_long()).collect();

        for flag in [
            "base-url",
            "user-agent",
            "min-filesize",
            "min-ratio",
            "max-ratio",
            "transfer-width",
            "flush-threshold",
            "spool-dir",
        ] {
            assert!(longs.contains(&flag), "missing --{}", flag);
        }
        assert!(longs.iter().all(|long| !long.contains('_')));
    }

    #[test]
    fn test_completions_offer_parseable_flags() {
        let mut script = Vec::new();
        clap_complete::generate(clap_complete::shells::Bash, &mut Args::command(), "thumbscout", &mut script);
        let script = String::from_utf8(script).unwrap();

        assert!(script.contains("--base-url"));
        assert!(script.contains("--transfer-width"));
        assert!(!script.contains("--base_url"));
    }

    #[test]
    fn test_parse_kebab_case_flags() {
        let args = Args::try_parse_from([
            "thumbscout",
            "--base-url",
            "http://example.com/",
            "--min-ratio",
            "0.75",
            "--transfer-width",
            "2",
            "-f",
            "text",
            "page.html",
        ])
        .unwrap();

        assert_eq!(args.base_url.as_deref(), Some("http://example.com/"));
        assert_eq!(args.min_ratio, 0.75);
        assert_eq!(args.transfer_width, 2);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.input, "page.html");
    }
}
