use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use thumbscout_core::resolve::has_http_scheme;
use thumbscout_core::{JsonConfig, TextConfig, Thumbnailer, ThumbnailerConfig, Thumbnails, convert_to_json, convert_to_text};
use tracing_subscriber::EnvFilter;
use url::Url;

mod args;
mod echo;

use args::{Args, OutputFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the document comes from
enum Input {
    Url(String),
    File(PathBuf),
    Stdin,
}

impl Input {
    fn detect(input: &str) -> Self {
        if input == "-" {
            Self::Stdin
        } else if has_http_scheme(input) {
            Self::Url(input.to_string())
        } else if Path::new(input).is_file() {
            Self::File(PathBuf::from(input))
        } else {
            Self::Url(input.to_string())
        }
    }
}

fn thumbnailer_config(args: &Args) -> ThumbnailerConfig {
    let mut builder = ThumbnailerConfig::builder()
        .timeout(args.timeout)
        .min_filesize(args.min_filesize)
        .aspect_band(args.min_ratio, args.max_ratio)
        .transfer_width(args.transfer_width)
        .flush_threshold(args.flush_threshold);

    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    if let Some(dir) = &args.spool_dir {
        builder = builder.spool_dir(dir.clone());
    }

    builder.build()
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "thumbscout_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn render(found: &Thumbnails, args: &Args) -> anyhow::Result<String> {
    match args.format {
        OutputFormat::Json => {
            let mut json = convert_to_json(found, &JsonConfig { pretty: args.pretty })
                .context("Failed to serialize thumbnails")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(convert_to_text(found, &TextConfig { include_header: args.verbose })),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    if let Some(base) = &args.base_url {
        Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    }

    let thumbnailer = Thumbnailer::with_config(thumbnailer_config(&args)).context("Invalid configuration")?;

    let found = match Input::detect(&args.input) {
        Input::Url(url) => {
            if args.verbose {
                echo::print_step(1, 2, &format!("Resolving {}", url.bright_white().underline()));
            }
            thumbnailer
                .fetch(&url)
                .await
                .with_context(|| format!("Failed to find thumbnails for {}", url))?
        }
        Input::File(path) => {
            if args.verbose {
                echo::print_step(1, 2, &format!("Scanning file {}", path.display().bright_white()));
            }
            let html =
                fs::read_to_string(&path).with_context(|| format!("Failed to read file: {}", path.display()))?;
            if args.verbose {
                echo::print_size(html.len());
            }
            thumbnailer
                .scan_html(&html, args.base_url.as_deref())
                .await
                .context("Failed to scan HTML")?
        }
        Input::Stdin => {
            if args.verbose {
                echo::print_step(1, 2, "Reading from stdin");
            }
            let mut html = String::new();
            io::stdin().read_to_string(&mut html).context("Failed to read from stdin")?;
            if args.verbose {
                echo::print_size(html.len());
            }
            thumbnailer
                .scan_html(&html, args.base_url.as_deref())
                .await
                .context("Failed to scan HTML")?
        }
    };

    if args.verbose {
        echo::print_step(2, 2, "Writing output");
        echo::print_summary(&found);
    }

    let output = render(&found, &args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
