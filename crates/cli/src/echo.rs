use owo_colors::OwoColorize;
use thumbscout_core::Thumbnails;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Thumbscout".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Find the best thumbnail images for a web page\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print the size of a document read from disk or stdin
pub fn print_size(bytes: usize) {
    eprintln!("  {} {}\n", "Size:".dimmed(), format_size(bytes).bright_white());
}

/// Print a summary of the lookup result
pub fn print_summary(found: &Thumbnails) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Lookup Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    let source = if found.source.is_empty() { "-" } else { found.source.as_str() };
    eprintln!("  {} {}", "Source:".dimmed(), source.bright_white());
    eprintln!("  {} {}", "Type:".dimmed(), found.mimetype.bright_white());
    eprintln!(
        "  {} {}\n",
        "Thumbnails:".dimmed(),
        found.thumbnails.len().to_string().bright_white()
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
