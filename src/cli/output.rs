//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, keys, hints
//! - Bold: headers, values
//! - Dimmed: secondary info

use std::fmt::Display;
use std::io::{self, Write as IoWrite};

use console::style;

const RULE_WIDTH: usize = 56;

/// Disable colors when NO_COLOR is set.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ saved store.json`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ key not found: api`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ overwrote existing value for api`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ delete some entries or use a larger key`
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  api  secret-value`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", style(label).dim(), style(value).bold());
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());
}

/// Format a path string in cyan.
pub fn path(p: &std::path::Path) -> String {
    style(p.display()).cyan().to_string()
}

/// Format a key name in cyan.
pub fn key(k: &str) -> String {
    style(k).cyan().to_string()
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Print a prompt label without a newline.
pub fn prompt(label: &str) {
    print!("{}: ", style(label).bold());
    let _ = io::stdout().flush();
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
