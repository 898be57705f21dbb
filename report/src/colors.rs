//! Console color palette

use std::io::IsTerminal;

use colored::{ColoredString, Colorize};

/// Enable colors only when stdout is a terminal and `NO_COLOR` is unset.
///
/// Call once at startup, before anything is printed.
pub fn configure() {
    let enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
    set_enabled(enabled);
}

/// Force colors on or off
pub fn set_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Section titles and table headers
pub fn header(text: &str) -> ColoredString {
    text.cyan()
}

/// Successful rows and counts
pub fn success(text: &str) -> ColoredString {
    text.green()
}

/// Failed rows and error messages
pub fn error(text: &str) -> ColoredString {
    text.red()
}

/// Notices that need attention
pub fn warning(text: &str) -> ColoredString {
    text.yellow()
}

/// Informational lines
pub fn info(text: &str) -> ColoredString {
    text.blue()
}

/// Numeric measurements
pub fn metric(text: &str) -> ColoredString {
    text.magenta()
}

/// Best/worst performers
pub fn highlight(text: &str) -> ColoredString {
    text.bright_blue()
}

/// Table separators
pub fn border(text: &str) -> ColoredString {
    text.white()
}
