//! Number and text formatting shared by tables and CSV rows

use llm_bench_core::{round_rate, round_seconds};

/// Characters of message or error text shown in a table row
pub const MESSAGE_PREVIEW_CHARS: usize = 80;

/// Tokens/sec as displayed and stored: 2 decimals
pub fn rate(value: f64) -> f64 {
    round_rate(value)
}

/// Duration in seconds as displayed and stored: 3 decimals
pub fn seconds(value: f64) -> f64 {
    round_seconds(value)
}

/// First [`MESSAGE_PREVIEW_CHARS`] characters on a single line
pub fn preview(text: &str) -> String {
    text.chars()
        .take(MESSAGE_PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(rate(41.3333), 41.33);
        assert_eq!(rate(12.005001), 12.01);
        assert_eq!(seconds(1.23456), 1.235);
        assert_eq!(seconds(0.0), 0.0);
    }

    #[test]
    fn test_preview() {
        let long = "x".repeat(200);
        assert_eq!(preview(&long).chars().count(), 80);
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("two\nlines"), "two lines");
        assert_eq!(preview(&"é".repeat(100)).chars().count(), 80);
    }
}
