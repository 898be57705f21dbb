//! Results tables and summaries
//!
//! Every renderer returns the text instead of printing it, so the binary
//! decides where output goes and tests can compare strings directly.

use llm_bench_core::{sorted_by_throughput, BenchmarkResult, Summary};

use crate::colors;
use crate::format::{preview, rate, seconds, MESSAGE_PREVIEW_CHARS};

const TOKENS_WIDTH: usize = 12;
const TPS_WIDTH: usize = 15;
const DURATION_WIDTH: usize = 12;

/// Renders results lists as tables and summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsFormatter {
    /// Append a message (or error) preview column to the results table
    print_result: bool,
}

impl ResultsFormatter {
    /// Create a formatter
    pub fn new(print_result: bool) -> Self {
        Self { print_result }
    }

    /// Results table sorted by tokens/sec, fastest first
    pub fn results_table(&self, results: &[BenchmarkResult]) -> String {
        let sorted = sorted_by_throughput(results);
        let widths = ColumnWidths::of(&sorted);

        let mut header = format!(
            "| {:<pw$} | {:<mw$} | {:>TOKENS_WIDTH$} | {:>TPS_WIDTH$} |",
            "Provider",
            "Model",
            "Total Tokens",
            "Tokens/sec",
            pw = widths.provider,
            mw = widths.model,
        );
        let mut separator = format!(
            "| {} | {} | {} | {} |",
            "-".repeat(widths.provider),
            "-".repeat(widths.model),
            "-".repeat(TOKENS_WIDTH),
            "-".repeat(TPS_WIDTH),
        );
        if self.print_result {
            header.push_str(" Message Content");
            separator.push(' ');
            separator.push_str(&"-".repeat(MESSAGE_PREVIEW_CHARS));
        }

        let mut lines = vec![
            colors::header(&header).to_string(),
            colors::border(&separator).to_string(),
        ];

        for result in &sorted {
            let (tokens, tps) = if result.success {
                (
                    format!("{:>TOKENS_WIDTH$}", result.total_tokens),
                    colors::success(&format!("{:>TPS_WIDTH$.2}", rate(result.tokens_per_second)))
                        .to_string(),
                )
            } else {
                (
                    colors::error(&format!("{:>TOKENS_WIDTH$}", "ERROR")).to_string(),
                    colors::error(&format!("{:>TPS_WIDTH$}", "FAILED")).to_string(),
                )
            };

            let mut line = format!(
                "| {:<pw$} | {:<mw$} | {} | {} |",
                result.provider_name,
                result.model_nickname,
                tokens,
                tps,
                pw = widths.provider,
                mw = widths.model,
            );
            if self.print_result {
                let text = if result.success {
                    preview(&result.message_content)
                } else {
                    colors::error(&preview(result.error())).to_string()
                };
                line.push(' ');
                line.push_str(&text);
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    /// Totals, throughput extremes and the failed list
    pub fn summary(&self, results: &[BenchmarkResult]) -> String {
        let summary = Summary::from_results(results);

        let mut lines = vec![
            colors::header("=== Summary ===").to_string(),
            format!("Total benchmarks: {}", summary.total),
            format!(
                "Successful: {}",
                colors::success(&summary.successful_count().to_string())
            ),
            format!("Failed: {}", failed_count(summary.failed_count())),
        ];

        if let Some(average) = summary.average_tokens_per_second {
            lines.push(format!(
                "Average tokens/sec: {}",
                colors::metric(&format!("{:.2}", rate(average)))
            ));
        }
        if let Some(fastest) = summary.fastest {
            lines.push(format!("Fastest: {}", colors::highlight(&throughput_label(fastest))));
        }
        if let Some(slowest) = summary.slowest {
            lines.push(format!("Slowest: {}", colors::highlight(&throughput_label(slowest))));
        }

        if !summary.failed.is_empty() {
            lines.push(String::new());
            lines.push(colors::warning("Failed benchmarks:").to_string());
            for result in &summary.failed {
                lines.push(format!(
                    "  {}: {}",
                    result.label(),
                    colors::error(result.error())
                ));
            }
        }

        lines.join("\n")
    }

    /// Compact per-cycle summary followed by the individual results table
    pub fn cycle_summary(&self, results: &[BenchmarkResult]) -> String {
        let summary = Summary::from_results(results);

        let mut lines = vec![format!(
            "  Completed: {} successful, {} failed",
            colors::success(&summary.successful_count().to_string()),
            failed_count(summary.failed_count())
        )];

        if let Some(average) = summary.average_tokens_per_second {
            lines.push(format!(
                "  Average tokens/sec: {}",
                colors::metric(&format!("{:.2}", rate(average)))
            ));
        }
        if !summary.failed.is_empty() {
            let failed: Vec<String> = summary.failed.iter().map(|r| r.label()).collect();
            lines.push(format!("  Failed: {}", colors::error(&failed.join(", "))));
        }

        if !results.is_empty() {
            lines.push(String::new());
            lines.push(individual_results(results));
        }

        lines.join("\n")
    }
}

fn failed_count(count: usize) -> String {
    if count > 0 {
        colors::error(&count.to_string()).to_string()
    } else {
        count.to_string()
    }
}

fn throughput_label(result: &BenchmarkResult) -> String {
    format!(
        "{} ({:.2} tokens/sec)",
        result.label(),
        rate(result.tokens_per_second)
    )
}

fn individual_results(results: &[BenchmarkResult]) -> String {
    let sorted = sorted_by_throughput(results);
    let widths = ColumnWidths::of(&sorted);

    let header = format!(
        "  | {:<pw$} | {:<mw$} | {:>TPS_WIDTH$} | {:>TOKENS_WIDTH$} | {:>DURATION_WIDTH$} |",
        "Provider",
        "Model",
        "Tokens/sec",
        "Total Tokens",
        "Duration",
        pw = widths.provider,
        mw = widths.model,
    );
    let separator = format!(
        "  | {} | {} | {} | {} | {} |",
        "-".repeat(widths.provider),
        "-".repeat(widths.model),
        "-".repeat(TPS_WIDTH),
        "-".repeat(TOKENS_WIDTH),
        "-".repeat(DURATION_WIDTH),
    );

    let mut lines = vec![
        colors::header("  === Individual Model Results ===").to_string(),
        colors::header(&header).to_string(),
        colors::border(&separator).to_string(),
    ];

    for result in &sorted {
        let (tps, tokens, duration) = if result.success {
            (
                colors::success(&format!("{:>TPS_WIDTH$.2}", rate(result.tokens_per_second)))
                    .to_string(),
                format!("{:>TOKENS_WIDTH$}", result.total_tokens),
                format!(
                    "{:>DURATION_WIDTH$}",
                    format!("{:.3}s", seconds(result.duration_seconds))
                ),
            )
        } else {
            (
                colors::error(&format!("{:>TPS_WIDTH$}", "FAILED")).to_string(),
                colors::error(&format!("{:>TOKENS_WIDTH$}", "ERROR")).to_string(),
                format!("{:>DURATION_WIDTH$}", "N/A"),
            )
        };

        lines.push(format!(
            "  | {:<pw$} | {:<mw$} | {} | {} | {} |",
            result.provider_name,
            result.model_nickname,
            tps,
            tokens,
            duration,
            pw = widths.provider,
            mw = widths.model,
        ));
    }

    lines.join("\n")
}

struct ColumnWidths {
    provider: usize,
    model: usize,
}

impl ColumnWidths {
    fn of(results: &[BenchmarkResult]) -> Self {
        Self {
            provider: widest("Provider", results.iter().map(|r| r.provider_name.as_str())),
            model: widest("Model", results.iter().map(|r| r.model_nickname.as_str())),
        }
    }
}

fn widest<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or_default()
        .max(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colors::set_enabled(false);
    }

    fn ok(provider: &str, model: &str, tps: f64, tokens: u64, secs: f64) -> BenchmarkResult {
        BenchmarkResult {
            provider_name: provider.to_string(),
            model_nickname: model.to_string(),
            success: true,
            input_tokens: 10,
            output_tokens: tokens - 10,
            total_tokens: tokens,
            tokens_per_second: tps,
            duration_seconds: secs,
            message_content: "Hello there".to_string(),
            error_message: None,
        }
    }

    fn failed(provider: &str, model: &str, error: &str) -> BenchmarkResult {
        BenchmarkResult {
            provider_name: provider.to_string(),
            model_nickname: model.to_string(),
            success: false,
            input_tokens: 0,
            output_tokens: 0,
            total_tokens: 0,
            tokens_per_second: 0.0,
            duration_seconds: 0.0,
            message_content: String::new(),
            error_message: Some(error.to_string()),
        }
    }

    fn sample() -> Vec<BenchmarkResult> {
        vec![
            ok("openai", "gpt4o", 41.3333, 124, 3.0),
            failed("anthropic", "sonnet", "API request failed: 500 - rate limited"),
            ok("groq", "llama-3-70b-versatile", 250.0, 500, 2.0),
        ]
    }

    // ========================================================================
    // Results Table
    // ========================================================================

    #[test]
    fn test_results_table_layout() {
        plain();
        let table = ResultsFormatter::new(false).results_table(&sample());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "| Provider  | Model                 | Total Tokens |      Tokens/sec |"
        );
        assert_eq!(
            lines[1],
            "| --------- | --------------------- | ------------ | --------------- |"
        );
        assert_eq!(
            lines[2],
            "| groq      | llama-3-70b-versatile |          500 |          250.00 |"
        );
        assert_eq!(
            lines[3],
            "| openai    | gpt4o                 |          124 |           41.33 |"
        );
        assert_eq!(
            lines[4],
            "| anthropic | sonnet                |        ERROR |          FAILED |"
        );
    }

    #[test]
    fn test_results_table_with_messages() {
        plain();
        let mut results = sample();
        results[0].message_content = "y".repeat(120);
        let table = ResultsFormatter::new(true).results_table(&results);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].ends_with("| Message Content"));
        assert!(lines[1].ends_with(&"-".repeat(80)));
        assert!(lines[3].ends_with(&format!("| {}", "y".repeat(80))));
        assert!(lines[4].ends_with("| API request failed: 500 - rate limited"));
    }

    #[test]
    fn test_results_table_empty() {
        plain();
        let table = ResultsFormatter::new(false).results_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }

    // ========================================================================
    // Summaries
    // ========================================================================

    #[test]
    fn test_summary() {
        plain();
        let summary = ResultsFormatter::default().summary(&sample());

        let expected = "\
=== Summary ===
Total benchmarks: 3
Successful: 2
Failed: 1
Average tokens/sec: 145.67
Fastest: groq/llama-3-70b-versatile (250.00 tokens/sec)
Slowest: openai/gpt4o (41.33 tokens/sec)

Failed benchmarks:
  anthropic/sonnet: API request failed: 500 - rate limited";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_without_successes() {
        plain();
        let results = vec![failed("a", "x", "boom")];
        let summary = ResultsFormatter::default().summary(&results);

        assert!(summary.contains("Successful: 0"));
        assert!(!summary.contains("Average tokens/sec"));
        assert!(!summary.contains("Fastest"));
        assert!(summary.contains("  a/x: boom"));
    }

    #[test]
    fn test_cycle_summary() {
        plain();
        let summary = ResultsFormatter::default().cycle_summary(&sample());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "  Completed: 2 successful, 1 failed");
        assert_eq!(lines[1], "  Average tokens/sec: 145.67");
        assert_eq!(lines[2], "  Failed: anthropic/sonnet");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "  === Individual Model Results ===");
        assert_eq!(
            lines[5],
            "  | Provider  | Model                 |      Tokens/sec | Total Tokens |     Duration |"
        );
        assert_eq!(
            lines[7],
            "  | groq      | llama-3-70b-versatile |          250.00 |          500 |       2.000s |"
        );
        assert_eq!(
            lines[9],
            "  | anthropic | sonnet                |          FAILED |        ERROR |          N/A |"
        );
    }

    #[test]
    fn test_cycle_summary_empty() {
        plain();
        let summary = ResultsFormatter::default().cycle_summary(&[]);
        assert_eq!(summary, "  Completed: 0 successful, 0 failed");
    }
}
