//! Console reports for the three run modes

use std::io::{self, Stdout, Write};
use std::time::Duration;

use chrono::{DateTime, Local};
use llm_bench_core::{BenchmarkJob, BenchmarkResult, CycleObserver, ObserverError};

use crate::colors;
use crate::csv_export::TIMESTAMP_FORMAT;
use crate::format::{rate, seconds};
use crate::table::ResultsFormatter;

/// Millisecond timestamps of the single-run report
pub const PRECISE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// ============================================================================
// Single Run
// ============================================================================

/// Lines printed before a single benchmark call starts
pub fn single_run_header(job: &BenchmarkJob, started: DateTime<Local>) -> String {
    [
        colors::header("=== LLM Benchmark ===").to_string(),
        format!("Provider: {}", job.provider.name),
        format!("Model: {} ({})", job.model.nickname, job.model.id),
        colors::info("Starting benchmark...").to_string(),
        format!("Start time: {}", started.format(PRECISE_TIMESTAMP_FORMAT)),
    ]
    .join("\n")
}

/// Detailed report of a successful single benchmark call
pub fn single_run_report(
    result: &BenchmarkResult,
    finished: DateTime<Local>,
    print_result: bool,
) -> String {
    let mut lines = vec![
        format!("End time: {}", finished.format(PRECISE_TIMESTAMP_FORMAT)),
        String::new(),
        colors::header("=== Results ===").to_string(),
        format!(
            "Duration: {} seconds",
            colors::metric(&format!("{:.3}", seconds(result.duration_seconds)))
        ),
        format!("Input tokens: {}", result.input_tokens),
        format!("Output tokens: {}", result.output_tokens),
        format!("Total tokens: {}", result.total_tokens),
        format!(
            "Tokens per second: {}",
            colors::success(&format!("{:.2}", rate(result.tokens_per_second)))
        ),
    ];

    if print_result {
        lines.push(String::new());
        lines.push(colors::header("=== Message Content ===").to_string());
        lines.push(result.message_content.clone());
    }

    lines.join("\n")
}

// ============================================================================
// All Models
// ============================================================================

/// Lines printed before a one-shot run over every model
pub fn all_run_header(started: DateTime<Local>) -> String {
    [
        colors::header("=== LLM Benchmark ===").to_string(),
        colors::info("Running benchmarks on all configured models...").to_string(),
        format!("Starting at {}", started.format(PRECISE_TIMESTAMP_FORMAT)),
    ]
    .join("\n")
}

// ============================================================================
// Tracking
// ============================================================================

/// Banner printed when tracking starts
pub fn tracking_banner(interval: Duration, csv_path: &str) -> String {
    [
        colors::header("=== LLM Performance Tracker ===").to_string(),
        format!(
            "Tracking all models every {} seconds",
            colors::metric(&interval.as_secs_f64().to_string())
        ),
        format!("Results will be saved to: {}", colors::highlight(csv_path)),
        colors::info("Press Ctrl+C to stop tracking").to_string(),
    ]
    .join("\n")
}

/// Lines printed once tracking has stopped
pub fn tracking_stopped(csv_path: &str) -> String {
    [
        colors::warning("Tracking stopped by user").to_string(),
        format!("Results saved to: {}", colors::highlight(csv_path)),
    ]
    .join("\n")
}

/// Prints each tracking cycle's summary and individual results.
pub struct SummaryPrinter<W = Stdout> {
    out: W,
    formatter: ResultsFormatter,
}

impl SummaryPrinter<Stdout> {
    /// Printer writing to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> SummaryPrinter<W> {
    /// Printer writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            formatter: ResultsFormatter::new(false),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_cycle_start(&mut self, timestamp: DateTime<Local>) -> io::Result<()> {
        writeln!(
            self.out,
            "{} Running benchmark cycle...",
            colors::info(&format!("[{}]", timestamp.format(TIMESTAMP_FORMAT)))
        )?;
        self.out.flush()
    }

    fn print_cycle(
        &mut self,
        timestamp: DateTime<Local>,
        results: &[BenchmarkResult],
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "{} Benchmark cycle completed",
            colors::info(&format!("[{}]", timestamp.format(TIMESTAMP_FORMAT)))
        )?;
        writeln!(self.out, "{}", self.formatter.cycle_summary(results))?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write + Send> CycleObserver for SummaryPrinter<W> {
    fn on_cycle_start(&mut self, timestamp: DateTime<Local>) -> Result<(), ObserverError> {
        self.print_cycle_start(timestamp)
            .map_err(|e| ObserverError::new("summary", e))
    }

    fn on_cycle(
        &mut self,
        timestamp: DateTime<Local>,
        results: &[BenchmarkResult],
    ) -> Result<(), ObserverError> {
        self.print_cycle(timestamp, results)
            .map_err(|e| ObserverError::new("summary", e))
    }

    fn name(&self) -> &str {
        "summary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use llm_bench_core::{ApiFormat, ModelSpec, ProviderSpec};
    use std::sync::Arc;

    fn plain() {
        colors::set_enabled(false);
    }

    fn at(h: u32, m: u32, s: u32, ms: i64) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, h, m, s).unwrap() + chrono::Duration::milliseconds(ms)
    }

    fn job() -> BenchmarkJob {
        BenchmarkJob::new(
            Arc::new(ProviderSpec::new("openai", "https://api.openai.com/v1", "k")),
            Arc::new(ModelSpec::new("gpt4o", "gpt-4o", ApiFormat::OpenAI)),
        )
    }

    fn success() -> BenchmarkResult {
        BenchmarkResult::from_outcome(
            &job(),
            llm_bench_core::CallOutcome::Success {
                message_text: "Hi!".to_string(),
                input_tokens: 24,
                output_tokens: 100,
            },
            Duration::from_millis(3000),
        )
    }

    #[test]
    fn test_single_run_header() {
        plain();
        let header = single_run_header(&job(), at(9, 15, 0, 42));
        assert_eq!(
            header,
            "=== LLM Benchmark ===\n\
             Provider: openai\n\
             Model: gpt4o (gpt-4o)\n\
             Starting benchmark...\n\
             Start time: 2024-05-01 09:15:00.042"
        );
    }

    #[test]
    fn test_single_run_report() {
        plain();
        let report = single_run_report(&success(), at(9, 15, 3, 45), false);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "End time: 2024-05-01 09:15:03.045");
        assert_eq!(lines[2], "=== Results ===");
        assert_eq!(lines[3], "Duration: 3.000 seconds");
        assert_eq!(lines[4], "Input tokens: 24");
        assert_eq!(lines[5], "Output tokens: 100");
        assert_eq!(lines[6], "Total tokens: 124");
        assert_eq!(lines[7], "Tokens per second: 41.33");
        assert!(!report.contains("Message Content"));

        let report = single_run_report(&success(), at(9, 15, 3, 45), true);
        assert!(report.ends_with("=== Message Content ===\nHi!"));
    }

    #[test]
    fn test_tracking_banner() {
        plain();
        let banner = tracking_banner(Duration::from_secs(60), "out.csv");
        assert!(banner.contains("Tracking all models every 60 seconds"));
        assert!(banner.contains("Results will be saved to: out.csv"));
        assert!(tracking_stopped("out.csv").ends_with("Results saved to: out.csv"));
    }

    #[test]
    fn test_tracking_banner_sub_second_interval() {
        plain();
        let banner = tracking_banner(Duration::from_millis(1500), "out.csv");
        assert!(banner.contains("Tracking all models every 1.5 seconds"));
    }

    #[test]
    fn test_summary_printer_writes_cycle() {
        plain();
        let mut printer = SummaryPrinter::new(Vec::new());
        printer
            .on_cycle(at(12, 0, 0, 0), &[success()])
            .unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        assert!(output.starts_with("[2024-05-01 12:00:00] Benchmark cycle completed\n"));
        assert!(output.contains("  Completed: 1 successful, 0 failed"));
        assert!(output.contains("=== Individual Model Results ==="));
    }

    #[test]
    fn test_summary_printer_announces_cycle_start() {
        plain();
        let mut printer = SummaryPrinter::new(Vec::new());
        printer.on_cycle_start(at(12, 0, 0, 0)).unwrap();
        printer.on_cycle(at(12, 0, 0, 0), &[success()]).unwrap();

        let output = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[2024-05-01 12:00:00] Running benchmark cycle...");
        assert_eq!(lines[1], "[2024-05-01 12:00:00] Benchmark cycle completed");
    }
}
