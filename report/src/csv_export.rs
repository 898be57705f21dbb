//! CSV tracking output
//!
//! One row per successful result per cycle, appended as each cycle finishes:
//!
//! ```text
//! timestamp,provider_model,tokens_per_second,total_tokens,duration_seconds
//! 2024-05-01 12:00:00,openai: gpt4o,41.33,124,3.0
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{Reader, Writer, WriterBuilder};
use llm_bench_core::{BenchmarkResult, CycleObserver, ObserverError};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::format::{rate, seconds};

/// Header row written once when the file is created
pub const CSV_HEADER: [&str; 5] = [
    "timestamp",
    "provider_model",
    "tokens_per_second",
    "total_tokens",
    "duration_seconds",
];

/// Format of the `timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One tracked measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    /// Cycle start time, [`TIMESTAMP_FORMAT`]
    pub timestamp: String,

    /// `"{provider}: {model}"`
    pub provider_model: String,

    /// Rounded to 2 decimals
    pub tokens_per_second: f64,

    /// Input plus output tokens
    pub total_tokens: u64,

    /// Rounded to 3 decimals
    pub duration_seconds: f64,
}

impl CsvRow {
    /// Row for `result` measured in the cycle started at `timestamp`.
    ///
    /// Results already carry stored precision; rounding again leaves them
    /// unchanged.
    pub fn from_result(timestamp: DateTime<Local>, result: &BenchmarkResult) -> Self {
        Self {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            provider_model: format!("{}: {}", result.provider_name, result.model_nickname),
            tokens_per_second: rate(result.tokens_per_second),
            total_tokens: result.total_tokens,
            duration_seconds: seconds(result.duration_seconds),
        }
    }

    /// Split `provider_model` back into provider name and model nickname
    pub fn provider_and_model(&self) -> Option<(&str, &str)> {
        self.provider_model.split_once(": ")
    }
}

/// Default results file name for a tracking session started at `now`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("llm_benchmark_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Appends successful results of every cycle to a CSV file.
pub struct CsvTracker {
    path: PathBuf,
    writer: Writer<File>,
    rows_written: usize,
}

impl CsvTracker {
    /// Create (or truncate) `path` and write the header row
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| ReportError::io(&path, e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer.flush().map_err(|e| ReportError::io(&path, e))?;

        tracing::debug!(path = %path.display(), "Created results file");

        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    /// File being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Append one row per successful result and flush; returns the rows added
    pub fn append(
        &mut self,
        timestamp: DateTime<Local>,
        results: &[BenchmarkResult],
    ) -> Result<usize, ReportError> {
        let mut added = 0;
        for result in results.iter().filter(|r| r.success) {
            self.writer.serialize(CsvRow::from_result(timestamp, result))?;
            added += 1;
        }
        self.writer
            .flush()
            .map_err(|e| ReportError::io(&self.path, e))?;

        self.rows_written += added;
        tracing::debug!(path = %self.path.display(), rows = added, "Appended results");
        Ok(added)
    }
}

impl CycleObserver for CsvTracker {
    fn on_cycle(
        &mut self,
        timestamp: DateTime<Local>,
        results: &[BenchmarkResult],
    ) -> Result<(), ObserverError> {
        self.append(timestamp, results)
            .map(|_| ())
            .map_err(|e| ObserverError::new(self.name(), e))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

impl std::fmt::Debug for CsvTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvTracker")
            .field("path", &self.path)
            .field("rows_written", &self.rows_written)
            .finish()
    }
}

/// Read every data row of a results file
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<CsvRow>, ReportError> {
    let mut reader = Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}
