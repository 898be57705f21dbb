//! Report generation for benchmark results
//!
//! This crate turns results lists into:
//!
//! - Console tables and summaries (colorized with `colored`)
//! - Single-run, all-models and tracking console reports
//! - Append-only CSV tracking files
//!
//! [`CsvTracker`] and [`SummaryPrinter`] plug into the tracking loop as
//! [`llm_bench_core::CycleObserver`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod colors;
pub mod console;
pub mod csv_export;
pub mod error;
pub mod format;
pub mod table;

pub use console::{
    all_run_header, single_run_header, single_run_report, tracking_banner, tracking_stopped,
    SummaryPrinter,
};
pub use csv_export::{default_file_name, read_rows, CsvRow, CsvTracker, CSV_HEADER};
pub use error::ReportError;
pub use table::ResultsFormatter;
