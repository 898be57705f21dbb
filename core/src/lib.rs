//! llm-bench-core: benchmark model and execution engine
//!
//! This crate provides the pieces shared by every llm-bench component:
//!
//! - Provider/model registry and benchmark jobs
//! - Call outcomes and benchmark results
//! - The `JobExecutor` and `CycleObserver` seams
//! - The parallel runner (one fan-out over all jobs)
//! - The tracking loop (periodic fan-outs with cancellation)
//! - Summary statistics over a results list

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod job;
pub mod result;
pub mod runner;
pub mod summary;
pub mod tracker;
pub mod traits;

pub use config::{BenchConfig, ProviderConfig, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use job::{ApiFormat, BenchmarkJob, ModelSpec, ProviderSpec};
pub use result::{
    round_rate, round_seconds, round_to, tokens_per_second, BenchmarkResult, CallOutcome,
};
pub use runner::{ParallelRunner, RunnerBuilder};
pub use summary::{sort_by_throughput, sorted_by_throughput, Summary};
pub use tracker::{Tracker, TrackerBuilder, TrackerState, TrackerStats, MAX_SLEEP_SLICE};
pub use traits::{CycleObserver, JobExecutor, ObserverError};
