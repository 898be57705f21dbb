//! Parallel runner for one fan-out over all benchmark jobs
//!
//! The runner starts one task per job, all at once, and returns only after
//! every task has reported:
//! - one [`BenchmarkResult`](crate::BenchmarkResult) per job, never more, never fewer
//! - results in completion order (callers sort when they need a stable order)
//! - a failing or panicking job never affects the others
//!
//! # Example
//!
//! ```ignore
//! use llm_bench_core::RunnerBuilder;
//!
//! let runner = RunnerBuilder::new()
//!     .executor(executor)
//!     .build()?;
//!
//! let results = runner.run(&config.jobs(), &config.prompt).await;
//! ```

mod builder;
mod executor;

pub use builder::RunnerBuilder;
pub use executor::ParallelRunner;
