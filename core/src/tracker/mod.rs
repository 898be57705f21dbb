//! Tracking loop for periodic benchmark cycles
//!
//! The tracker re-runs the [`ParallelRunner`](crate::ParallelRunner) on a fixed
//! wall-clock interval: **run cycle -> notify observers -> wait -> repeat**.
//!
//! 1. The first cycle starts immediately
//! 2. Each cycle's results go to every [`CycleObserver`](crate::CycleObserver)
//!    in registration order
//! 3. The next cycle is scheduled at `now + interval` once a cycle ends
//! 4. Waiting happens in slices of at most one second
//!
//! Cancellation is a broadcast shutdown channel. It is checked before each
//! cycle, between sleep slices, and while a cycle is in flight; an in-flight
//! cycle is abandoned, not drained.
//!
//! # Example
//!
//! ```ignore
//! use llm_bench_core::TrackerBuilder;
//!
//! let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
//! let mut tracker = TrackerBuilder::new()
//!     .runner(runner)
//!     .jobs(config.jobs())
//!     .prompt(config.prompt.clone())
//!     .interval(config.interval)
//!     .observer(Box::new(csv_writer))
//!     .build()?;
//!
//! let stats = tracker.run(shutdown_rx).await;
//! println!("Cycles: {}", stats.cycles);
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::TrackerBuilder;
pub use executor::{Tracker, TrackerState, MAX_SLEEP_SLICE};
pub use stats::TrackerStats;
