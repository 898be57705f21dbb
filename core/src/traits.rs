//! Core traits for executors and cycle observers
//!
//! These traits are defined in core so the runner and tracker never depend on
//! HTTP or output formats. Implementations live in `vendors/` and `report/`.

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::job::BenchmarkJob;
use crate::result::BenchmarkResult;

// ============================================================================
// Job Executor
// ============================================================================

/// Performs one benchmark call for one job.
///
/// Implementations must not fail: every transport or protocol problem is
/// returned as a `success = false` [`BenchmarkResult`].
#[async_trait]
pub trait JobExecutor: Send + Sync {
    /// Execute `job` with `prompt` and return its single result
    async fn execute(&self, job: &BenchmarkJob, prompt: &str) -> BenchmarkResult;

    /// Executor identifier for logs
    fn name(&self) -> &str;
}

// ============================================================================
// Cycle Observer
// ============================================================================

/// Consumer of each tracking cycle's results (CSV writer, summary printer).
pub trait CycleObserver: Send {
    /// Called when a cycle starts, before any call is made
    fn on_cycle_start(&mut self, _timestamp: DateTime<Local>) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called once per completed cycle, in registration order
    fn on_cycle(
        &mut self,
        timestamp: DateTime<Local>,
        results: &[BenchmarkResult],
    ) -> Result<(), ObserverError>;

    /// Observer identifier for logs
    fn name(&self) -> &str;
}

/// Error reported by a [`CycleObserver`]; logged, never fatal to the loop.
#[derive(Debug, thiserror::Error)]
#[error("{observer}: {message}")]
pub struct ObserverError {
    /// Observer that failed
    pub observer: String,
    /// Reason
    pub message: String,
}

impl ObserverError {
    /// Create an observer error
    pub fn new(observer: impl Into<String>, message: impl ToString) -> Self {
        Self {
            observer: observer.into(),
            message: message.to_string(),
        }
    }
}
