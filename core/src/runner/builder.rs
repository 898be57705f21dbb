//! Builder pattern for ParallelRunner construction

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::traits::JobExecutor;

use super::executor::ParallelRunner;

/// Builder for creating a [`ParallelRunner`]
///
/// # Example
///
/// ```ignore
/// let runner = RunnerBuilder::new()
///     .executor(Arc::new(HttpExecutor::new(config.request_timeout)?))
///     .max_concurrency(config.max_concurrency)
///     .build()?;
/// ```
#[derive(Default)]
pub struct RunnerBuilder {
    executor: Option<Arc<dyn JobExecutor>>,
    max_concurrency: Option<usize>,
}

impl RunnerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executor shared by every job
    pub fn executor(mut self, executor: Arc<dyn JobExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Cap the number of in-flight calls; `None` keeps the fan-out unbounded
    pub fn max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Build the runner
    ///
    /// # Errors
    ///
    /// Returns an error if no executor is set or the concurrency cap is zero.
    pub fn build(self) -> Result<ParallelRunner> {
        let executor = self
            .executor
            .ok_or(Error::MissingComponent("executor"))?;

        if self.max_concurrency == Some(0) {
            return Err(Error::config("max_concurrency must be at least 1"));
        }

        Ok(ParallelRunner::new(executor, self.max_concurrency))
    }
}
