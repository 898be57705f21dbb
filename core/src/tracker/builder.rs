//! Builder pattern for Tracker construction

use std::time::Duration;

use crate::error::{Error, Result};
use crate::job::BenchmarkJob;
use crate::runner::ParallelRunner;
use crate::traits::CycleObserver;

use super::executor::Tracker;

/// Builder for creating a [`Tracker`]
///
/// # Example
/// ```ignore
/// let tracker = TrackerBuilder::new()
///     .runner(runner)
///     .jobs(config.jobs())
///     .prompt(config.prompt.clone())
///     .interval(Duration::from_secs(60))
///     .observer(Box::new(csv_writer))
///     .observer(Box::new(printer))
///     .build()?;
/// ```
#[derive(Default)]
pub struct TrackerBuilder {
    runner: Option<ParallelRunner>,
    jobs: Vec<BenchmarkJob>,
    prompt: Option<String>,
    interval: Option<Duration>,
    observers: Vec<Box<dyn CycleObserver>>,
}

impl TrackerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runner used for every cycle
    pub fn runner(mut self, runner: ParallelRunner) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Set the jobs run in every cycle
    pub fn jobs(mut self, jobs: Vec<BenchmarkJob>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set the shared prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the period between cycles
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Register an observer; observers are notified in registration order
    pub fn observer(mut self, observer: Box<dyn CycleObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the Tracker
    ///
    /// # Errors
    /// Returns an error if the runner, prompt or interval is missing, or the
    /// interval is zero.
    pub fn build(self) -> Result<Tracker> {
        let runner = self.runner.ok_or(Error::MissingComponent("runner"))?;
        let prompt = self.prompt.ok_or(Error::MissingComponent("prompt"))?;
        let interval = self.interval.ok_or(Error::MissingComponent("interval"))?;

        if interval.is_zero() {
            return Err(Error::config("interval must be greater than zero"));
        }

        Ok(Tracker::new(
            runner,
            self.jobs,
            prompt,
            interval,
            self.observers,
        ))
    }
}
