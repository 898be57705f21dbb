//! Fan-out/fan-in execution

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::job::BenchmarkJob;
use crate::result::BenchmarkResult;
use crate::traits::JobExecutor;

/// Runs every job of a list concurrently and collects all results.
///
/// Each task sends its single result through an mpsc channel sized to the
/// job count; the caller drains exactly as many results as there are jobs.
/// Dropping the future returned by [`run`](Self::run) aborts in-flight tasks.
pub struct ParallelRunner {
    /// Executor (shared across tasks)
    executor: Arc<dyn JobExecutor>,

    /// Optional in-flight cap, unbounded when `None`
    max_concurrency: Option<usize>,
}

impl ParallelRunner {
    /// Create a runner
    ///
    /// Use [`RunnerBuilder`](super::RunnerBuilder) for validated construction.
    pub fn new(executor: Arc<dyn JobExecutor>, max_concurrency: Option<usize>) -> Self {
        Self {
            executor,
            max_concurrency,
        }
    }

    /// In-flight cap, if any
    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Run all jobs with the same prompt
    ///
    /// Returns one result per job, in completion order.
    pub async fn run(&self, jobs: &[BenchmarkJob], prompt: &str) -> Vec<BenchmarkResult> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let prompt: Arc<str> = Arc::from(prompt);
        let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let (results_tx, mut results_rx) = mpsc::channel(jobs.len());
        let mut tasks = JoinSet::new();

        tracing::debug!(
            jobs = jobs.len(),
            max_concurrency = ?self.max_concurrency,
            executor = self.executor.name(),
            "Starting fan-out"
        );

        for (slot, job) in jobs.iter().enumerate() {
            let job = job.clone();
            let executor = Arc::clone(&self.executor);
            let prompt = Arc::clone(&prompt);
            let semaphore = semaphore.clone();
            let results_tx = results_tx.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring only waits.
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let result = executor.execute(&job, &prompt).await;
                tracing::debug!(
                    job = %job.label(),
                    success = result.success,
                    tokens_per_second = result.tokens_per_second,
                    "Job finished"
                );

                // Capacity equals the job count, so this never waits.
                let _ = results_tx.send((slot, result)).await;
            });
        }
        drop(results_tx);

        let mut results = Vec::with_capacity(jobs.len());
        let mut reported = vec![false; jobs.len()];
        while let Some((slot, result)) = results_rx.recv().await {
            reported[slot] = true;
            results.push(result);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Benchmark task panicked");
            }
        }

        // A task that panicked never sent; keep one result per job anyway.
        for (job, _) in jobs.iter().zip(&reported).filter(|(_, seen)| !**seen) {
            results.push(BenchmarkResult::failed(
                job,
                "benchmark task terminated before reporting a result",
            ));
        }

        let successful = results.iter().filter(|r| r.success).count();
        tracing::info!(
            elapsed_secs = start.elapsed().as_secs_f64(),
            total = results.len(),
            successful,
            failed = results.len() - successful,
            "Fan-out completed"
        );

        results
    }
}

impl std::fmt::Debug for ParallelRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelRunner")
            .field("executor", &self.executor.name())
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}
