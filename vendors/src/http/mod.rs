//! reqwest-backed single-call executor
//!
//! [`HttpExecutor`] issues exactly one POST per job and folds every failure
//! (connection, timeout, non-success status, unreadable body) into a failed
//! [`BenchmarkResult`]. Only the request itself is timed: building the body
//! and parsing the response happen outside the measured window.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use llm_bench_core::RunnerBuilder;
//! use llm_bench_vendors::HttpExecutor;
//!
//! let executor = HttpExecutor::new(config.request_timeout)?;
//! let runner = RunnerBuilder::new()
//!     .executor(Arc::new(executor))
//!     .build()?;
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use llm_bench_core::{BenchmarkJob, BenchmarkResult, CallOutcome, JobExecutor};
use reqwest::Client;
use serde_json::Value;

use crate::error::CallError;
use crate::format;

/// Executes benchmark jobs over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpExecutor {
    /// Create an executor with its own connection pool.
    ///
    /// `request_timeout` bounds each call end to end; `None` waits indefinitely.
    pub fn new(request_timeout: Option<Duration>) -> Result<Self, CallError> {
        let mut builder =
            Client::builder().user_agent(concat!("llm-bench/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            request_timeout,
        })
    }

    /// Create an executor around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            request_timeout: None,
        }
    }

    /// Per-call timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Run one call and return its outcome with the measured duration
    pub async fn call(&self, job: &BenchmarkJob, prompt: &str) -> (CallOutcome, Duration) {
        let api_format = job.model.api_format;

        match self.send(job, prompt).await {
            Ok((response, elapsed)) => {
                if let Some(error) = format::wire_format(api_format).soft_error(&response) {
                    tracing::warn!(
                        provider = %job.provider.name,
                        model = %job.model.nickname,
                        error = %error,
                        "Endpoint returned an error envelope with a success status"
                    );
                }
                (
                    format::parse_completion(api_format, &response, prompt),
                    elapsed,
                )
            }
            Err(e) => (
                CallOutcome::Failure {
                    error_message: e.to_string(),
                },
                Duration::ZERO,
            ),
        }
    }

    async fn send(&self, job: &BenchmarkJob, prompt: &str) -> Result<(Value, Duration), CallError> {
        let url = format::endpoint(&job.provider, &job.model);
        let body = format::request_body(&job.model, prompt);

        let mut request = self.client.post(&url);
        for (name, value) in format::headers(&job.provider, &job.model) {
            request = request.header(name, value);
        }
        let request = request.json(&body);

        tracing::debug!(
            provider = %job.provider.name,
            model = %job.model.nickname,
            url = %url,
            "Sending benchmark request"
        );

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let elapsed = start.elapsed();

        if !status.is_success() {
            return Err(CallError::from_status(status, &bytes));
        }

        Ok((serde_json::from_slice(&bytes)?, elapsed))
    }
}

#[async_trait]
impl JobExecutor for HttpExecutor {
    async fn execute(&self, job: &BenchmarkJob, prompt: &str) -> BenchmarkResult {
        let (outcome, elapsed) = self.call(job, prompt).await;
        let result = BenchmarkResult::from_outcome(job, outcome, elapsed);

        if result.success {
            tracing::debug!(
                provider = %result.provider_name,
                model = %result.model_nickname,
                total_tokens = result.total_tokens,
                duration_secs = result.duration_seconds,
                tokens_per_sec = result.tokens_per_second,
                "Benchmark call completed"
            );
        } else {
            tracing::warn!(
                provider = %result.provider_name,
                model = %result.model_nickname,
                error = result.error(),
                "Benchmark call failed"
            );
        }

        result
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests;
