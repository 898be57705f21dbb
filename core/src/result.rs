//! Benchmark call outcomes and results

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::job::BenchmarkJob;

/// What one HTTP call produced, before timing is folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The endpoint answered with a parseable body
    Success {
        /// Extracted assistant text (empty when the response had none)
        message_text: String,
        /// Prompt tokens, reported or estimated
        input_tokens: u64,
        /// Completion tokens, reported or estimated
        output_tokens: u64,
    },
    /// Transport failure, non-success status, or unreadable body
    Failure {
        /// Human-readable reason
        error_message: String,
    },
}

/// Externally visible record of one job in one run or cycle.
///
/// Created exactly once per job and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Provider name
    pub provider_name: String,

    /// Model nickname
    pub model_nickname: String,

    /// Whether the call completed
    pub success: bool,

    /// Prompt tokens (0 on failure)
    pub input_tokens: u64,

    /// Completion tokens (0 on failure)
    pub output_tokens: u64,

    /// `input_tokens + output_tokens`
    pub total_tokens: u64,

    /// `total_tokens` over the measured call time, 2 decimals; 0 on failure
    /// or zero duration
    pub tokens_per_second: f64,

    /// Wall-clock time of the HTTP call, 3 decimals
    pub duration_seconds: f64,

    /// Assistant text (empty on failure)
    pub message_content: String,

    /// Present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl BenchmarkResult {
    /// Combine a call outcome with the measured call duration.
    pub fn from_outcome(job: &BenchmarkJob, outcome: CallOutcome, elapsed: Duration) -> Self {
        match outcome {
            CallOutcome::Success {
                message_text,
                input_tokens,
                output_tokens,
            } => {
                let duration_seconds = elapsed.as_secs_f64();
                let total_tokens = input_tokens + output_tokens;
                let rate = tokens_per_second(total_tokens, duration_seconds);
                Self {
                    provider_name: job.provider.name.clone(),
                    model_nickname: job.model.nickname.clone(),
                    success: true,
                    input_tokens,
                    output_tokens,
                    total_tokens,
                    tokens_per_second: round_rate(rate),
                    duration_seconds: round_seconds(duration_seconds),
                    message_content: message_text,
                    error_message: None,
                }
            }
            CallOutcome::Failure { error_message } => Self::failed(job, error_message),
        }
    }

    /// A failed result; all counters are zero.
    pub fn failed(job: &BenchmarkJob, error_message: impl Into<String>) -> Self {
        Self {
            provider_name: job.provider.name.clone(),
            model_nickname: job.model.nickname.clone(),
            success: false,
            input_tokens: 0,
            output_tokens: 0,
            total_tokens: 0,
            tokens_per_second: 0.0,
            duration_seconds: 0.0,
            message_content: String::new(),
            error_message: Some(error_message.into()),
        }
    }

    /// `provider/model` label
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider_name, self.model_nickname)
    }

    /// Error text, empty for successful results
    pub fn error(&self) -> &str {
        self.error_message.as_deref().unwrap_or_default()
    }
}

/// Throughput with a zero (never NaN or infinite) result for zero duration.
pub fn tokens_per_second(total_tokens: u64, duration_seconds: f64) -> f64 {
    if duration_seconds > 0.0 && duration_seconds.is_finite() {
        total_tokens as f64 / duration_seconds
    } else {
        0.0
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Tokens/sec precision kept in results: 2 decimals
pub fn round_rate(value: f64) -> f64 {
    round_to(value, 2)
}

/// Duration precision kept in results: 3 decimals
pub fn round_seconds(value: f64) -> f64 {
    round_to(value, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{ApiFormat, ModelSpec, ProviderSpec};
    use std::sync::Arc;

    fn job() -> BenchmarkJob {
        BenchmarkJob::new(
            Arc::new(ProviderSpec::new("openai", "https://api.openai.com/v1", "k")),
            Arc::new(ModelSpec::new("gpt4o", "gpt-4o", ApiFormat::OpenAI)),
        )
    }

    #[test]
    fn test_tokens_per_second_zero_duration() {
        assert_eq!(tokens_per_second(100, 0.0), 0.0);
        assert_eq!(tokens_per_second(0, 0.0), 0.0);
        assert_eq!(tokens_per_second(100, 2.0), 50.0);
    }

    #[test]
    fn test_from_outcome_success() {
        let outcome = CallOutcome::Success {
            message_text: "hello".to_string(),
            input_tokens: 10,
            output_tokens: 30,
        };
        let result = BenchmarkResult::from_outcome(&job(), outcome, Duration::from_secs(2));

        assert!(result.success);
        assert_eq!(result.total_tokens, 40);
        assert_eq!(result.tokens_per_second, 20.0);
        assert_eq!(result.duration_seconds, 2.0);
        assert_eq!(result.message_content, "hello");
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_from_outcome_rounds_measurements() {
        let outcome = CallOutcome::Success {
            message_text: "hello".to_string(),
            input_tokens: 24,
            output_tokens: 100,
        };
        let elapsed = Duration::from_secs_f64(3.00049);
        let result = BenchmarkResult::from_outcome(&job(), outcome, elapsed);

        // Rate comes from the unrounded duration
        assert_eq!(result.tokens_per_second, 41.33);
        assert_eq!(result.duration_seconds, 3.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_rate(41.3333), 41.33);
        assert_eq!(round_rate(12.005001), 12.01);
        assert_eq!(round_seconds(1.23456), 1.235);
        assert_eq!(round_seconds(0.0), 0.0);
        assert_eq!(round_rate(round_rate(41.32658)), 41.33);
    }

    #[test]
    fn test_from_outcome_zero_duration_is_zero_rate() {
        let outcome = CallOutcome::Success {
            message_text: String::new(),
            input_tokens: 5,
            output_tokens: 5,
        };
        let result = BenchmarkResult::from_outcome(&job(), outcome, Duration::ZERO);

        assert_eq!(result.tokens_per_second, 0.0);
        assert!(result.tokens_per_second.is_finite());
    }

    #[test]
    fn test_from_outcome_failure() {
        let outcome = CallOutcome::Failure {
            error_message: "API request failed: 500 - boom".to_string(),
        };
        let result = BenchmarkResult::from_outcome(&job(), outcome, Duration::from_secs(1));

        assert!(!result.success);
        assert_eq!(result.total_tokens, 0);
        assert_eq!(result.tokens_per_second, 0.0);
        assert_eq!(result.duration_seconds, 0.0);
        assert_eq!(result.error(), "API request failed: 500 - boom");
        assert_eq!(result.label(), "openai/gpt4o");
    }

    #[test]
    fn test_error_message_skipped_on_success() {
        let outcome = CallOutcome::Success {
            message_text: "ok".to_string(),
            input_tokens: 1,
            output_tokens: 1,
        };
        let result = BenchmarkResult::from_outcome(&job(), outcome, Duration::from_secs(1));
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("error_message"));
    }
}
