//! Wire formats for chat completion endpoints
//!
//! Each [`ApiFormat`] maps to one [`WireFormat`] implementation that knows the
//! endpoint path, authentication headers, request body and response fields of
//! that dialect. The free functions in this module dispatch on the model's
//! format so callers never match on it themselves.
//!
//! # Example
//!
//! ```ignore
//! use llm_bench_vendors::format;
//!
//! let url = format::endpoint(&job.provider, &job.model);
//! let body = format::request_body(&job.model, "Say hello");
//! ```

mod anthropic;
mod openai;

use std::collections::BTreeMap;

use llm_bench_core::{ApiFormat, CallOutcome, ModelSpec, ProviderSpec};
use serde_json::Value;

pub use anthropic::{AnthropicFormat, ANTHROPIC_VERSION};
pub use openai::OpenAIFormat;

/// `max_tokens` sent to every endpoint
pub const MAX_TOKENS: u32 = 1000;

/// Sampling temperature sent to OpenAI-style endpoints
pub const TEMPERATURE: f64 = 0.7;

/// One chat completion dialect.
pub trait WireFormat: Send + Sync {
    /// Full request URL for a provider base URL
    fn endpoint(&self, base_url: &str) -> String;

    /// Authentication headers for `api_key`
    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)>;

    /// Request body asking `model_id` to complete a single user message
    fn request_body(&self, model_id: &str, prompt: &str) -> Value;

    /// Assistant text, `None` when the response carries none
    fn extract_message(&self, response: &Value) -> Option<String>;

    /// Reported `(input, output)` token counts, `None` where a field is absent
    fn reported_usage(&self, response: &Value) -> (Option<u64>, Option<u64>);

    /// Error text of a well-formed response that is semantically an error
    fn soft_error(&self, _response: &Value) -> Option<String> {
        None
    }
}

/// Implementation for `api_format`
pub fn wire_format(api_format: ApiFormat) -> &'static dyn WireFormat {
    match api_format {
        ApiFormat::OpenAI => &OpenAIFormat,
        ApiFormat::Anthropic => &AnthropicFormat,
    }
}

/// Request URL for `model` under `provider`
pub fn endpoint(provider: &ProviderSpec, model: &ModelSpec) -> String {
    wire_format(model.api_format).endpoint(&provider.base_url)
}

/// All request headers, `Content-Type` included
pub fn headers(provider: &ProviderSpec, model: &ModelSpec) -> BTreeMap<&'static str, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type", "application/json".to_string());
    headers.extend(wire_format(model.api_format).auth_headers(&provider.api_key));
    headers
}

/// Request body for `model`
pub fn request_body(model: &ModelSpec, prompt: &str) -> Value {
    wire_format(model.api_format).request_body(&model.id, prompt)
}

/// Assistant text of a successful response
pub fn extract_message(api_format: ApiFormat, response: &Value) -> Option<String> {
    wire_format(api_format).extract_message(response)
}

/// `(input, output)` token counts, estimated from text where not reported
pub fn extract_token_counts(
    api_format: ApiFormat,
    response: &Value,
    prompt: &str,
    message_text: &str,
) -> (u64, u64) {
    let (input, output) = wire_format(api_format).reported_usage(response);
    (
        input.unwrap_or_else(|| estimate_tokens(prompt)),
        output.unwrap_or_else(|| estimate_tokens(message_text)),
    )
}

/// Turn a successful response body into a call outcome
pub fn parse_completion(api_format: ApiFormat, response: &Value, prompt: &str) -> CallOutcome {
    let message_text = extract_message(api_format, response).unwrap_or_default();
    let (input_tokens, output_tokens) =
        extract_token_counts(api_format, response, prompt, &message_text);

    CallOutcome::Success {
        message_text,
        input_tokens,
        output_tokens,
    }
}

/// Rough token count: one token per four characters, rounded half away from zero
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as f64 / 4.0).round() as u64
}

/// Read a non-negative integer at a JSON pointer
fn count_at(response: &Value, pointer: &str) -> Option<u64> {
    response.pointer(pointer).and_then(Value::as_u64)
}
