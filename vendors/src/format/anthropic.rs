//! Anthropic messages dialect

use serde_json::{json, Value};

use super::{count_at, WireFormat, MAX_TOKENS};
use crate::error::value_text;

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// `POST {base}/v1/messages` with `x-api-key` authentication
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicFormat;

impl WireFormat for AnthropicFormat {
    fn endpoint(&self, base_url: &str) -> String {
        format!("{}/v1/messages", base_url)
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ]
    }

    fn request_body(&self, model_id: &str, prompt: &str) -> Value {
        json!({
            "model": model_id,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        })
    }

    fn extract_message(&self, response: &Value) -> Option<String> {
        if let Some(error) = self.soft_error(response) {
            return Some(format!("Error: {}", error));
        }

        let blocks = response.get("content")?.as_array()?;
        blocks
            .iter()
            .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .or_else(|| blocks.first())
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn reported_usage(&self, response: &Value) -> (Option<u64>, Option<u64>) {
        (
            count_at(response, "/usage/input_tokens"),
            count_at(response, "/usage/output_tokens"),
        )
    }

    /// Some Anthropic-compatible gateways answer 200 with `{code, msg, success}`.
    fn soft_error(&self, response: &Value) -> Option<String> {
        let envelope = response.as_object()?;
        if ["code", "msg", "success"]
            .iter()
            .all(|key| envelope.contains_key(*key))
        {
            envelope.get("msg").map(value_text)
        } else {
            None
        }
    }
}
