//! OpenAI chat completions dialect (also vLLM, SGLang, Together and others)

use serde_json::{json, Value};

use super::{count_at, WireFormat, MAX_TOKENS, TEMPERATURE};

/// `POST {base}/chat/completions` with bearer authentication
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIFormat;

impl WireFormat for OpenAIFormat {
    fn endpoint(&self, base_url: &str) -> String {
        format!("{}/chat/completions", base_url)
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![("Authorization", format!("Bearer {}", api_key))]
    }

    fn request_body(&self, model_id: &str, prompt: &str) -> Value {
        json!({
            "model": model_id,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    fn extract_message(&self, response: &Value) -> Option<String> {
        Some(
            response
                .pointer("/choices/0/message/content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )
    }

    fn reported_usage(&self, response: &Value) -> (Option<u64>, Option<u64>) {
        (
            count_at(response, "/usage/prompt_tokens"),
            count_at(response, "/usage/completion_tokens"),
        )
    }
}
