//! Per-call error types

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Why a single benchmark call failed.
///
/// Never escapes the executor: its display text becomes the failed result's
/// `error_message`.
#[derive(Debug, Error)]
pub enum CallError {
    /// Connection, TLS, timeout or body read failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with a JSON error body
    #[error("API request failed: {status} - {message}")]
    Status {
        /// Status code
        status: u16,
        /// Message extracted from the body, or the status reason
        message: String,
    },

    /// Non-success status whose body is not JSON
    #[error("API request failed: {status} {reason}")]
    StatusNoJson {
        /// Status code
        status: u16,
        /// Status reason phrase
        reason: String,
    },

    /// Success status with a body that is not JSON
    #[error("Invalid JSON response: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl CallError {
    /// Build the error for a non-success response from its status and raw body.
    ///
    /// The message is taken from `msg`, then `message`, then `error.message`,
    /// falling back to the status reason.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();

        match serde_json::from_slice::<Value>(body) {
            Ok(json) => Self::Status {
                status: status.as_u16(),
                message: error_message(&json).unwrap_or(reason),
            },
            Err(_) => Self::StatusNoJson {
                status: status.as_u16(),
                reason,
            },
        }
    }
}

fn error_message(json: &Value) -> Option<String> {
    ["/msg", "/message", "/error/message"]
        .iter()
        .filter_map(|pointer| json.pointer(pointer))
        .find(|value| !value.is_null())
        .map(value_text)
}

/// Text of a JSON value without quotes around strings; `null` is empty
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
