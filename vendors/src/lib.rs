//! llm-bench-vendors: chat completion wire formats and the HTTP executor
//!
//! Supported dialects:
//!
//! - OpenAI chat completions (and compatible servers: vLLM, SGLang, Together, ...)
//! - Anthropic messages
//!
//! [`HttpExecutor`] implements [`llm_bench_core::JobExecutor`] on top of them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod format;
pub mod http;

pub use error::CallError;
pub use format::{estimate_tokens, wire_format, AnthropicFormat, OpenAIFormat, WireFormat};
pub use http::HttpExecutor;
