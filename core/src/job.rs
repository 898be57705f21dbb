//! Provider, model and job types
//!
//! These are the read-only inputs of a benchmark run. They are produced by
//! [`BenchConfig`](crate::BenchConfig) and never mutated afterwards.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// API Format
// ============================================================================

/// Wire-protocol dialect spoken by a model endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFormat {
    /// OpenAI-style `/chat/completions`
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic-style `/v1/messages`
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl ApiFormat {
    /// Returns the identifier string used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            ApiFormat::OpenAI => "openai",
            ApiFormat::Anthropic => "anthropic",
        }
    }

    /// Returns all supported formats.
    pub fn all() -> &'static [ApiFormat] {
        &[ApiFormat::OpenAI, ApiFormat::Anthropic]
    }
}

impl fmt::Display for ApiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for ApiFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ApiFormat::OpenAI),
            "anthropic" => Ok(ApiFormat::Anthropic),
            _ => Err(format!(
                "Invalid API format '{}'. Must be 'openai' or 'anthropic'",
                s
            )),
        }
    }
}

// ============================================================================
// Provider / Model
// ============================================================================

/// An LLM vendor endpoint family sharing one base URL and API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Provider name as referenced on the command line
    pub name: String,

    /// Base URL without trailing slash (e.g. `https://api.openai.com/v1`)
    pub base_url: String,

    /// API key sent with every request
    pub api_key: String,
}

impl ProviderSpec {
    /// Create a provider, trimming any trailing `/` from the base URL.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

// The key stays out of logs.
impl fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A model under a provider, referenced by a short nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Short name used in configuration and output
    pub nickname: String,

    /// Identifier sent to the API in the `model` field
    pub id: String,

    /// Dialect of the endpoint, `openai` when omitted
    #[serde(default)]
    pub api_format: ApiFormat,
}

impl ModelSpec {
    /// Create a model spec
    pub fn new(nickname: impl Into<String>, id: impl Into<String>, api_format: ApiFormat) -> Self {
        Self {
            nickname: nickname.into(),
            id: id.into(),
            api_format,
        }
    }
}

// ============================================================================
// Job
// ============================================================================

/// One (provider, model) pair to benchmark once per run or cycle.
///
/// Cloning only bumps two reference counts.
#[derive(Debug, Clone)]
pub struct BenchmarkJob {
    /// Provider to call
    pub provider: Arc<ProviderSpec>,

    /// Model to request
    pub model: Arc<ModelSpec>,
}

impl BenchmarkJob {
    /// Create a job
    pub fn new(provider: Arc<ProviderSpec>, model: Arc<ModelSpec>) -> Self {
        Self { provider, model }
    }

    /// `provider/model` label used in logs and summaries
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider.name, self.model.nickname)
    }
}
