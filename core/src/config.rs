//! Provider/model registry loaded from `models.yaml`

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::job::{BenchmarkJob, ModelSpec, ProviderSpec};

/// Default file name looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "models.yaml";

/// A provider entry together with its models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Connection details
    #[serde(flatten)]
    pub provider: ProviderSpec,

    /// Models benchmarked under this provider, in order
    #[serde(default)]
    pub models: Vec<ModelSpec>,
}

/// Benchmark configuration
///
/// Holds every provider and model to benchmark, the shared prompt, and the
/// tracking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Prompt sent identically to every model
    pub prompt: String,

    /// Providers in configuration order
    pub providers: Vec<ProviderConfig>,

    /// Period between tracking cycles
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Optional cap on in-flight calls; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,

    /// Optional per-call timeout; calls may hang indefinitely when absent
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout: Option<Duration>,
}

fn default_interval() -> Duration {
    Duration::from_secs(60)
}

impl BenchConfig {
    /// Create a config with the given prompt and no providers
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            providers: Vec::new(),
            interval: default_interval(),
            max_concurrency: None,
            request_timeout: None,
        }
    }

    /// Add a provider with its models
    pub fn with_provider(mut self, provider: ProviderSpec, models: Vec<ModelSpec>) -> Self {
        self.providers.push(ProviderConfig { provider, models });
        self
    }

    /// Set the tracking interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Cap the number of concurrent calls
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Set a per-call timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)?;

        tracing::debug!(
            path = %path.display(),
            providers = config.providers.len(),
            models = config.model_count(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(raw)?;
        for entry in &mut config.providers {
            let trimmed = entry.provider.base_url.trim_end_matches('/').len();
            entry.provider.base_url.truncate(trimmed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(Error::config("at least one provider must be configured"));
        }

        if self.interval.is_zero() {
            return Err(Error::config("interval must be greater than zero"));
        }

        if self.max_concurrency == Some(0) {
            return Err(Error::config("max_concurrency must be at least 1"));
        }

        let mut provider_names = HashSet::new();
        for entry in &self.providers {
            let provider = &entry.provider;
            if provider.name.is_empty() {
                return Err(Error::config("provider name must not be empty"));
            }
            if !provider_names.insert(provider.name.as_str()) {
                return Err(Error::config(format!(
                    "provider '{}' is defined more than once",
                    provider.name
                )));
            }
            if provider.base_url.is_empty() {
                return Err(Error::config(format!(
                    "provider '{}' has an empty base_url",
                    provider.name
                )));
            }

            let mut nicknames = HashSet::new();
            for model in &entry.models {
                if model.nickname.is_empty() || model.id.is_empty() {
                    return Err(Error::config(format!(
                        "provider '{}' has a model with an empty nickname or id",
                        provider.name
                    )));
                }
                if !nicknames.insert(model.nickname.as_str()) {
                    return Err(Error::config(format!(
                        "model '{}' is defined more than once for provider '{}'",
                        model.nickname, provider.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up a provider by name
    pub fn find_provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .iter()
            .find(|entry| entry.provider.name == name)
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }

    /// Look up a model by nickname under a provider
    pub fn find_model(&self, provider_name: &str, model_nickname: &str) -> Result<&ModelSpec> {
        self.find_provider(provider_name)?
            .models
            .iter()
            .find(|m| m.nickname == model_nickname)
            .ok_or_else(|| Error::UnknownModel {
                provider: provider_name.to_string(),
                model: model_nickname.to_string(),
            })
    }

    /// Look up a single (provider, model) pair and build its job
    pub fn job(&self, provider_name: &str, model_nickname: &str) -> Result<BenchmarkJob> {
        let entry = self.find_provider(provider_name)?;
        let model = self.find_model(provider_name, model_nickname)?;

        Ok(BenchmarkJob::new(
            Arc::new(entry.provider.clone()),
            Arc::new(model.clone()),
        ))
    }

    /// Expand every configured model into a job, in configuration order
    pub fn jobs(&self) -> Vec<BenchmarkJob> {
        let mut jobs = Vec::with_capacity(self.model_count());
        for entry in &self.providers {
            let provider = Arc::new(entry.provider.clone());
            for model in &entry.models {
                jobs.push(BenchmarkJob::new(
                    Arc::clone(&provider),
                    Arc::new(model.clone()),
                ));
            }
        }
        jobs
    }

    /// Total number of configured models
    pub fn model_count(&self) -> usize {
        self.providers.iter().map(|entry| entry.models.len()).sum()
    }
}
