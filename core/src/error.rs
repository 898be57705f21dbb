//! Error types for llm-bench-core

use std::path::PathBuf;

use thiserror::Error;

/// Core error type
///
/// Only configuration and IO problems surface here. Failures of individual
/// benchmark calls never become an `Error`; they are captured in a failed
/// [`BenchmarkResult`](crate::BenchmarkResult) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file does not exist
    #[error("Configuration file not found at {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration file is not valid YAML for the expected schema
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration parsed but failed validation
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider name not present in the registry
    #[error("Provider '{0}' not found in configuration")]
    UnknownProvider(String),

    /// Model nickname not present under the given provider
    #[error("Model '{model}' not found for provider '{provider}'")]
    UnknownModel {
        /// Provider that was searched
        provider: String,
        /// Nickname that was requested
        model: String,
    },

    /// A runner or tracker was assembled without a required part
    #[error("missing required component: {0}")]
    MissingComponent(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
