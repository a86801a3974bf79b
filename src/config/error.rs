//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

use super::types::{Provider, AUDIENCE_CHOICES, PROVIDER_CHOICES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed reading config file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    FileParse { path: PathBuf, message: String },

    #[error("Unsupported config extension '.{extension}' for file {}", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to get user home directory")]
    HomeDirUnavailable,

    #[error("failed to get current directory")]
    CurrentDirUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value in {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },

    #[error("invalid value for {key} in {}: {message}", .path.display())]
    InvalidValue { key: String, path: PathBuf, message: String },

    #[error("invalid configuration: {message}")]
    InvalidSettings { message: String },

    #[error("llm.api_key is required for provider '{provider}' and {env_var} env var is not set")]
    MissingApiKey { provider: Provider, env_var: &'static str },

    #[error("llm.endpoint is required for local provider '{provider}'")]
    MissingEndpoint { provider: Provider },

    #[error("invalid default audience: '{value}'. Must be one of {}", AUDIENCE_CHOICES)]
    InvalidAudience { value: String },

    #[error("invalid llm provider: '{value}'. Must be one of {}", PROVIDER_CHOICES)]
    InvalidProvider { value: String },

    #[error("invalid glob '{pattern}' in {key}: {reason}")]
    InvalidGlob { key: &'static str, pattern: String, reason: String },
}

impl ConfigError {
    /// True when the file simply does not exist, as opposed to existing but
    /// being unreadable or malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::FileNotFound { .. })
    }
}
