//! Cross-field validation of merged settings

use globset::Glob;

use super::env::EnvSource;
use super::error::ConfigError;
use super::types::{Audience, Provider, Settings};

/// Check the business rules in order and stop at the first violation.
///
/// 1. a cloud provider needs `llm.api_key` or its fallback variable
/// 2. a local provider needs `llm.endpoint`
/// 3. a non-empty audience must be recognized
/// 4. a non-empty provider must be recognized
/// 5. include/exclude entries must be valid globs
///
/// Empty provider and audience pass; commands that need them decide.
pub fn validate(settings: &Settings, env: &impl EnvSource) -> Result<(), ConfigError> {
    let llm = &settings.llm;
    let provider = Provider::parse(&llm.provider);

    if let Some(provider) = provider.filter(|p| p.is_cloud()) {
        if llm.api_key.is_empty() {
            let env_var = provider.api_key_env().unwrap_or_default();
            let fallback = env.var(env_var)?.unwrap_or_default();
            if fallback.is_empty() {
                return Err(ConfigError::MissingApiKey { provider, env_var });
            }
            tracing::debug!("llm.api_key taken from {}", env_var);
        }
    }

    if let Some(provider) = provider.filter(|p| p.is_local()) {
        if llm.endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint { provider });
        }
    }

    let audience = &settings.defaults.audience;
    if !audience.is_empty() && Audience::parse(audience).is_none() {
        return Err(ConfigError::InvalidAudience { value: audience.clone() });
    }

    if !llm.provider.is_empty() && provider.is_none() {
        return Err(ConfigError::InvalidProvider { value: llm.provider.clone() });
    }

    check_globs("defaults.include", &settings.defaults.include)?;
    check_globs("defaults.exclude", &settings.defaults.exclude)?;

    Ok(())
}

fn check_globs(key: &'static str, patterns: &[String]) -> Result<(), ConfigError> {
    for pattern in patterns {
        Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob {
            key,
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
