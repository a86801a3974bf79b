//! Environment variable overlay
//!
//! Each known key maps to `CODEDECODER_<SECTION>_<FIELD>`, e.g. `llm.api_key`
//! becomes `CODEDECODER_LLM_API_KEY`. A variable that is set, even to the
//! empty string, overrides the file value for that key.

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::env::VarError;

use super::error::ConfigError;
use super::keys::{parse_byte_count, split_list, ConfigKey, KeyKind, KEYS};
use super::merge::insert_leaf;

pub const ENV_PREFIX: &str = "CODEDECODER";

/// Read access to environment variables.
///
/// The process environment in production; a plain map in tests. `Ok(None)`
/// means unset; a value that cannot be read is an error, never "unset".
pub trait EnvSource {
    fn var(&self, name: &str) -> Result<Option<String>, ConfigError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<Option<String>, ConfigError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue {
                var: name.to_string(),
                reason: "value is not valid UTF-8".to_string(),
            }),
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.get(name).cloned())
    }
}

/// `llm.provider` -> `CODEDECODER_LLM_PROVIDER`
pub fn env_var_name(key_path: &str) -> String {
    format!("{ENV_PREFIX}_{}", key_path.replace('.', "_").to_ascii_uppercase())
}

/// Every (key, variable name) pair the overlay consults.
pub fn env_bindings() -> Vec<(&'static ConfigKey, String)> {
    KEYS.iter().map(|key| (key, env_var_name(&key.path()))).collect()
}

/// Build the environment layer from whichever bound variables are set.
pub fn env_overlay(env: &impl EnvSource) -> Result<Mapping, ConfigError> {
    let mut tree = Mapping::new();

    for (key, var) in env_bindings() {
        let Some(raw) = env.var(&var)? else {
            continue;
        };
        tracing::debug!("{} overridden by {}", key.path(), var);
        let value = env_value(key.kind, &raw, &var)?;
        insert_leaf(&mut tree, key.section, key.field, value);
    }

    Ok(tree)
}

fn env_value(kind: KeyKind, raw: &str, var: &str) -> Result<Value, ConfigError> {
    match kind {
        KeyKind::Text => Ok(Value::String(raw.to_string())),
        KeyKind::List => Ok(Value::Sequence(split_list(raw).into_iter().map(Value::String).collect())),
        KeyKind::Bytes => parse_byte_count(raw)
            .map(|n| Value::Number(n.into()))
            .map_err(|reason| ConfigError::InvalidEnvValue { var: var.to_string(), reason }),
    }
}
