//! Config resolution: locate, load, overlay, merge, validate

use serde_yaml::Mapping;
use std::path::PathBuf;

use super::env::{env_overlay, EnvSource};
use super::error::ConfigError;
use super::file::{coerce_file_values, load_file, unknown_keys};
use super::locate::{locate_sources, ConfigSources};
use super::merge::{merge_layers, ConfigOverrides};
use super::types::{Config, Settings};

/// Inputs to [`load_config`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// `--config`; disables default discovery when set.
    pub config_path: Option<PathBuf>,
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
    /// Flag values, applied over every other source.
    pub overrides: ConfigOverrides,
}

impl LoadOptions {
    /// Options for the running process: its working and home directories.
    pub fn from_process(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|source| ConfigError::CurrentDirUnavailable { source })?;
        Ok(Self { config_path, cwd, home: dirs::home_dir(), overrides: ConfigOverrides::default() })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// The file-sourced layer and where it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileLayer {
    pub tree: Mapping,
    pub source: Option<PathBuf>,
}

/// Load the file layer from the located sources.
///
/// An explicit path must load. Default candidates are best-effort: absent
/// ones are skipped, broken ones are warned about and skipped, and finding
/// none at all yields an empty layer.
pub fn resolve_file_layer(sources: &ConfigSources) -> Result<FileLayer, ConfigError> {
    if let ConfigSources::Explicit(path) = sources {
        let tree = load_file(path)?;
        tracing::debug!("Using config file: {}", path.display());
        return Ok(FileLayer { tree, source: Some(path.clone()) });
    }

    for candidate in sources.candidates() {
        match load_file(candidate) {
            Ok(tree) => {
                tracing::debug!("Using config file: {}", candidate.display());
                return Ok(FileLayer { tree, source: Some(candidate.clone()) });
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", candidate.display(), e);
            }
        }
    }

    tracing::debug!("Config file not found, using defaults and environment variables");
    Ok(FileLayer::default())
}

/// Resolve the full configuration.
///
/// Precedence: flags > environment > config file. File values are typed by
/// key before merging, so a mistyped value is fatal and names its file even
/// when that file was discovered rather than given. Validation runs even when
/// no file was found.
pub fn load_config(options: &LoadOptions, env: &impl EnvSource) -> Result<Config, ConfigError> {
    let sources =
        locate_sources(options.config_path.as_deref(), &options.cwd, options.home.as_deref())?;

    let FileLayer { tree, source } = resolve_file_layer(&sources)?;
    let tree = match source.as_deref() {
        Some(path) => coerce_file_values(tree, path)?,
        None => tree,
    };
    for key in unknown_keys(&tree) {
        tracing::warn!("Ignoring unknown config key '{}'", key);
    }

    let env_tree = env_overlay(env)?;
    let merged = merge_layers(tree, env_tree, &options.overrides);
    let settings = Settings::from_tree(merged)?;

    Config::build(settings, source, env)
}
