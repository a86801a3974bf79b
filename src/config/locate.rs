//! Config file discovery

use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Directory name under `~/.config` and the binary name.
pub const APP_NAMESPACE: &str = "code-decoder";

const CONFIG_FILE_STEM: &str = "config";

/// Tried in this order within each search directory.
pub const CONFIG_EXTENSIONS: [&str; 3] = ["yaml", "yml", "toml"];

/// Where configuration may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSources {
    /// A path given by the user; it must load.
    Explicit(PathBuf),
    /// Well-known locations, tried in order; all of them may be absent.
    Discover(Vec<PathBuf>),
}

impl ConfigSources {
    pub fn candidates(&self) -> &[PathBuf] {
        match self {
            ConfigSources::Explicit(path) => std::slice::from_ref(path),
            ConfigSources::Discover(paths) => paths,
        }
    }
}

/// `~/.config/code-decoder`
pub fn user_config_dir(home: &Path) -> PathBuf {
    home.join(".config").join(APP_NAMESPACE)
}

/// Compute the candidate config locations.
///
/// An explicit, non-empty path wins outright and the home directory is never
/// consulted. Otherwise the current directory is searched before the user
/// config directory, and a missing home directory is an error.
pub fn locate_sources(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<ConfigSources, ConfigError> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(ConfigSources::Explicit(path.to_path_buf()));
    }

    let home = home.ok_or(ConfigError::HomeDirUnavailable)?;
    let search_dirs = [cwd.to_path_buf(), user_config_dir(home)];

    let candidates = search_dirs
        .iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS.iter().map(move |ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
        })
        .collect();

    Ok(ConfigSources::Discover(candidates))
}
