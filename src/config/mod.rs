//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File), then validates the result.

pub mod env;
pub mod error;
pub mod file;
pub mod keys;
pub mod loader;
pub mod locate;
pub mod merge;
pub mod types;
pub mod validate;

pub use env::{EnvSource, ProcessEnv, ENV_PREFIX};
pub use error::ConfigError;
pub use loader::{load_config, LoadOptions};
pub use merge::ConfigOverrides;
pub use types::{Audience, Config, Provider, Settings};
pub use validate::validate;
