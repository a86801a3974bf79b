//! Configuration types
//!
//! [`Settings`] is the merged tree deserialized field by field, still holding
//! raw strings. [`Config`] is what the rest of the program sees: built once
//! after validation, read-only afterwards.

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::env::EnvSource;
use super::error::ConfigError;
use super::keys::split_list;
use super::validate::validate;

pub const PROVIDER_CHOICES: &str = "openai, anthropic, ollama, lmstudio";
pub const AUDIENCE_CHOICES: &str = "beginner, developer, contributor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Ollama,
    LmStudio,
}

impl Provider {
    pub const ALL: [Provider; 4] =
        [Provider::OpenAi, Provider::Anthropic, Provider::Ollama, Provider::LmStudio];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
            Provider::LmStudio => "lmstudio",
        }
    }

    /// Exact, case-sensitive match against the recognized names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Hosted API that needs a key.
    pub fn is_cloud(self) -> bool {
        matches!(self, Provider::OpenAi | Provider::Anthropic)
    }

    /// Locally running server reached through `llm.endpoint`.
    pub fn is_local(self) -> bool {
        matches!(self, Provider::Ollama | Provider::LmStudio)
    }

    /// Variable consulted when `llm.api_key` is empty.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Anthropic => Some("ANTHROPIC_API_KEY"),
            Provider::Ollama | Provider::LmStudio => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::InvalidProvider { value: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Beginner,
    Developer,
    Contributor,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Audience::Beginner, Audience::Developer, Audience::Contributor];

    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Beginner => "beginner",
            Audience::Developer => "developer",
            Audience::Contributor => "contributor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::InvalidAudience { value: s.to_string() })
    }
}

/// The merged configuration before validation.
///
/// Field names are the file keys; unknown keys are dropped here (they are
/// reported when the file is loaded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub defaults: DefaultsSettings,
    pub github: GitHubSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub output_dir: String,
    pub language: String,
    pub audience: String,
    #[serde(deserialize_with = "string_or_list")]
    pub include: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
    pub max_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub token: String,
}

impl Settings {
    pub fn from_tree(tree: Mapping) -> Result<Self, ConfigError> {
        serde_yaml::from_value(Value::Mapping(tree))
            .map_err(|e| ConfigError::InvalidSettings { message: e.to_string() })
    }
}

/// Accept `include: "*.go, *.rs"` as well as a proper list.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => split_list(&s),
        StringOrList::Many(list) => list,
    })
}

/// Resolved, validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    llm: LlmConfig,
    defaults: DefaultsConfig,
    github: GitHubConfig,
    source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    provider: Option<Provider>,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    output_dir: PathBuf,
    language: String,
    audience: Option<Audience>,
    include: Vec<String>,
    exclude: Vec<String>,
    max_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    token: String,
}

impl Config {
    /// Validate `settings` and freeze them.
    ///
    /// For a cloud provider with no `llm.api_key`, the key is taken from the
    /// provider's fallback variable so consumers never consult the
    /// environment themselves.
    pub fn build(
        settings: Settings,
        source: Option<PathBuf>,
        env: &impl EnvSource,
    ) -> Result<Self, ConfigError> {
        validate(&settings, env)?;

        let Settings { llm, defaults, github } = settings;

        let provider = non_empty(&llm.provider).map(str::parse::<Provider>).transpose()?;
        let audience = non_empty(&defaults.audience).map(str::parse::<Audience>).transpose()?;

        let mut api_key = llm.api_key;
        if api_key.is_empty() {
            if let Some(var) = provider.and_then(Provider::api_key_env) {
                api_key = env.var(var)?.unwrap_or_default();
            }
        }

        Ok(Self {
            llm: LlmConfig { provider, api_key, model: llm.model, endpoint: llm.endpoint },
            defaults: DefaultsConfig {
                output_dir: PathBuf::from(defaults.output_dir),
                language: defaults.language,
                audience,
                include: defaults.include,
                exclude: defaults.exclude,
                max_size: defaults.max_size,
            },
            github: GitHubConfig { token: github.token },
            source,
        })
    }

    pub fn llm(&self) -> &LlmConfig {
        &self.llm
    }

    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    pub fn github(&self) -> &GitHubConfig {
        &self.github
    }

    /// The config file that contributed values, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl LlmConfig {
    pub fn provider(&self) -> Option<Provider> {
        self.provider
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DefaultsConfig {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn audience(&self) -> Option<Audience> {
        self.audience
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// `None` when `max_size` is 0.
    pub fn max_size_limit(&self) -> Option<u64> {
        (self.max_size > 0).then_some(self.max_size)
    }
}

impl GitHubConfig {
    pub fn token(&self) -> Option<&str> {
        non_empty(&self.token)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(yaml: &str) -> Settings {
        Settings::from_tree(serde_yaml::from_str(yaml).expect("yaml")).expect("settings")
    }

    #[test]
    fn provider_kinds() {
        assert!(Provider::OpenAi.is_cloud() && Provider::Anthropic.is_cloud());
        assert!(Provider::Ollama.is_local() && Provider::LmStudio.is_local());
        assert_eq!(Provider::parse("lmstudio"), Some(Provider::LmStudio));
        assert_eq!(Provider::parse("OpenAI"), None);
    }

    #[test]
    fn audience_round_trips_through_names() {
        for audience in Audience::ALL {
            assert_eq!(audience.as_str().parse::<Audience>().expect("parse"), audience);
        }
        assert!("expert".parse::<Audience>().is_err());
    }

    #[test]
    fn settings_use_file_field_names() {
        let s = settings(
            "llm:\n  api_key: k\ndefaults:\n  output_dir: ./tutorials\n  max_size: 10\ngithub:\n  token: t\n",
        );
        assert_eq!(s.llm.api_key, "k");
        assert_eq!(s.defaults.output_dir, "./tutorials");
        assert_eq!(s.defaults.max_size, 10);
        assert_eq!(s.github.token, "t");
    }

    #[test]
    fn comma_separated_patterns_become_lists() {
        let s = settings("defaults:\n  exclude: 'dist, node_modules'\n");
        assert_eq!(s.defaults.exclude, vec!["dist", "node_modules"]);
    }

    #[test]
    fn negative_max_size_is_rejected() {
        let tree = serde_yaml::from_str("defaults:\n  max_size: -1\n").expect("yaml");
        let err = Settings::from_tree(tree).expect_err("negative");
        assert!(matches!(err, ConfigError::InvalidSettings { .. }));
    }

    #[test]
    fn build_fills_api_key_from_provider_variable() {
        let env: HashMap<String, String> =
            [("ANTHROPIC_API_KEY".to_string(), "sk-ant".to_string())].into_iter().collect();
        let config =
            Config::build(settings("llm:\n  provider: anthropic\n"), None, &env).expect("config");

        assert_eq!(config.llm().provider(), Some(Provider::Anthropic));
        assert_eq!(config.llm().api_key(), "sk-ant");
    }

    #[test]
    fn empty_values_stay_unset() {
        let env = HashMap::<String, String>::new();
        let config = Config::build(Settings::default(), None, &env).expect("config");
        assert_eq!(config.llm().provider(), None);
        assert_eq!(config.defaults().audience(), None);
        assert_eq!(config.defaults().max_size_limit(), None);
        assert_eq!(config.github().token(), None);
        assert!(config.source().is_none());
    }
}
