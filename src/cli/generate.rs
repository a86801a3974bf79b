//! Generate command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

use super::utils::{print_llm, print_source};
use crate::config::{Audience, Config, ConfigOverrides};

/// Used when neither flags, environment nor config file set the value.
const DEFAULT_AUDIENCE: Audience = Audience::Developer;
const DEFAULT_LANGUAGE: &str = "English";
const DEFAULT_OUTPUT_DIR: &str = "./tutorials";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Html,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to a saved analysis file to use for generation
    #[arg(long, value_name = "FILE")]
    pub load_analysis: Option<PathBuf>,

    /// Path to the local directory to analyze and generate from
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// URL of the GitHub repository to analyze and generate from
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Tutorial audience: beginner, developer or contributor [default: developer]
    #[arg(long, value_name = "AUDIENCE")]
    pub audience: Option<String>,

    /// Language for the generated tutorial [default: English]
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Directory to save generated tutorials [default: ./tutorials]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// File path to save analysis results if analyzing a codebase directly
    #[arg(long, value_name = "FILE")]
    pub save_analysis: Option<PathBuf>,

    /// Override the LLM provider specified in the config
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,
}

impl GenerateArgs {
    pub fn check(&self) -> Result<()> {
        let sources = [self.load_analysis.is_some(), self.dir.is_some(), self.repo.is_some()];
        match sources.iter().filter(|set| **set).count() {
            0 => anyhow::bail!("Either --load-analysis, --dir or --repo must be specified"),
            1 => Ok(()),
            _ => anyhow::bail!("Only one of --load-analysis, --dir or --repo may be specified"),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            provider: self.provider.clone(),
            audience: self.audience.clone(),
            language: self.language.clone(),
            output_dir: self.output.as_ref().map(|p| p.display().to_string()),
            ..Default::default()
        }
    }
}

/// Audience, language and output directory for this run.
#[derive(Debug, PartialEq, Eq)]
struct TutorialTarget<'a> {
    audience: Audience,
    language: &'a str,
    output_dir: &'a Path,
}

impl<'a> TutorialTarget<'a> {
    fn resolve(config: &'a Config) -> Self {
        let defaults = config.defaults();
        let language = match defaults.language() {
            "" => DEFAULT_LANGUAGE,
            language => language,
        };
        let output_dir = match defaults.output_dir() {
            dir if dir.as_os_str().is_empty() => Path::new(DEFAULT_OUTPUT_DIR),
            dir => dir,
        };
        Self { audience: defaults.audience().unwrap_or(DEFAULT_AUDIENCE), language, output_dir }
    }
}

pub fn run(args: GenerateArgs, config: &Config) -> Result<()> {
    println!("Tutorial generation is not implemented yet; resolved settings:");
    match &args.load_analysis {
        Some(path) => println!("  Analysis: {}", path.display()),
        None => print_source(args.dir.as_deref(), args.repo.as_deref()),
    }

    let target = TutorialTarget::resolve(config);
    println!("  Audience: {}", target.audience);
    println!("  Language: {}", target.language);
    println!("  Output directory: {}", target.output_dir.display());
    println!("  Format: {:?}", args.format);
    if let Some(path) = &args.save_analysis {
        println!("  Save analysis to: {}", path.display());
    }
    print_llm(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::collections::HashMap;

    fn config(settings: Settings) -> Config {
        Config::build(settings, None, &HashMap::<String, String>::new()).expect("config")
    }

    #[test]
    fn unset_fields_fall_back_to_command_defaults() {
        let config = config(Settings::default());
        let target = TutorialTarget::resolve(&config);
        assert_eq!(target.audience, Audience::Developer);
        assert_eq!(target.language, "English");
        assert_eq!(target.output_dir, Path::new("./tutorials"));
    }

    #[test]
    fn configured_fields_win_over_command_defaults() {
        let mut settings = Settings::default();
        settings.defaults.audience = "beginner".into();
        settings.defaults.language = "Japanese".into();
        settings.defaults.output_dir = "docs".into();

        let config = config(settings);
        let target = TutorialTarget::resolve(&config);
        assert_eq!(target.audience, Audience::Beginner);
        assert_eq!(target.language, "Japanese");
        assert_eq!(target.output_dir, Path::new("docs"));
    }
}
