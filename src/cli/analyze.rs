//! Analyze command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{print_filters, print_source};
use crate::config::{Config, ConfigOverrides};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the local directory to analyze
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// URL of the GitHub repository to analyze
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// File path to save the analysis results
    #[arg(long, value_name = "FILE")]
    pub save_analysis: Option<PathBuf>,

    /// Custom project name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// GitHub token for private repositories
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// File patterns to include (repeatable or comma-separated)
    #[arg(long, value_name = "GLOBS", value_delimiter = ',', num_args = 1..)]
    pub include: Vec<String>,

    /// File patterns to exclude (repeatable or comma-separated)
    #[arg(long, value_name = "GLOBS", value_delimiter = ',', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Maximum file size in bytes to include (0 = no limit)
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,
}

impl AnalyzeArgs {
    pub fn check(&self) -> Result<()> {
        if self.dir.is_some() && self.repo.is_some() {
            anyhow::bail!("Cannot specify both --dir and --repo");
        }
        if self.dir.is_none() && self.repo.is_none() {
            anyhow::bail!("Either --dir or --repo must be specified");
        }
        Ok(())
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            github_token: self.token.clone(),
            include: (!self.include.is_empty()).then(|| self.include.clone()),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            max_size: self.max_size,
            ..Default::default()
        }
    }
}

pub fn run(args: AnalyzeArgs, config: &Config) -> Result<()> {
    println!("Analysis is not implemented yet; resolved settings:");
    print_source(args.dir.as_deref(), args.repo.as_deref());
    if let Some(name) = &args.name {
        println!("  Project name: {}", name);
    }
    if let Some(path) = &args.save_analysis {
        println!("  Save analysis to: {}", path.display());
    }
    print_filters(config);
    println!(
        "  GitHub token: {}",
        if config.github().token().is_some() { "set" } else { "not set" }
    );
    Ok(())
}
