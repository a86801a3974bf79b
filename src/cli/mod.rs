//! Command-line interface for code-decoder
//!
//! Provides `analyze`, `generate` and `test-llm`. Configuration is resolved
//! once here, after argument checks and before any command runs, and lent to
//! the command by reference.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, ConfigOverrides, LoadOptions, ProcessEnv};

mod analyze;
mod generate;
mod test_llm;
mod utils;

/// AI-Powered Codebase Tutorial Generator
#[derive(Parser)]
#[command(name = "code-decoder")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default is ./config.yaml or ~/.config/code-decoder/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

const LONG_ABOUT: &str = "Code-Decoder transforms complex codebases into audience-targeted tutorials \
using AI. It analyzes GitHub repositories or local directories, identifies core abstractions, \
and generates comprehensive, visualized documentation.";

#[derive(Subcommand)]
enum Commands {
    /// Analyze a codebase and save the analysis
    Analyze(analyze::AnalyzeArgs),

    /// Generate tutorials from a codebase or saved analysis
    Generate(Box<generate::GenerateArgs>),

    /// Test the connection to the configured LLM provider
    TestLlm(test_llm::TestLlmArgs),
}

impl Commands {
    fn check(&self) -> Result<()> {
        match self {
            Commands::Analyze(args) => args.check(),
            Commands::Generate(args) => args.check(),
            Commands::TestLlm(_) => Ok(()),
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Analyze(args) => args.overrides(),
            Commands::Generate(args) => args.overrides(),
            Commands::TestLlm(args) => args.overrides(),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    cli.command.check()?;

    let options = LoadOptions::from_process(cli.config.clone())?
        .with_overrides(cli.command.overrides());
    let config = load_config(&options, &ProcessEnv).context("invalid configuration")?;
    if let Some(source) = config.source() {
        eprintln!("Using config file: {}", source.display());
    }

    match cli.command {
        Commands::Analyze(args) => analyze::run(args, &config),
        Commands::Generate(args) => generate::run(*args, &config),
        Commands::TestLlm(args) => test_llm::run(args, &config),
    }
}
