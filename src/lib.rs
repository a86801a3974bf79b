//! code-decoder: analyze codebases and generate audience-targeted tutorials
//!
//! The analysis and generation pipelines consume a [`config::Config`]
//! resolved once at startup from config files, environment variables and
//! command-line flags.

pub mod cli;
pub mod config;
