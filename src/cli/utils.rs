//! Shared CLI output helpers.

use std::path::Path;

use crate::config::Config;

/// Show an empty setting as `(unset)`.
pub fn describe(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}

pub fn print_source(dir: Option<&Path>, repo: Option<&str>) {
    if let Some(dir) = dir {
        println!("  Directory: {}", dir.display());
    }
    if let Some(repo) = repo {
        println!("  Repository: {}", repo);
    }
}

pub fn print_filters(config: &Config) {
    let defaults = config.defaults();
    println!("  Include: {}", describe(&defaults.include().join(", ")));
    println!("  Exclude: {}", describe(&defaults.exclude().join(", ")));
    match defaults.max_size_limit() {
        Some(limit) => println!("  Max file size: {} bytes", limit),
        None => println!("  Max file size: no limit"),
    }
}

pub fn print_llm(config: &Config) {
    let llm = config.llm();
    println!("  Provider: {}", describe(llm.provider().map(|p| p.as_str()).unwrap_or("")));
    println!("  Model: {}", describe(llm.model()));
    println!("  Endpoint: {}", describe(llm.endpoint()));
    println!("  API key: {}", if llm.api_key().is_empty() { "not set" } else { "set" });
    if let Some(source) = config.source() {
        println!("  Config file: {}", source.display());
    }
}
