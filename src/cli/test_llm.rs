//! test-llm command implementation

use anyhow::Result;
use clap::Args;

use super::utils::print_llm;
use crate::config::{Config, ConfigOverrides};

#[derive(Args)]
pub struct TestLlmArgs {
    /// Override the LLM provider specified in the config for this test
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,
}

impl TestLlmArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides { provider: self.provider.clone(), ..Default::default() }
    }
}

pub fn run(args: TestLlmArgs, config: &Config) -> Result<()> {
    if config.llm().provider().is_none() {
        anyhow::bail!(
            "No LLM provider configured; set llm.provider, CODEDECODER_LLM_PROVIDER or --provider"
        );
    }

    println!("LLM connection testing is not implemented yet; resolved settings:");
    if let Some(provider) = &args.provider {
        println!("  Provider override: {}", provider);
    }
    print_llm(config);
    Ok(())
}
