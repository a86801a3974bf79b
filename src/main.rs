//! code-decoder: AI-powered codebase tutorial generator

use anyhow::Result;

fn main() -> Result<()> {
    code_decoder::cli::run()
}
