// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

use crate::config::Provider;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "aigcm")]
#[command(version)]
#[command(about = "AI-generated git commit messages", long_about = None)]
pub struct Cli {
    /// Amend the last commit
    #[arg(short, long)]
    pub amend: bool,

    /// Extra context beyond the diff; prefix with @ to read a file
    #[arg(short, long = "context", value_name = "CONTEXT")]
    pub context: Vec<String>,

    /// Dry run: preview the message without committing
    #[arg(short, long)]
    pub dry: bool,

    /// The model to use (default: gpt-4o-mini)
    #[arg(short, long, env = "AIGCM_MODEL")]
    pub model: Option<String>,

    /// Provider (ollama, openai, anthropic, google, mistral)
    #[arg(long, value_parser = parse_provider)]
    pub provider: Option<Provider>,

    /// Use an external provider even for private repositories
    #[arg(long)]
    pub force_external: bool,

    /// Path to the style guide file
    #[arg(short, long, value_name = "STYLE")]
    pub style: Option<PathBuf>,

    /// Print the default style guide and exit
    #[arg(long)]
    pub default: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Commit to describe instead of the staged changes
    #[arg(value_name = "REF")]
    pub commit_ref: Option<String>,
}

fn parse_provider(value: &str) -> Result<Provider, String> {
    Provider::from_cli_name(value).map_err(|_| {
        "Invalid provider specified. Valid providers are: ollama, openai, anthropic, google, mistral"
            .to_string()
    })
}
