// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Invalid provider specified: '{0}'")]
    #[diagnostic(
        code(aigcm::config::invalid_provider),
        help("Valid providers are: ollama, openai, anthropic, google, mistral")
    )]
    InvalidProvider(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(aigcm::config::error))]
    Config(String),

    #[error("Directory not found: {path}")]
    #[diagnostic(code(aigcm::git::no_dir))]
    DirectoryNotFound { path: String },

    #[error("Not a git repository")]
    #[diagnostic(
        code(aigcm::git::not_repo),
        help("Run this command inside a git working tree")
    )]
    NotAGitRepo,

    #[error("Git command failed: {0}")]
    #[diagnostic(code(aigcm::git::command_failed))]
    GitCommandFailed(String),

    #[error("No changes detected")]
    #[diagnostic(
        code(aigcm::git::no_changes),
        help("Stage files with: git add <files>")
    )]
    NoChanges,

    #[error("Git error: {0}")]
    #[diagnostic(code(aigcm::git::error))]
    Git(String),

    #[error("{provider} is not running")]
    #[diagnostic(
        code(aigcm::provider::unavailable),
        help("Start the local model server first (e.g. `ollama serve`)")
    )]
    ProviderUnavailable { provider: String },

    #[error("This is a private repository")]
    #[diagnostic(
        code(aigcm::privacy::private_repo),
        help("Use a local model (ollama) or run with --force-external")
    )]
    PrivateRepository,

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(aigcm::provider::error))]
    Provider { provider: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
