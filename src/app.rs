// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use console::style;
use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::domain::{DiffRequest, GenerationRequest, ProviderBinding};
use crate::error::Result;
use crate::services::{
    cache::RecentMessageCache,
    generator::MessageGenerator,
    git::{CommitDriver, GitCommitDriver, GitService},
    llm::{self, LlmProvider},
    privacy::{GhVisibilityProbe, VisibilityProbe},
    prompt::PromptBuilder,
    provider::resolve_provider,
    style::{LINE_MAX, StyleGuide},
};

/// Builds the inference backend once the provider is known.
pub type BackendFactory =
    Box<dyn Fn(&ProviderBinding, &Config) -> Result<Box<dyn LlmProvider>> + Send + Sync>;

/// Everything the pipeline talks to outside the process.
pub struct Collaborators {
    pub backends: BackendFactory,
    pub visibility: Box<dyn VisibilityProbe>,
    pub committer: Box<dyn CommitDriver>,
}

impl Collaborators {
    /// HTTP backends, the `gh` CLI and the `git` binary.
    pub fn system(work_dir: &Path) -> Self {
        Self {
            backends: Box::new(llm::create_provider),
            visibility: Box::new(GhVisibilityProbe::new(work_dir)),
            committer: Box::new(GitCommitDriver::new(work_dir)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--amend`: handed straight to `git commit --amend`
    Amended,
    /// `--dry`: printed, not committed
    Previewed { message: String },
    Committed { message: String, reused: bool },
}

/// One invocation of the tool: parsed flags, settings, working directory
/// and collaborators.
pub struct App {
    cli: Cli,
    config: Config,
    work_dir: PathBuf,
    collaborators: Collaborators,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let work_dir = std::env::current_dir()?;
        let config = Config::load(&cli, &work_dir)?;
        debug!(
            provider = ?config.provider,
            model = %config.model,
            work_dir = %work_dir.display(),
            "config loaded"
        );
        let collaborators = Collaborators::system(&work_dir);
        Ok(Self::with_collaborators(cli, config, work_dir, collaborators))
    }

    pub fn with_collaborators(
        cli: Cli,
        config: Config,
        work_dir: PathBuf,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            cli,
            config,
            work_dir,
            collaborators,
        }
    }

    pub async fn run(self) -> Result<Outcome> {
        if self.cli.amend {
            debug!("amend requested, generation skipped");
            self.collaborators.committer.amend().await?;
            return Ok(Outcome::Amended);
        }

        let cache = RecentMessageCache::new(&self.work_dir, self.config.recent_threshold());

        if let Some(cached) = cache.lookup(self.cli.dry)? {
            let age = SystemTime::now()
                .duration_since(cached.stored_at)
                .unwrap_or_default();
            self.print_info(&format!(
                "Reusing commit message generated {}s ago",
                age.as_secs()
            ));
            self.collaborators.committer.commit(cache.path()).await?;
            return Ok(Outcome::Committed {
                message: cached.text,
                reused: true,
            });
        }

        let message = self.generate_message().await?;
        cache.store(&message)?;

        if self.cli.dry {
            Self::print_preview(&message);
            return Ok(Outcome::Previewed { message });
        }

        self.collaborators.committer.commit(cache.path()).await?;
        Ok(Outcome::Committed {
            message,
            reused: false,
        })
    }

    async fn generate_message(&self) -> Result<String> {
        let request = DiffRequest {
            repository_dir: self.work_dir.clone(),
            commit_ref: self.cli.commit_ref.clone(),
            amend: self.cli.amend,
        };

        self.print_status("Collecting diff...");
        let git = GitService::open(&request.repository_dir)?;
        let diff = git.generate_diff(&request).await?;

        let style_guide = StyleGuide::load(git.work_dir(), self.cli.style.as_deref());

        let binding = ProviderBinding {
            model: self.config.model.clone(),
            provider: resolve_provider(&self.config.model, self.config.provider),
            max_tokens: self.config.max_tokens,
            force_external: self.cli.force_external,
        };

        let backend = (self.collaborators.backends)(&binding, &self.config)?;
        let generator = MessageGenerator::connect(
            binding,
            &self.config,
            backend,
            self.collaborators.visibility.as_ref(),
            PromptBuilder::new(&self.work_dir),
        )
        .await?;

        self.print_status(&format!(
            "Generating commit message with {} ({})...",
            generator.binding().provider,
            generator.binding().model
        ));

        generator
            .generate(&GenerationRequest {
                diff_text: diff,
                style_guide_text: style_guide,
                context_items: self.cli.context.clone(),
            })
            .await
    }

    fn print_preview(message: &str) {
        let rule = "-".repeat(LINE_MAX);
        println!("\nDry run - would generate commit message:");
        println!("{rule}");
        println!("{message}");
        println!("{rule}");
        println!();
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }
}
