// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::{AmendBase, DiffMode, DiffRequest};
use crate::error::{Error, Result};

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    /// Validate `dir` once: it must exist and sit inside a git working tree.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let repo = gix::discover(dir).map_err(|_| Error::NotAGitRepo)?;

        // Bare repositories have nothing staged to describe
        let work_dir = repo.workdir().ok_or(Error::NotAGitRepo)?.to_path_buf();

        debug!(work_dir = %work_dir.display(), "git repository opened");
        Ok(Self { work_dir })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub async fn generate_diff(&self, request: &DiffRequest) -> Result<String> {
        let output = match request.mode() {
            DiffMode::Amend => {
                let base = self.amend_base().await?;
                info!(?base, "amend diff base");
                match base {
                    AmendBase::Parent => self.run(&["diff", "--cached", "HEAD^"]).await?,
                    AmendBase::Root => {
                        let empty_tree = self.empty_tree().await?;
                        self.run(&["diff", "--cached", &empty_tree]).await?
                    }
                }
            }
            DiffMode::Commit(commit) => {
                let range = format!("{commit}^..{commit}");
                self.run(&["diff", &range]).await?
            }
            DiffMode::Staged => self.run(&["diff", "--cached"]).await?,
        };

        let diff = Self::stdout(output)?;
        if diff.trim().is_empty() {
            return Err(Error::NoChanges);
        }

        debug!(chars = diff.chars().count(), "diff collected");
        Ok(diff)
    }

    /// Whether the amended commit has a parent to diff against.
    pub async fn amend_base(&self) -> Result<AmendBase> {
        let output = self
            .run(&["rev-parse", "--verify", "--quiet", "HEAD^"])
            .await?;

        if output.status.success() {
            Ok(AmendBase::Parent)
        } else {
            Ok(AmendBase::Root)
        }
    }

    async fn empty_tree(&self) -> Result<String> {
        // Hash of the empty tree for this repository's object format
        let output = self.run(&["hash-object", "-t", "tree", "--stdin"]).await?;
        Ok(Self::stdout(output)?.trim().to_string())
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::GitCommandFailed(e.to_string()))
    }

    fn stdout(output: Output) -> Result<String> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitCommandFailed(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Hands the final message to git's own commit workflow.
#[async_trait]
pub trait CommitDriver: Send + Sync {
    /// `git commit --edit -F <message_file>`
    async fn commit(&self, message_file: &Path) -> Result<()>;

    /// Plain `git commit --amend`, no generated message
    async fn amend(&self) -> Result<()>;
}

pub struct GitCommitDriver {
    work_dir: PathBuf,
}

impl GitCommitDriver {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    async fn interactive(&self, args: &[&str]) -> Result<()> {
        // Inherit stdio so git can open the user's editor
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .status()
            .await?;

        if !status.success() {
            return Err(Error::Git(format!(
                "git {} exited with {status}",
                args.join(" ")
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CommitDriver for GitCommitDriver {
    async fn commit(&self, message_file: &Path) -> Result<()> {
        let file = message_file.to_string_lossy();
        self.interactive(&["commit", "--edit", "-F", &file]).await
    }

    async fn amend(&self) -> Result<()> {
        self.interactive(&["commit", "--amend"]).await
    }
}
