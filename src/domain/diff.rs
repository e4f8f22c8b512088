// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

/// What the diff should describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffMode {
    /// Staged changes plus the last commit they will be folded into
    Amend,
    /// A single historical commit against its parent
    Commit(String),
    /// Currently staged changes
    Staged,
}

/// Base the amend diff was taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmendBase {
    /// `HEAD^` exists
    Parent,
    /// HEAD is a root commit; diffed against the empty tree
    Root,
}

#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub repository_dir: PathBuf,
    pub commit_ref: Option<String>,
    pub amend: bool,
}

impl DiffRequest {
    pub fn staged(repository_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository_dir: repository_dir.into(),
            commit_ref: None,
            amend: false,
        }
    }

    /// Amend wins over a commit ref; neither means staged changes.
    pub fn mode(&self) -> DiffMode {
        if self.amend {
            DiffMode::Amend
        } else if let Some(ref commit) = self.commit_ref {
            DiffMode::Commit(commit.clone())
        } else {
            DiffMode::Staged
        }
    }
}
