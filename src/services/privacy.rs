// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use console::style;
use tokio::process::Command;
use tracing::debug;

use crate::config::Provider;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
    /// The query ran but could not answer (no hosted remote, not logged in)
    Unknown,
    /// The query tool itself is missing
    Unavailable,
}

/// Reports whether the current repository is private on its hosting service.
#[async_trait]
pub trait VisibilityProbe: Send + Sync {
    async fn visibility(&self) -> Visibility;
}

/// Asks the GitHub CLI: `gh repo view --json isPrivate -q .isPrivate`
pub struct GhVisibilityProbe {
    work_dir: PathBuf,
}

impl GhVisibilityProbe {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

#[async_trait]
impl VisibilityProbe for GhVisibilityProbe {
    async fn visibility(&self) -> Visibility {
        let output = Command::new("gh")
            .args(["repo", "view", "--json", "isPrivate", "-q", ".isPrivate"])
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .await;

        visibility_from(output)
    }
}

/// Interpret a finished `gh repo view` run.
pub fn visibility_from(output: io::Result<Output>) -> Visibility {
    match output {
        Ok(out) if out.status.success() => match String::from_utf8_lossy(&out.stdout).trim() {
            "true" => Visibility::Private,
            "false" => Visibility::Public,
            _ => Visibility::Unknown,
        },
        Ok(out) => {
            debug!(
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "gh repo view failed"
            );
            Visibility::Unknown
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Visibility::Unavailable,
        Err(e) => {
            debug!(error = %e, "could not run gh");
            Visibility::Unknown
        }
    }
}

/// Block hosted providers for private repositories.
///
/// Local providers and `force_external` skip the query entirely. A missing
/// query tool only lowers assurance; it never blocks.
pub async fn check_repository_privacy(
    provider: Provider,
    force_external: bool,
    probe: &dyn VisibilityProbe,
) -> Result<()> {
    if provider.is_local() {
        debug!(%provider, "local provider, privacy check skipped");
        return Ok(());
    }
    if force_external {
        debug!(%provider, "privacy check overridden by --force-external");
        return Ok(());
    }

    match probe.visibility().await {
        Visibility::Private => Err(Error::PrivateRepository),
        Visibility::Unavailable => {
            debug!("gh not found, proceeding without privacy check");
            eprintln!(
                "{} Unable to check repository privacy status (gh command not found)",
                style("warning:").yellow()
            );
            Ok(())
        }
        Visibility::Public | Visibility::Unknown => Ok(()),
    }
}
