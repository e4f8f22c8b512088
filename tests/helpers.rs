// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use aigcm::app::Collaborators;
use aigcm::config::Config;
use aigcm::domain::ProviderBinding;
use aigcm::error::{Error, Result};
use aigcm::services::git::CommitDriver;
use aigcm::services::llm::LlmProvider;
use aigcm::services::privacy::{Visibility, VisibilityProbe};

/// Run git in `dir`, panicking on failure
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Fresh repository with an identity and no signing
#[allow(dead_code)]
pub fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q", "-b", "main"]);
    git(dir.path(), &["config", "user.email", "test@test.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    dir
}

#[allow(dead_code)]
pub fn stage_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
}

#[allow(dead_code)]
pub fn commit(dir: &Path, message: &str) {
    git(dir, &["commit", "-q", "-m", message]);
}

// ─── Stand-ins ───────────────────────────────────────────────────────────────

/// Backend that answers every prompt with a fixed reply and records prompts
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct StubBackend {
    pub reply: Option<String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl StubBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Arc::default(),
        }
    }

    /// Every call fails with a provider error
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for StubBackend {
    async fn chat(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| Error::Provider {
            provider: "stub".into(),
            message: "backend exploded".into(),
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[derive(Clone)]
#[allow(dead_code)]
pub struct StubProbe {
    pub answer: Visibility,
    pub queries: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl StubProbe {
    pub fn new(answer: Visibility) -> Self {
        Self {
            answer,
            queries: Arc::default(),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisibilityProbe for StubProbe {
    async fn visibility(&self) -> Visibility {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Records commit requests instead of running git
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingCommitter {
    pub commits: Arc<Mutex<Vec<PathBuf>>>,
    pub amends: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl RecordingCommitter {
    pub fn commits(&self) -> usize {
        self.commits.lock().unwrap().len()
    }

    pub fn amends(&self) -> usize {
        self.amends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitDriver for RecordingCommitter {
    async fn commit(&self, message_file: &Path) -> Result<()> {
        self.commits
            .lock()
            .unwrap()
            .push(message_file.to_path_buf());
        Ok(())
    }

    async fn amend(&self) -> Result<()> {
        self.amends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Collaborators wired to the given stand-ins
#[allow(dead_code)]
pub fn collaborators(
    backend: &StubBackend,
    probe: &StubProbe,
    committer: &RecordingCommitter,
) -> Collaborators {
    let backend = backend.clone();
    Collaborators {
        backends: Box::new(
            move |_: &ProviderBinding, _: &Config| -> Result<Box<dyn LlmProvider>> {
                Ok(Box::new(backend.clone()))
            },
        ),
        visibility: Box::new(probe.clone()),
        committer: Box::new(committer.clone()),
    }
}
