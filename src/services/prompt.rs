// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Character budget for the diff section. A rough proxy for the model's
/// context window; no tokenizer is involved.
pub const MAX_DIFF_CHARS: usize = 4_000;

pub const TRUNCATION_MARKER: &str = "\n...[diff truncated]";

/// Prefix marking a context item as a file reference
pub const FILE_SIGIL: char = '@';

const PREAMBLE: &str = "Generate a commit message for the git diff that follows these instructions.
Do not wrap your response in a code block.
Follow these style guidelines when constructing your response:";

pub struct PromptBuilder {
    base_dir: PathBuf,
}

impl PromptBuilder {
    /// Relative `@file` references resolve against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Preamble, style guide, context, diff; one blank line between sections.
    /// The context section is left out when there is none.
    pub fn build(&self, diff: &str, style_guide: &str, context: &[String]) -> String {
        let diff = truncate_diff(diff);
        let context = self.expand_context(context);

        let mut sections = vec![format!("{PREAMBLE}\n{}", style_guide.trim_end())];
        if !context.is_empty() {
            sections.push(context.join("\n"));
        }
        sections.push(format!("Git diff:\n{diff}"));

        let prompt = sections.join("\n\n");
        debug!(prompt_chars = prompt.chars().count(), "prompt built");
        prompt
    }

    pub fn expand_context(&self, items: &[String]) -> Vec<String> {
        items.iter().map(|item| self.expand_item(item)).collect()
    }

    fn expand_item(&self, item: &str) -> String {
        let Some(reference) = item.strip_prefix(FILE_SIGIL) else {
            return item.to_string();
        };

        let path = self.resolve(Path::new(reference));
        match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read context file");
                format!("Could not read {reference}")
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Keep the first `MAX_DIFF_CHARS` characters and mark the cut.
pub fn truncate_diff(diff: &str) -> String {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((cut, _)) => {
            debug!(
                chars = diff.chars().count(),
                limit = MAX_DIFF_CHARS,
                "diff truncated"
            );
            format!("{}{TRUNCATION_MARKER}", &diff[..cut])
        }
        None => diff.to_string(),
    }
}
