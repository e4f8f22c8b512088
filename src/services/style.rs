// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;
use std::sync::LazyLock;

use tracing::{debug, warn};

/// Subject and body wrap width
pub const LINE_MAX: usize = 72;

/// Repository-level style guide, looked up in the working tree root.
pub const PROJECT_GUIDE_FILE: &str = "COMMITS.md";

pub static DEFAULT_GUIDE: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"1. Craft a Clear Subject Line:
• Summarize Concisely: Begin with a brief summary ({LINE_MAX} characters max).
• Capitalize the Subject: Start the subject line with a capital letter.
• Omit Periods in Subject Line: Avoid ending with a period to save space.
• Use Imperative Mood: Phrase commands as direct actions (e.g., "Add feature" instead of "Added feature").

2. Provide a Detailed Body:
• Separate the body from the subject line with a blank line.
• Explain the Reason: Clearly articulate the rationale for the change rather than just summarizing the modification.
• Wrap Body Text at {LINE_MAX} Characters: Ensure that the body text wraps at {LINE_MAX} characters per line.

3. Reference Issues/Tickets:
• Include relevant issue numbers, ticket IDs and/or references when they are provided. Do not invent your own reference. Use what has been provided."#
    )
});

pub struct StyleGuide;

impl StyleGuide {
    /// Explicit file, then `COMMITS.md` in `dir`, then the built-in guide.
    /// Read errors fall back to the built-in guide.
    pub fn load(dir: &Path, custom: Option<&Path>) -> String {
        let path = match custom {
            Some(path) => path.to_path_buf(),
            None => {
                let project = dir.join(PROJECT_GUIDE_FILE);
                if !project.exists() {
                    return DEFAULT_GUIDE.clone();
                }
                project
            }
        };

        match std::fs::read_to_string(&path) {
            Ok(guide) => {
                debug!(path = %path.display(), "style guide loaded");
                guide
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Error reading style guide, using default");
                DEFAULT_GUIDE.clone()
            }
        }
    }
}
