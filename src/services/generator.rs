// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{GenerationRequest, ProviderBinding};
use crate::error::Result;
use crate::services::llm::LlmProvider;
use crate::services::privacy::{VisibilityProbe, check_repository_privacy};
use crate::services::prompt::PromptBuilder;
use crate::services::provider::check_availability;

/// Returned for an empty diff; not an error.
pub const NO_CHANGES_MESSAGE: &str = "No changes to commit";

pub const GENERATION_ERROR_PREFIX: &str = "Error generating commit message:";

pub struct MessageGenerator<'a> {
    binding: ProviderBinding,
    backend: Box<dyn LlmProvider>,
    probe: &'a dyn VisibilityProbe,
    prompts: PromptBuilder,
}

impl<'a> MessageGenerator<'a> {
    /// Bind a backend, probing local providers for liveness first.
    pub async fn connect(
        binding: ProviderBinding,
        config: &Config,
        backend: Box<dyn LlmProvider>,
        probe: &'a dyn VisibilityProbe,
        prompts: PromptBuilder,
    ) -> Result<Self> {
        check_availability(binding.provider, config).await?;
        debug!(
            provider = %binding.provider,
            model = %binding.model,
            backend = backend.name(),
            "generator ready"
        );
        Ok(Self {
            binding,
            backend,
            probe,
            prompts,
        })
    }

    pub fn binding(&self) -> &ProviderBinding {
        &self.binding
    }

    /// At most one backend call. Backend failures come back as the message
    /// text itself; only a privacy block is an error.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        if request.diff_text.trim().is_empty() {
            return Ok(NO_CHANGES_MESSAGE.to_string());
        }

        // Nothing leaves the process before this check
        check_repository_privacy(
            self.binding.provider,
            self.binding.force_external,
            self.probe,
        )
        .await?;

        let prompt = self.prompts.build(
            &request.diff_text,
            &request.style_guide_text,
            &request.context_items,
        );

        match self.backend.chat(&prompt).await {
            Ok(message) => Ok(message.trim().to_string()),
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "generation failed");
                Ok(format!("{GENERATION_ERROR_PREFIX} {e}"))
            }
        }
    }
}
