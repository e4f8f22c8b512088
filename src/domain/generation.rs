// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::time::SystemTime;

use crate::config::Provider;

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub diff_text: String,
    pub style_guide_text: String,
    pub context_items: Vec<String>,
}

/// Concrete backend selection for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderBinding {
    pub model: String,
    pub provider: Provider,
    pub max_tokens: u32,
    pub force_external: bool,
}

/// Last generated message as read back from the sentinel file.
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub text: String,
    pub stored_at: SystemTime,
}
