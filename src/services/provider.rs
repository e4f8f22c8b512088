// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::{Config, Provider};
use crate::error::{Error, Result};

/// Model-name inference, evaluated top to bottom. The first rule with a
/// matching substring wins; local runners only match once every hosted
/// family has been ruled out.
pub const INFERENCE_RULES: &[(&[&str], Provider)] = &[
    (&["gpt", "o1", "o3"], Provider::OpenAI),
    (&["claude"], Provider::Anthropic),
    (&["gemini"], Provider::Google),
    (&["mistral", "mixtral"], Provider::Mistral),
    (&["llama", "qwen", "deepseek"], Provider::Ollama),
];

/// Used when no rule matches.
pub const FALLBACK_PROVIDER: Provider = Provider::OpenAI;

pub fn resolve_provider(model: &str, explicit: Option<Provider>) -> Provider {
    if let Some(provider) = explicit {
        return provider;
    }

    let model = model.to_lowercase();
    let provider = INFERENCE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| model.contains(n)))
        .map_or(FALLBACK_PROVIDER, |(_, provider)| *provider);

    debug!(%model, %provider, "provider inferred from model name");
    provider
}

/// Liveness endpoint for providers that run on this machine.
pub fn probe_url(provider: Provider, config: &Config) -> Result<Option<Url>> {
    let (host, path) = match provider {
        Provider::Ollama => (&config.ollama_host, "api/version"),
        Provider::LocalAi => (&config.localai_host, "v1/models"),
        _ => return Ok(None),
    };

    let base = Url::parse(&format!("{}/", host.trim_end_matches('/')))
        .map_err(|e| Error::Config(format!("invalid {provider} host '{host}': {e}")))?;
    let url = base
        .join(path)
        .map_err(|e| Error::Config(format!("invalid {provider} host '{host}': {e}")))?;
    Ok(Some(url))
}

/// Single GET against the provider's liveness endpoint. Every failure mode
/// (refused, timeout, non-2xx) is reported the same way.
pub async fn check_availability(provider: Provider, config: &Config) -> Result<()> {
    let Some(url) = probe_url(provider, config)? else {
        return Ok(());
    };

    let unavailable = || Error::ProviderUnavailable {
        provider: provider.to_string(),
    };

    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    debug!(%provider, %url, "probing local provider");
    let response = client.get(url).send().await.map_err(|e| {
        debug!(%provider, error = %e, "liveness probe failed");
        unavailable()
    })?;

    if !response.status().is_success() {
        debug!(%provider, status = %response.status(), "liveness probe rejected");
        return Err(unavailable());
    }

    Ok(())
}
