// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Display;

use async_trait::async_trait;
use reqwest::{Client, Response};

pub mod anthropic;
pub mod google;
pub mod ollama;
pub mod openai;

use crate::config::{Config, Provider};
use crate::domain::ProviderBinding;
use crate::error::{Error, Result};

/// Single-turn chat: one prompt in, one reply out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;
}

pub fn create_provider(binding: &ProviderBinding, config: &Config) -> Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match binding.provider {
        Provider::Ollama => Box::new(ollama::OllamaProvider::new(binding, config)?),
        Provider::OpenAI | Provider::Mistral | Provider::LocalAi => {
            Box::new(openai::OpenAiProvider::new(binding, config)?)
        }
        Provider::Anthropic => Box::new(anthropic::AnthropicProvider::new(binding, config)?),
        Provider::Google => Box::new(google::GoogleProvider::new(binding, config)?),
    };
    Ok(provider)
}

pub(crate) fn http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub(crate) fn provider_error(provider: &str, message: impl Display) -> Error {
    Error::Provider {
        provider: provider.into(),
        message: message.to_string(),
    }
}

pub(crate) fn missing_key(provider: Provider) -> Error {
    let env = provider.api_key_env().unwrap_or("AIGCM_API_KEY");
    provider_error(
        provider.as_str(),
        format!("no API key configured; set {env} or AIGCM_API_KEY"),
    )
}

/// Turn a non-2xx reply into a provider error carrying the body.
pub(crate) async fn ensure_success(provider: &str, response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(provider_error(provider, format!("HTTP {status}: {body}")))
}

pub(crate) fn send_error(provider: &str, e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        provider_error(provider, "request timed out")
    } else {
        provider_error(provider, e)
    }
}
