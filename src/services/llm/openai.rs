// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{LlmProvider, ensure_success, http_client, missing_key, provider_error, send_error};
use crate::config::{Config, Provider};
use crate::domain::ProviderBinding;
use crate::error::Result;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// OpenAI chat completions. Mistral and LocalAI expose the same protocol
/// and are served by this client with a different base URL.
pub struct OpenAiProvider {
    client: Client,
    provider: Provider,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(binding: &ProviderBinding, config: &Config) -> Result<Self> {
        let base_url = match binding.provider {
            Provider::Mistral => config
                .mistral_base_url
                .clone()
                .unwrap_or_else(|| MISTRAL_BASE_URL.to_string()),
            Provider::LocalAi => format!("{}/v1", config.localai_host.trim_end_matches('/')),
            _ => config
                .openai_base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        };

        Ok(Self {
            client: http_client(config)?,
            provider: binding.provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: binding.model.clone(),
            api_key: config.api_key_for(binding.provider),
            max_tokens: binding.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let name = self.name();

        let mut request = self.client.post(&url).json(&ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            stream: false,
        });

        match (&self.api_key, self.provider) {
            (Some(key), _) => {
                request = request.bearer_auth(key.expose_secret());
            }
            // LocalAI runs without authentication by default
            (None, Provider::LocalAi) => {}
            (None, provider) => return Err(missing_key(provider)),
        }

        let response = request.send().await.map_err(|e| send_error(name, &e))?;
        let response = ensure_success(name, response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| provider_error(name, format!("malformed response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| provider_error(name, "response contained no message"))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }
}
