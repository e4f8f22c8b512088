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

const BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl AnthropicProvider {
    pub fn new(binding: &ProviderBinding, config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config
                .anthropic_base_url
                .clone()
                .unwrap_or_else(|| BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: binding.model.clone(),
            api_key: config.api_key_for(Provider::Anthropic),
            max_tokens: binding.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let Some(ref api_key) = self.api_key else {
            return Err(missing_key(Provider::Anthropic));
        };

        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model: &self.model,
                messages: vec![Message {
                    role: "user",
                    content: prompt,
                }],
                max_tokens: self.max_tokens,
            })
            .send()
            .await
            .map_err(|e| send_error("anthropic", &e))?;

        let response = ensure_success("anthropic", response).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| provider_error("anthropic", format!("malformed response: {e}")))?;

        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.trim().is_empty() {
            return Err(provider_error("anthropic", "response contained no text"));
        }
        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
