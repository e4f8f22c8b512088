// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{LlmProvider, ensure_success, http_client, missing_key, provider_error, send_error};
use crate::config::{Config, Provider};
use crate::domain::ProviderBinding;
use crate::error::Result;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent`
pub struct GoogleProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    max_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GoogleProvider {
    pub fn new(binding: &ProviderBinding, config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config
                .google_base_url
                .clone()
                .unwrap_or_else(|| BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: binding.model.clone(),
            api_key: config.api_key_for(Provider::Google),
            max_tokens: binding.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let Some(ref api_key) = self.api_key else {
            return Err(missing_key(Provider::Google));
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&GenerateRequest {
                contents: vec![Content {
                    role: "user",
                    parts: vec![Part { text: prompt }],
                }],
                generation_config: GenerationConfig {
                    max_output_tokens: self.max_tokens,
                },
            })
            .send()
            .await
            .map_err(|e| send_error("google", &e))?;

        let response = ensure_success("google", response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| provider_error("google", format!("malformed response: {e}")))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(provider_error("google", "response contained no text"));
        }
        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "google"
    }
}
