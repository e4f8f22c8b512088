use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{LlmProvider, ensure_success, http_client, provider_error, send_error};
use crate::config::Config;
use crate::domain::ProviderBinding;
use crate::error::Result;

pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    pub fn new(binding: &ProviderBinding, config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            // Sanitize: remove trailing slashes to avoid //api/generate
            host: config.ollama_host.trim_end_matches('/').to_string(),
            model: binding.model.clone(),
            max_tokens: binding.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.host);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: GenerateOptions {
                    num_predict: self.max_tokens,
                },
            })
            .send()
            .await
            .map_err(|e| send_error("ollama", &e))?;

        let response = ensure_success("ollama", response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| provider_error("ollama", format!("malformed response: {e}")))?;

        Ok(body.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
