// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Providers accepted by `--provider`. LocalAI is settings-only.
pub const CLI_PROVIDERS: &[Provider] = &[
    Provider::Ollama,
    Provider::OpenAI,
    Provider::Anthropic,
    Provider::Google,
    Provider::Mistral,
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Ollama,
    OpenAI,
    Anthropic,
    Google,
    Mistral,
    LocalAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Mistral => "mistral",
            Self::LocalAi => "localai",
        }
    }

    /// Runs on this machine, so staged code never leaves it.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Ollama | Self::LocalAi)
    }

    /// Environment variable holding the API key for hosted providers.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Ollama => None,
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Google => Some("GEMINI_API_KEY"),
            Self::Mistral => Some("MISTRAL_API_KEY"),
            Self::LocalAi => Some("LOCALAI_API_KEY"),
        }
    }

    /// Parse a `--provider` value. Only the hosted providers and Ollama are
    /// selectable from the command line.
    pub fn from_cli_name(name: &str) -> Result<Self> {
        let provider: Provider = name.parse()?;
        if CLI_PROVIDERS.contains(&provider) {
            Ok(provider)
        } else {
            Err(Error::InvalidProvider(name.to_string()))
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "mistral" => Ok(Self::Mistral),
            "localai" => Ok(Self::LocalAi),
            other => Err(Error::InvalidProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit provider; inferred from the model name when unset
    #[serde(default)]
    pub provider: Option<Provider>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,

    #[serde(default = "default_localai_host")]
    pub localai_host: String,

    /// Overrides the per-provider environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Maximum tokens to generate (default 1000)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds. Unset means the HTTP client's default
    /// (no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Seconds a generated message stays reusable (default 60)
    #[serde(default = "default_recent_threshold_secs")]
    pub recent_threshold_secs: u64,

    #[serde(default)]
    pub openai_base_url: Option<String>,

    #[serde(default)]
    pub anthropic_base_url: Option<String>,

    #[serde(default)]
    pub google_base_url: Option<String>,

    #[serde(default)]
    pub mistral_base_url: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_ollama_host() -> String {
    "http://localhost:11434".into()
}
fn default_localai_host() -> String {
    "http://localhost:8080".into()
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_recent_threshold_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            model: default_model(),
            ollama_host: default_ollama_host(),
            localai_host: default_localai_host(),
            api_key: None,
            max_tokens: default_max_tokens(),
            timeout_secs: None,
            recent_threshold_secs: default_recent_threshold_secs(),
            openai_base_url: None,
            anthropic_base_url: None,
            google_base_url: None,
            mistral_base_url: None,
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli, work_dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.aigcm.toml in the working directory)
        let project_config = work_dir.join(".aigcm.toml");
        if project_config.exists() {
            figment = figment.merge(Toml::file(&project_config));
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // AIGCM_MODEL, AIGCM_PROVIDER, AIGCM_OLLAMA_HOST, ...
        figment = figment.merge(Env::prefixed("AIGCM_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "aigcm").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(provider) = cli.provider {
            self.provider = Some(provider);
        }
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        for (name, host) in [
            ("ollama_host", &self.ollama_host),
            ("localai_host", &self.localai_host),
        ] {
            let url = Url::parse(host)
                .map_err(|e| Error::Config(format!("{name} is not a valid URL ({e}): '{host}'")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "{name} must start with http:// or https://, got '{host}'"
                )));
            }
        }

        if !(1..=100_000).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 1–100000, got {}",
                self.max_tokens
            )));
        }

        if !(1..=3600).contains(&self.recent_threshold_secs) {
            return Err(Error::Config(format!(
                "recent_threshold_secs must be 1–3600, got {}",
                self.recent_threshold_secs
            )));
        }

        if let Some(secs) = self.timeout_secs {
            if !(1..=3600).contains(&secs) {
                return Err(Error::Config(format!(
                    "timeout_secs must be 1–3600, got {secs}"
                )));
            }
        }

        Ok(())
    }

    pub fn recent_threshold(&self) -> Duration {
        Duration::from_secs(self.recent_threshold_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// API key for `provider`: settings override, then the provider's
    /// environment variable, then the platform keychain.
    ///
    /// A missing key is not an error here; hosted backends report it when
    /// they are actually called.
    pub fn api_key_for(&self, provider: Provider) -> Option<SecretString> {
        if let Some(ref key) = self.api_key {
            return Some(SecretString::from(key.clone()));
        }

        let env_name = provider.api_key_env()?;
        if let Ok(key) = std::env::var(env_name) {
            if !key.is_empty() {
                return Some(SecretString::from(key));
            }
        }

        #[cfg(feature = "secure-storage")]
        if let Ok(entry) = keyring::Entry::new("aigcm", provider.as_str()) {
            match entry.get_password() {
                Ok(key) => return Some(SecretString::from(key)),
                Err(e) => tracing::debug!(%provider, error = %e, "no keychain entry"),
            }
        }

        None
    }
}
