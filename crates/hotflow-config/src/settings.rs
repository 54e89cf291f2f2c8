// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved, immutable application settings.
//!
//! [`Settings`] is built once at startup from a validated [`HotflowConfig`]
//! plus command-line overrides and passed by reference to every component.

use hotflow_core::HotflowError;
use secrecy::SecretString;
use strum::{Display, EnumString};

use crate::model::{normalize_keywords, HotflowConfig, ProviderConfig};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Supported OpenAI-compatible copy providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LlmProvider {
    #[strum(serialize = "openai")]
    OpenAi,
    #[strum(serialize = "deepseek")]
    DeepSeek,
}

impl LlmProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => DEFAULT_OPENAI_MODEL,
            LlmProvider::DeepSeek => DEFAULT_DEEPSEEK_MODEL,
        }
    }

    /// Base URL used when none is configured. `None` means the client default.
    pub fn default_base_url(self) -> Option<&'static str> {
        match self {
            LlmProvider::OpenAi => None,
            LlmProvider::DeepSeek => Some(DEFAULT_DEEPSEEK_BASE_URL),
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

/// Runtime overrides layered on top of files and environment, usually from CLI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub database_url: Option<String>,
    pub keywords: Vec<String>,
    pub copy_provider: Option<String>,
    pub llm_model: Option<String>,
    pub llm_temperature: Option<f64>,
    pub llm_base_url: Option<String>,
    pub llm_api_key: Option<String>,
}

impl SettingsOverrides {
    /// Write the overrides into a loaded config so validation sees the final values.
    ///
    /// LLM overrides land in the section of the provider that ends up selected.
    pub fn apply(&self, config: &mut HotflowConfig) {
        if let Some(url) = &self.database_url {
            config.storage.database_url = Some(url.clone());
        }
        if !self.keywords.is_empty() {
            config.keywords = normalize_keywords(&self.keywords);
        }
        if let Some(provider) = &self.copy_provider {
            config.llm.provider = provider.clone();
        }

        let section = match LlmProvider::from_str_lossy(&config.llm.provider) {
            Some(LlmProvider::DeepSeek) => &mut config.llm.deepseek,
            _ => &mut config.llm.openai,
        };
        if let Some(model) = &self.llm_model {
            section.model = Some(model.clone());
        }
        if let Some(temperature) = self.llm_temperature {
            section.temperature = Some(temperature);
        }
        if let Some(base_url) = &self.llm_base_url {
            section.base_url = Some(base_url.clone());
        }
        if let Some(api_key) = &self.llm_api_key {
            section.api_key = Some(api_key.clone());
        }
    }
}

impl LlmProvider {
    fn from_str_lossy(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Affiliate API credentials.
#[derive(Debug)]
pub struct TaobaoSettings {
    pub app_key: String,
    pub app_secret: SecretString,
    pub adzone_id: String,
    pub endpoint: String,
}

/// Credentials and sampling settings for the selected copy provider.
#[derive(Debug)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: SecretString,
    pub model: String,
    pub temperature: f64,
    pub base_url: Option<String>,
}

/// Application-wide settings.
#[derive(Debug)]
pub struct Settings {
    pub taobao: TaobaoSettings,
    pub database_url: String,
    pub keywords: Vec<String>,
    /// `None` when the selected provider has no API key configured.
    pub llm: Option<LlmSettings>,
}

impl Settings {
    /// Build settings from a config that already passed validation.
    pub fn from_config(config: HotflowConfig) -> Result<Self, HotflowError> {
        let provider = LlmProvider::from_str_lossy(&config.llm.provider).ok_or_else(|| {
            HotflowError::Config(format!(
                "unsupported copy provider `{}`",
                config.llm.provider
            ))
        })?;
        let section = match provider {
            LlmProvider::OpenAi => config.llm.openai,
            LlmProvider::DeepSeek => config.llm.deepseek,
        };

        Ok(Self {
            taobao: TaobaoSettings {
                app_key: required(config.taobao.app_key, "TB_APP_KEY")?,
                app_secret: SecretString::from(required(
                    config.taobao.app_secret,
                    "TB_APP_SECRET",
                )?),
                adzone_id: required(config.taobao.adzone_id, "TB_ADZONE_ID")?,
                endpoint: config.taobao.endpoint,
            },
            database_url: required(config.storage.database_url, "HOTFLOW_DATABASE_URL")?,
            keywords: normalize_keywords(&config.keywords),
            llm: resolve_llm(provider, section),
        })
    }

    /// The LLM settings, or a configuration error naming the missing key.
    pub fn require_llm(&self) -> Result<&LlmSettings, HotflowError> {
        self.llm.as_ref().ok_or_else(|| {
            HotflowError::Config(
                "LLM credentials are required for this action. Set OPENAI_API_KEY \
                 (or DEEPSEEK_API_KEY with HOTFLOW_COPY_PROVIDER=deepseek) in the environment."
                    .to_string(),
            )
        })
    }
}

fn required(value: Option<String>, env: &str) -> Result<String, HotflowError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HotflowError::Config(format!("{env} is required")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn resolve_llm(provider: LlmProvider, section: ProviderConfig) -> Option<LlmSettings> {
    let api_key = non_blank(section.api_key)?;
    Some(LlmSettings {
        provider,
        api_key: SecretString::from(api_key),
        model: non_blank(section.model).unwrap_or_else(|| provider.default_model().to_string()),
        temperature: section.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        base_url: non_blank(section.base_url)
            .or_else(|| provider.default_base_url().map(str::to_string)),
    })
}
