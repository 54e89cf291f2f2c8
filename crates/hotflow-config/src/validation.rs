// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: required credentials,
//! a known LLM provider, and temperatures in range.

use std::str::FromStr;

use crate::diagnostic::ConfigError;
use crate::model::{HotflowConfig, ProviderConfig};
use crate::settings::LlmProvider;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors rather than failing fast.
pub fn validate_config(config: &HotflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let required = [
        ("taobao.app_key", "TB_APP_KEY", &config.taobao.app_key),
        ("taobao.app_secret", "TB_APP_SECRET", &config.taobao.app_secret),
        ("taobao.adzone_id", "TB_ADZONE_ID", &config.taobao.adzone_id),
        (
            "storage.database_url",
            "HOTFLOW_DATABASE_URL",
            &config.storage.database_url,
        ),
    ];
    for (key, env, value) in required {
        if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
            errors.push(ConfigError::MissingKey {
                key: key.to_string(),
                env: env.to_string(),
            });
        }
    }

    if config.taobao.endpoint.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "taobao.endpoint must not be empty".to_string(),
        });
    }

    if LlmProvider::from_str(config.llm.provider.trim()).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "llm.provider `{}` is not supported; expected one of: openai, deepseek",
                config.llm.provider
            ),
        });
    }

    check_temperature("llm.openai.temperature", &config.llm.openai, &mut errors);
    check_temperature("llm.deepseek.temperature", &config.llm.deepseek, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_temperature(key: &str, provider: &ProviderConfig, errors: &mut Vec<ConfigError>) {
    if let Some(t) = provider.temperature {
        if !(0.0..=2.0).contains(&t) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be between 0.0 and 2.0, got {t}"),
            });
        }
    }
}
