// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `~/.config/hotflow/hotflow.toml` (user XDG config)
//! 3. `./hotflow.toml`, or the file given explicitly
//! 4. Environment variables (see [`ENV_KEYS`])

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HotflowConfig;

/// Local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "hotflow.toml";

/// Environment variables recognized by the loader and the config key each maps to.
pub const ENV_KEYS: &[(&str, &str)] = &[
    ("TB_APP_KEY", "taobao.app_key"),
    ("TB_APP_SECRET", "taobao.app_secret"),
    ("TB_ADZONE_ID", "taobao.adzone_id"),
    ("TB_ENDPOINT", "taobao.endpoint"),
    ("HOTFLOW_DATABASE_URL", "storage.database_url"),
    ("HOTFLOW_KEYWORDS", "keywords"),
    ("HOTFLOW_COPY_PROVIDER", "llm.provider"),
    ("OPENAI_API_KEY", "llm.openai.api_key"),
    ("OPENAI_MODEL", "llm.openai.model"),
    ("OPENAI_TEMPERATURE", "llm.openai.temperature"),
    ("OPENAI_BASE_URL", "llm.openai.base_url"),
    ("DEEPSEEK_API_KEY", "llm.deepseek.api_key"),
    ("DEEPSEEK_MODEL", "llm.deepseek.model"),
    ("DEEPSEEK_TEMPERATURE", "llm.deepseek.temperature"),
    ("DEEPSEEK_BASE_URL", "llm.deepseek.base_url"),
];

/// Path of the user-level config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hotflow").join(LOCAL_CONFIG_FILE))
}

/// Build the Figment used for config loading.
///
/// `local` replaces `./hotflow.toml` when given. Missing files are skipped.
pub fn build_figment(local: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(HotflowConfig::default()));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    let local = local
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    figment.merge(Toml::file(local)).merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config(local: Option<&Path>) -> Result<HotflowConfig, figment::Error> {
    build_figment(local).extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<HotflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HotflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Create the environment provider with an explicit variable-to-key map.
///
/// Variables are matched whole rather than split on `_`: `TB_APP_KEY` must
/// become `taobao.app_key`, and `OPENAI_BASE_URL` must become
/// `llm.openai.base_url`.
pub fn env_provider() -> Env {
    Env::raw()
        .filter(|key| config_key_for_env(key.as_str()).is_some())
        .map(|key| config_key_for_env(key.as_str()).unwrap_or_default().into())
}

/// The config key an environment variable maps to, if it is recognized.
pub fn config_key_for_env(var: &str) -> Option<&'static str> {
    ENV_KEYS
        .iter()
        .find(|(name, _)| var.eq_ignore_ascii_case(name))
        .map(|(_, path)| *path)
}

/// The environment variable that feeds a config key, if any.
pub fn env_var_for_key(key: &str) -> Option<&'static str> {
    ENV_KEYS
        .iter()
        .find(|(_, path)| *path == key)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_unique_config_keys() {
        let mut seen = std::collections::HashSet::new();
        for (var, path) in ENV_KEYS {
            assert!(seen.insert(*path), "duplicate mapping for {var}");
        }
    }

    #[test]
    fn config_key_for_env_is_case_insensitive() {
        assert_eq!(config_key_for_env("tb_app_key"), Some("taobao.app_key"));
        assert_eq!(
            config_key_for_env("OPENAI_BASE_URL"),
            Some("llm.openai.base_url")
        );
        assert_eq!(config_key_for_env("PATH"), None);
    }

    #[test]
    fn env_var_for_key_reverses_the_map() {
        assert_eq!(env_var_for_key("storage.database_url"), Some("HOTFLOW_DATABASE_URL"));
        assert_eq!(env_var_for_key("llm.openai.nope"), None);
    }

    #[test]
    fn empty_string_loads_defaults() {
        let config = load_config_from_str("").expect("empty TOML should use defaults");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.keywords.len(), 5);
    }
}
