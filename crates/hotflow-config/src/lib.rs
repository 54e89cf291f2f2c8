// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the HotFlow toolkit.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use hotflow_config::{load_settings, SettingsOverrides};
//!
//! let settings = load_settings(None, &SettingsOverrides::default()).expect("config errors");
//! println!("database: {}", settings.database_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod settings;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_str, LOCAL_CONFIG_FILE};
pub use model::{HotflowConfig, DEFAULT_KEYWORDS};
pub use settings::{LlmProvider, LlmSettings, Settings, SettingsOverrides, TaobaoSettings};

/// Load configuration from the file hierarchy and environment, apply
/// overrides, validate, and resolve the final [`Settings`].
///
/// `config_path` replaces `./hotflow.toml` when given.
pub fn load_settings(
    config_path: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, Vec<ConfigError>> {
    match loader::load_config(config_path) {
        Ok(config) => resolve(config, overrides),
        Err(err) => {
            let toml_sources = collect_toml_sources(config_path);
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Same as [`load_settings`] but reads only the given TOML string.
pub fn load_settings_from_str(
    toml_content: &str,
    overrides: &SettingsOverrides,
) -> Result<Settings, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => resolve(config, overrides),
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn resolve(
    mut config: HotflowConfig,
    overrides: &SettingsOverrides,
) -> Result<Settings, Vec<ConfigError>> {
    overrides.apply(&mut config);
    validation::validate_config(&config)?;
    let settings =
        Settings::from_config(config).map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    tracing::debug!(
        keywords = settings.keywords.len(),
        llm = settings.llm.is_some(),
        "configuration loaded"
    );
    Ok(settings)
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(config_path: Option<&Path>) -> Vec<(String, String)> {
    let local = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    let local = std::path::absolute(&local).unwrap_or(local);

    [Some(local), loader::user_config_path()]
        .into_iter()
        .flatten()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
