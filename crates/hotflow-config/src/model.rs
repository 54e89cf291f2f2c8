// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs as they are read from TOML files and the environment.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Credentials are optional at this layer; their
//! presence is checked by [`crate::validation`].

use serde::{Deserialize, Deserializer, Serialize};

/// Keywords searched when neither the config nor the command line names any.
pub const DEFAULT_KEYWORDS: [&str; 5] = ["抽纸", "洗衣液", "猫粮", "狗粮", "猫砂"];

/// Top-level HotFlow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HotflowConfig {
    /// Affiliate API credentials and endpoint.
    #[serde(default)]
    pub taobao: TaobaoConfig,

    /// Relational storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Search keywords, either a TOML array or a comma-separated string.
    #[serde(default = "default_keywords", deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,

    /// Copy generation provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for HotflowConfig {
    fn default() -> Self {
        Self {
            taobao: TaobaoConfig::default(),
            storage: StorageConfig::default(),
            keywords: default_keywords(),
            llm: LlmConfig::default(),
        }
    }
}

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Affiliate API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaobaoConfig {
    /// Public application key (`TB_APP_KEY`).
    #[serde(default, deserialize_with = "opt_string_like")]
    pub app_key: Option<String>,

    /// Shared signing secret (`TB_APP_SECRET`).
    #[serde(default, deserialize_with = "opt_string_like")]
    pub app_secret: Option<String>,

    /// Ad-zone identifier (`TB_ADZONE_ID`).
    #[serde(default, deserialize_with = "opt_string_like")]
    pub adzone_id: Option<String>,

    /// REST router endpoint (`TB_ENDPOINT`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for TaobaoConfig {
    fn default() -> Self {
        Self {
            app_key: None,
            app_secret: None,
            adzone_id: None,
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    "https://eco.taobao.com/router/rest".to_string()
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Connection string (`HOTFLOW_DATABASE_URL`), e.g. `sqlite://hotflow.db`.
    #[serde(default)]
    pub database_url: Option<String>,
}

/// LLM provider selection plus per-provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Selected provider key (`HOTFLOW_COPY_PROVIDER`): `openai` or `deepseek`.
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub openai: ProviderConfig,

    #[serde(default)]
    pub deepseek: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            openai: ProviderConfig::default(),
            deepseek: ProviderConfig::default(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

/// Settings for one OpenAI-compatible provider. Absent values fall back to
/// the provider's defaults during resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default, deserialize_with = "opt_string_like")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub base_url: Option<String>,
}

/// Environment values are parsed by figment, so an all-digit app key arrives
/// as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringLike {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl StringLike {
    fn into_string(self) -> String {
        match self {
            StringLike::Str(s) => s,
            StringLike::Int(n) => n.to_string(),
            StringLike::UInt(n) => n.to_string(),
            StringLike::Float(n) => n.to_string(),
        }
    }
}

fn opt_string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringLike>::deserialize(deserializer)?.map(StringLike::into_string))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordList {
    List(Vec<String>),
    Csv(String),
}

/// Accepts `["a", "b"]` or `"a, b"`; blank entries are dropped and an empty
/// result falls back to [`DEFAULT_KEYWORDS`].
fn keyword_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match KeywordList::deserialize(deserializer)? {
        KeywordList::List(list) => list,
        KeywordList::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(normalize_keywords(raw))
}

/// Trims keywords, drops blanks, and substitutes the defaults for an empty list.
pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keywords: Vec<String> = raw
        .into_iter()
        .map(|k| k.as_ref().trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        default_keywords()
    } else {
        keywords
    }
}
