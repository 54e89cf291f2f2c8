// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of model replies into per-platform copy texts.
//!
//! A reply that is not a JSON object is kept anyway: the whole trimmed text
//! becomes the single variant of the first requested platform.

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Texts extracted from one reply, in requested platform order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    pub platforms: Vec<(String, Vec<String>)>,
    /// The reply could not be decoded and was kept as raw text.
    pub degraded: bool,
}

impl ParsedReply {
    /// Texts for `platform`; empty when none were produced.
    pub fn texts(&self, platform: &str) -> &[String] {
        self.platforms
            .iter()
            .find(|(p, _)| p == platform)
            .map(|(_, texts)| texts.as_slice())
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.platforms.iter().map(|(_, texts)| texts.len()).sum()
    }
}

/// Strips a surrounding code fence and narrows to the outermost `{…}` span.
fn unfence(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }
    let inner = text.trim_matches('`');
    match (inner.find('{'), inner.rfind('}')) {
        (Some(start), Some(end)) if start < end => &inner[start..=end],
        _ => inner,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn extract(object: &Map<String, Value>, platform: &str, variants: usize) -> Vec<String> {
    let mut texts: Vec<String> = match object.get(platform) {
        Some(Value::Array(values)) => values
            .iter()
            .filter(|v| !v.is_null())
            .map(stringify)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => {
            debug!(platform, "platform missing or invalid in reply");
            Vec::new()
        }
    };
    texts.truncate(variants);
    texts
}

/// Splits a model reply into at most `variants` texts per platform.
pub fn parse_reply<S: AsRef<str>>(reply: &str, platforms: &[S], variants: u32) -> ParsedReply {
    let trimmed = reply.trim();
    let candidate = unfence(trimmed);

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => ParsedReply {
            platforms: platforms
                .iter()
                .map(|p| {
                    let p = p.as_ref();
                    (p.to_string(), extract(&object, p, variants as usize))
                })
                .collect(),
            degraded: false,
        },
        _ => {
            warn!("failed to parse reply as a JSON object, keeping raw text");
            let platforms = match platforms.first() {
                Some(first) if !trimmed.is_empty() => {
                    vec![(first.as_ref().to_string(), vec![trimmed.to_string()])]
                }
                _ => Vec::new(),
            };
            ParsedReply {
                platforms,
                degraded: true,
            }
        }
    }
}
