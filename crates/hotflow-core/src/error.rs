// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for HotFlow.

use thiserror::Error;

/// The primary error type used across all HotFlow adapters and operations.
#[derive(Debug, Error)]
pub enum HotflowError {
    /// Configuration errors (missing credentials, malformed values, unknown provider).
    #[error("configuration error: {0}")]
    Config(String),

    /// The affiliate API answered with an `error_response` envelope.
    #[error("affiliate API error {code}: {message}")]
    Api {
        code: String,
        message: String,
        sub_code: Option<String>,
        sub_message: Option<String>,
    },

    /// HTTP transport errors (connection failure, timeout, non-2xx status, undecodable body).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// LLM provider errors (API failure, malformed completion payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// JSON (de)serialization of persisted payloads.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HotflowError {
    /// Shorthand for a transport error without an underlying source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }
}
