// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport trait used by the affiliate API client.

use async_trait::async_trait;

use crate::error::HotflowError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for issuing query-string GET requests that answer with JSON.
///
/// The production implementation is reqwest-based; tests substitute a
/// scripted transport.
#[async_trait]
pub trait HttpTransport: PluginAdapter {
    /// Sends `GET url?query` and decodes the response body as JSON.
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, HotflowError>;
}
