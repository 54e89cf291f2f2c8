// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding of the material search response envelope.
//!
//! The router answers either `{"error_response": {...}}` or
//! `{"tbk_dg_material_optional_response": {...}}`. Missing or wrongly shaped
//! parts of a success body decode to defaults instead of failing.

use hotflow_core::HotflowError;
use serde_json::Value;

use crate::normalize::{as_text, safe_int};

const RESPONSE_KEY: &str = "tbk_dg_material_optional_response";

/// The decoded shape of one search response.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEnvelope {
    Error(ApiFailure),
    Success(SearchPage),
}

/// Contents of an `error_response` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub code: String,
    pub message: String,
    pub sub_code: Option<String>,
    pub sub_message: Option<String>,
}

/// The raw entries of one result page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub entries: Vec<Value>,
    pub total_results: Option<i64>,
}

impl SearchEnvelope {
    pub fn decode(payload: &Value) -> Self {
        if let Some(error) = payload.get("error_response") {
            let field = |name: &str| error.get(name).and_then(as_text);
            let sub_message = field("sub_msg");
            return SearchEnvelope::Error(ApiFailure {
                code: field("code").unwrap_or_else(|| "unknown".to_string()),
                message: field("msg")
                    .or_else(|| sub_message.clone())
                    .unwrap_or_else(|| "unknown error".to_string()),
                sub_code: field("sub_code"),
                sub_message,
            });
        }

        let body = payload.get(RESPONSE_KEY);
        let entries = body
            .and_then(|b| b.pointer("/result_list/map_data"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let total_results = body.and_then(|b| b.get("total_results")).and_then(safe_int);

        SearchEnvelope::Success(SearchPage {
            entries,
            total_results,
        })
    }

    /// The success page, or the upstream failure as [`HotflowError::Api`].
    pub fn into_page(self) -> Result<SearchPage, HotflowError> {
        match self {
            SearchEnvelope::Success(page) => Ok(page),
            SearchEnvelope::Error(failure) => Err(failure.into()),
        }
    }
}

impl From<ApiFailure> for HotflowError {
    fn from(failure: ApiFailure) -> Self {
        HotflowError::Api {
            code: failure.code,
            message: failure.message,
            sub_code: failure.sub_code,
            sub_message: failure.sub_message,
        }
    }
}
