// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for HotFlow.
//!
//! This crate provides the trait definitions, error type, and domain types
//! used throughout the workspace. Every adapter implements traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HotflowError;
pub use types::{
    AdapterType, ChatMessage, ChatRequest, ChatResponse, Creative, Item, ItemQuery, NewCreative,
};

pub use traits::{ChatProvider, HttpTransport, PluginAdapter, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotflow_error_displays_upstream_code() {
        let err = HotflowError::Api {
            code: "15".into(),
            message: "Remote service error".into(),
            sub_code: Some("isv.invalid-parameter".into()),
            sub_message: None,
        };
        assert_eq!(
            err.to_string(),
            "affiliate API error 15: Remote service error"
        );
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Transport,
            AdapterType::Provider,
            AdapterType::Storage,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn creative_new_assigns_unique_ids() {
        let parts = || NewCreative {
            item_id: 7,
            platform: "weibo",
            variant: 1,
            content: "copy".into(),
            prompt: "prompt",
            model: "gpt-4o-mini",
            temperature: 0.7,
            provider: "openai",
            metadata: serde_json::json!({}),
        };
        let a = Creative::new(parts());
        let b = Creative::new(parts());

        assert_ne!(a.creative_id, b.creative_id);
        assert_eq!(a.creative_id.len(), 32);
        assert_eq!(a.platform, "weibo");
        assert_eq!(a.variant, 1);
    }

    #[test]
    fn item_new_defaults_optional_fields_to_absent() {
        let item = Item::new(1, "猫粮", "优质猫粮");
        assert!(item.price.is_none());
        assert!(item.tags.is_empty());
        assert!(item.raw.is_empty());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_chat<T: ChatProvider>() {}
        fn _assert_transport<T: HttpTransport>() {}
        fn _assert_storage<T: StorageAdapter>() {}
    }
}
