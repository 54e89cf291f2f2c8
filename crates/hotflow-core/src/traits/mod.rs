// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait; the async ones use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod chat;
pub mod storage;
pub mod transport;

pub use adapter::PluginAdapter;
pub use chat::ChatProvider;
pub use storage::StorageAdapter;
pub use transport::HttpTransport;
