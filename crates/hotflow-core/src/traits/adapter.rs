// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all adapters implement.

use crate::types::AdapterType;

/// The base trait for all HotFlow adapters.
///
/// Provides identity so that log lines and errors can name the concrete
/// implementation behind a trait object.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the type of adapter (transport, provider, storage).
    fn adapter_type(&self) -> AdapterType;
}
