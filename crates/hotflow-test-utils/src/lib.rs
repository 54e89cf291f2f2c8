// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for HotFlow integration tests.
//!
//! Provides mock adapters and fixtures for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock chat provider with pre-configured replies
//! - [`MockTransport`] - Mock HTTP transport serving queued JSON payloads
//! - [`fixtures`] - Sample items and affiliate API payloads

pub mod fixtures;
pub mod mock_provider;
pub mod mock_transport;

pub use mock_provider::MockProvider;
pub use mock_transport::{MockTransport, RecordedRequest};
