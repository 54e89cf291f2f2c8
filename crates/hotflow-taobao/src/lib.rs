// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the Taobao affiliate (TBK) material search API.
//!
//! [`TaobaoClient`] signs every request with the application secret,
//! decodes the response envelope, and normalizes each upstream entry into
//! an [`Item`](hotflow_core::Item). HTTP goes through the
//! [`HttpTransport`](hotflow_core::HttpTransport) capability so tests can
//! substitute a canned transport; [`ReqwestTransport`] is the production one.

pub mod client;
pub mod envelope;
pub mod normalize;
pub mod sign;
pub mod transport;

pub use client::{FetchOptions, SearchOptions, SearchResult, TaobaoClient};
pub use envelope::{ApiFailure, SearchEnvelope, SearchPage};
pub use sign::sign;
pub use transport::ReqwestTransport;
