// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketing copy generation for affiliate items.
//!
//! [`build_prompt`] renders an item into the instruction sent to the model,
//! [`parse_reply`] turns the model's reply into per-platform texts, and
//! [`CopyWriter`] ties both to a [`ChatProvider`](hotflow_core::ChatProvider).

pub mod parse;
pub mod prompt;
pub mod writer;

pub use parse::{parse_reply, ParsedReply};
pub use prompt::{
    build_prompt, derive_features, format_price, format_sales, platform_label, DEFAULT_PLATFORMS,
};
pub use writer::{CopyWriter, GenerateOptions};
