// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hotflow fetch` command implementation.

use std::time::Duration;

use clap::Args;
use hotflow_config::Settings;
use hotflow_core::{HotflowError, StorageAdapter};
use hotflow_taobao::{FetchOptions, SearchOptions, TaobaoClient};

use crate::pipeline::fetch_and_store;
use crate::storage::open_storage;

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Number of pages to fetch for each keyword.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Number of items per page.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Delay between page requests in seconds.
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Include items without coupons in the search.
    #[arg(long)]
    pub include_no_coupon: bool,

    /// Sort order used by the API.
    #[arg(long, default_value = hotflow_taobao::client::DEFAULT_SORT)]
    pub sort: String,
}

impl FetchArgs {
    pub fn fetch_options(&self) -> Result<FetchOptions, HotflowError> {
        let delay = Duration::try_from_secs_f64(self.delay).map_err(|_| {
            HotflowError::Config(format!(
                "--delay must be a non-negative number of seconds, got {}",
                self.delay
            ))
        })?;
        Ok(FetchOptions {
            pages: self.pages,
            page_size: self.page_size,
            delay,
            search: SearchOptions {
                sort: Some(self.sort.clone()).filter(|s| !s.trim().is_empty()),
                has_coupon: !self.include_no_coupon,
                ..SearchOptions::default()
            },
        })
    }
}

/// Run the `hotflow fetch` command.
pub async fn run_fetch(settings: &Settings, args: &FetchArgs) -> Result<(), HotflowError> {
    let options = args.fetch_options()?;
    let client = TaobaoClient::from_settings(&settings.taobao)?;
    let storage = open_storage(settings).await?;

    let total = fetch_and_store(&client, &storage, &settings.keywords, &options).await?;
    storage.close().await?;

    println!(
        "Stored {total} items for {} keyword(s).",
        settings.keywords.len()
    );
    Ok(())
}
