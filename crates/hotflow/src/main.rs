// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HotFlow - affiliate product ingestion and marketing copy generation.
//!
//! This is the binary entry point.

mod fetch;
mod generate;
mod listing;
mod pipeline;
mod storage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hotflow_config::{Settings, SettingsOverrides};
use hotflow_core::HotflowError;

use crate::fetch::FetchArgs;
use crate::generate::GenerateArgs;
use crate::listing::{ListCreativesArgs, ListItemsArgs};

/// HotFlow data ingestion and creative generation toolkit.
#[derive(Parser, Debug)]
#[command(name = "hotflow", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the database URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Keyword to fetch; repeat for several. Defaults to the configured keywords.
    #[arg(long = "keyword", global = true)]
    keywords: Vec<String>,

    /// Override the LLM model for copy generation.
    #[arg(long, global = true)]
    llm_model: Option<String>,

    /// Override the LLM temperature.
    #[arg(long, global = true)]
    llm_temperature: Option<f64>,

    /// LLM provider for copy generation (openai, deepseek).
    #[arg(long, global = true)]
    copy_provider: Option<String>,

    /// Override the base URL of the copy provider.
    #[arg(long, global = true)]
    llm_base_url: Option<String>,

    /// Read this file instead of ./hotflow.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the database schema.
    InitDb,
    /// Fetch items from the affiliate API and store them.
    Fetch(FetchArgs),
    /// Generate creatives for stored items.
    GenerateCopy(GenerateArgs),
    /// List stored items.
    ListItems(ListItemsArgs),
    /// List generated creatives.
    ListCreatives(ListCreativesArgs),
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            database_url: self.database_url.clone(),
            keywords: self.keywords.clone(),
            copy_provider: self.copy_provider.clone(),
            llm_model: self.llm_model.clone(),
            llm_temperature: self.llm_temperature,
            llm_base_url: self.llm_base_url.clone(),
            llm_api_key: None,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match hotflow_config::load_settings(cli.config.as_deref(), &cli.overrides()) {
        Ok(settings) => settings,
        Err(errors) => {
            hotflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli.command, &settings).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: &Commands, settings: &Settings) -> Result<(), HotflowError> {
    match command {
        Commands::InitDb => storage::run_init_db(settings).await,
        Commands::Fetch(args) => fetch::run_fetch(settings, args).await,
        Commands::GenerateCopy(args) => generate::run_generate_copy(settings, args).await,
        Commands::ListItems(args) => listing::run_list_items(settings, args).await,
        Commands::ListCreatives(args) => listing::run_list_creatives(settings, args).await,
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hotflow={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "hotflow",
            "--keyword",
            "猫粮",
            "--keyword",
            "狗粮",
            "--copy-provider",
            "deepseek",
            "--llm-temperature",
            "0.3",
            "list-items",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.keywords, vec!["猫粮", "狗粮"]);
        assert_eq!(overrides.copy_provider.as_deref(), Some("deepseek"));
        assert_eq!(overrides.llm_temperature, Some(0.3));
        assert!(overrides.database_url.is_none());
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "hotflow",
            "fetch",
            "--pages",
            "3",
            "--database-url",
            "sqlite://other.db",
        ])
        .unwrap();
        assert_eq!(cli.database_url.as_deref(), Some("sqlite://other.db"));
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.pages, 3);
                assert_eq!(args.page_size, 50);
                assert_eq!(args.delay, 1.0);
                assert_eq!(args.sort, "total_sales_des");
                assert!(!args.include_no_coupon);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn generate_copy_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "hotflow",
            "generate-copy",
            "--item-id",
            "1",
            "--item-id",
            "2",
            "--platform",
            "weibo",
            "--variants",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::GenerateCopy(args) => {
                assert_eq!(args.item_ids, vec![1, 2]);
                assert_eq!(args.platforms, vec!["weibo"]);
                assert_eq!(args.variants, 2);
                assert!(args.limit.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_pages_is_rejected() {
        assert!(Cli::try_parse_from(["hotflow", "fetch", "--pages", "0"]).is_err());
    }
}
