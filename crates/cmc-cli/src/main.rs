/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cmc_client::CoinMarketCapClient;
use cmc_loaders::{CacheConfig, LoaderConfig, LoaderContext};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{fetch::FetchCommand, info::InfoArgs, prices::PricesArgs};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cmc")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  #[command(flatten)]
  global: GlobalArgs,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
  /// Verbose output
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Use the sandbox API host
  #[arg(long, global = true)]
  pub sandbox: bool,

  /// Neither read nor write the JSON file cache
  #[arg(long, global = true)]
  pub no_cache: bool,

  /// Skip cache reads but still write fresh files
  #[arg(long, global = true)]
  pub force_refresh: bool,

  /// Treat unstamped cache files younger than this as fresh
  #[arg(long, global = true, value_name = "HOURS", value_parser = clap::value_parser!(i64).range(0..))]
  pub max_age_hours: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Call one endpoint and print the normalized envelope
  Fetch(FetchCommand),

  /// Load latest listings into the price table
  Prices(PricesArgs),

  /// Load coin metadata for every id in the price table
  Info(InfoArgs),

  /// Print the comma-joined list of coin ids
  Ids,

  /// Refresh and print credit usage
  Credits,

  /// List the known endpoints
  Endpoints,
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  let cli = Cli::parse();

  let log_level = if cli.global.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let config = config::Config::from_env(cli.global.sandbox)?;
  let client = Arc::new(CoinMarketCapClient::new(config.api_config.clone()).context("Failed to build API client")?);
  let context = LoaderContext::new(client, LoaderConfig::default())
    .with_cache(cache_config(&cli.global, &config))
    .with_database_url(config.database_url.clone());

  match cli.command {
    Commands::Fetch(cmd) => commands::fetch::execute(cmd, &context).await,
    Commands::Prices(args) => commands::prices::execute(args, &context).await,
    Commands::Info(args) => commands::info::execute(args, &context).await,
    Commands::Ids => commands::ids::execute(&context).await,
    Commands::Credits => commands::credits::execute(&context, &config).await,
    Commands::Endpoints => commands::endpoints::execute(&context),
  }
}

fn cache_config(global: &GlobalArgs, config: &config::Config) -> CacheConfig {
  let cache = CacheConfig::default()
    .with_directory(&config.json_dir)
    .with_enabled(!global.no_cache)
    .with_force_refresh(global.force_refresh);
  match global.max_age_hours {
    Some(hours) => cache.with_max_age_hours(hours),
    None => cache,
  }
}
