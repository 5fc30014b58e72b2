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
use clap::{Args, Subcommand};
use cmc_core::{Endpoint, ParamValue, QueryParams};
use cmc_loaders::LoaderContext;
use cmc_models::Envelope;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct FetchCommand {
  #[command(subcommand)]
  command: FetchSubcommands,

  /// Also write the envelope to the JSON cache
  #[arg(long)]
  save: bool,
}

#[derive(Subcommand, Debug)]
enum FetchSubcommands {
  /// Coin id map
  Map {
    /// active, inactive or untracked
    #[arg(long)]
    listing_status: Option<String>,
    /// cmc_rank or id
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    start: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    /// Comma-separated symbols
    #[arg(long)]
    symbol: Option<String>,
  },

  /// Latest listings with market data
  Listings {
    #[arg(long, default_value_t = 1)]
    start: u32,
    #[arg(long, default_value_t = 100)]
    limit: u32,
    #[arg(long, default_value = "USD")]
    convert: String,
  },

  /// Static metadata, keyed by id
  Info {
    /// Comma-separated ids
    ids: String,
  },

  /// Latest quotes, keyed by id
  Quotes {
    /// Comma-separated ids
    ids: String,
    /// Fail on unknown ids instead of skipping them
    #[arg(long)]
    strict: bool,
    #[arg(long)]
    convert: Option<String>,
  },

  /// Category list
  Categories {
    #[arg(long, default_value_t = 1)]
    start: u32,
    #[arg(long, default_value_t = 100)]
    limit: u32,
  },

  /// One category and its coins
  Category {
    id: String,
  },

  /// Fiat currencies and precious metals
  FiatMap,

  /// Exchange id map
  ExchangeMap {
    #[arg(long, default_value = "active")]
    listing_status: String,
  },

  /// Exchange metadata, keyed by id
  ExchangeInfo {
    /// Comma-separated ids
    ids: String,
  },

  /// Global market metrics
  GlobalMetrics {
    #[arg(long)]
    convert: Option<String>,
  },

  /// Convert an amount of one coin into other currencies
  Convert {
    amount: f64,
    /// Source coin id
    id: String,
    #[arg(long)]
    convert: Option<String>,
  },

  /// Plan limits and credit usage of the API key
  KeyInfo,
}

impl FetchSubcommands {
  fn endpoint(&self) -> Endpoint {
    match self {
      FetchSubcommands::Map { .. } => Endpoint::CryptocurrencyMap,
      FetchSubcommands::Listings { .. } => Endpoint::CryptocurrencyListingsLatest,
      FetchSubcommands::Info { .. } => Endpoint::CryptocurrencyInfo,
      FetchSubcommands::Quotes { .. } => Endpoint::CryptocurrencyQuotesLatest,
      FetchSubcommands::Categories { .. } => Endpoint::CryptocurrencyCategories,
      FetchSubcommands::Category { .. } => Endpoint::CryptocurrencyCategory,
      FetchSubcommands::FiatMap => Endpoint::FiatMap,
      FetchSubcommands::ExchangeMap { .. } => Endpoint::ExchangeMap,
      FetchSubcommands::ExchangeInfo { .. } => Endpoint::ExchangeInfo,
      FetchSubcommands::GlobalMetrics { .. } => Endpoint::GlobalMetricsQuotesLatest,
      FetchSubcommands::Convert { .. } => Endpoint::PriceConversion,
      FetchSubcommands::KeyInfo => Endpoint::KeyInfo,
    }
  }
}

/// Insert `value` under `key` when present
fn set<V: Into<ParamValue>>(params: &mut QueryParams, key: &str, value: Option<V>) {
  if let Some(value) = value {
    params.insert(key.to_string(), value.into());
  }
}

pub async fn execute(cmd: FetchCommand, context: &LoaderContext) -> Result<()> {
  let endpoint = cmd.command.endpoint();
  let client = &context.client;
  let mut extra = QueryParams::new();

  let envelope: Envelope = match cmd.command {
    FetchSubcommands::Map { listing_status, sort, start, limit, symbol } => {
      set(&mut extra, "start", start);
      set(&mut extra, "limit", limit);
      set(&mut extra, "symbol", symbol);
      client.cryptocurrency().id_map(listing_status.as_deref(), sort.as_deref(), &extra).await
    }
    FetchSubcommands::Listings { start, limit, convert } => {
      set(&mut extra, "convert", Some(convert));
      client.cryptocurrency().listings_latest(start, limit, &extra).await
    }
    FetchSubcommands::Info { ids } => client.cryptocurrency().info(&ids, &extra).await,
    FetchSubcommands::Quotes { ids, strict, convert } => {
      set(&mut extra, "convert", convert);
      client.cryptocurrency().quotes_latest(&ids, !strict, &extra).await
    }
    FetchSubcommands::Categories { start, limit } => client.cryptocurrency().categories(start, limit, &extra).await,
    FetchSubcommands::Category { id } => client.cryptocurrency().category(&id, &extra).await,
    FetchSubcommands::FiatMap => client.fiat().map(&extra).await,
    FetchSubcommands::ExchangeMap { listing_status } => client.exchange().map(&listing_status, &extra).await,
    FetchSubcommands::ExchangeInfo { ids } => client.exchange().info(&ids, &extra).await,
    FetchSubcommands::GlobalMetrics { convert } => {
      set(&mut extra, "convert", convert);
      client.global_metrics().quotes_latest(&extra).await
    }
    FetchSubcommands::Convert { amount, id, convert } => {
      set(&mut extra, "convert", convert);
      client.tools().price_conversion(amount, &id, &extra).await
    }
    FetchSubcommands::KeyInfo => client.key().info().await,
  }
  .with_context(|| format!("Request to {} failed", endpoint))?;

  info!("{}: {} credits, keys [{}]", endpoint, envelope.metadata.credit_count, envelope.metadata.joined_keys());

  if cmd.save {
    match context.cache.store(endpoint.name(), &envelope)? {
      Some(path) => info!("Saved to {}", path.display()),
      None => warn!("Caching is disabled; nothing saved"),
    }
  }

  println!("{}", serde_json::to_string_pretty(&envelope)?);
  Ok(())
}
