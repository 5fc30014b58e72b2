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

//! Endpoint registry: which path each operation hits and which parameters it accepts

use crate::error::{Error, Result};
use crate::params::{filter_params, QueryParams};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The CoinMarketCap operations this client supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
  // Cryptocurrency
  CryptocurrencyMap,
  CryptocurrencyListingsLatest,
  CryptocurrencyInfo,
  CryptocurrencyQuotesLatest,
  CryptocurrencyCategories,
  CryptocurrencyCategory,

  // Fiat
  FiatMap,

  // Exchange
  ExchangeMap,
  ExchangeInfo,

  // Global metrics
  GlobalMetricsQuotesLatest,

  // Tools
  PriceConversion,

  // Key
  KeyInfo,
}

impl Endpoint {
  pub const ALL: [Endpoint; 12] = [
    Endpoint::CryptocurrencyMap,
    Endpoint::CryptocurrencyListingsLatest,
    Endpoint::CryptocurrencyInfo,
    Endpoint::CryptocurrencyQuotesLatest,
    Endpoint::CryptocurrencyCategories,
    Endpoint::CryptocurrencyCategory,
    Endpoint::FiatMap,
    Endpoint::ExchangeMap,
    Endpoint::ExchangeInfo,
    Endpoint::GlobalMetricsQuotesLatest,
    Endpoint::PriceConversion,
    Endpoint::KeyInfo,
  ];

  /// Logical name used in logs, cache file names and the CLI
  pub fn name(&self) -> &'static str {
    match self {
      Endpoint::CryptocurrencyMap => "cryptocurrency_map",
      Endpoint::CryptocurrencyListingsLatest => "listings_latest",
      Endpoint::CryptocurrencyInfo => "cryptocurrency_info",
      Endpoint::CryptocurrencyQuotesLatest => "quotes_latest",
      Endpoint::CryptocurrencyCategories => "categories",
      Endpoint::CryptocurrencyCategory => "category",
      Endpoint::FiatMap => "fiat_map",
      Endpoint::ExchangeMap => "exchange_map",
      Endpoint::ExchangeInfo => "exchange_info",
      Endpoint::GlobalMetricsQuotesLatest => "global_metrics_latest",
      Endpoint::PriceConversion => "price_conversion",
      Endpoint::KeyInfo => "key_info",
    }
  }

  fn path(&self) -> &'static str {
    match self {
      Endpoint::CryptocurrencyMap => "/v1/cryptocurrency/map",
      Endpoint::CryptocurrencyListingsLatest => "/v1/cryptocurrency/listings/latest",
      Endpoint::CryptocurrencyInfo => "/v2/cryptocurrency/info",
      Endpoint::CryptocurrencyQuotesLatest => "/v2/cryptocurrency/quotes/latest",
      Endpoint::CryptocurrencyCategories => "/v1/cryptocurrency/categories",
      Endpoint::CryptocurrencyCategory => "/v1/cryptocurrency/category",
      Endpoint::FiatMap => "/v1/fiat/map",
      Endpoint::ExchangeMap => "/v1/exchange/map",
      Endpoint::ExchangeInfo => "/v1/exchange/info",
      Endpoint::GlobalMetricsQuotesLatest => "/v1/global-metrics/quotes/latest",
      Endpoint::PriceConversion => "/v1/tools/price-conversion",
      Endpoint::KeyInfo => "/v1/key/info",
    }
  }

  fn accepted_params(&self) -> &'static [&'static str] {
    match self {
      Endpoint::CryptocurrencyMap => &["listing_status", "start", "limit", "sort", "symbol", "aux"],
      Endpoint::CryptocurrencyListingsLatest => &[
        "start",
        "limit",
        "price_min",
        "price_max",
        "market_cap_min",
        "market_cap_max",
        "volume_24h_min",
        "volume_24h_max",
        "circulating_supply_min",
        "circulating_supply_max",
        "percent_change_24h_min",
        "percent_change_24h_max",
        "convert",
        "convert_id",
        "sort",
        "sort_dir",
        "cryptocurrency_type",
        "tag",
        "aux",
      ],
      Endpoint::CryptocurrencyInfo => &["id", "slug", "symbol", "address", "aux"],
      Endpoint::CryptocurrencyQuotesLatest => {
        &["id", "slug", "symbol", "convert", "convert_id", "aux", "skip_invalid"]
      }
      Endpoint::CryptocurrencyCategories => &["start", "limit", "id", "slug", "symbol"],
      Endpoint::CryptocurrencyCategory => &["id", "start", "limit", "convert", "convert_id"],
      Endpoint::FiatMap => &["start", "limit", "sort", "include_metals"],
      Endpoint::ExchangeMap => {
        &["listing_status", "slug", "start", "limit", "sort", "aux", "crypto_id"]
      }
      Endpoint::ExchangeInfo => &["id", "slug", "aux"],
      Endpoint::GlobalMetricsQuotesLatest => &["convert", "convert_id"],
      Endpoint::PriceConversion => &["amount", "id", "symbol", "time", "convert", "convert_id"],
      Endpoint::KeyInfo => &[],
    }
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Endpoint {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Endpoint::ALL
      .iter()
      .copied()
      .find(|endpoint| endpoint.name() == s)
      .ok_or_else(|| Error::UnknownEndpoint(s.to_string()))
  }
}

/// Registry entry binding an operation to its path and parameter whitelist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
  pub endpoint: Endpoint,
  pub path: &'static str,
  pub accepted_params: &'static [&'static str],
}

impl EndpointDescriptor {
  pub fn name(&self) -> &'static str {
    self.endpoint.name()
  }

  pub fn accepts(&self, param: &str) -> bool {
    self.accepted_params.contains(&param)
  }

  /// Apply this descriptor's whitelist to caller parameters
  pub fn filter(&self, given: &QueryParams) -> QueryParams {
    filter_params(self.accepted_params, given)
  }
}

/// Immutable lookup table, built once and shared by reference
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
  entries: HashMap<Endpoint, EndpointDescriptor>,
}

impl EndpointRegistry {
  /// Every endpoint the client knows about
  pub fn standard() -> Self {
    let entries = Endpoint::ALL
      .iter()
      .map(|&endpoint| {
        (
          endpoint,
          EndpointDescriptor {
            endpoint,
            path: endpoint.path(),
            accepted_params: endpoint.accepted_params(),
          },
        )
      })
      .collect();
    Self { entries }
  }

  pub fn resolve(&self, endpoint: Endpoint) -> Result<&EndpointDescriptor> {
    self.entries.get(&endpoint).ok_or_else(|| Error::UnknownEndpoint(endpoint.to_string()))
  }

  pub fn resolve_name(&self, name: &str) -> Result<&EndpointDescriptor> {
    let endpoint: Endpoint = name.parse()?;
    self.resolve(endpoint)
  }

  /// Descriptors in declaration order
  pub fn descriptors(&self) -> Vec<&EndpointDescriptor> {
    let mut all: Vec<_> = self.entries.values().collect();
    all.sort_by_key(|d| d.endpoint);
    all
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Default for EndpointRegistry {
  fn default() -> Self {
    Self::standard()
  }
}
