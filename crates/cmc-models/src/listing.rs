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

//! Listings and quotes: the records that end up in the `prices` table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cryptocurrency from `/v1/cryptocurrency/listings/latest` or a quotes lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub slug: String,

  #[serde(default)]
  pub cmc_rank: Option<i64>,

  #[serde(default)]
  pub num_market_pairs: Option<i64>,

  #[serde(default)]
  pub date_added: Option<String>,

  #[serde(default)]
  pub tags: Vec<String>,

  #[serde(default)]
  pub max_supply: Option<f64>,

  #[serde(default)]
  pub circulating_supply: Option<f64>,

  #[serde(default)]
  pub total_supply: Option<f64>,

  /// Vendor timestamp of the last price refresh
  #[serde(default)]
  pub last_updated: Option<String>,

  /// Quotes keyed by convert currency (`USD` unless asked otherwise)
  #[serde(default)]
  pub quote: BTreeMap<String, Quote>,
}

/// Market quote in one currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub volume_24h: Option<f64>,
  #[serde(default)]
  pub volume_change_24h: Option<f64>,
  #[serde(default)]
  pub percent_change_1h: Option<f64>,
  #[serde(default)]
  pub percent_change_24h: Option<f64>,
  #[serde(default)]
  pub percent_change_7d: Option<f64>,
  #[serde(default)]
  pub percent_change_30d: Option<f64>,
  #[serde(default)]
  pub percent_change_60d: Option<f64>,
  #[serde(default)]
  pub percent_change_90d: Option<f64>,
  #[serde(default)]
  pub market_cap: Option<f64>,
  #[serde(default)]
  pub market_cap_dominance: Option<f64>,
  #[serde(default)]
  pub fully_diluted_market_cap: Option<f64>,
  #[serde(default)]
  pub last_updated: Option<String>,
}

impl PriceRecord {
  pub fn usd(&self) -> Option<&Quote> {
    self.quote.get("USD")
  }

  /// Quote in `currency`; never substitutes another currency
  pub fn quote_in(&self, currency: &str) -> Option<&Quote> {
    self.quote.get(currency)
  }
}

/// Comma-joined ids, the form `id=` parameters expect
pub fn join_ids<I>(ids: I) -> String
where
  I: IntoIterator<Item = i64>,
{
  ids.into_iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}
