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

//! Identifier maps: cryptocurrencies, fiat currencies and exchanges

use serde::{Deserialize, Serialize};

/// Entry from `/v1/cryptocurrency/map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdMapEntry {
  pub id: i64,
  #[serde(default)]
  pub rank: Option<i64>,
  pub name: String,
  pub symbol: String,
  pub slug: String,
  /// 1 when the asset is listed
  #[serde(default)]
  pub is_active: Option<i64>,
  #[serde(default)]
  pub first_historical_data: Option<String>,
  #[serde(default)]
  pub last_historical_data: Option<String>,
  #[serde(default)]
  pub platform: Option<TokenPlatform>,
}

/// Parent chain of a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPlatform {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub slug: String,
  #[serde(default)]
  pub token_address: Option<String>,
}

/// Entry from `/v1/fiat/map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiatEntry {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub sign: Option<String>,
  pub symbol: String,
}

/// Entry from `/v1/exchange/map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeEntry {
  pub id: i64,
  pub name: String,
  pub slug: String,
  #[serde(default)]
  pub is_active: Option<i64>,
  #[serde(default)]
  pub first_historical_data: Option<String>,
  #[serde(default)]
  pub last_historical_data: Option<String>,
}

impl IdMapEntry {
  pub fn is_active(&self) -> bool {
    self.is_active.unwrap_or(1) == 1
  }
}
