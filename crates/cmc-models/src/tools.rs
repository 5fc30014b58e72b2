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

//! Price conversion results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of `/v1/tools/price-conversion`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConversion {
  pub id: i64,
  pub symbol: String,
  pub name: String,
  pub amount: f64,
  #[serde(default)]
  pub last_updated: Option<String>,
  #[serde(default)]
  pub quote: BTreeMap<String, ConvertedQuote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedQuote {
  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub last_updated: Option<String>,
}

impl PriceConversion {
  pub fn converted(&self, currency: &str) -> Option<f64> {
    self.quote.get(currency).and_then(|q| q.price)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_conversion() {
    let conversion: PriceConversion = serde_json::from_value(json!({
      "id": 1,
      "symbol": "BTC",
      "name": "Bitcoin",
      "amount": 2,
      "last_updated": "2024-03-01T12:00:00.000Z",
      "quote": {"USD": {"price": 124001.0, "last_updated": "2024-03-01T12:00:00.000Z"}}
    }))
    .unwrap();
    assert_eq!(conversion.converted("USD"), Some(124001.0));
    assert_eq!(conversion.converted("EUR"), None);
  }
}
