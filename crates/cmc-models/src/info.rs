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

//! Static coin metadata from `/v2/cryptocurrency/info`

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  pub slug: String,
  #[serde(default)]
  pub logo: Option<String>,
  #[serde(default)]
  pub subreddit: Option<String>,
  #[serde(default)]
  pub notice: Option<String>,

  /// `{website: [...], twitter: [...], ...}`
  #[serde(default)]
  pub urls: Value,

  #[serde(default)]
  pub platform: Value,

  #[serde(default)]
  pub twitter_username: Option<String>,

  #[serde(default)]
  pub date_launched: Option<String>,

  #[serde(default)]
  pub contract_address: Value,

  #[serde(default)]
  pub status: Option<String>,
}

impl CoinInfo {
  /// Compact JSON text for the nested fields stored as TEXT columns
  pub fn urls_text(&self) -> Option<String> {
    json_text(&self.urls)
  }

  pub fn platform_text(&self) -> Option<String> {
    json_text(&self.platform)
  }

  pub fn contract_address_text(&self) -> Option<String> {
    json_text(&self.contract_address)
  }
}

fn json_text(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_info_nested_fields_as_text() {
    let info: CoinInfo = serde_json::from_value(json!({
      "id": 1,
      "name": "Bitcoin",
      "symbol": "BTC",
      "category": "coin",
      "slug": "bitcoin",
      "logo": "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png",
      "subreddit": "bitcoin",
      "notice": "",
      "urls": {"website": ["https://bitcoin.org/"]},
      "platform": null,
      "date_launched": null,
      "contract_address": []
    }))
    .unwrap();

    assert_eq!(info.urls_text().unwrap(), r#"{"website":["https://bitcoin.org/"]}"#);
    assert!(info.platform_text().is_none());
    assert_eq!(info.contract_address_text().as_deref(), Some("[]"));
    assert!(info.status.is_none());
  }
}
