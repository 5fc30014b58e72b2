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

//! The `status` object CoinMarketCap attaches to every response

use serde::{Deserialize, Serialize};

/// Raw upstream status block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
  #[serde(default)]
  pub timestamp: Option<String>,

  /// 0 on success, vendor error code otherwise
  #[serde(default)]
  pub error_code: i64,

  #[serde(default)]
  pub error_message: Option<String>,

  /// Server-side processing time in ms
  #[serde(default)]
  pub elapsed: i64,

  #[serde(default)]
  pub credit_count: i64,

  #[serde(default)]
  pub notice: Option<String>,
}

impl ApiStatus {
  pub fn is_error(&self) -> bool {
    self.error_code != 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_status_defaults() {
    let status: ApiStatus = serde_json::from_value(json!({"timestamp": "T"})).unwrap();
    assert_eq!(status.timestamp.as_deref(), Some("T"));
    assert_eq!(status.credit_count, 0);
    assert!(!status.is_error());

    let failed: ApiStatus =
      serde_json::from_value(json!({"error_code": 1001, "error_message": "This API Key is invalid."}))
        .unwrap();
    assert!(failed.is_error());
  }
}
