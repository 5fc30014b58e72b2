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

//! API key plan and usage from `/v1/key/info`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
  #[serde(default)]
  pub plan: Plan,
  #[serde(default)]
  pub usage: Usage,
}

/// Limits attached to the subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
  #[serde(default)]
  pub credit_limit_daily: Option<i64>,
  #[serde(default)]
  pub credit_limit_daily_reset: Option<String>,
  #[serde(default)]
  pub credit_limit_daily_reset_timestamp: Option<String>,
  #[serde(default)]
  pub credit_limit_monthly: Option<i64>,
  #[serde(default)]
  pub credit_limit_monthly_reset: Option<String>,
  #[serde(default)]
  pub credit_limit_monthly_reset_timestamp: Option<String>,
  #[serde(default)]
  pub rate_limit_minute: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
  #[serde(default)]
  pub current_minute: UsageWindow,
  #[serde(default)]
  pub current_day: UsageWindow,
  #[serde(default)]
  pub current_month: UsageWindow,
}

/// Counters for one window; the minute window counts requests, the others credits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageWindow {
  #[serde(default)]
  pub requests_made: Option<i64>,
  #[serde(default)]
  pub requests_left: Option<i64>,
  #[serde(default)]
  pub credits_used: Option<i64>,
  #[serde(default)]
  pub credits_left: Option<i64>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_key_info_usage() {
    let info: KeyInfo = serde_json::from_value(json!({
      "plan": {
        "credit_limit_monthly": 10000,
        "credit_limit_monthly_reset": "In 19 days, 6 hours, 56 minutes",
        "rate_limit_minute": 30
      },
      "usage": {
        "current_minute": {"requests_made": 1, "requests_left": 29},
        "current_day": {"credits_used": 3, "credits_left": 330},
        "current_month": {"credits_used": 120, "credits_left": 9880}
      }
    }))
    .unwrap();

    assert_eq!(info.plan.rate_limit_minute, Some(30));
    assert_eq!(info.usage.current_day.credits_left, Some(330));
    assert_eq!(info.usage.current_month.credits_used, Some(120));
    assert_eq!(info.usage.current_minute.credits_used, None);
  }
}
