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

//! Query parameters: typed values, whitelist filtering and URL encoding

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded::byte_serialize;

/// A single query-string value as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
}

impl ParamValue {
  /// Empty string, zero and `false` are never transmitted.
  ///
  /// This means the API's own falsy default cannot be requested explicitly
  /// (`skip_invalid=false`, `start=0`); those values are dropped by
  /// [`filter_params`] and the server default applies.
  pub fn is_falsy(&self) -> bool {
    match self {
      ParamValue::Bool(b) => !b,
      ParamValue::Int(i) => *i == 0,
      ParamValue::Float(f) => *f == 0.0,
      ParamValue::Str(s) => s.is_empty(),
    }
  }
}

impl fmt::Display for ParamValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParamValue::Bool(b) => write!(f, "{}", b),
      ParamValue::Int(i) => write!(f, "{}", i),
      ParamValue::Float(v) => write!(f, "{}", v),
      ParamValue::Str(s) => f.write_str(s),
    }
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    ParamValue::Str(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    ParamValue::Str(value)
  }
}

impl From<&String> for ParamValue {
  fn from(value: &String) -> Self {
    ParamValue::Str(value.clone())
  }
}

impl From<bool> for ParamValue {
  fn from(value: bool) -> Self {
    ParamValue::Bool(value)
  }
}

impl From<f64> for ParamValue {
  fn from(value: f64) -> Self {
    ParamValue::Float(value)
  }
}

macro_rules! impl_from_int {
  ($($t:ty),*) => {
    $(
      impl From<$t> for ParamValue {
        fn from(value: $t) -> Self {
          ParamValue::Int(i64::from(value))
        }
      }
    )*
  };
}

// Values past i64::MAX are sent as their decimal text
macro_rules! impl_from_wide_int {
  ($($t:ty),*) => {
    $(
      impl From<$t> for ParamValue {
        fn from(value: $t) -> Self {
          i64::try_from(value).map(ParamValue::Int).unwrap_or_else(|_| ParamValue::Str(value.to_string()))
        }
      }
    )*
  };
}

impl_from_int!(i32, i64, u32);
impl_from_wide_int!(u64, usize);

/// Caller-supplied parameters, name -> value.
///
/// Ordered so that the encoded query string is stable between runs.
pub type QueryParams = BTreeMap<String, ParamValue>;

/// Build a [`QueryParams`] map from `name => value` pairs
///
/// ```
/// use cmc_core::query_params;
/// let params = query_params! { "start" => 1, "limit" => 100, "convert" => "USD" };
/// assert_eq!(params.len(), 3);
/// ```
#[macro_export]
macro_rules! query_params {
  () => { $crate::params::QueryParams::new() };
  ($($key:expr => $value:expr),+ $(,)?) => {{
    let mut params = $crate::params::QueryParams::new();
    $(
      params.insert($key.to_string(), $crate::params::ParamValue::from($value));
    )+
    params
  }};
}

/// Keep only whitelisted, non-falsy entries
pub fn filter_params(accepted: &[&str], given: &QueryParams) -> QueryParams {
  given
    .iter()
    .filter(|(key, value)| accepted.contains(&key.as_str()) && !value.is_falsy())
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

/// Form-encode the parameters, leaving `,` and `"` readable
pub fn encode_query(params: &QueryParams) -> String {
  params
    .iter()
    .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(&value.to_string())))
    .collect::<Vec<_>>()
    .join("&")
}

fn encode_component(raw: &str) -> String {
  byte_serialize(raw.as_bytes()).collect::<String>().replace("%2C", ",").replace("%22", "\"")
}

#[cfg(test)]
mod tests {
  use super::*;

  const ID_MAP: &[&str] = &["listing_status", "start", "limit", "sort", "symbol", "aux"];

  #[test]
  fn test_filter_drops_unknown_keys() {
    let given = query_params! { "start" => 1, "limit" => 1000, "sort" => "cmc_rank", "bogus" => "x" };
    let filtered = filter_params(ID_MAP, &given);
    assert_eq!(filtered, query_params! { "start" => 1, "limit" => 1000, "sort" => "cmc_rank" });
  }

  #[test]
  fn test_filter_drops_falsy_values() {
    let given = query_params! {
      "start" => 0,
      "symbol" => "",
      "aux" => "platform",
      "limit" => 5,
    };
    let filtered = filter_params(ID_MAP, &given);
    assert_eq!(filtered.keys().cloned().collect::<Vec<_>>(), vec!["aux", "limit"]);
    assert!(filtered.values().all(|v| !v.is_falsy()));

    let quotes = query_params! { "id" => "1", "skip_invalid" => false };
    let filtered = filter_params(&["id", "skip_invalid"], &quotes);
    assert!(!filtered.contains_key("skip_invalid"));
  }

  #[test]
  fn test_filter_output_is_subset_of_accepted() {
    let given = query_params! { "a" => 1, "b" => true, "c" => 0.5, "start" => 3 };
    for key in filter_params(ID_MAP, &given).keys() {
      assert!(ID_MAP.contains(&key.as_str()));
    }
  }

  #[test]
  fn test_encode_keeps_commas_and_quotes() {
    let params = query_params! { "id" => "1,2,1027", "symbol" => "\"BTC\"", "name" => "a b&c" };
    let encoded = encode_query(&params);
    assert_eq!(encoded, "id=1,2,1027&name=a+b%26c&symbol=\"BTC\"");
  }

  #[test]
  fn test_value_display() {
    assert_eq!(ParamValue::from(true).to_string(), "true");
    assert_eq!(ParamValue::from(10u32).to_string(), "10");
    assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
    assert_eq!(encode_query(&QueryParams::new()), "");
  }

  #[test]
  fn test_wide_ints_do_not_wrap() {
    assert_eq!(ParamValue::from(u64::MAX).to_string(), u64::MAX.to_string());
    assert_eq!(ParamValue::from(u64::MAX), ParamValue::Str("18446744073709551615".to_string()));
    assert_eq!(ParamValue::from(5000usize), ParamValue::Int(5000));
  }
}
