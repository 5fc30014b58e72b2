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

//! Reshape raw CoinMarketCap payloads into [`Envelope`]s

use crate::transport::RawResponse;
use cmc_core::{Error, Result};
use cmc_models::{ApiStatus, Envelope, Metadata};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Layout of the `data` section, chosen per endpoint method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
  /// `data` is an array of records
  List,
  /// `data` is one record
  SingleDict,
  /// `data` maps id (or symbol) to a record
  DictOfDicts,
  /// `data.data` is the array of records
  NestedList,
}

/// Decode the body and normalize it
pub fn normalize(raw: &RawResponse, shape: ResponseShape) -> Result<Envelope> {
  let payload: Value = serde_json::from_str(&raw.body).map_err(|e| {
    warn!("Response from {} is not JSON (HTTP {}): {}", raw.url, raw.status, e);
    Error::MalformedResponse {
      reason: format!("body is not JSON (HTTP {}): {}", raw.status, e),
      status: Value::Null,
    }
  })?;
  normalize_value(payload, shape)
}

/// Normalize an already-decoded payload
pub fn normalize_value(payload: Value, shape: ResponseShape) -> Result<Envelope> {
  let mut object = match payload {
    Value::Object(object) => object,
    other => {
      return Err(malformed(format!("payload is a {}, not an object", kind(&other)), Value::Null));
    }
  };

  let status = object.remove("status").unwrap_or(Value::Null);
  let data = match object.remove("data") {
    Some(Value::Null) | None => return Err(malformed("payload has no data".to_string(), status)),
    Some(data) => data,
  };

  let api_status = read_status(&status);
  if api_status.is_error() {
    warn!(
      "Upstream reported error {} alongside data: {}",
      api_status.error_code,
      api_status.error_message.as_deref().unwrap_or("")
    );
  }

  let (data, list_keys) = match shape {
    ResponseShape::List => {
      let keys = first_keys(expect_array(&data, &status)?.first());
      (data, keys)
    }
    ResponseShape::SingleDict => {
      let keys = keys_of(expect_object(&data, &status)?);
      (data, keys)
    }
    ResponseShape::DictOfDicts => {
      let keys = match expect_object(&data, &status)?.values().next() {
        Some(Value::Array(items)) => first_keys(items.first()),
        first => first_keys(first),
      };
      (data, keys)
    }
    ResponseShape::NestedList => {
      let inner = match data {
        Value::Object(mut outer) => outer.remove("data").unwrap_or(Value::Null),
        other => {
          return Err(malformed(format!("expected nested data object, got {}", kind(&other)), status));
        }
      };
      let keys = first_keys(expect_array(&inner, &status)?.first());
      (inner, keys)
    }
  };

  debug!("Normalized {:?} response with keys [{}]", shape, list_keys.join(","));

  let metadata = Metadata {
    timestamp: api_status.timestamp.unwrap_or_default(),
    credit_count: api_status.credit_count,
    error_message: api_status.error_message,
    list_keys,
  };
  Ok(Envelope { metadata, data })
}

/// Decode the status block, keeping whichever fields are well-typed when
/// the block as a whole does not decode
fn read_status(status: &Value) -> ApiStatus {
  if status.is_null() {
    return ApiStatus::default();
  }
  match serde_json::from_value::<ApiStatus>(status.clone()) {
    Ok(api_status) => api_status,
    Err(e) => {
      warn!("Undecodable status block ({}): {}", e, status);
      ApiStatus {
        timestamp: status.get("timestamp").and_then(Value::as_str).map(str::to_string),
        error_code: status.get("error_code").and_then(Value::as_i64).unwrap_or_default(),
        error_message: status.get("error_message").and_then(Value::as_str).map(str::to_string),
        credit_count: status.get("credit_count").and_then(Value::as_i64).unwrap_or_default(),
        ..Default::default()
      }
    }
  }
}

fn malformed(reason: String, status: Value) -> Error {
  warn!("Malformed response: {}", reason);
  Error::MalformedResponse { reason, status }
}

fn expect_array<'a>(data: &'a Value, status: &Value) -> Result<&'a Vec<Value>> {
  data
    .as_array()
    .ok_or_else(|| malformed(format!("expected data array, got {}", kind(data)), status.clone()))
}

fn expect_object<'a>(data: &'a Value, status: &Value) -> Result<&'a Map<String, Value>> {
  data
    .as_object()
    .ok_or_else(|| malformed(format!("expected data object, got {}", kind(data)), status.clone()))
}

fn first_keys(value: Option<&Value>) -> Vec<String> {
  value.and_then(Value::as_object).map(keys_of).unwrap_or_default()
}

fn keys_of(object: &Map<String, Value>) -> Vec<String> {
  object.keys().cloned().collect()
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  const ALL_SHAPES: [ResponseShape; 4] = [
    ResponseShape::List,
    ResponseShape::SingleDict,
    ResponseShape::DictOfDicts,
    ResponseShape::NestedList,
  ];

  fn status() -> Value {
    json!({"timestamp": "T", "error_code": 0, "credit_count": 1, "error_message": null})
  }

  #[test]
  fn test_list_shape() {
    let payload = json!({"status": status(), "data": [{"id": 1, "name": "Bitcoin"}]});
    let envelope = normalize_value(payload, ResponseShape::List).unwrap();
    assert_eq!(envelope.metadata.timestamp, "T");
    assert_eq!(envelope.metadata.credit_count, 1);
    assert_eq!(envelope.metadata.error_message, None);
    assert_eq!(envelope.metadata.joined_keys(), "id,name");
    assert_eq!(envelope.data, json!([{"id": 1, "name": "Bitcoin"}]));
  }

  #[test]
  fn test_empty_list_has_no_keys() {
    let envelope = normalize_value(json!({"status": status(), "data": []}), ResponseShape::List).unwrap();
    assert!(envelope.metadata.list_keys.is_empty());
  }

  #[test]
  fn test_dict_of_dicts_shape() {
    let payload = json!({
      "status": status(),
      "data": {"1": {"id": 1, "symbol": "BTC"}, "1027": {"id": 1027, "symbol": "ETH"}}
    });
    let envelope = normalize_value(payload, ResponseShape::DictOfDicts).unwrap();
    assert_eq!(envelope.metadata.list_keys, vec!["id", "symbol"]);
    assert_eq!(envelope.data["1027"]["symbol"], "ETH");

    let by_symbol = json!({"status": status(), "data": {"BTC": [{"id": 1, "slug": "bitcoin"}]}});
    let envelope = normalize_value(by_symbol, ResponseShape::DictOfDicts).unwrap();
    assert_eq!(envelope.metadata.list_keys, vec!["id", "slug"]);
  }

  #[test]
  fn test_single_and_nested_shapes() {
    let single = json!({"status": status(), "data": {"plan": {}, "usage": {}}});
    let envelope = normalize_value(single, ResponseShape::SingleDict).unwrap();
    assert_eq!(envelope.metadata.list_keys, vec!["plan", "usage"]);

    let nested = json!({"status": status(), "data": {"data": [{"rank": 1, "id": 1}]}});
    let envelope = normalize_value(nested, ResponseShape::NestedList).unwrap();
    assert_eq!(envelope.metadata.list_keys, vec!["rank", "id"]);
    assert_eq!(envelope.data, json!([{"rank": 1, "id": 1}]));
  }

  #[test]
  fn test_mistyped_status_field_keeps_the_rest() {
    let odd_status = json!({"timestamp": "T", "error_code": 0, "elapsed": "10ms", "credit_count": 3});
    let envelope = normalize_value(json!({"status": odd_status, "data": []}), ResponseShape::List).unwrap();
    assert_eq!(envelope.metadata.timestamp, "T");
    assert_eq!(envelope.metadata.credit_count, 3);

    let envelope = normalize_value(json!({"data": []}), ResponseShape::List).unwrap();
    assert_eq!(envelope.metadata.timestamp, "");
  }

  #[test]
  fn test_missing_data_is_malformed_for_every_shape() {
    let error_status = json!({"error_code": 1002, "error_message": "API key missing."});
    for shape in ALL_SHAPES {
      let err = normalize_value(json!({"status": error_status.clone()}), shape).unwrap_err();
      match err {
        Error::MalformedResponse { status, .. } => assert_eq!(status, error_status),
        other => panic!("expected MalformedResponse, got {:?}", other),
      }
      let err = normalize_value(json!({"status": status(), "data": null}), shape).unwrap_err();
      assert!(err.is_malformed());
    }
  }

  #[test]
  fn test_shape_mismatch_is_malformed() {
    let err = normalize_value(json!({"data": {"id": 1}}), ResponseShape::List).unwrap_err();
    assert!(err.is_malformed());
    let err = normalize_value(json!({"data": [1]}), ResponseShape::SingleDict).unwrap_err();
    assert!(err.is_malformed());
    let err = normalize_value(json!({"data": {"other": []}}), ResponseShape::NestedList).unwrap_err();
    assert!(err.is_malformed());
    let err = normalize_value(json!([1, 2]), ResponseShape::List).unwrap_err();
    assert!(err.is_malformed());
  }

  #[test]
  fn test_non_json_body() {
    let raw = RawResponse {
      status: 502,
      url: "https://mock.cmc.test/v1/key/info".to_string(),
      body: "<html>Bad Gateway</html>".to_string(),
    };
    let err = normalize(&raw, ResponseShape::SingleDict).unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { ref reason, .. } if reason.contains("502")));
  }
}
