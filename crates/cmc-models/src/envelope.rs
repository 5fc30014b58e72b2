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

//! The normalized `{metadata, data}` wrapper returned by every endpoint

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response metadata lifted out of the CoinMarketCap `status` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
  /// Server timestamp, empty when the upstream omitted it
  #[serde(default)]
  pub timestamp: String,

  /// Credits this call consumed
  #[serde(default)]
  pub credit_count: i64,

  #[serde(default)]
  pub error_message: Option<String>,

  /// Field names of the first record, in payload order
  #[serde(default, with = "list_keys")]
  pub list_keys: Vec<String>,
}

impl Metadata {
  /// Parse the timestamp, `None` when absent or not RFC 3339
  pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&self.timestamp).ok().map(|ts| ts.with_timezone(&Utc))
  }

  pub fn joined_keys(&self) -> String {
    self.list_keys.join(",")
  }
}

/// Normalized response; `T` defaults to the raw JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
  pub metadata: Metadata,
  pub data: T,
}

impl Envelope<Value> {
  /// Decode `data` into a typed model, keeping the metadata
  pub fn decode<T: DeserializeOwned>(&self) -> Result<Envelope<T>, serde_json::Error> {
    let data = T::deserialize(&self.data)?;
    Ok(Envelope { metadata: self.metadata.clone(), data })
  }

  /// Consuming variant of [`Envelope::decode`]
  pub fn into_typed<T: DeserializeOwned>(self) -> Result<Envelope<T>, serde_json::Error> {
    let data = serde_json::from_value(self.data)?;
    Ok(Envelope { metadata: self.metadata, data })
  }
}

/// `list_keys` is written as `"id,name"` and read back from either form
mod list_keys {
  use serde::{Deserialize, Deserializer, Serializer};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Keys {
    Joined(String),
    List(Vec<String>),
  }

  pub fn serialize<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&keys.join(","))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(match Keys::deserialize(deserializer)? {
      Keys::Joined(s) if s.is_empty() => Vec::new(),
      Keys::Joined(s) => s.split(',').map(str::to_string).collect(),
      Keys::List(list) => list,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn test_list_keys_serialized_joined() {
    let envelope = Envelope {
      metadata: Metadata {
        timestamp: "T".to_string(),
        credit_count: 1,
        error_message: None,
        list_keys: vec!["id".to_string(), "name".to_string()],
      },
      data: json!([{"id": 1, "name": "Bitcoin"}]),
    };
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(
      value,
      json!({
        "metadata": {"timestamp": "T", "credit_count": 1, "error_message": null, "list_keys": "id,name"},
        "data": [{"id": 1, "name": "Bitcoin"}]
      })
    );
  }

  #[test]
  fn test_list_keys_read_from_array_or_string() {
    let from_string: Metadata = serde_json::from_value(json!({"list_keys": "a,b"})).unwrap();
    let from_array: Metadata = serde_json::from_value(json!({"list_keys": ["a", "b"]})).unwrap();
    assert_eq!(from_string.list_keys, from_array.list_keys);

    let empty: Metadata = serde_json::from_value(json!({"list_keys": ""})).unwrap();
    assert!(empty.list_keys.is_empty());
    assert_eq!(empty.credit_count, 0);
  }

  #[test]
  fn test_decode_typed_data() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
      id: i64,
    }

    let envelope = Envelope { metadata: Metadata::default(), data: json!([{"id": 1}, {"id": 1027}]) };
    let typed: Envelope<Vec<Row>> = envelope.decode().unwrap();
    assert_eq!(typed.data, vec![Row { id: 1 }, Row { id: 1027 }]);
    assert!(envelope.into_typed::<Row>().is_err());
  }

  #[test]
  fn test_timestamp_parse() {
    let meta = Metadata { timestamp: "2024-03-01T12:00:00.000Z".to_string(), ..Default::default() };
    assert!(meta.timestamp_utc().is_some());
    assert!(Metadata::default().timestamp_utc().is_none());
  }
}
