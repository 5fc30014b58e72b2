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

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("API error: {0}")]
  ApiError(String),

  /// Connection refused, DNS failure, timeout
  #[error("Transport error: {0}")]
  TransportError(String),

  #[error("Request-URI too large: {0}")]
  UriTooLong(String),

  #[error("Malformed response: {0}")]
  MalformedResponse(String),

  #[error("Refusing to write empty payload for {0}")]
  EmptyPayload(String),

  #[error("IO error: {0}")]
  IoError(String),

  #[error("Serialization error: {0}")]
  SerializationError(String),

  #[error("Database error: {0}")]
  DatabaseError(String),

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("Configuration error: {0}")]
  ConfigurationError(String),
}

// Implement conversions manually
impl From<cmc_core::Error> for LoaderError {
  fn from(err: cmc_core::Error) -> Self {
    match err {
      cmc_core::Error::UriTooLong { url } => LoaderError::UriTooLong(url),
      cmc_core::Error::MalformedResponse { reason, status } => {
        LoaderError::MalformedResponse(format!("{} (status: {})", reason, status))
      }
      cmc_core::Error::Config(msg) => LoaderError::ConfigurationError(msg),
      err if err.is_transport() => LoaderError::TransportError(err.to_string()),
      err => LoaderError::ApiError(err.to_string()),
    }
  }
}

impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::IoError(err.to_string())
  }
}

impl From<serde_json::Error> for LoaderError {
  fn from(err: serde_json::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<toml::de::Error> for LoaderError {
  fn from(err: toml::de::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<toml::ser::Error> for LoaderError {
  fn from(err: toml::ser::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<cmc_database_sqlite::DatabaseError> for LoaderError {
  fn from(err: cmc_database_sqlite::DatabaseError) -> Self {
    LoaderError::DatabaseError(err.to_string())
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_loader_error_display_transport_error() {
    let err = LoaderError::TransportError("connection refused".to_string());
    assert_eq!(err.to_string(), "Transport error: connection refused");
  }

  #[test]
  fn test_loader_error_display_empty_payload() {
    let err = LoaderError::EmptyPayload("latest_listing".to_string());
    assert_eq!(err.to_string(), "Refusing to write empty payload for latest_listing");
  }

  #[test]
  fn test_loader_error_from_uri_too_long() {
    let err = LoaderError::from(cmc_core::Error::UriTooLong { url: "https://x/v2/cryptocurrency/info".to_string() });
    assert!(matches!(err, LoaderError::UriTooLong(ref url) if url.ends_with("/info")));
  }

  #[test]
  fn test_loader_error_from_malformed_keeps_status() {
    let err = LoaderError::from(cmc_core::Error::MalformedResponse {
      reason: "payload has no data".to_string(),
      status: json!({"error_code": 1008}),
    });
    assert!(matches!(err, LoaderError::MalformedResponse(_)));
    assert!(err.to_string().contains("1008"));
  }

  #[test]
  fn test_loader_error_from_core_transport() {
    let err = LoaderError::from(cmc_core::Error::Timeout("30s".to_string()));
    assert!(matches!(err, LoaderError::TransportError(_)));
    let err = LoaderError::from(cmc_core::Error::UnknownEndpoint("nope".to_string()));
    assert!(matches!(err, LoaderError::ApiError(_)));
  }

  #[test]
  fn test_loader_error_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = LoaderError::from(io_err);
    assert!(matches!(err, LoaderError::IoError(_)));
    assert!(err.to_string().contains("file missing"));
  }

  #[test]
  fn test_loader_error_from_serde_json_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
    let err = LoaderError::from(json_err);
    assert!(matches!(err, LoaderError::SerializationError(_)));
  }

  #[test]
  fn test_loader_error_from_database_error() {
    let err = LoaderError::from(cmc_database_sqlite::DatabaseError::MissingTable("no such table: prices".to_string()));
    assert!(err.to_string().contains("no such table"));
  }
}
