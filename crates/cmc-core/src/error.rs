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

/// The main error type for cmc-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("Failed to retrieve API key: {0}")]
  ApiKey(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// Lookup of an operation the registry does not know
  #[error("Unknown endpoint: {0}")]
  UnknownEndpoint(String),

  /// Network unreachable, connection refused, DNS failure
  #[error("Connection error: {0}")]
  Connection(String),

  /// No response within the client timeout
  #[error("Request timed out: {0}")]
  Timeout(String),

  /// HTTP 414, usually too many ids in one comma list
  #[error("414 Request-URI Too Large: {url}")]
  UriTooLong { url: String },

  /// Any other HTTP transport failure
  #[error("HTTP error: {0}")]
  Http(String),

  /// Payload without a usable `data` section
  #[error("Malformed response: {reason} (status: {status})")]
  MalformedResponse { reason: String, status: serde_json::Value },
}

impl Error {
  /// Connection and timeout failures: the call produced nothing this cycle
  pub fn is_transport(&self) -> bool {
    matches!(self, Error::Connection(_) | Error::Timeout(_) | Error::Http(_))
  }

  /// The upstream answered, but not with something we can normalize
  pub fn is_malformed(&self) -> bool {
    matches!(self, Error::MalformedResponse { .. })
  }
}

/// Result type alias for cmc-* crates
pub type Result<T> = std::result::Result<T, Error>;
