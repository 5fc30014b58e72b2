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

//! HTTP transport layer for CoinMarketCap API requests

use cmc_core::{encode_query, Config, Error, QueryParams, Result, API_KEY_HEADER};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Status, final URL and undecoded body of one GET
#[derive(Debug, Clone)]
pub struct RawResponse {
  pub status: u16,
  pub url: String,
  pub body: String,
}

impl RawResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// HTTP transport layer for making requests to the CoinMarketCap API
///
/// Holds the one `reqwest::Client` used for the whole process; the key and
/// `Accepts` headers are fixed when it is built.
pub struct Transport {
  client: Client,
  base_url: String,
  timeout: Duration,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("accepts"), HeaderValue::from_static("application/json"));

    let key_name = HeaderName::from_bytes(API_KEY_HEADER.as_bytes())
      .map_err(|e| Error::Config(format!("Invalid header name {}: {}", API_KEY_HEADER, e)))?;
    let mut key_value = HeaderValue::from_str(&config.api_key)
      .map_err(|e| Error::ApiKey(format!("key is not a valid header value: {}", e)))?;
    key_value.set_sensitive(true);
    headers.insert(key_name, key_value);

    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .default_headers(headers)
      .timeout(timeout)
      .user_agent("cmc-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string(), timeout })
  }

  /// `base + path`, plus the encoded query when there is one
  pub fn build_url(&self, path: &str, params: &QueryParams) -> String {
    let query = encode_query(params);
    if query.is_empty() {
      format!("{}{}", self.base_url, path)
    } else {
      format!("{}{}?{}", self.base_url, path, query)
    }
  }

  /// Issue one GET. Connection failures, timeouts and 414 become errors;
  /// every other status is handed back for the normalizer to judge.
  #[instrument(skip(self, params), fields(path = %path))]
  pub async fn execute(&self, path: &str, params: &QueryParams) -> Result<RawResponse> {
    let url = self.build_url(path, params);
    debug!("Making request to: {}", url);

    let response = self.client.get(&url).send().await.map_err(|e| self.classify(&url, e))?;

    let status = response.status();
    if status == StatusCode::URI_TOO_LONG {
      error!("Request-URI too large ({} bytes): {}", url.len(), url);
      return Err(Error::UriTooLong { url });
    }
    if !status.is_success() {
      warn!("Request returned status {}", status);
    }

    let final_url = response.url().to_string();
    let body = response.text().await.map_err(|e| self.classify(&url, e))?;
    debug!("Response body length: {} bytes", body.len());

    Ok(RawResponse { status: status.as_u16(), url: final_url, body })
  }

  fn classify(&self, url: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
      error!("Request timed out after {:?}: {}", self.timeout, url);
      Error::Timeout(format!("{} after {:?}", url, self.timeout))
    } else if err.is_connect() {
      error!("Connection failed for {}: {}", url, err);
      Error::Connection(format!("{}: {}", url, err))
    } else {
      error!("Request failed for {}: {}", url, err);
      Error::Http(format!("Request failed: {}", err))
    }
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cmc_core::query_params;

  fn transport() -> Transport {
    let config = Config::default_with_key("test_key".to_string()).with_base_url("https://mock.cmc.test/");
    Transport::new(&config).unwrap()
  }

  #[test]
  fn test_build_url() {
    let transport = transport();
    let url = transport.build_url("/v1/cryptocurrency/map", &query_params! { "start" => 1, "sort" => "cmc_rank" });
    assert_eq!(url, "https://mock.cmc.test/v1/cryptocurrency/map?sort=cmc_rank&start=1");
  }

  #[test]
  fn test_build_url_without_params() {
    let transport = transport();
    assert_eq!(transport.build_url("/v1/key/info", &QueryParams::new()), "https://mock.cmc.test/v1/key/info");
  }

  #[test]
  fn test_rejects_unprintable_key() {
    let config = Config::default_with_key("bad\nkey".to_string());
    assert!(matches!(Transport::new(&config), Err(Error::ApiKey(_))));
  }
}
