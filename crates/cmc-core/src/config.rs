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

//! Configuration management for the CoinMarketCap client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Primary variable holding the API key
pub const API_KEY_VAR: &str = "CMC_API";

/// Older name for the same key, still honoured
pub const LEGACY_API_KEY_VAR: &str = "COIN_API_KEY";

/// Main configuration struct for the CoinMarketCap client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// CoinMarketCap Pro API key
  pub api_key: String,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for the API (production or sandbox)
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var(API_KEY_VAR).or_else(|_| env::var(LEGACY_API_KEY_VAR)).map_err(|_| {
      Error::ApiKey(format!("neither {} nor {} is set", API_KEY_VAR, LEGACY_API_KEY_VAR))
    })?;

    if api_key.trim().is_empty() {
      return Err(Error::ApiKey(format!("{} is empty", API_KEY_VAR)));
    }

    let rate_limit = env::var("CMC_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CMC_RATE_LIMIT".to_string()))?;

    let timeout_secs = env::var("CMC_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CMC_TIMEOUT_SECS".to_string()))?;

    let sandbox = env::var("CMC_SANDBOX")
      .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
      .unwrap_or(false);

    let base_url = match env::var("CMC_BASE_URL") {
      Ok(url) => url,
      Err(_) if sandbox => crate::CMC_SANDBOX_URL.to_string(),
      Err(_) => crate::CMC_BASE_URL.to_string(),
    };

    Ok(Config { api_key, rate_limit, timeout_secs, base_url })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::CMC_BASE_URL.to_string(),
    }
  }

  /// Point the config at the sandbox host
  pub fn with_sandbox(mut self) -> Self {
    self.base_url = crate::CMC_SANDBOX_URL.to_string();
    self
  }

  /// Point the config at an arbitrary host (mock servers, proxies)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn is_sandbox(&self) -> bool {
    self.base_url == crate::CMC_SANDBOX_URL
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn clear_env() {
    for var in [API_KEY_VAR, LEGACY_API_KEY_VAR, "CMC_SANDBOX", "CMC_BASE_URL", "CMC_RATE_LIMIT"] {
      env::remove_var(var);
    }
  }

  #[test]
  #[serial]
  fn test_config_from_env() {
    clear_env();
    env::set_var(API_KEY_VAR, "test_key");
    let config = Config::from_env().unwrap();
    assert_eq!(config.api_key, "test_key");
    assert_eq!(config.rate_limit, 30);
    assert_eq!(config.base_url, crate::CMC_BASE_URL);
    clear_env();
  }

  #[test]
  #[serial]
  fn test_legacy_key_and_sandbox() {
    clear_env();
    env::set_var(LEGACY_API_KEY_VAR, "old_key");
    env::set_var("CMC_SANDBOX", "true");
    let config = Config::from_env().unwrap();
    assert_eq!(config.api_key, "old_key");
    assert!(config.is_sandbox());
    clear_env();
  }

  #[test]
  #[serial]
  fn test_missing_key_is_fatal() {
    clear_env();
    // a .env file in the working directory could supply the key
    if std::path::Path::new(".env").exists() {
      return;
    }
    let err = Config::from_env().unwrap_err();
    assert!(matches!(err, Error::ApiKey(_)));
  }

  #[test]
  fn test_builders() {
    let config = Config::default_with_key("k".to_string()).with_base_url("http://127.0.0.1:9");
    assert_eq!(config.base_url, "http://127.0.0.1:9");
    assert!(Config::default_with_key("k".to_string()).with_sandbox().is_sandbox());
  }
}
