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

//! Base traits and types for data loaders

use crate::cache::{CacheConfig, JsonFileCache};
use crate::LoaderResult;
use async_trait::async_trait;
use cmc_client::CoinMarketCapClient;
use cmc_database_sqlite::{establish_connection, SqliteConnection, DEFAULT_DATABASE_URL};
use std::sync::Arc;

/// Configuration for data loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
  /// Ids per metadata request
  pub batch_size: usize,

  /// Quote currency for listings
  pub convert: String,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self { batch_size: 100, convert: "USD".to_string() }
  }
}

/// Shared context for all loaders
pub struct LoaderContext {
  pub client: Arc<CoinMarketCapClient>,
  pub config: LoaderConfig,
  pub cache: JsonFileCache,
  /// SQLite file; each persistence step opens its own connection
  pub database_url: String,
}

impl LoaderContext {
  pub fn new(client: Arc<CoinMarketCapClient>, config: LoaderConfig) -> Self {
    Self {
      client,
      config,
      cache: JsonFileCache::new(CacheConfig::default()),
      database_url: DEFAULT_DATABASE_URL.to_string(),
    }
  }

  pub fn with_cache(mut self, cache: CacheConfig) -> Self {
    self.cache = JsonFileCache::new(cache);
    self
  }

  pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
    self.database_url = database_url.into();
    self
  }

  /// Open a fresh connection to the price cache
  pub fn connect(&self) -> LoaderResult<SqliteConnection> {
    Ok(establish_connection(&self.database_url)?)
  }
}

/// Base trait for all data loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  async fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get loader name for logging
  fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
  use super::*;
  use cmc_core::Config;

  #[test]
  fn test_loader_config_default() {
    let config = LoaderConfig::default();
    assert_eq!(config.batch_size, 100);
    assert_eq!(config.convert, "USD");
  }

  #[test]
  fn test_context_builders() {
    let client = Arc::new(CoinMarketCapClient::new(Config::default_with_key("k".to_string())).unwrap());
    let context = LoaderContext::new(client, LoaderConfig::default());
    assert_eq!(context.database_url, "cryptodatabase.db");
    assert!(context.cache.is_read_enabled());

    let context = context
      .with_database_url(":memory:")
      .with_cache(CacheConfig::default().with_enabled(false));
    assert!(!context.cache.is_write_enabled());
    assert!(context.connect().is_ok());
  }
}
