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

use crate::endpoints::{
  cryptocurrency::CryptocurrencyEndpoints, exchange::ExchangeEndpoints, fiat::FiatEndpoints,
  global_metrics::GlobalMetricsEndpoints, key::KeyEndpoints, tools::ToolsEndpoints, DirectRateLimiter,
  EndpointBase, EndpointCore,
};
use crate::normalizer::ResponseShape;
use crate::transport::Transport;
use cmc_core::{Config, Endpoint, EndpointRegistry, QueryParams, Result};
use cmc_models::Envelope;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Main CoinMarketCap API client
///
/// Owns the transport, the endpoint registry and the rate limiter, and hands
/// out endpoint groups that share them.
///
/// # Examples
///
/// ```ignore
/// use cmc_client::CoinMarketCapClient;
/// use cmc_core::{Config, QueryParams};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinMarketCapClient::new(Config::from_env()?)?;
///
///     let ids = client.cryptocurrency().id_map(None, None, &QueryParams::new()).await?;
///     println!("keys: {}", ids.metadata.joined_keys());
///
///     let usage = client.key().info().await?;
///     println!("{}", usage.data["usage"]["current_day"]);
///     Ok(())
/// }
/// ```
pub struct CoinMarketCapClient {
  core: EndpointCore,
}

impl CoinMarketCapClient {
  /// Create a new client
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    // zero would mean "never ready"; fall back to the plan default
    let per_minute = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(cmc_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));
    Self::with_rate_limiter(config, rate_limiter)
  }

  /// Create a new client with custom rate limiting
  pub fn with_rate_limiter(config: Config, rate_limiter: Arc<DirectRateLimiter>) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?);
    let registry = Arc::new(EndpointRegistry::standard());
    Ok(Self { core: EndpointCore::new(transport, registry, rate_limiter) })
  }

  /// Call any registered operation with an explicit response shape
  pub async fn fetch(&self, endpoint: Endpoint, params: &QueryParams, shape: ResponseShape) -> Result<Envelope> {
    self.core.call(endpoint, params, shape).await
  }

  pub fn cryptocurrency(&self) -> CryptocurrencyEndpoints {
    CryptocurrencyEndpoints::new(self.core.clone())
  }

  pub fn fiat(&self) -> FiatEndpoints {
    FiatEndpoints::new(self.core.clone())
  }

  pub fn exchange(&self) -> ExchangeEndpoints {
    ExchangeEndpoints::new(self.core.clone())
  }

  pub fn global_metrics(&self) -> GlobalMetricsEndpoints {
    GlobalMetricsEndpoints::new(self.core.clone())
  }

  pub fn tools(&self) -> ToolsEndpoints {
    ToolsEndpoints::new(self.core.clone())
  }

  pub fn key(&self) -> KeyEndpoints {
    KeyEndpoints::new(self.core.clone())
  }

  /// Every endpoint group, for listings
  pub fn groups(&self) -> Vec<Box<dyn EndpointBase>> {
    vec![
      Box::new(self.cryptocurrency()),
      Box::new(self.fiat()),
      Box::new(self.exchange()),
      Box::new(self.global_metrics()),
      Box::new(self.tools()),
      Box::new(self.key()),
    ]
  }

  pub fn registry(&self) -> &EndpointRegistry {
    &self.core.registry
  }

  pub fn base_url(&self) -> &str {
    self.core.transport.base_url()
  }
}
