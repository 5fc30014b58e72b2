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

pub mod cryptocurrency;
pub mod exchange;
pub mod fiat;
pub mod global_metrics;
pub mod key;
pub mod tools;

use crate::normalizer::{normalize, ResponseShape};
use crate::transport::Transport;
use cmc_core::{Endpoint, EndpointRegistry, QueryParams, Result};
use cmc_models::Envelope;
use governor::{
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
  RateLimiter,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Direct (unkeyed) limiter shared by every endpoint group
pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Base trait for endpoint groups
pub trait EndpointBase {
  /// Shared transport, registry and limiter
  fn core(&self) -> &EndpointCore;

  /// Operations this group exposes
  fn endpoints(&self) -> &'static [Endpoint];

  /// Group label used in listings
  fn group_name(&self) -> &'static str;
}

/// Macro to implement the EndpointBase trait for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident, $group:literal, [$($endpoint:ident),+ $(,)?]) => {
    impl EndpointBase for $struct_name {
      fn core(&self) -> &EndpointCore {
        &self.core
      }

      fn endpoints(&self) -> &'static [Endpoint] {
        &[$(Endpoint::$endpoint),+]
      }

      fn group_name(&self) -> &'static str {
        $group
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

/// Common endpoint structure
///
/// Every group holds one of these; cloning it only bumps reference counts.
#[derive(Clone)]
pub struct EndpointCore {
  pub transport: Arc<Transport>,
  pub registry: Arc<EndpointRegistry>,
  pub rate_limiter: Arc<DirectRateLimiter>,
}

impl EndpointCore {
  /// Create a new endpoint core
  pub fn new(
    transport: Arc<Transport>,
    registry: Arc<EndpointRegistry>,
    rate_limiter: Arc<DirectRateLimiter>,
  ) -> Self {
    Self { transport, registry, rate_limiter }
  }

  /// Wait for rate limit before making a request
  pub async fn wait_for_rate_limit(&self) {
    self.rate_limiter.until_ready().await;
  }

  /// Resolve, whitelist, send and normalize one operation
  #[instrument(skip(self, params), fields(endpoint = %endpoint))]
  pub async fn call(
    &self,
    endpoint: Endpoint,
    params: &QueryParams,
    shape: ResponseShape,
  ) -> Result<Envelope> {
    let descriptor = self.registry.resolve(endpoint)?;
    let filtered = descriptor.filter(params);

    self.wait_for_rate_limit().await;
    let raw = self.transport.execute(descriptor.path, &filtered).await?;
    let envelope = normalize(&raw, shape)?;

    info!("{} returned {} credit(s) used", endpoint, envelope.metadata.credit_count);
    Ok(envelope)
  }
}

/// `extra` overlaid by the operation's fixed parameters
pub(crate) fn merged(fixed: QueryParams, extra: &QueryParams) -> QueryParams {
  let mut params = extra.clone();
  params.extend(fixed);
  params
}
