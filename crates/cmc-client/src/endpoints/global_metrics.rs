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

use super::{impl_endpoint_base, EndpointBase, EndpointCore};
use crate::normalizer::ResponseShape;
use cmc_core::{Endpoint, QueryParams, Result};
use cmc_models::Envelope;
use tracing::instrument;

/// Global market metrics
pub struct GlobalMetricsEndpoints {
  core: EndpointCore,
}

impl GlobalMetricsEndpoints {
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Total market cap, BTC dominance and friends
  #[instrument(skip(self, extra))]
  pub async fn quotes_latest(&self, extra: &QueryParams) -> Result<Envelope> {
    self.core.call(Endpoint::GlobalMetricsQuotesLatest, extra, ResponseShape::SingleDict).await
  }
}

impl_endpoint_base!(GlobalMetricsEndpoints, "global-metrics", [GlobalMetricsQuotesLatest]);
