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

use super::{impl_endpoint_base, merged, EndpointBase, EndpointCore};
use crate::normalizer::ResponseShape;
use cmc_core::{query_params, Endpoint, QueryParams, Result};
use cmc_models::Envelope;
use tracing::instrument;

/// Fiat currency endpoints
pub struct FiatEndpoints {
  core: EndpointCore,
}

impl FiatEndpoints {
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Fiat currencies, precious metals included
  #[instrument(skip(self, extra))]
  pub async fn map(&self, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "include_metals" => true }, extra);
    self.core.call(Endpoint::FiatMap, &params, ResponseShape::List).await
  }
}

impl_endpoint_base!(FiatEndpoints, "fiat", [FiatMap]);
