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

/// Conversion tools
pub struct ToolsEndpoints {
  core: EndpointCore,
}

impl ToolsEndpoints {
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Convert `amount` of coin `id` into the `convert` currencies (USD by default)
  #[instrument(skip(self, extra))]
  pub async fn price_conversion(&self, amount: f64, id: &str, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "amount" => amount, "id" => id }, extra);
    self.core.call(Endpoint::PriceConversion, &params, ResponseShape::SingleDict).await
  }
}

impl_endpoint_base!(ToolsEndpoints, "tools", [PriceConversion]);
