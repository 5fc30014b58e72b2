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

//! Cryptocurrency endpoints: id map, listings, metadata, quotes and categories

use super::{impl_endpoint_base, merged, EndpointBase, EndpointCore};
use crate::normalizer::ResponseShape;
use cmc_core::{query_params, Endpoint, QueryParams, Result};
use cmc_models::Envelope;
use tracing::instrument;

/// Default `listing_status` for the id map
pub const DEFAULT_LISTING_STATUS: &str = "active";

/// Default `sort` for the id map
pub const DEFAULT_MAP_SORT: &str = "cmc_rank";

/// Cryptocurrency endpoints
pub struct CryptocurrencyEndpoints {
  core: EndpointCore,
}

impl CryptocurrencyEndpoints {
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Every coin CoinMarketCap tracks, with its numeric id
  ///
  /// # Arguments
  ///
  /// * `listing_status` - "active", "inactive" or "untracked"; defaults to "active"
  /// * `sort` - "cmc_rank" or "id"; defaults to "cmc_rank"
  /// * `extra` - start, limit, symbol, aux
  #[instrument(skip(self, extra))]
  pub async fn id_map(
    &self,
    listing_status: Option<&str>,
    sort: Option<&str>,
    extra: &QueryParams,
  ) -> Result<Envelope> {
    let params = merged(
      query_params! {
        "listing_status" => listing_status.unwrap_or(DEFAULT_LISTING_STATUS),
        "sort" => sort.unwrap_or(DEFAULT_MAP_SORT),
      },
      extra,
    );
    self.core.call(Endpoint::CryptocurrencyMap, &params, ResponseShape::List).await
  }

  /// Static metadata for a comma-joined list of ids, keyed by id
  #[instrument(skip(self, extra))]
  pub async fn info(&self, ids: &str, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "id" => ids }, extra);
    self.core.call(Endpoint::CryptocurrencyInfo, &params, ResponseShape::DictOfDicts).await
  }

  /// Paginated list of active coins with latest market data
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use cmc_client::CoinMarketCapClient;
  /// # use cmc_core::{query_params, Config};
  /// # async fn run() -> cmc_core::Result<()> {
  /// let client = CoinMarketCapClient::new(Config::from_env()?)?;
  /// let listing = client
  ///   .cryptocurrency()
  ///   .listings_latest(1, 100, &query_params! { "convert" => "USD" })
  ///   .await?;
  /// println!("{} fields per record", listing.metadata.list_keys.len());
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self, extra))]
  pub async fn listings_latest(&self, start: u32, limit: u32, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "start" => start, "limit" => limit }, extra);
    self.core.call(Endpoint::CryptocurrencyListingsLatest, &params, ResponseShape::List).await
  }

  #[instrument(skip(self, extra))]
  pub async fn categories(&self, start: u32, limit: u32, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "start" => start, "limit" => limit }, extra);
    self.core.call(Endpoint::CryptocurrencyCategories, &params, ResponseShape::List).await
  }

  /// One category with its member coins
  #[instrument(skip(self, extra))]
  pub async fn category(&self, id: &str, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "id" => id }, extra);
    self.core.call(Endpoint::CryptocurrencyCategory, &params, ResponseShape::SingleDict).await
  }

  /// Latest quotes keyed by id. `skip_invalid = false` cannot be sent and
  /// leaves the server default in place.
  #[instrument(skip(self, extra))]
  pub async fn quotes_latest(&self, ids: &str, skip_invalid: bool, extra: &QueryParams) -> Result<Envelope> {
    let params = merged(query_params! { "id" => ids, "skip_invalid" => skip_invalid }, extra);
    self.core.call(Endpoint::CryptocurrencyQuotesLatest, &params, ResponseShape::DictOfDicts).await
  }
}

impl_endpoint_base!(
  CryptocurrencyEndpoints,
  "cryptocurrency",
  [
    CryptocurrencyMap,
    CryptocurrencyListingsLatest,
    CryptocurrencyInfo,
    CryptocurrencyQuotesLatest,
    CryptocurrencyCategories,
    CryptocurrencyCategory,
  ]
);
