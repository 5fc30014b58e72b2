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

//! Latest-listing loader: fetch (or reuse today's file) and refresh the
//! `prices` table.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use cmc_core::query_params;
use cmc_database_sqlite::{with_tables, NewPrice, UpdateOutcome};
use cmc_models::PriceRecord;
use tracing::{info, instrument, warn};

/// Cache name of the USD listing file; one per day regardless of paging
pub const LISTING_CACHE_NAME: &str = "latest_listing";

/// Cache name for a listing quoted in `convert`.
///
/// USD keeps the bare name; other currencies get their own file so a
/// same-day load in another currency is never served the USD listing.
pub fn listing_cache_name(convert: &str) -> String {
  if convert.eq_ignore_ascii_case("USD") {
    LISTING_CACHE_NAME.to_string()
  } else {
    format!("{}_{}", LISTING_CACHE_NAME, convert.to_ascii_uppercase())
  }
}

#[derive(Debug, Clone)]
pub struct PriceLoaderInput {
  pub start: u32,
  pub limit: u32,
  /// Overrides the context's quote currency
  pub convert: Option<String>,
  /// Compare every record's `last_updated` instead of only the first
  pub per_record: bool,
}

impl Default for PriceLoaderInput {
  fn default() -> Self {
    Self { start: 1, limit: 100, convert: None, per_record: false }
  }
}

#[derive(Debug, Clone)]
pub struct PriceLoaderOutput {
  pub records_fetched: usize,
  pub outcome: UpdateOutcome,
  pub from_cache: bool,
}

pub struct PriceLoader;

impl PriceLoader {
  pub fn new() -> Self {
    Self
  }
}

impl Default for PriceLoader {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl DataLoader for PriceLoader {
  type Input = PriceLoaderInput;
  type Output = PriceLoaderOutput;

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    if input.start == 0 {
      return Err(LoaderError::InvalidData("start is 1-based".to_string()));
    }
    if input.limit == 0 || input.limit > 5000 {
      return Err(LoaderError::InvalidData(format!("limit {} outside 1..=5000", input.limit)));
    }
    Ok(())
  }

  #[instrument(name = "PriceLoader", skip(self, context, input), fields(start = input.start, limit = input.limit))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;

    let convert = input.convert.unwrap_or_else(|| context.config.convert.clone());
    let extra = query_params! { "convert" => convert.as_str() };
    let crypto = context.client.cryptocurrency();
    let cache_name = listing_cache_name(&convert);
    let fetched = context
      .cache
      .get_or_fetch(&cache_name, || crypto.listings_latest(input.start, input.limit, &extra))
      .await?;

    let from_cache = fetched.from_cache;
    let records = fetched
      .envelope
      .into_typed::<Vec<PriceRecord>>()
      .map_err(|e| LoaderError::InvalidData(format!("listing: {}", e)))?
      .data;
    let rows: Vec<NewPrice> = records
      .iter()
      .filter_map(|record| {
        let row = NewPrice::with_quote(record, &convert);
        if row.is_none() {
          warn!("Skipping {} ({}): no {} quote", record.symbol, record.id, convert);
        }
        row
      })
      .collect();
    if rows.is_empty() && !records.is_empty() {
      return Err(LoaderError::InvalidData(format!("listing has no {} quotes", convert)));
    }

    let mut conn = context.connect()?;
    let outcome = if input.per_record {
      with_tables(&mut conn, |conn| NewPrice::update_changed(conn, &rows))?
    } else {
      with_tables(&mut conn, |conn| NewPrice::update_all(conn, &rows))?
    };

    info!("{} records, {} rows written (from cache: {})", records.len(), outcome.rows_written(), from_cache);
    Ok(PriceLoaderOutput { records_fetched: records.len(), outcome, from_cache })
  }

  fn name(&self) -> &'static str {
    "PriceLoader"
  }
}
