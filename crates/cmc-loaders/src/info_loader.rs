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

//! Coin info loader: static metadata for many ids, requested in batches.
//!
//! A request whose URL the server rejects with 414 is retried with half as
//! many ids until it fits or is down to a single id. The smaller batch size
//! is kept for the rest of the run. Any other failed batch is skipped and
//! counted; whatever the other batches returned is still stored.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use cmc_core::QueryParams;
use cmc_database_sqlite::{with_tables, NewCoinInfo, Price};
use cmc_models::{join_ids, CoinInfo};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct InfoLoaderInput {
  /// Ids to look up; every id in the `prices` table when `None`
  pub ids: Option<Vec<i64>>,
  /// Overrides the context's batch size
  pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct InfoLoaderOutput {
  pub requested: usize,
  pub fetched: usize,
  pub inserted: usize,
  /// Requests that returned data
  pub batches: usize,
  /// Batches given up on; their ids have no info this run
  pub failed_batches: usize,
}

pub struct InfoLoader;

impl InfoLoader {
  pub fn new() -> Self {
    Self
  }

  /// Decode every value of an id-keyed data map, skipping bad entries
  fn decode_entries(data: &Value) -> Vec<CoinInfo> {
    let Some(map) = data.as_object() else {
      warn!("Info data is not an object");
      return Vec::new();
    };
    map
      .iter()
      .filter_map(|(id, value)| match serde_json::from_value::<CoinInfo>(value.clone()) {
        Ok(info) => Some(info),
        Err(e) => {
          warn!("Skipping info for id {}: {}", id, e);
          None
        }
      })
      .collect()
  }
}

impl Default for InfoLoader {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl DataLoader for InfoLoader {
  type Input = InfoLoaderInput;
  type Output = InfoLoaderOutput;

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    if input.batch_size == Some(0) {
      return Err(LoaderError::InvalidData("batch size must be at least 1".to_string()));
    }
    Ok(())
  }

  #[instrument(name = "InfoLoader", skip(self, context, input))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;

    let ids = match input.ids {
      Some(ids) => ids,
      None => {
        let mut conn = context.connect()?;
        with_tables(&mut conn, Price::ids)?
      }
    };
    let mut output = InfoLoaderOutput { requested: ids.len(), ..Default::default() };
    if ids.is_empty() {
      info!("No ids to look up");
      return Ok(output);
    }

    let crypto = context.client.cryptocurrency();
    let extra = QueryParams::new();
    let mut take = input.batch_size.unwrap_or(context.config.batch_size).max(1);
    let mut offset = 0;
    let mut infos = Vec::new();
    let mut last_error = None;

    while offset < ids.len() {
      let end = (offset + take).min(ids.len());
      let id_list = join_ids(ids[offset..end].iter().copied());
      match crypto.info(&id_list, &extra).await {
        Ok(envelope) => {
          let decoded = Self::decode_entries(&envelope.data);
          debug!("Batch {}..{}: {} entries", offset, end, decoded.len());
          infos.extend(decoded);
          output.batches += 1;
          offset = end;
        }
        Err(cmc_core::Error::UriTooLong { .. }) if end - offset > 1 => {
          take = ((end - offset) / 2).max(1);
          warn!("Request URI too long for {} ids, retrying with {}", end - offset, take);
        }
        Err(e) => {
          warn!("Skipping ids {}..{} of {}: {}", offset, end, ids.len(), e);
          output.failed_batches += 1;
          last_error = Some(e);
          offset = end;
        }
      }
    }

    if output.batches == 0 {
      if let Some(e) = last_error {
        return Err(e.into());
      }
    }

    output.fetched = infos.len();
    let rows: Vec<NewCoinInfo> = infos.iter().map(NewCoinInfo::from).collect();
    let mut conn = context.connect()?;
    output.inserted = with_tables(&mut conn, |conn| NewCoinInfo::insert_all(conn, &rows))?;

    info!(
      "Info for {} of {} ids in {} batches ({} failed), {} rows inserted",
      output.fetched, output.requested, output.batches, output.failed_batches, output.inserted
    );
    Ok(output)
  }

  fn name(&self) -> &'static str {
    "InfoLoader"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_decode_entries_skips_bad_values() {
    let data = json!({
      "1": {"id": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin"},
      "2": "not an object"
    });
    let infos = InfoLoader::decode_entries(&data);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].symbol, "BTC");
    assert!(InfoLoader::decode_entries(&json!([])).is_empty());
  }

  #[tokio::test]
  async fn test_zero_batch_size_rejected() {
    let input = InfoLoaderInput { ids: Some(vec![1]), batch_size: Some(0) };
    assert!(InfoLoader::new().validate_input(&input).await.is_err());
  }
}
