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

//! Id map loader: every tracked coin and the comma-joined id list.

use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult};
use async_trait::async_trait;
use cmc_core::QueryParams;
use cmc_models::{join_ids, IdMapEntry};
use tracing::{info, instrument};

/// Cache name of the dated id map file
pub const ID_MAP_CACHE_NAME: &str = "cmc_ids_mapping";

#[derive(Debug, Clone, Default)]
pub struct IdMapLoaderInput {
  /// "active", "inactive" or "untracked"
  pub listing_status: Option<String>,
  pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IdMapLoaderOutput {
  pub entries: Vec<IdMapEntry>,
  /// Ids joined with commas, ready for an `id=` parameter
  pub id_list: String,
  pub from_cache: bool,
}

pub struct IdMapLoader;

impl IdMapLoader {
  pub fn new() -> Self {
    Self
  }
}

impl Default for IdMapLoader {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl DataLoader for IdMapLoader {
  type Input = IdMapLoaderInput;
  type Output = IdMapLoaderOutput;

  #[instrument(name = "IdMapLoader", skip(self, context, input))]
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    let crypto = context.client.cryptocurrency();
    let extra = QueryParams::new();
    let fetched = context
      .cache
      .get_or_fetch(ID_MAP_CACHE_NAME, || {
        crypto.id_map(input.listing_status.as_deref(), input.sort.as_deref(), &extra)
      })
      .await?;

    let from_cache = fetched.from_cache;
    let entries = fetched
      .envelope
      .into_typed::<Vec<IdMapEntry>>()
      .map_err(|e| LoaderError::InvalidData(format!("id map: {}", e)))?
      .data;
    let id_list = join_ids(entries.iter().map(|entry| entry.id));

    info!("Loaded {} ids (from cache: {})", entries.len(), from_cache);
    Ok(IdMapLoaderOutput { entries, id_list, from_cache })
  }

  fn name(&self) -> &'static str {
    "IdMapLoader"
  }
}
