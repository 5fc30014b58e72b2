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

use anyhow::{Context, Result};
use clap::Args;
use cmc_loaders::{DataLoader, InfoLoader, InfoLoaderInput, LoaderContext};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct InfoArgs {
  /// Ids per request; halved automatically when the URL is too long
  #[arg(long, default_value_t = 100)]
  pub batch_size: usize,

  /// Comma-separated ids (default: every id in the price table)
  #[arg(long, value_delimiter = ',')]
  pub ids: Option<Vec<i64>>,
}

pub async fn execute(args: InfoArgs, context: &LoaderContext) -> Result<()> {
  let input = InfoLoaderInput { ids: args.ids, batch_size: Some(args.batch_size) };
  let output = InfoLoader::new().load(context, input).await.context("Failed to load coin info")?;

  info!(
    "Coin info: {} requested, {} returned, {} new rows, {} requests",
    output.requested, output.fetched, output.inserted, output.batches
  );
  if output.failed_batches > 0 {
    warn!("{} info batches failed; their ids have no info this run", output.failed_batches);
  }
  Ok(())
}
