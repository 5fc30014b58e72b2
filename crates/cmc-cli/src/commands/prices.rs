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
use cmc_database_sqlite::Price;
use cmc_loaders::{DataLoader, LoaderContext, PriceLoader, PriceLoaderInput};
use tracing::info;

#[derive(Args, Debug)]
pub struct PricesArgs {
  /// 1-based offset into the listing
  #[arg(long, default_value_t = 1)]
  pub start: u32,

  /// Records to request (1..=5000)
  #[arg(long, default_value_t = 100)]
  pub limit: u32,

  /// Quote currency
  #[arg(long, default_value = "USD")]
  pub convert: String,

  /// Compare every record's timestamp instead of only the first
  #[arg(long)]
  pub per_record: bool,
}

pub async fn execute(args: PricesArgs, context: &LoaderContext) -> Result<()> {
  info!("Loading latest listings {}..{}", args.start, args.start.saturating_add(args.limit).saturating_sub(1));

  let input =
    PriceLoaderInput { start: args.start, limit: args.limit, convert: Some(args.convert), per_record: args.per_record };
  let output = PriceLoader::new().load(context, input).await.context("Failed to load latest listings")?;

  let mut conn = context.connect()?;
  let total = Price::count(&mut conn)?;
  info!(
    "{} records ({}), {} rows written, {} rows in table",
    output.records_fetched,
    if output.from_cache { "cached" } else { "fetched" },
    output.outcome.rows_written(),
    total
  );
  Ok(())
}
