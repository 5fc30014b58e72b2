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

use crate::config::Config;
use anyhow::{Context, Result};
use cmc_loaders::{refresh_credits, CreditFile, LoaderContext};

pub async fn execute(context: &LoaderContext, config: &Config) -> Result<()> {
  let file = CreditFile::new(&config.credit_file);
  let previous = file.load().with_context(|| format!("Failed to read {}", file.path().display()))?;
  let usage = refresh_credits(&context.client, &file).await.context("Failed to refresh credit usage")?;

  println!("Credit usage as of {} (previous {})", usage.last_updated, previous.last_updated);
  println!("  today:      {:>8} used {:>8} left", usage.current_day_used, usage.current_day_left);
  println!("  this month: {:>8} used {:>8} left", usage.current_month_used, usage.current_month_left);
  Ok(())
}
