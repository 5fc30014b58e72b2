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
use cmc_core::Config as CoreConfig;
use cmc_database_sqlite::DEFAULT_DATABASE_URL;
use cmc_loaders::{DEFAULT_CREDIT_FILE, DEFAULT_JSON_DIR};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
  pub database_url: String,
  pub json_dir: PathBuf,
  pub credit_file: PathBuf,
}

impl Config {
  /// Read the environment; a missing API key is fatal
  pub fn from_env(sandbox: bool) -> Result<Self> {
    let mut api_config = CoreConfig::from_env().context("Failed to load CoinMarketCap API configuration")?;
    if sandbox && !api_config.is_sandbox() {
      api_config = api_config.with_sandbox();
    }

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let json_dir = env::var("CMC_JSON_DIR").unwrap_or_else(|_| DEFAULT_JSON_DIR.to_string());

    let credit_file = env::var("CMC_CREDIT_FILE").unwrap_or_else(|_| DEFAULT_CREDIT_FILE.to_string());

    Ok(Self { api_config, database_url, json_dir: json_dir.into(), credit_file: credit_file.into() })
  }
}
