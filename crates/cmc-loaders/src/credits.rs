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

//! Local record of API credit usage, refreshed from `/v1/key/info`.
//!
//! The file holds one `[DEFAULT]` section of `key = value` lines and is
//! rewritten whole on every refresh; last writer wins.

use crate::error::{LoaderError, LoaderResult};
use cmc_client::CoinMarketCapClient;
use cmc_models::{Envelope, KeyInfo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Default credit file, relative to the working directory
pub const DEFAULT_CREDIT_FILE: &str = "config.ini";

/// Credits used and left for the current day and month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditUsage {
  pub current_day_used: i64,
  pub current_day_left: i64,
  pub current_month_used: i64,
  pub current_month_left: i64,
  /// Server timestamp of the lookup, `"0"` before the first one
  #[serde(rename = "Last_updated", alias = "last_updated")]
  pub last_updated: String,
}

impl Default for CreditUsage {
  /// Basic plan allowance before any lookup
  fn default() -> Self {
    Self {
      current_day_used: 0,
      current_day_left: 33,
      current_month_used: 0,
      current_month_left: 333,
      last_updated: "0".to_string(),
    }
  }
}

impl CreditUsage {
  /// Build from a normalized key-info envelope
  pub fn from_key_info(envelope: &Envelope) -> LoaderResult<Self> {
    let key_info: KeyInfo = serde_json::from_value(envelope.data.clone())?;
    let day = &key_info.usage.current_day;
    let month = &key_info.usage.current_month;

    Ok(Self {
      current_day_used: day.credits_used.unwrap_or(0),
      current_day_left: day.credits_left.unwrap_or(0),
      current_month_used: month.credits_used.unwrap_or(0),
      current_month_left: month.credits_left.unwrap_or(0),
      last_updated: envelope.metadata.timestamp.clone(),
    })
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct CreditDocument {
  #[serde(rename = "DEFAULT")]
  default: CreditUsage,
}

/// The credit-usage file on disk
#[derive(Debug, Clone)]
pub struct CreditFile {
  path: PathBuf,
}

impl CreditFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Read the file, creating it with defaults when missing
  pub fn load(&self) -> LoaderResult<CreditUsage> {
    if !self.path.exists() {
      let usage = CreditUsage::default();
      self.save(&usage)?;
      info!("Created credit file {}", self.path.display());
      return Ok(usage);
    }
    let text = fs::read_to_string(&self.path)?;
    let document: CreditDocument = toml::from_str(&text)
      .map_err(|e| LoaderError::SerializationError(format!("{}: {}", self.path.display(), e)))?;
    Ok(document.default)
  }

  /// Rewrite the whole file
  pub fn save(&self, usage: &CreditUsage) -> LoaderResult<()> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }
    let text = toml::to_string(&CreditDocument { default: usage.clone() })?;
    fs::write(&self.path, text)?;
    Ok(())
  }
}

impl Default for CreditFile {
  fn default() -> Self {
    Self::new(DEFAULT_CREDIT_FILE)
  }
}

/// Look up key usage and rewrite the credit file
#[instrument(skip(client, file), fields(path = %file.path().display()))]
pub async fn refresh_credits(client: &CoinMarketCapClient, file: &CreditFile) -> LoaderResult<CreditUsage> {
  let envelope = client.key().info().await?;
  let usage = CreditUsage::from_key_info(&envelope)?;
  file.save(&usage)?;
  info!(
    "Credits today: {} used, {} left; this month: {} used, {} left",
    usage.current_day_used, usage.current_day_left, usage.current_month_used, usage.current_month_left
  );
  Ok(usage)
}

#[cfg(test)]
mod tests {
  use super::*;
  use cmc_models::Metadata;
  use serde_json::json;

  #[test]
  fn test_load_creates_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = CreditFile::new(dir.path().join("config.ini"));
    let usage = file.load().unwrap();
    assert_eq!(usage, CreditUsage::default());
    assert!(file.path().exists());

    let text = fs::read_to_string(file.path()).unwrap();
    assert!(text.starts_with("[DEFAULT]"));
    assert!(text.contains("current_day_left = 33"));
    assert!(text.contains("current_month_left = 333"));
  }

  #[test]
  fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let file = CreditFile::new(dir.path().join("nested").join("config.ini"));
    let usage = CreditUsage {
      current_day_used: 5,
      current_day_left: 28,
      current_month_used: 40,
      current_month_left: 293,
      last_updated: "2024-03-01T12:00:00.000Z".to_string(),
    };
    file.save(&usage).unwrap();
    assert_eq!(file.load().unwrap(), usage);
  }

  #[test]
  fn test_reads_lowercase_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(
      &path,
      "[DEFAULT]\ncurrent_day_used = 1\ncurrent_day_left = 32\ncurrent_month_used = 1\ncurrent_month_left = 332\nlast_updated = \"T\"\n",
    )
    .unwrap();
    assert_eq!(CreditFile::new(path).load().unwrap().last_updated, "T");
  }

  #[test]
  fn test_month_used_comes_from_credits_used() {
    let envelope = Envelope {
      metadata: Metadata { timestamp: "2024-03-01T12:00:00.000Z".to_string(), ..Default::default() },
      data: json!({
        "plan": {"credit_limit_monthly": 10000},
        "usage": {
          "current_day": {"credits_used": 3, "credits_left": 330},
          "current_month": {"credits_used": 120, "credits_left": 9880}
        }
      }),
    };
    let usage = CreditUsage::from_key_info(&envelope).unwrap();
    assert_eq!(usage.current_day_used, 3);
    assert_eq!(usage.current_day_left, 330);
    assert_eq!(usage.current_month_used, 120);
    assert_eq!(usage.current_month_left, 9880);
    assert_eq!(usage.last_updated, "2024-03-01T12:00:00.000Z");
  }
}
