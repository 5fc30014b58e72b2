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

//! Dated JSON file cache for endpoint envelopes.
//!
//! Files live under one directory, named `<name>_<YYYY_MM_DD>.json` when
//! date-stamped and `<name>.json` otherwise. With the default policy a file
//! stamped with today's UTC date is a hit, so a listing is fetched at most
//! once per calendar day.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cmc_loaders::cache::{CacheConfig, JsonFileCache};
//!
//! let cache = JsonFileCache::new(CacheConfig::default());
//! let fetched = cache
//!   .get_or_fetch("latest_listing", || client.cryptocurrency().listings_latest(1, 100, &params))
//!   .await?;
//! ```

use crate::error::{LoaderError, LoaderResult};
use chrono::{DateTime, Duration, Utc};
use cmc_models::Envelope;
use serde::Serialize;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default cache directory, relative to the working directory
pub const DEFAULT_JSON_DIR: &str = "json_files";

/// When a cached file counts as fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
  /// A file stamped with today's UTC date
  SameDay,
  /// An unstamped file modified less than this many hours ago
  MaxAgeHours(i64),
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
  /// Enable caching (reads and writes)
  pub enable_cache: bool,
  pub freshness: Freshness,
  /// Force refresh (bypass cache reads, but still write)
  pub force_refresh: bool,
  pub directory: PathBuf,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enable_cache: true,
      freshness: Freshness::SameDay,
      force_refresh: false,
      directory: PathBuf::from(DEFAULT_JSON_DIR),
    }
  }
}

impl CacheConfig {
  /// Builder: set enable_cache
  pub fn with_enabled(mut self, enabled: bool) -> Self {
    self.enable_cache = enabled;
    self
  }

  /// Builder: set force_refresh
  pub fn with_force_refresh(mut self, force: bool) -> Self {
    self.force_refresh = force;
    self
  }

  /// Builder: switch to age-based freshness; negative ages clamp to zero
  pub fn with_max_age_hours(mut self, hours: i64) -> Self {
    self.freshness = Freshness::MaxAgeHours(hours.max(0));
    self
  }

  pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
    self.directory = directory.into();
    self
  }
}

/// Result of a cache lookup
#[derive(Debug)]
pub enum CacheResult<T> {
  /// Cache hit with data
  Hit(T),
  /// No file, or the file is stale
  Miss,
  /// Cache disabled or force refresh
  Skipped,
  /// Unreadable file (logged, treated as miss)
  Error(String),
}

impl<T> CacheResult<T> {
  /// Returns true if this is a cache hit
  pub fn is_hit(&self) -> bool {
    matches!(self, CacheResult::Hit(_))
  }

  /// Returns true if cache was actually checked (not skipped)
  pub fn was_checked(&self) -> bool {
    !matches!(self, CacheResult::Skipped)
  }

  /// Convert to Option, returning None for non-hits
  pub fn into_option(self) -> Option<T> {
    match self {
      CacheResult::Hit(data) => Some(data),
      _ => None,
    }
  }
}

/// An envelope and where it came from
#[derive(Debug, Clone)]
pub struct Fetched {
  pub envelope: Envelope,
  pub from_cache: bool,
}

/// JSON file cache rooted at [`CacheConfig::directory`]
#[derive(Debug, Clone)]
pub struct JsonFileCache {
  config: CacheConfig,
}

impl JsonFileCache {
  pub fn new(config: CacheConfig) -> Self {
    Self { config }
  }

  /// Get the cache configuration
  pub fn config(&self) -> &CacheConfig {
    &self.config
  }

  pub fn is_read_enabled(&self) -> bool {
    self.config.enable_cache && !self.config.force_refresh
  }

  pub fn is_write_enabled(&self) -> bool {
    self.config.enable_cache
  }

  /// Today's UTC date as `YYYY_MM_DD`
  pub fn today_stamp() -> String {
    Self::stamp_for(Utc::now())
  }

  pub fn stamp_for(at: DateTime<Utc>) -> String {
    at.format("%Y_%m_%d").to_string()
  }

  /// `<dir>/<name>_<stamp>.json`, or `<dir>/<name>.json` without a stamp
  pub fn file_path(&self, name: &str, stamp: Option<&str>) -> PathBuf {
    let file_name = match stamp {
      Some(stamp) => format!("{}_{}.json", name, stamp),
      None => format!("{}.json", name),
    };
    self.config.directory.join(file_name)
  }

  /// Write `payload` as pretty JSON. A missing or `null` payload is an error.
  pub fn write<T: Serialize>(&self, name: &str, stamp: Option<&str>, payload: Option<&T>) -> LoaderResult<PathBuf> {
    let value = match payload {
      Some(payload) => serde_json::to_value(payload)?,
      None => return Err(LoaderError::EmptyPayload(name.to_string())),
    };
    if value.is_null() {
      return Err(LoaderError::EmptyPayload(name.to_string()));
    }

    fs::create_dir_all(&self.config.directory)?;
    let path = self.file_path(name, stamp);
    let mut text = serde_json::to_string_pretty(&value)?;
    text.push('\n');
    fs::write(&path, text)?;
    debug!("Wrote {}", path.display());
    Ok(path)
  }

  /// Read a stored envelope; `None` when the file does not exist
  pub fn read(&self, name: &str, stamp: Option<&str>) -> LoaderResult<Option<Envelope>> {
    let path = self.file_path(name, stamp);
    if !path.exists() {
      return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    let envelope = serde_json::from_str(&text)
      .map_err(|e| LoaderError::SerializationError(format!("{}: {}", path.display(), e)))?;
    Ok(Some(envelope))
  }

  /// Look `name` up under the configured freshness policy
  pub fn lookup(&self, name: &str) -> CacheResult<Envelope> {
    if !self.is_read_enabled() {
      return CacheResult::Skipped;
    }

    let read = match self.config.freshness {
      Freshness::SameDay => self.read(name, Some(&Self::today_stamp())),
      Freshness::MaxAgeHours(hours) => {
        let path = self.file_path(name, None);
        // ages past chrono's range accept any existing file
        let fresh = match Duration::try_hours(hours) {
          Some(max_age) => is_younger_than(&path, max_age),
          None => path.exists(),
        };
        if fresh {
          self.read(name, None)
        } else {
          Ok(None)
        }
      }
    };

    match read {
      Ok(Some(envelope)) => {
        info!("Cache hit for {}", name);
        CacheResult::Hit(envelope)
      }
      Ok(None) => {
        debug!("Cache miss for {}", name);
        CacheResult::Miss
      }
      Err(e) => {
        warn!("Cache read error for {}: {}", name, e);
        CacheResult::Error(e.to_string())
      }
    }
  }

  /// Store under the file name the freshness policy will look for.
  ///
  /// Returns `Ok(None)` when caching is disabled.
  pub fn store(&self, name: &str, envelope: &Envelope) -> LoaderResult<Option<PathBuf>> {
    if !self.is_write_enabled() {
      return Ok(None);
    }
    let path = match self.config.freshness {
      Freshness::SameDay => self.write(name, Some(&Self::today_stamp()), Some(envelope))?,
      Freshness::MaxAgeHours(_) => self.write(name, None, Some(envelope))?,
    };
    info!("Cached {} at {}", name, path.display());
    Ok(Some(path))
  }

  /// Serve `name` from the cache, or run `fetch` and store what it returns
  pub async fn get_or_fetch<F, Fut>(&self, name: &str, fetch: F) -> LoaderResult<Fetched>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = cmc_core::Result<Envelope>>,
  {
    if let CacheResult::Hit(envelope) = self.lookup(name) {
      return Ok(Fetched { envelope, from_cache: true });
    }

    let envelope = fetch().await?;
    if let Err(e) = self.store(name, &envelope) {
      // Don't fail the operation, just warn
      warn!("Failed to cache {}: {}", name, e);
    }
    Ok(Fetched { envelope, from_cache: false })
  }
}

fn is_younger_than(path: &Path, max_age: Duration) -> bool {
  let Ok(modified) = fs::metadata(path).and_then(|meta| meta.modified()) else {
    return false;
  };
  Utc::now() - DateTime::<Utc>::from(modified) < max_age
}
