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

//! # cmc-loaders
//!
//! Fetch, cache and persist flows for CoinMarketCap data.
//!
//! This crate provides:
//! - A dated JSON file cache so listings are fetched at most once a day
//! - Loaders for the id map, latest listings (into SQLite) and coin info
//! - The credit-usage file refreshed from the key-info endpoint

pub mod cache;
pub mod credits;
pub mod error;
pub mod id_map_loader;
pub mod info_loader;
pub mod loader;
pub mod price_loader;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheResult, Fetched, Freshness, JsonFileCache, DEFAULT_JSON_DIR};
pub use credits::{refresh_credits, CreditFile, CreditUsage, DEFAULT_CREDIT_FILE};
pub use error::{LoaderError, LoaderResult};
pub use loader::{DataLoader, LoaderConfig, LoaderContext};

// Re-export loaders
pub use id_map_loader::{IdMapLoader, IdMapLoaderInput, IdMapLoaderOutput, ID_MAP_CACHE_NAME};
pub use info_loader::{InfoLoader, InfoLoaderInput, InfoLoaderOutput};
pub use price_loader::{listing_cache_name, PriceLoader, PriceLoaderInput, PriceLoaderOutput, LISTING_CACHE_NAME};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    CacheConfig, CreditFile, DataLoader, IdMapLoader, InfoLoader, JsonFileCache, LoaderConfig, LoaderContext,
    LoaderError, LoaderResult, PriceLoader,
  };
}
