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

//! # cmc-client
//!
//! Async client for the CoinMarketCap Pro API.
//!
//! Each operation is a registry lookup, a parameter whitelist, one GET and a
//! reshaping of the JSON into an [`Envelope`] of `{metadata, data}`.
//!
//! ## Rate Limiting
//!
//! Requests pass through a `governor` limiter, 30 per minute by default (the
//! basic plan). Set `CMC_RATE_LIMIT` for other plans.
//!
//! ## Error Handling
//!
//! All methods return `Result<T, cmc_core::Error>`. Nothing is retried: a
//! failed call means no data this cycle.
#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod normalizer;
pub mod transport;

pub use client::CoinMarketCapClient;
pub use cmc_core::{Config, Error, Result};
pub use cmc_models::{Envelope, Metadata};
pub use endpoints::{
  cryptocurrency::CryptocurrencyEndpoints, exchange::ExchangeEndpoints, fiat::FiatEndpoints,
  global_metrics::GlobalMetricsEndpoints, key::KeyEndpoints, tools::ToolsEndpoints, EndpointBase,
};
pub use normalizer::{normalize, normalize_value, ResponseShape};
pub use transport::{RawResponse, Transport};
