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

//! # cmc-core
//!
//! Shared building blocks for the CoinMarketCap client crates: the endpoint
//! registry, query-parameter handling, configuration and the error type.

pub mod config;
pub mod error;
pub mod params;
pub mod registry;

pub use config::Config;
pub use error::{Error, Result};
pub use params::{encode_query, filter_params, ParamValue, QueryParams};
pub use registry::{Endpoint, EndpointDescriptor, EndpointRegistry};

/// Production base URL for the CoinMarketCap Pro API
pub const CMC_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Sandbox base URL (returns mock data, accepts the public sandbox key)
pub const CMC_SANDBOX_URL: &str = "https://sandbox-api.coinmarketcap.com";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Basic plan limit, requests per minute
pub const DEFAULT_RATE_LIMIT: u32 = 30;

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
