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

use crate::error::Result;
use crate::schema::info;
use cmc_models::CoinInfo as CoinInfoRecord;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_CHUNK: usize = 500;

/// Stored coin metadata; nested JSON fields are kept as text
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = info)]
pub struct CoinInfo {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub category: Option<String>,
  pub description: Option<String>,
  pub slug: String,
  pub logo: Option<String>,
  pub subreddit: Option<String>,
  pub notice: Option<String>,
  pub urls: Option<String>,
  pub platform: Option<String>,
  pub twitter_username: Option<String>,
  pub date_launched: Option<String>,
  pub contract_address: Option<String>,
  pub status: Option<String>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = info)]
pub struct NewCoinInfo {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub category: Option<String>,
  pub description: Option<String>,
  pub slug: String,
  pub logo: Option<String>,
  pub subreddit: Option<String>,
  pub notice: Option<String>,
  pub urls: Option<String>,
  pub platform: Option<String>,
  pub twitter_username: Option<String>,
  pub date_launched: Option<String>,
  pub contract_address: Option<String>,
  pub status: Option<String>,
}

impl From<&CoinInfoRecord> for NewCoinInfo {
  fn from(record: &CoinInfoRecord) -> Self {
    NewCoinInfo {
      id: record.id,
      name: record.name.clone(),
      symbol: record.symbol.clone(),
      category: record.category.clone(),
      description: record.description.clone(),
      slug: record.slug.clone(),
      logo: record.logo.clone(),
      subreddit: record.subreddit.clone(),
      notice: record.notice.clone(),
      urls: record.urls_text(),
      platform: record.platform_text(),
      twitter_username: record.twitter_username.clone(),
      date_launched: record.date_launched.clone(),
      contract_address: record.contract_address_text(),
      status: record.status.clone(),
    }
  }
}

impl NewCoinInfo {
  /// Bulk `INSERT OR IGNORE`; info rows are written once and never refreshed
  pub fn insert_all(conn: &mut SqliteConnection, batch: &[NewCoinInfo]) -> Result<usize> {
    let mut total = 0;
    for chunk in batch.chunks(INSERT_CHUNK) {
      total += diesel::insert_or_ignore_into(info::table).values(chunk).execute(conn)?;
    }
    debug!("Inserted {} of {} info rows", total, batch.len());
    Ok(total)
  }
}

impl CoinInfo {
  pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Self>> {
    Ok(info::table.select(CoinInfo::as_select()).order(info::id.asc()).load(conn)?)
  }

  pub fn find(conn: &mut SqliteConnection, coin_id: i64) -> Result<Option<Self>> {
    Ok(info::table.find(coin_id).select(CoinInfo::as_select()).first(conn).optional()?)
  }

  pub fn count(conn: &mut SqliteConnection) -> Result<i64> {
    Ok(info::table.count().get_result(conn)?)
  }
}
