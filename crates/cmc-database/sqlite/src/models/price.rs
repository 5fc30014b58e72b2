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

//! Price rows: one per cryptocurrency, replaced wholesale when it changes

use crate::error::{DatabaseError, Result};
use crate::schema::prices;
use cmc_models::{PriceRecord, Quote};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Rows per multi-row INSERT, well under SQLite's bound-parameter limit
const INSERT_CHUNK: usize = 500;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = prices)]
pub struct Price {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub slug: String,
  pub cmc_rank: Option<i64>,
  pub date_added: Option<String>,
  pub max_supply: Option<f64>,
  pub circulating_supply: Option<f64>,
  pub total_supply: Option<f64>,
  pub last_updated: Option<String>,
  pub price: Option<f64>,
  pub percent_change_1h: Option<f64>,
  pub percent_change_24h: Option<f64>,
  pub percent_change_7d: Option<f64>,
  pub percent_change_30d: Option<f64>,
  pub percent_change_60d: Option<f64>,
  pub percent_change_90d: Option<f64>,
}

/// Full row as written; also the changeset for UPDATE, so absent values become NULL
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = prices)]
#[diesel(treat_none_as_null = true)]
pub struct NewPrice {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub slug: String,
  pub cmc_rank: Option<i64>,
  pub date_added: Option<String>,
  pub max_supply: Option<f64>,
  pub circulating_supply: Option<f64>,
  pub total_supply: Option<f64>,
  pub last_updated: Option<String>,
  pub price: Option<f64>,
  pub percent_change_1h: Option<f64>,
  pub percent_change_24h: Option<f64>,
  pub percent_change_7d: Option<f64>,
  pub percent_change_30d: Option<f64>,
  pub percent_change_60d: Option<f64>,
  pub percent_change_90d: Option<f64>,
}

/// What a refresh did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// Nothing written
  Unchanged,
  /// Table was empty; the batch was inserted
  Inserted(usize),
  /// Rows rewritten by id, plus ids that had no row yet
  Refreshed { updated: usize, inserted: usize },
}

impl UpdateOutcome {
  pub fn rows_written(&self) -> usize {
    match self {
      UpdateOutcome::Unchanged => 0,
      UpdateOutcome::Inserted(n) => *n,
      UpdateOutcome::Refreshed { updated, inserted } => updated + inserted,
    }
  }
}

impl From<&PriceRecord> for NewPrice {
  /// Flatten a listing record; quote columns come from the USD quote and
  /// stay NULL when the record has none
  fn from(record: &PriceRecord) -> Self {
    NewPrice::flatten(record, &record.usd().cloned().unwrap_or_default())
  }
}

impl NewPrice {
  /// Flatten a listing record using its quote in `currency`, or `None`
  /// when the record was not quoted in that currency
  pub fn with_quote(record: &PriceRecord, currency: &str) -> Option<Self> {
    record.quote_in(currency).map(|quote| NewPrice::flatten(record, quote))
  }

  fn flatten(record: &PriceRecord, quote: &Quote) -> Self {
    NewPrice {
      id: record.id,
      name: record.name.clone(),
      symbol: record.symbol.clone(),
      slug: record.slug.clone(),
      cmc_rank: record.cmc_rank,
      date_added: record.date_added.clone(),
      max_supply: record.max_supply,
      circulating_supply: record.circulating_supply,
      total_supply: record.total_supply,
      last_updated: record.last_updated.clone(),
      price: quote.price,
      percent_change_1h: quote.percent_change_1h,
      percent_change_24h: quote.percent_change_24h,
      percent_change_7d: quote.percent_change_7d,
      percent_change_30d: quote.percent_change_30d,
      percent_change_60d: quote.percent_change_60d,
      percent_change_90d: quote.percent_change_90d,
    }
  }

  /// Bulk `INSERT OR IGNORE`; existing ids are left untouched
  pub fn insert_all(conn: &mut SqliteConnection, batch: &[NewPrice]) -> Result<usize> {
    let mut total = 0;
    for chunk in batch.chunks(INSERT_CHUNK) {
      total += diesel::insert_or_ignore_into(prices::table).values(chunk).execute(conn)?;
    }
    debug!("Inserted {} of {} price rows", total, batch.len());
    Ok(total)
  }

  /// Refresh keyed on the batch head.
  ///
  /// Only `batch[0]` is compared: when its stored `last_updated` matches, the
  /// whole batch is assumed current and nothing is written. Otherwise every
  /// record is rewritten in one transaction. An empty table gets the batch
  /// inserted.
  pub fn update_all(conn: &mut SqliteConnection, batch: &[NewPrice]) -> Result<UpdateOutcome> {
    let Some(head) = batch.first() else {
      return Ok(UpdateOutcome::Unchanged);
    };

    if Price::count(conn)? == 0 {
      let inserted = Self::insert_all(conn, batch)?;
      info!("Price table was empty, inserted {} rows", inserted);
      return Ok(UpdateOutcome::Inserted(inserted));
    }

    if let Some(stored) = Price::find(conn, head.id)? {
      if stored.last_updated == head.last_updated {
        debug!("Head record {} unchanged since {:?}", head.id, head.last_updated);
        return Ok(UpdateOutcome::Unchanged);
      }
    }

    let outcome = conn.transaction::<_, DatabaseError, _>(|conn| {
      let mut updated = 0;
      let mut inserted = 0;
      for record in batch {
        match record.write(conn)? {
          Written::Updated => updated += 1,
          Written::Inserted => inserted += 1,
        }
      }
      Ok(UpdateOutcome::Refreshed { updated, inserted })
    })?;
    info!("Price refresh: {:?}", outcome);
    Ok(outcome)
  }

  /// Refresh compared per record: only rows whose `last_updated` moved are rewritten
  pub fn update_changed(conn: &mut SqliteConnection, batch: &[NewPrice]) -> Result<UpdateOutcome> {
    if batch.is_empty() {
      return Ok(UpdateOutcome::Unchanged);
    }

    let stored: HashMap<i64, Option<String>> = prices::table
      .select((prices::id, prices::last_updated))
      .load::<(i64, Option<String>)>(conn)?
      .into_iter()
      .collect();

    let outcome = conn.transaction::<_, DatabaseError, _>(|conn| {
      let mut updated = 0;
      let mut inserted = 0;
      for record in batch {
        match stored.get(&record.id) {
          Some(last) if *last == record.last_updated => continue,
          Some(_) => {
            diesel::update(prices::table.find(record.id)).set(record).execute(conn)?;
            updated += 1;
          }
          None => {
            diesel::insert_into(prices::table).values(record).execute(conn)?;
            inserted += 1;
          }
        }
      }
      Ok(if updated + inserted == 0 {
        UpdateOutcome::Unchanged
      } else {
        UpdateOutcome::Refreshed { updated, inserted }
      })
    })?;
    info!("Per-record price refresh: {:?}", outcome);
    Ok(outcome)
  }

  /// UPDATE by id, falling back to INSERT when the id has no row
  fn write(&self, conn: &mut SqliteConnection) -> Result<Written> {
    let rows = diesel::update(prices::table.find(self.id)).set(self).execute(conn)?;
    if rows == 0 {
      diesel::insert_into(prices::table).values(self).execute(conn)?;
      Ok(Written::Inserted)
    } else {
      Ok(Written::Updated)
    }
  }
}

enum Written {
  Updated,
  Inserted,
}

impl Price {
  pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Self>> {
    Ok(prices::table.select(Price::as_select()).order(prices::cmc_rank.asc()).load(conn)?)
  }

  pub fn find(conn: &mut SqliteConnection, price_id: i64) -> Result<Option<Self>> {
    Ok(prices::table.find(price_id).select(Price::as_select()).first(conn).optional()?)
  }

  pub fn count(conn: &mut SqliteConnection) -> Result<i64> {
    Ok(prices::table.count().get_result(conn)?)
  }

  /// Stored `last_updated` for one id; `None` when the row is missing or has no stamp
  pub fn last_updated_for(conn: &mut SqliteConnection, price_id: i64) -> Result<Option<String>> {
    let stamp = prices::table
      .find(price_id)
      .select(prices::last_updated)
      .first::<Option<String>>(conn)
      .optional()?;
    Ok(stamp.flatten())
  }

  pub fn ids(conn: &mut SqliteConnection) -> Result<Vec<i64>> {
    Ok(prices::table.select(prices::id).order(prices::id.asc()).load(conn)?)
  }

  /// Comma-joined ids, ready for an `id=` parameter
  pub fn id_list(conn: &mut SqliteConnection) -> Result<String> {
    Ok(Self::ids(conn)?.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(","))
  }
}
