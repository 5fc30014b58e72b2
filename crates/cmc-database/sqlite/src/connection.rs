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

use crate::error::{DatabaseError, Result};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, warn};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "cryptodatabase.db";

const CREATE_PRICES_TABLE: &str = "
  CREATE TABLE IF NOT EXISTS prices(
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    symbol TEXT NOT NULL,
    slug TEXT NOT NULL,
    cmc_rank INTEGER,
    date_added TEXT,
    max_supply REAL,
    circulating_supply REAL,
    total_supply REAL,
    last_updated TEXT,
    price REAL,
    percent_change_1h REAL,
    percent_change_24h REAL,
    percent_change_7d REAL,
    percent_change_30d REAL,
    percent_change_60d REAL,
    percent_change_90d REAL)";

const CREATE_INFO_TABLE: &str = "
  CREATE TABLE IF NOT EXISTS info(
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    symbol TEXT NOT NULL,
    category TEXT,
    description TEXT,
    slug TEXT NOT NULL,
    logo TEXT,
    subreddit TEXT,
    notice TEXT,
    urls TEXT,
    platform TEXT,
    twitter_username TEXT,
    date_launched TEXT,
    contract_address TEXT,
    status TEXT,
    FOREIGN KEY(id) REFERENCES prices(id))";

/// Establish a database connection
pub fn establish_connection(database_url: &str) -> Result<SqliteConnection> {
  debug!("Opening SQLite database {}", database_url);
  Ok(SqliteConnection::establish(database_url)?)
}

/// Create `prices` and `info` if they do not exist
pub fn create_tables(conn: &mut SqliteConnection) -> Result<()> {
  sql_query(CREATE_PRICES_TABLE).execute(conn)?;
  sql_query(CREATE_INFO_TABLE).execute(conn)?;
  Ok(())
}

/// Run `op`; when it fails on a missing table, create the schema and retry once
pub fn with_tables<T, F>(conn: &mut SqliteConnection, mut op: F) -> Result<T>
where
  F: FnMut(&mut SqliteConnection) -> Result<T>,
{
  match op(conn) {
    Err(DatabaseError::MissingTable(message)) => {
      warn!("{}; creating tables and retrying", message);
      create_tables(conn)?;
      op(conn)
    }
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::prices;

  fn count(conn: &mut SqliteConnection) -> Result<i64> {
    Ok(prices::table.count().get_result(conn)?)
  }

  #[test]
  fn test_create_tables_is_idempotent() {
    let mut conn = establish_connection(":memory:").unwrap();
    create_tables(&mut conn).unwrap();
    create_tables(&mut conn).unwrap();
    assert_eq!(count(&mut conn).unwrap(), 0);
  }

  #[test]
  fn test_missing_table_detected() {
    let mut conn = establish_connection(":memory:").unwrap();
    let err = count(&mut conn).unwrap_err();
    assert!(err.is_missing_table(), "got {:?}", err);
  }

  #[test]
  fn test_with_tables_retries_once() {
    let mut conn = establish_connection(":memory:").unwrap();
    let mut calls = 0;
    let rows = with_tables(&mut conn, |conn| {
      calls += 1;
      count(conn)
    })
    .unwrap();
    assert_eq!(rows, 0);
    assert_eq!(calls, 2);
  }

  #[test]
  fn test_with_tables_passes_other_errors_through() {
    let mut conn = establish_connection(":memory:").unwrap();
    let err = with_tables(&mut conn, |_| -> Result<()> { Err(DatabaseError::Query("boom".to_string())) })
      .unwrap_err();
    assert!(matches!(err, DatabaseError::Query(_)));
  }

  #[test]
  fn test_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cryptodatabase.db");
    let url = path.to_string_lossy().to_string();
    {
      let mut conn = establish_connection(&url).unwrap();
      create_tables(&mut conn).unwrap();
    }
    assert!(path.exists());
  }
}
