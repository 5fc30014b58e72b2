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

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DatabaseError {
  #[error("Connection error: {0}")]
  Connection(String),

  #[error("Database query error: {0}")]
  Query(String),

  /// `no such table`; recoverable by creating the schema
  #[error("Missing table: {0}")]
  MissingTable(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Constraint violation: {0}")]
  ConstraintViolation(String),
}

impl DatabaseError {
  pub fn is_missing_table(&self) -> bool {
    matches!(self, DatabaseError::MissingTable(_))
  }
}

impl From<DieselError> for DatabaseError {
  fn from(err: DieselError) -> Self {
    match err {
      DieselError::NotFound => DatabaseError::NotFound("Record not found".to_string()),
      DieselError::DatabaseError(kind, info) => {
        let message = info.message().to_string();
        match kind {
          DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation => {
            DatabaseError::ConstraintViolation(message)
          }
          _ if message.contains("no such table") => DatabaseError::MissingTable(message),
          _ => DatabaseError::Query(message),
        }
      }
      _ => DatabaseError::Query(err.to_string()),
    }
  }
}

impl From<diesel::ConnectionError> for DatabaseError {
  fn from(err: diesel::ConnectionError) -> Self {
    DatabaseError::Connection(err.to_string())
  }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
