//! Error type for `koyomi-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] koyomi_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// Attempted to update an id that was never created.
  #[error("no entry with id {0}")]
  EntryNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
