//! Error types for `koyomi-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A date string that is neither `YYYY-MM-DD` nor the unknown sentinel.
  #[error("invalid calendar date: {0:?}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
