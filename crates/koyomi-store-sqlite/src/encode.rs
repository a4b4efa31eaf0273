//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All dates are stored as `YYYY-MM-DD` strings; the activity date keeps
//! the platform's `0000-00-00` unknown sentinel on disk. Completion is
//! stored as its canonical label.

use chrono::NaiveDate;
use koyomi_core::entry::{ActivityDate, CatalogEntry, Completion};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_activity_date(date: ActivityDate) -> String {
  date.to_string()
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One `anime` row as raw column text, before decoding.
pub struct RawEntry {
  pub id:           i64,
  pub title:        String,
  pub start_date:   String,
  pub updated_date: String,
  pub completion:   String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<CatalogEntry> {
    Ok(CatalogEntry {
      id:           self.id,
      title:        self.title,
      start_date:   self.start_date.parse::<ActivityDate>()?,
      updated_date: decode_date(&self.updated_date)?,
      completion:   Completion::from_label(&self.completion),
    })
  }
}
