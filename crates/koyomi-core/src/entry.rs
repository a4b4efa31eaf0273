//! Catalog entry types and the status normalizer.
//!
//! Every tracking platform exports its own status vocabulary; the catalog
//! stores one canonical taxonomy. Normalization happens before anything is
//! written, so raw platform strings never reach storage unmapped.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ─── Activity date ───────────────────────────────────────────────────────────

/// Wire form of [`ActivityDate::Unknown`], as exported by the platform.
pub const DATE_UNKNOWN: &str = "0000-00-00";

/// The platform-reported date of last meaningful activity on an entry
/// (the start-watching date in MyAnimeList exports).
///
/// Exports use `0000-00-00` for entries the platform has no date for, e.g.
/// plan-to-watch titles that were never started. An unknown date orders
/// before every known date, so it can never win a recency comparison;
/// unknown compares equal to unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ActivityDate {
  Unknown,
  Known(NaiveDate),
}

impl Ord for ActivityDate {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Self::Unknown, Self::Unknown) => Ordering::Equal,
      (Self::Unknown, Self::Known(_)) => Ordering::Less,
      (Self::Known(_), Self::Unknown) => Ordering::Greater,
      (Self::Known(a), Self::Known(b)) => a.cmp(b),
    }
  }
}

impl PartialOrd for ActivityDate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl FromStr for ActivityDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    if s == DATE_UNKNOWN {
      return Ok(Self::Unknown);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self::Known)
      .map_err(|_| Error::DateParse(s.to_owned()))
  }
}

impl fmt::Display for ActivityDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unknown => f.write_str(DATE_UNKNOWN),
      Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
    }
  }
}

impl From<ActivityDate> for String {
  fn from(date: ActivityDate) -> Self {
    date.to_string()
  }
}

impl TryFrom<String> for ActivityDate {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Error> {
    s.parse()
  }
}

// ─── Completion ──────────────────────────────────────────────────────────────

/// Canonical completion taxonomy.
///
/// The five tagged variants are the closed set the catalog works in.
/// [`Completion::Other`] carries source vocabulary the normalizer does not
/// recognise, verbatim — a best-effort fallback, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Completion {
  Watching,
  PlanToWatch,
  Completed,
  OnHold,
  Dropped,
  Other(String),
}

impl Completion {
  /// Map a platform's status vocabulary onto the canonical taxonomy.
  ///
  /// MyAnimeList spells two values differently from the canonical labels;
  /// the rest already match. Deterministic and total — never fails.
  pub fn normalize(raw: &str) -> Self {
    match raw {
      "Plan to Watch" => Self::PlanToWatch,
      "On-Hold" => Self::OnHold,
      other => Self::from_label(other),
    }
  }

  /// Decode the stored text form. Unknown labels become [`Self::Other`].
  pub fn from_label(label: &str) -> Self {
    match label {
      "Watching" => Self::Watching,
      "Plan To Watch" => Self::PlanToWatch,
      "Completed" => Self::Completed,
      "On Hold" => Self::OnHold,
      "Dropped" => Self::Dropped,
      other => Self::Other(other.to_owned()),
    }
  }

  /// The text form written to storage and shown in tables.
  pub fn as_label(&self) -> &str {
    match self {
      Self::Watching => "Watching",
      Self::PlanToWatch => "Plan To Watch",
      Self::Completed => "Completed",
      Self::OnHold => "On Hold",
      Self::Dropped => "Dropped",
      Self::Other(raw) => raw,
    }
  }
}

impl fmt::Display for Completion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_label())
  }
}

impl From<String> for Completion {
  fn from(s: String) -> Self {
    Self::from_label(&s)
  }
}

impl From<Completion> for String {
  fn from(c: Completion) -> Self {
    c.as_label().to_owned()
  }
}

// ─── Catalog entry ───────────────────────────────────────────────────────────

/// The persisted unit: one tracked series per platform id.
///
/// Created on first encounter of an id during import, updated in place
/// afterwards, never deleted by the import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
  /// Stable id assigned by the source platform; primary key.
  pub id:           i64,
  /// Display title. Immutable after creation — titles are assumed stable
  /// per id.
  pub title:        String,
  /// Last meaningful activity reported by the platform. Monotonic under
  /// the merge policy.
  pub start_date:   ActivityDate,
  /// Date of the most recent accepted write, stamped by the importer.
  pub updated_date: NaiveDate,
  pub completion:   Completion,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn activity_date_parses_sentinel_and_dates() {
    assert_eq!(DATE_UNKNOWN.parse::<ActivityDate>().unwrap(), ActivityDate::Unknown);
    assert_eq!(
      "2021-07-06".parse::<ActivityDate>().unwrap(),
      ActivityDate::Known(day(2021, 7, 6)),
    );
  }

  #[test]
  fn activity_date_rejects_garbage() {
    assert!("yesterday".parse::<ActivityDate>().is_err());
    assert!("2021-13-40".parse::<ActivityDate>().is_err());
    assert!("".parse::<ActivityDate>().is_err());
  }

  #[test]
  fn activity_date_round_trips() {
    for s in [DATE_UNKNOWN, "2024-11-13"] {
      assert_eq!(s.parse::<ActivityDate>().unwrap().to_string(), s);
    }
  }

  #[test]
  fn unknown_orders_before_every_known_date() {
    let known = ActivityDate::Known(day(1970, 1, 1));
    assert!(ActivityDate::Unknown < known);
    assert_eq!(ActivityDate::Unknown, ActivityDate::Unknown);
    assert!(
      ActivityDate::Known(day(2021, 7, 6)) < ActivityDate::Known(day(2024, 11, 13))
    );
  }

  #[test]
  fn normalize_maps_platform_spellings() {
    assert_eq!(Completion::normalize("Plan to Watch"), Completion::PlanToWatch);
    assert_eq!(Completion::normalize("On-Hold"), Completion::OnHold);
    assert_eq!(Completion::normalize("Watching"), Completion::Watching);
    assert_eq!(Completion::normalize("Completed"), Completion::Completed);
    assert_eq!(Completion::normalize("Dropped"), Completion::Dropped);
  }

  #[test]
  fn normalize_passes_unknown_vocabulary_through() {
    // Case-sensitive on the known source strings; anything else verbatim.
    assert_eq!(
      Completion::normalize("plan to watch"),
      Completion::Other("plan to watch".to_owned()),
    );
    assert_eq!(
      Completion::normalize("Rewatching"),
      Completion::Other("Rewatching".to_owned()),
    );
    assert_eq!(Completion::normalize("Rewatching").as_label(), "Rewatching");
  }

  #[test]
  fn completion_label_round_trips() {
    for label in ["Watching", "Plan To Watch", "Completed", "On Hold", "Dropped"] {
      assert_eq!(Completion::from_label(label).as_label(), label);
    }
  }
}
