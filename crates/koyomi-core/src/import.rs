//! The import/merge engine.
//!
//! Reconciles records decoded from a platform export against the catalog:
//! create on first encounter of an id, update when the candidate's activity
//! date is not older than the stored one, skip otherwise. Re-running the
//! same import changes nothing except `updated_date` refreshing on every
//! record whose date comparison is non-strictly-less.

use std::fmt;

use chrono::{Local, NaiveDate};

use crate::{
  entry::{ActivityDate, CatalogEntry, Completion},
  store::CatalogStore,
};

// ─── Records and outcomes ────────────────────────────────────────────────────

/// One record decoded from a platform export, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
  pub id:         i64,
  pub title:      String,
  /// Activity date exactly as exported (`YYYY-MM-DD` or `0000-00-00`).
  pub start_date: String,
  /// Status in the platform's own vocabulary.
  pub status:     String,
}

/// Why a record did not reach the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
  /// The export's id field did not parse as an integer.
  InvalidId { raw: String },
  /// The record's activity date is neither a calendar date nor the
  /// unknown sentinel.
  BadDate { raw: String },
  /// The backend rejected the lookup or write.
  Store { message: String },
}

impl fmt::Display for WarningReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidId { raw } => write!(f, "unparseable id {raw:?}"),
      Self::BadDate { raw } => write!(f, "unparseable date {raw:?}"),
      Self::Store { message } => write!(f, "store error: {message}"),
    }
  }
}

/// A per-record failure. Collected, never thrown; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
  /// Platform id, when one was decoded.
  pub id:     Option<i64>,
  pub title:  String,
  pub reason: WarningReason,
}

impl fmt::Display for ImportWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.id {
      Some(id) => write!(f, "{:?} (id {id}): {}", self.title, self.reason),
      None => write!(f, "{:?}: {}", self.title, self.reason),
    }
  }
}

/// Outcome summary of one import run.
///
/// Every record lands in exactly one bucket; nothing is silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
  /// Records written to the catalog (created or updated).
  pub accepted: usize,
  /// Records skipped because the stored entry had more recent activity.
  pub stale:    usize,
  pub warnings: Vec<ImportWarning>,
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Applies the create-or-update-or-skip policy, record by record.
pub struct Importer<'a, S> {
  store: &'a S,
  /// Stamped into `updated_date` on every accepted write.
  today: NaiveDate,
}

impl<'a, S: CatalogStore> Importer<'a, S> {
  /// An importer stamping accepted writes with the local calendar date.
  pub fn new(store: &'a S) -> Self {
    Self {
      store,
      today: Local::now().date_naive(),
    }
  }

  /// Pin the write stamp, so tests can fix "today".
  pub fn with_today(store: &'a S, today: NaiveDate) -> Self {
    Self { store, today }
  }

  /// Fold `records` into the catalog, in order.
  ///
  /// One lookup and at most one write per record; a record failure never
  /// aborts the batch. Interrupting between records leaves the already
  /// processed records committed.
  pub async fn import<I>(&self, records: I) -> ImportReport
  where
    I: IntoIterator<Item = RawRecord>,
  {
    let mut report = ImportReport::default();
    for record in records {
      self.merge_one(record, &mut report).await;
    }
    report
  }

  async fn merge_one(&self, record: RawRecord, report: &mut ImportReport) {
    let start_date: ActivityDate = match record.start_date.parse() {
      Ok(date) => date,
      Err(_) => {
        report.warnings.push(ImportWarning {
          id:     Some(record.id),
          title:  record.title,
          reason: WarningReason::BadDate {
            raw: record.start_date,
          },
        });
        return;
      }
    };

    let completion = Completion::normalize(&record.status);

    let existing = match self.store.get(record.id).await {
      Ok(existing) => existing,
      Err(e) => {
        report.warnings.push(ImportWarning {
          id:     Some(record.id),
          title:  record.title,
          reason: WarningReason::Store {
            message: e.to_string(),
          },
        });
        return;
      }
    };

    let write = match existing {
      // First encounter of this id: always accepted, whatever the date —
      // the unknown sentinel included.
      None => {
        self
          .store
          .create(CatalogEntry {
            id:           record.id,
            title:        record.title.clone(),
            start_date,
            updated_date: self.today,
            completion,
          })
          .await
      }
      Some(existing) => {
        // An older export must never roll back more recent activity.
        // Equal dates still count as accept, refreshing `updated_date`.
        if start_date < existing.start_date {
          report.stale += 1;
          return;
        }
        self
          .store
          .update(record.id, start_date, self.today, completion)
          .await
      }
    };

    match write {
      Ok(()) => report.accepted += 1,
      Err(e) => report.warnings.push(ImportWarning {
        id:     Some(record.id),
        title:  record.title,
        reason: WarningReason::Store {
          message: e.to_string(),
        },
      }),
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
