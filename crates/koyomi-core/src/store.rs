//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `koyomi-store-sqlite`).
//! The importer and the terminal client depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::entry::{ActivityDate, CatalogEntry, Completion};

/// Abstraction over a catalog storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point lookup by platform id. Returns `None` if the id is untracked.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CatalogEntry>, Self::Error>> + Send + '_;

  /// Insert a brand-new entry. Fails on a duplicate id.
  fn create(
    &self,
    entry: CatalogEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Overwrite the mutable fields of an existing entry.
  ///
  /// `id` and `title` are immutable after creation.
  fn update(
    &self,
    id: i64,
    start_date: ActivityDate,
    updated_date: NaiveDate,
    completion: Completion,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every entry in the catalog, ordered by id ascending.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<CatalogEntry>, Self::Error>> + Send + '_;
}
