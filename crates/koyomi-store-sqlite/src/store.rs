//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::NaiveDate;
use koyomi_core::{
  entry::{ActivityDate, CatalogEntry, Completion},
  store::CatalogStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawEntry, encode_activity_date, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A koyomi catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  async fn get(&self, id: i64) -> Result<Option<CatalogEntry>> {
    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, title, start_date, updated_date, completion
               FROM anime WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawEntry {
                  id:           row.get(0)?,
                  title:        row.get(1)?,
                  start_date:   row.get(2)?,
                  updated_date: row.get(3)?,
                  completion:   row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEntry::into_entry).transpose()
  }

  async fn create(&self, entry: CatalogEntry) -> Result<()> {
    let start_str   = encode_activity_date(entry.start_date);
    let updated_str = encode_date(entry.updated_date);
    let completion_str = entry.completion.as_label().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO anime (id, title, start_date, updated_date, completion)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            entry.id,
            entry.title,
            start_str,
            updated_str,
            completion_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update(
    &self,
    id: i64,
    start_date: ActivityDate,
    updated_date: NaiveDate,
    completion: Completion,
  ) -> Result<()> {
    let start_str      = encode_activity_date(start_date);
    let updated_str    = encode_date(updated_date);
    let completion_str = completion.as_label().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE anime SET start_date = ?2, updated_date = ?3, completion = ?4
           WHERE id = ?1",
          rusqlite::params![id, start_str, updated_str, completion_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::EntryNotFound(id));
    }
    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<CatalogEntry>> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, start_date, updated_date, completion
           FROM anime ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawEntry {
              id:           row.get(0)?,
              title:        row.get(1)?,
              start_date:   row.get(2)?,
              updated_date: row.get(3)?,
              completion:   row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }
}
