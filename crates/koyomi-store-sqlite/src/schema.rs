//! SQL schema for the koyomi SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per tracked series, keyed by the platform's own id.
-- Rows are updated in place; the import path never deletes.
CREATE TABLE IF NOT EXISTS anime (
    id           INTEGER PRIMARY KEY,
    title        TEXT NOT NULL,
    start_date   TEXT NOT NULL,   -- YYYY-MM-DD, or 0000-00-00 when unknown
    updated_date TEXT NOT NULL,   -- date of the last accepted write
    completion   TEXT NOT NULL    -- canonical taxonomy label
);

PRAGMA user_version = 1;
";
