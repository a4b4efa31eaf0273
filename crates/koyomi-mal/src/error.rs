//! Error types for the koyomi-mal codec.
//!
//! Every variant is fatal to the whole import call: a document that cannot
//! be decoded produces no catalog writes at all. Per-record problems are
//! not errors — they surface as warnings in the parse result instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("export document has no root element")]
  EmptyDocument,

  #[error("not a MyAnimeList export: root element is <{0}>")]
  UnexpectedRoot(String),

  #[error("malformed XML: {0}")]
  Xml(#[from] quick_xml::Error),

  #[error("malformed export document: {0}")]
  Malformed(#[from] quick_xml::DeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
