//! MyAnimeList XML export codec for koyomi.
//!
//! Decodes the `<myanimelist>` export document into raw catalog records and
//! feeds them to the [`koyomi_core`] merge engine. Pure synchronous parsing;
//! no HTTP or database dependencies. Kitsu exports reuse the same document
//! shape, so they need no separate path.
//!
//! # Quick start
//!
//! ```no_run
//! let bytes = std::fs::read("animelist.xml").unwrap();
//! let parsed = koyomi_mal::parse_export(&bytes).unwrap();
//! println!("{} records, {} skipped", parsed.records.len(), parsed.warnings.len());
//! ```

pub mod error;

pub use error::{Error, Result};
use koyomi_core::{
  import::{ImportReport, ImportWarning, Importer, RawRecord, WarningReason},
  store::CatalogStore,
};
use quick_xml::events::Event;
use serde::Deserialize;

// ─── Document model ──────────────────────────────────────────────────────────

/// The subset of the export document the catalog cares about. Everything
/// else (`myinfo`, score/episode counters, …) is ignored on decode.
#[derive(Debug, Deserialize)]
struct MalDocument {
  #[serde(default)]
  anime: Vec<MalAnime>,
}

#[derive(Debug, Deserialize)]
struct MalAnime {
  #[serde(default)]
  series_animedb_id: String,
  #[serde(default)]
  series_title:      String,
  #[serde(default)]
  my_start_date:     String,
  #[serde(default)]
  my_status:         String,
}

// ─── Public types ────────────────────────────────────────────────────────────

/// The result of decoding one export document.
#[derive(Debug)]
pub struct ParsedExport {
  /// Records in document order, ids already integer-typed.
  pub records:  Vec<RawRecord>,
  /// Records skipped at decode time (unparseable ids). One bad record
  /// never aborts the document.
  pub warnings: Vec<ImportWarning>,
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Decode a MyAnimeList export document.
///
/// Fails only when the document as a whole cannot be decoded — wrong root
/// element, unclosed tags, non-XML bytes. A record whose
/// `series_animedb_id` does not parse as an integer is dropped into
/// [`ParsedExport::warnings`] and the rest of the document goes through.
pub fn parse_export(bytes: &[u8]) -> Result<ParsedExport> {
  expect_root(bytes, "myanimelist")?;
  let doc: MalDocument = quick_xml::de::from_reader(bytes)?;

  let mut records = Vec::with_capacity(doc.anime.len());
  let mut warnings = Vec::new();

  for anime in doc.anime {
    match anime.series_animedb_id.trim().parse::<i64>() {
      Ok(id) => records.push(RawRecord {
        id,
        title: anime.series_title,
        start_date: anime.my_start_date,
        status: anime.my_status,
      }),
      Err(_) => warnings.push(ImportWarning {
        id:     None,
        title:  anime.series_title,
        reason: WarningReason::InvalidId {
          raw: anime.series_animedb_id,
        },
      }),
    }
  }

  Ok(ParsedExport { records, warnings })
}

/// Decode `bytes` and merge every record into `store`.
///
/// This is the single entry point the file-reading layer calls: one export
/// in, one [`ImportReport`] out. Parser-level warnings are folded into the
/// report alongside the merge engine's own.
pub async fn import_export<S: CatalogStore>(
  store: &S,
  bytes: &[u8],
) -> Result<ImportReport> {
  let parsed = parse_export(bytes)?;
  let mut report = Importer::new(store).import(parsed.records).await;
  report.warnings.extend(parsed.warnings);
  Ok(report)
}

// ─── Root check ──────────────────────────────────────────────────────────────

/// The serde deserializer accepts any root element name, so the structural
/// check on the envelope happens here, against the raw event stream.
fn expect_root(bytes: &[u8], expected: &str) -> Result<()> {
  let mut reader = quick_xml::Reader::from_reader(bytes);
  loop {
    match reader.read_event()? {
      Event::Start(ref e) | Event::Empty(ref e) => {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        if name == expected {
          return Ok(());
        }
        return Err(Error::UnexpectedRoot(name));
      }
      Event::Eof => return Err(Error::EmptyDocument),
      _ => {}
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
