//! Integration tests for `SqliteStore` against an in-memory database,
//! including full export-import runs through the merge engine.

use chrono::NaiveDate;
use koyomi_core::{
  entry::{ActivityDate, CatalogEntry, Completion, DATE_UNKNOWN},
  import::Importer,
  store::CatalogStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(id: i64, title: &str) -> CatalogEntry {
  CatalogEntry {
    id,
    title: title.to_owned(),
    start_date: ActivityDate::Known(day(2021, 7, 6)),
    updated_date: day(2024, 1, 1),
    completion: Completion::Watching,
  }
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trip() {
  let s = store().await;
  let e = entry(21, "One Piece");

  s.create(e.clone()).await.unwrap();
  let fetched = s.get(21).await.unwrap();
  assert_eq!(fetched, Some(e));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(404).await.unwrap().is_none());
}

#[tokio::test]
async fn create_duplicate_id_fails() {
  let s = store().await;
  s.create(entry(21, "One Piece")).await.unwrap();

  let result = s.create(entry(21, "One Piece")).await;
  assert!(matches!(result, Err(Error::Database(_))));

  // The original row is untouched.
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_touches_only_mutable_fields() {
  let s = store().await;
  s.create(entry(21, "One Piece")).await.unwrap();

  s.update(
    21,
    ActivityDate::Known(day(2024, 11, 13)),
    day(2024, 12, 1),
    Completion::Completed,
  )
  .await
  .unwrap();

  let e = s.get(21).await.unwrap().unwrap();
  assert_eq!(e.title, "One Piece");
  assert_eq!(e.start_date, ActivityDate::Known(day(2024, 11, 13)));
  assert_eq!(e.updated_date, day(2024, 12, 1));
  assert_eq!(e.completion, Completion::Completed);
}

#[tokio::test]
async fn update_missing_id_fails() {
  let s = store().await;
  let result = s
    .update(404, ActivityDate::Unknown, day(2024, 1, 1), Completion::Watching)
    .await;
  assert!(matches!(result, Err(Error::EntryNotFound(404))));
}

#[tokio::test]
async fn list_all_orders_by_id_ascending() {
  let s = store().await;
  for id in [853, 21, 30276, 66] {
    s.create(entry(id, "x")).await.unwrap();
  }

  let ids: Vec<i64> = s.list_all().await.unwrap().iter().map(|e| e.id).collect();
  assert_eq!(ids, [21, 66, 853, 30276]);
}

#[tokio::test]
async fn unknown_sentinel_and_other_completion_round_trip() {
  let s = store().await;
  s.create(CatalogEntry {
    id: 1,
    title: "A".to_owned(),
    start_date: ActivityDate::Unknown,
    updated_date: day(2024, 1, 1),
    completion: Completion::Other("Rewatching".to_owned()),
  })
  .await
  .unwrap();

  let e = s.get(1).await.unwrap().unwrap();
  assert_eq!(e.start_date, ActivityDate::Unknown);
  assert_eq!(e.completion, Completion::Other("Rewatching".to_owned()));
}

// ─── Export import runs ──────────────────────────────────────────────────────

const EXPORT_A: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
  <myanimelist>
      <anime>
          <series_animedb_id>853</series_animedb_id>
          <series_title><![CDATA[Ouran Koukou Host Club]]></series_title>
          <my_start_date>2022-01-07</my_start_date>
          <my_status>Dropped</my_status>
      </anime>
      <anime>
          <series_animedb_id>66</series_animedb_id>
          <series_title><![CDATA[Azumanga Daiou The Animation]]></series_title>
          <my_start_date>0000-00-00</my_start_date>
          <my_status>Plan to Watch</my_status>
      </anime>
      <anime>
          <series_animedb_id>21</series_animedb_id>
          <series_title><![CDATA[One Piece]]></series_title>
          <my_start_date>2021-07-06</my_start_date>
          <my_status>Dropped</my_status>
      </anime>
  </myanimelist>
"#;

const EXPORT_B: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
  <myanimelist>
      <anime>
          <series_animedb_id>66</series_animedb_id>
          <series_title><![CDATA[Azumanga Daiou The Animation]]></series_title>
          <my_start_date>0000-00-00</my_start_date>
          <my_status>Plan to Watch</my_status>
      </anime>
      <anime>
          <series_animedb_id>21</series_animedb_id>
          <series_title><![CDATA[One Piece]]></series_title>
          <my_start_date>2024-11-13</my_start_date>
          <my_status>Watching</my_status>
      </anime>
      <anime>
          <series_animedb_id>30276</series_animedb_id>
          <series_title><![CDATA[One Punch Man]]></series_title>
          <my_start_date>2020-02-05</my_start_date>
          <my_status>Completed</my_status>
      </anime>
  </myanimelist>
"#;

/// Parse an export and merge it with a pinned "today".
async fn run_import(s: &SqliteStore, xml: &str, today: NaiveDate) -> koyomi_core::import::ImportReport {
  let parsed = koyomi_mal::parse_export(xml.as_bytes()).expect("well-formed export");
  let mut report = Importer::with_today(s, today).import(parsed.records).await;
  report.warnings.extend(parsed.warnings);
  report
}

#[tokio::test]
async fn two_exports_merge_without_duplicates_or_regression() {
  let s = store().await;
  let first = day(2024, 11, 1);
  let second = day(2024, 11, 13);

  run_import(&s, EXPORT_A, first).await;
  run_import(&s, EXPORT_B, second).await;

  let expected = vec![
    CatalogEntry {
      id: 21,
      title: "One Piece".to_owned(),
      start_date: ActivityDate::Known(day(2024, 11, 13)),
      updated_date: second,
      completion: Completion::Watching,
    },
    CatalogEntry {
      id: 66,
      title: "Azumanga Daiou The Animation".to_owned(),
      start_date: ActivityDate::Unknown,
      updated_date: second,
      completion: Completion::PlanToWatch,
    },
    CatalogEntry {
      id: 853,
      title: "Ouran Koukou Host Club".to_owned(),
      start_date: ActivityDate::Known(day(2022, 1, 7)),
      updated_date: first,
      completion: Completion::Dropped,
    },
    CatalogEntry {
      id: 30276,
      title: "One Punch Man".to_owned(),
      start_date: ActivityDate::Known(day(2020, 2, 5)),
      updated_date: second,
      completion: Completion::Completed,
    },
  ];

  assert_eq!(s.list_all().await.unwrap(), expected);
}

#[tokio::test]
async fn reimporting_the_same_export_is_idempotent() {
  let s = store().await;
  let first = day(2024, 11, 1);
  let second = day(2024, 11, 13);

  let r1 = run_import(&s, EXPORT_A, first).await;
  let before = s.list_all().await.unwrap();
  let r2 = run_import(&s, EXPORT_A, second).await;
  let after = s.list_all().await.unwrap();

  assert_eq!(r1.accepted, 3);
  assert_eq!(r2.accepted, 3);
  assert!(r2.warnings.is_empty());

  // No rows appear or disappear; every field except `updated_date` is
  // bit-for-bit identical, and `updated_date` is the second run's stamp.
  assert_eq!(after.len(), before.len());
  for (b, a) in before.iter().zip(&after) {
    assert_eq!(a.id, b.id);
    assert_eq!(a.title, b.title);
    assert_eq!(a.start_date, b.start_date);
    assert_eq!(a.completion, b.completion);
    assert_eq!(a.updated_date, second);
  }
}

#[tokio::test]
async fn an_older_export_cannot_regress_the_catalog() {
  let s = store().await;

  run_import(&s, EXPORT_B, day(2024, 11, 13)).await;
  let before = s.list_all().await.unwrap();

  // Import the older list afterwards: 21 regresses to 2021 (skipped),
  // 66 ties (refreshed), 853 is new (created).
  let report = run_import(&s, EXPORT_A, day(2024, 12, 1)).await;

  assert_eq!(report.accepted, 2);
  assert_eq!(report.stale, 1);

  let one_piece = s.get(21).await.unwrap().unwrap();
  let before_one_piece = before.iter().find(|e| e.id == 21).unwrap();
  assert_eq!(&one_piece, before_one_piece);
}

#[tokio::test]
async fn malformed_document_imports_nothing() {
  let s = store().await;

  let result = koyomi_mal::import_export(&s, b"<wrong-root></wrong-root>").await;
  assert!(result.is_err());
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn import_export_accepts_a_real_document() {
  let s = store().await;

  let report = koyomi_mal::import_export(&s, EXPORT_A.as_bytes())
    .await
    .unwrap();

  assert_eq!(report.accepted, 3);
  assert_eq!(report.stale, 0);
  assert!(report.warnings.is_empty());
  assert_eq!(s.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn unparseable_date_in_export_skips_that_record() {
  let s = store().await;
  let doc = format!(
    r#"<myanimelist>
        <anime>
            <series_animedb_id>1</series_animedb_id>
            <series_title>Cowboy Bebop</series_title>
            <my_start_date>not-a-date</my_start_date>
            <my_status>Completed</my_status>
        </anime>
        <anime>
            <series_animedb_id>66</series_animedb_id>
            <series_title>Azumanga Daiou The Animation</series_title>
            <my_start_date>{DATE_UNKNOWN}</my_start_date>
            <my_status>Plan to Watch</my_status>
        </anime>
    </myanimelist>"#,
  );

  let report = koyomi_mal::import_export(&s, doc.as_bytes()).await.unwrap();

  assert_eq!(report.accepted, 1);
  assert_eq!(report.warnings.len(), 1);
  assert_eq!(report.warnings[0].id, Some(1));
  assert!(s.get(1).await.unwrap().is_none());
  assert!(s.get(66).await.unwrap().is_some());
}
