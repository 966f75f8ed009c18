//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use carewatch_core::{
  aggregate::{aggregate, aggregate_all},
  county::UnresolvedLocalities,
  facility::{County, Facility, FacilityKind, LicenseStatus},
  pipeline::Pipeline,
  profile::SourceProfile,
  raw::RawRow,
  store::FacilityStore,
  tables::StateTables,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 11, day, 12, 30, 0).unwrap()
}

fn ramsey() -> County { County::Named("Ramsey".into()) }

fn full_facility() -> Facility {
  let mut f = Facility::new("Sunshine Center", "MN", at(1));
  f.license_number = Some("12345".into());
  f.address = Some("1 Main St".into());
  f.city = Some("St. Paul".into());
  f.zip_code = Some("55101".into());
  f.county = ramsey();
  f.facility_type = FacilityKind::ChildCareCenter;
  f.facility_type_raw = Some("Child Care Center".into());
  f.capacity = Some(40);
  f.status = LicenseStatus::Licensed;
  f.license_first_date = NaiveDate::from_ymd_opt(2019, 6, 1);
  f.license_expiration_date = NaiveDate::from_ymd_opt(2025, 5, 31);
  f.total_visits = Some(7);
  f.total_citations = Some(0);
  f.phone = Some("651-555-0100".into());
  f.source_url = Some("https://example.test/12345".into());
  f
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_collection_is_empty() {
  let s = store().await;
  assert!(s.load_facilities("MN", &ramsey()).await.unwrap().is_empty());
  assert!(s.load_jurisdiction_summary("MN", &ramsey()).await.unwrap().is_none());
}

#[tokio::test]
async fn facility_round_trips_every_field() {
  let s = store().await;
  let mut sparse = Facility::new("Tiny Tots", "MN", at(2));
  sparse.county = ramsey();
  sparse.capacity = Some(12);
  sparse.capacity_estimated = true;
  let facilities = vec![full_facility(), sparse];
  let summary = aggregate(&facilities);

  s.save_jurisdiction("MN", &ramsey(), &facilities, &summary).await.unwrap();

  let loaded = s.load_facilities("MN", &ramsey()).await.unwrap();
  assert_eq!(loaded, facilities);
  let loaded_summary = s.load_jurisdiction_summary("MN", &ramsey()).await.unwrap();
  assert_eq!(loaded_summary, Some(summary));
}

#[tokio::test]
async fn save_replaces_collection_and_keeps_order() {
  let s = store().await;
  let a = Facility::new("A", "MN", at(1));
  let b = Facility::new("B", "MN", at(1));
  let c = Facility::new("C", "MN", at(1));

  let first = vec![a.clone(), b.clone(), c.clone()];
  s.save_jurisdiction("MN", &ramsey(), &first, &aggregate(&first)).await.unwrap();
  let second = vec![c, a];
  s.save_jurisdiction("MN", &ramsey(), &second, &aggregate(&second)).await.unwrap();

  let names: Vec<_> = s
    .load_facilities("MN", &ramsey())
    .await
    .unwrap()
    .into_iter()
    .map(|f| f.name)
    .collect();
  assert_eq!(names, ["C", "A"]);
}

#[tokio::test]
async fn rows_are_filed_under_the_saved_state() {
  let s = store().await;
  let stray = vec![Facility::new("Border Kids", "wi ", at(1))];
  s.save_jurisdiction(" mn", &ramsey(), &stray, &aggregate(&stray))
    .await
    .unwrap();

  let loaded = s.load_facilities("MN", &ramsey()).await.unwrap();
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded[0].name, "Border Kids");
  assert_eq!(loaded[0].state, "MN");
}

#[tokio::test]
async fn jurisdictions_are_listed_per_state_in_order() {
  let s = store().await;
  let one = vec![Facility::new("A", "MN", at(1))];
  let summary = aggregate(&one);
  for county in [County::Unknown, County::Named("Stearns".into()), ramsey()] {
    s.save_jurisdiction("mn", &county, &one, &summary).await.unwrap();
  }
  s.save_jurisdiction("MD", &County::Named("Howard".into()), &one, &summary)
    .await
    .unwrap();

  let counties = s.list_jurisdictions("MN").await.unwrap();
  assert_eq!(
    counties,
    [ramsey(), County::Named("Stearns".into()), County::Unknown]
  );
}

// ─── Summaries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn state_summary_round_trips() {
  let s = store().await;
  assert!(s.load_state_summary("MN").await.unwrap().is_none());

  let facilities = vec![full_facility()];
  let summary = aggregate_all([(ramsey(), aggregate(&facilities))]);
  s.save_state_summary("MN", &summary).await.unwrap();
  s.save_state_summary("MN", &summary).await.unwrap();

  assert_eq!(s.load_state_summary("mn").await.unwrap(), Some(summary));
  assert_eq!(s.list_states().await.unwrap(), ["MN"]);
}

// ─── Unresolved localities ───────────────────────────────────────────────────

#[tokio::test]
async fn unresolved_tables_replace_per_source_and_merge_on_load() {
  let s = store().await;

  let mut geo = UnresolvedLocalities::new();
  geo.add("Fargo", 3);
  geo.add("Hudson", 1);
  s.save_unresolved("MN", "mn-geopackage", &geo).await.unwrap();

  let mut dhs = UnresolvedLocalities::new();
  dhs.add("Fargo", 2);
  s.save_unresolved("MN", "mn-dhs", &dhs).await.unwrap();

  let merged = s.load_unresolved("MN").await.unwrap();
  assert_eq!(merged.get("Fargo"), 5);
  assert_eq!(merged.get("Hudson"), 1);

  // A later run of the same source replaces its table.
  s.save_unresolved("MN", "mn-geopackage", &UnresolvedLocalities::new())
    .await
    .unwrap();
  let merged = s.load_unresolved("MN").await.unwrap();
  assert_eq!(merged.get("Fargo"), 2);
  assert_eq!(merged.get("Hudson"), 0);
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn pipeline_rerun_is_stable_on_sqlite() {
  let s = Arc::new(store().await);
  let pipeline =
    Pipeline::new(StateTables::builtin("MN").unwrap(), SourceProfile::mn_dhs()).unwrap();
  let rows: Vec<RawRow> = vec![
    [("name", "Sunshine Center"), ("city", "St. Paul"), ("license_number", "12345")]
      .into_iter()
      .collect(),
    [("name", "Lakeside Kids"), ("city", "Duluth"), ("license_type", "Head Start")]
      .into_iter()
      .collect(),
  ];

  let first = pipeline.run(s.clone(), &rows, at(3)).await;
  assert!(first.is_success());
  let before = s.load_facilities("MN", &ramsey()).await.unwrap();

  let second = pipeline.run(s.clone(), &rows, at(3)).await;
  assert!(second.is_success());
  assert_eq!(s.load_facilities("MN", &ramsey()).await.unwrap(), before);
  assert_eq!(first.state_summary, second.state_summary);

  let summary = s.load_state_summary("MN").await.unwrap().unwrap();
  assert_eq!(summary.totals.facilities, 2);
  assert_eq!(summary.totals.capacity, 25 + 60);
}
