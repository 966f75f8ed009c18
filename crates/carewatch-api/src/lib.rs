//! Read-only JSON API over a carewatch facility store.
//!
//! Exposes an axum [`Router`] backed by any
//! [`carewatch_core::store::FacilityStore`], for map and dashboard clients.
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", carewatch_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod facilities;
pub mod summaries;

use std::sync::Arc;

use axum::{Router, routing::get};
use carewatch_core::store::FacilityStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FacilityStore + 'static,
{
  Router::new()
    .route("/states/{state}/summary", get(summaries::state_summary::<S>))
    .route("/states/{state}/jurisdictions", get(summaries::jurisdictions::<S>))
    .route(
      "/states/{state}/jurisdictions/{county}/facilities",
      get(facilities::list::<S>),
    )
    .route("/states/{state}/unresolved", get(facilities::unresolved::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
  };
  use carewatch_core::{
    aggregate::{aggregate, aggregate_all},
    county::UnresolvedLocalities,
    facility::{County, Facility, FacilityKind, LicenseStatus},
    memory::MemoryStore,
    store::FacilityStore,
  };
  use chrono::{TimeZone, Utc};
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;

  fn facility(name: &str, kind: FacilityKind, status: LicenseStatus) -> Facility {
    let at = Utc.with_ymd_and_hms(2024, 11, 21, 0, 0, 0).unwrap();
    let mut f = Facility::new(name, "MN", at);
    f.county = County::Named("St. Louis".into());
    f.facility_type = kind;
    f.status = status;
    f.capacity = Some(10);
    f
  }

  async fn seeded() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let county = County::Named("St. Louis".into());
    let facilities = vec![
      facility("A", FacilityKind::ChildCareCenter, LicenseStatus::Licensed),
      facility("B", FacilityKind::FamilyChildCare, LicenseStatus::Licensed),
      facility("C", FacilityKind::FamilyChildCare, LicenseStatus::Closed),
    ];
    let summary = aggregate(&facilities);
    store.save_jurisdiction("MN", &county, &facilities, &summary).await.unwrap();
    store
      .save_state_summary("MN", &aggregate_all([(county, summary)]))
      .await
      .unwrap();

    let mut unresolved = UnresolvedLocalities::new();
    unresolved.add("Fargo", 4);
    unresolved.add("Hudson", 9);
    store.save_unresolved("MN", "mn-dhs", &unresolved).await.unwrap();
    store
  }

  async fn get(store: Arc<MemoryStore>, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    api_router(store).oneshot(req).await.unwrap()
  }

  async fn json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn state_summary_returns_stored_roll_up() {
    let resp = get(seeded().await, "/states/MN/summary").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body["totals"]["facilities"], 3);
    assert_eq!(body["totals"]["capacity"], 30);
    assert_eq!(body["jurisdictions"]["St. Louis"]["by_status"]["CLOSED"], 1);
  }

  #[tokio::test]
  async fn missing_state_summary_is_404() {
    let resp = get(seeded().await, "/states/CA/summary").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json(resp).await["error"].as_str().unwrap().contains("CA"));
  }

  #[tokio::test]
  async fn jurisdictions_list_flattens_summaries() {
    let resp = get(seeded().await, "/states/MN/jurisdictions").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    assert_eq!(body[0]["name"], "St. Louis");
    assert_eq!(body[0]["total_facilities"], 3);
    assert_eq!(body[0]["by_type"]["family_child_care"], 2);
  }

  #[tokio::test]
  async fn facilities_filter_and_page() {
    let store = seeded().await;
    let uri = "/states/MN/jurisdictions/st.%20louis/facilities?facility_type=family_child_care";
    let body = json(get(store.clone(), uri).await).await;
    assert_eq!(body["total"], 2);

    let uri = "/states/MN/jurisdictions/St.%20Louis/facilities?status=licensed&limit=1&offset=1";
    let body = json(get(store, uri).await).await;
    assert_eq!(body["total"], 2);
    let page = body["facilities"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "B");
    assert!(page[0]["phone"].is_null());
  }

  #[tokio::test]
  async fn unknown_filter_is_400() {
    let uri = "/states/MN/jurisdictions/St.%20Louis/facilities?status=open";
    let resp = get(seeded().await, uri).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["kind"], "unknown_filter");
  }

  #[tokio::test]
  async fn unknown_jurisdiction_is_404() {
    let resp = get(seeded().await, "/states/MN/jurisdictions/Atlantis/facilities").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["kind"], "no_jurisdiction");
  }

  #[tokio::test]
  async fn unresolved_most_frequent_first() {
    let body = json(get(seeded().await, "/states/MN/unresolved").await).await;
    assert_eq!(body[0]["locality"], "Hudson");
    assert_eq!(body[0]["occurrences"], 9);
    assert_eq!(body[1]["locality"], "Fargo");
  }
}
