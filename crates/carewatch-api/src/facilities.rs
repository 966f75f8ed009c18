//! Handlers for facility listings and the unresolved-locality report.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/states/{state}/jurisdictions/{county}/facilities` | `?status=&facility_type=&limit=&offset=` |
//! | `GET`  | `/states/{state}/unresolved` | Most frequent first |

use std::{str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Path, Query, State},
};
use carewatch_core::{
  facility::{County, Facility, FacilityKind, LicenseStatus},
  store::FacilityStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Facilities ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct FacilityParams {
  /// Canonical status tag, case-insensitive (`licensed`, `CLOSED`, …).
  pub status:        Option<String>,
  /// Canonical type tag, case-insensitive (`child_care_center`, …).
  pub facility_type: Option<String>,
  pub limit:         Option<usize>,
  pub offset:        Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FacilityPage {
  /// Matches before `limit`/`offset` were applied.
  pub total:      usize,
  pub facilities: Vec<Facility>,
}

fn parse_filter<T: FromStr>(
  field: &'static str,
  value: Option<&str>,
) -> Result<Option<T>, ApiError> {
  value
    .map(|v| {
      T::from_str(v).map_err(|_| ApiError::UnknownFilter { field, value: v.to_owned() })
    })
    .transpose()
}

/// `GET /states/{state}/jurisdictions/{county}/facilities`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path((state, county)): Path<(String, String)>,
  Query(params): Query<FacilityParams>,
) -> Result<Json<FacilityPage>, ApiError>
where
  S: FacilityStore,
{
  let status: Option<LicenseStatus> = parse_filter("status", params.status.as_deref())?;
  let kind: Option<FacilityKind> =
    parse_filter("facility_type", params.facility_type.as_deref())?;

  let county = store
    .list_jurisdictions(&state)
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .find(|c: &County| c.as_str().eq_ignore_ascii_case(county.trim()))
    .ok_or_else(|| ApiError::NoJurisdiction { state: state.clone(), county: county.clone() })?;

  let matching: Vec<Facility> = store
    .load_facilities(&state, &county)
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .filter(|f| status.is_none_or(|s| f.status == s))
    .filter(|f| kind.is_none_or(|k| f.facility_type == k))
    .collect();

  let total = matching.len();
  let facilities = matching
    .into_iter()
    .skip(params.offset.unwrap_or(0))
    .take(params.limit.unwrap_or(usize::MAX))
    .collect();
  Ok(Json(FacilityPage { total, facilities }))
}

// ─── Unresolved ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UnresolvedEntry {
  pub locality:    String,
  pub occurrences: u64,
}

/// `GET /states/{state}/unresolved`
pub async fn unresolved<S>(
  State(store): State<Arc<S>>,
  Path(state): Path<String>,
) -> Result<Json<Vec<UnresolvedEntry>>, ApiError>
where
  S: FacilityStore,
{
  let table = store.load_unresolved(&state).await.map_err(ApiError::store)?;
  let entries = table
    .most_frequent()
    .into_iter()
    .map(|(locality, occurrences)| UnresolvedEntry { locality: locality.to_owned(), occurrences })
    .collect();
  Ok(Json(entries))
}
