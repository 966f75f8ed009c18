//! Handlers for summary endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/states/{state}/summary` | 404 until a run has written one |
//! | `GET`  | `/states/{state}/jurisdictions` | One entry per stored jurisdiction |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use carewatch_core::{
  aggregate::{JurisdictionSummary, StatewideSummary},
  facility::County,
  store::FacilityStore,
};
use serde::Serialize;

use crate::error::ApiError;

/// `GET /states/{state}/summary`
pub async fn state_summary<S>(
  State(store): State<Arc<S>>,
  Path(state): Path<String>,
) -> Result<Json<StatewideSummary>, ApiError>
where
  S: FacilityStore,
{
  let summary = store
    .load_state_summary(&state)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NoSummary { state })?;
  Ok(Json(summary))
}

#[derive(Debug, Serialize)]
pub struct JurisdictionEntry {
  pub name:    County,
  #[serde(flatten)]
  pub summary: JurisdictionSummary,
}

/// `GET /states/{state}/jurisdictions`
pub async fn jurisdictions<S>(
  State(store): State<Arc<S>>,
  Path(state): Path<String>,
) -> Result<Json<Vec<JurisdictionEntry>>, ApiError>
where
  S: FacilityStore,
{
  let counties = store.list_jurisdictions(&state).await.map_err(ApiError::store)?;

  let mut entries = Vec::with_capacity(counties.len());
  for county in counties {
    let summary = store
      .load_jurisdiction_summary(&state, &county)
      .await
      .map_err(ApiError::store)?
      .unwrap_or_default();
    entries.push(JurisdictionEntry { name: county, summary });
  }
  Ok(Json(entries))
}
