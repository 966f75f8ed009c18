//! Handler errors and their JSON rendering.
//!
//! Every error body is `{"error": "<message>", "kind": "<variant>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// No ingest run has written a statewide summary yet.
  #[error("no summary stored for state {state}")]
  NoSummary { state: String },

  #[error("no jurisdiction {county:?} stored for state {state}")]
  NoJurisdiction { state: String, county: String },

  /// A query filter that names no canonical status or facility type.
  #[error("unknown {field}: {value:?}")]
  UnknownFilter { field: &'static str, value: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  fn status_and_kind(&self) -> (StatusCode, &'static str) {
    match self {
      Self::NoSummary { .. } => (StatusCode::NOT_FOUND, "no_summary"),
      Self::NoJurisdiction { .. } => (StatusCode::NOT_FOUND, "no_jurisdiction"),
      Self::UnknownFilter { .. } => (StatusCode::BAD_REQUEST, "unknown_filter"),
      Self::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store"),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, kind) = self.status_and_kind();
    let body = Json(json!({ "error": self.to_string(), "kind": kind }));
    (status, body).into_response()
  }
}
