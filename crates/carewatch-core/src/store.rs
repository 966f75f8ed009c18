//! The `FacilityStore` trait: the persistence contract the pipeline relies on.
//!
//! Backends (e.g. `carewatch-store-sqlite`) implement it; the pipeline and the
//! read API depend only on this abstraction.

use std::future::Future;

use crate::{
  aggregate::{JurisdictionSummary, StatewideSummary},
  county::UnresolvedLocalities,
  facility::{County, Facility},
};

/// Abstraction over a carewatch storage backend.
///
/// Collections are keyed by `(state, county)`. A stored collection is
/// returned in the order it was saved.
///
/// All methods return `Send` futures so one store can be shared by the
/// per-jurisdiction tasks of a pipeline run and by the HTTP server.
pub trait FacilityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Jurisdiction collections ──────────────────────────────────────────

  /// The stored collection for one jurisdiction; empty if none was saved.
  fn load_facilities<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> impl Future<Output = Result<Vec<Facility>, Self::Error>> + Send + 'a;

  /// Replace a jurisdiction's collection and summary as one unit. Either
  /// both are written or neither is. Facilities are filed under the given
  /// `state` and `county`, whatever their own fields say.
  fn save_jurisdiction<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
    facilities: &'a [Facility],
    summary: &'a JurisdictionSummary,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Every jurisdiction with a stored collection, in sorted order.
  fn list_jurisdictions<'a>(
    &'a self,
    state: &'a str,
  ) -> impl Future<Output = Result<Vec<County>, Self::Error>> + Send + 'a;

  fn load_jurisdiction_summary<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> impl Future<Output = Result<Option<JurisdictionSummary>, Self::Error>>
  + Send
  + 'a;

  // ── Statewide summary ─────────────────────────────────────────────────

  fn save_state_summary<'a>(
    &'a self,
    state: &'a str,
    summary: &'a StatewideSummary,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn load_state_summary<'a>(
    &'a self,
    state: &'a str,
  ) -> impl Future<Output = Result<Option<StatewideSummary>, Self::Error>> + Send + 'a;

  // ── Unresolved localities ─────────────────────────────────────────────

  /// Replace the unresolved-locality table recorded for one source.
  fn save_unresolved<'a>(
    &'a self,
    state: &'a str,
    source: &'a str,
    unresolved: &'a UnresolvedLocalities,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Unresolved localities for a state, merged across sources.
  fn load_unresolved<'a>(
    &'a self,
    state: &'a str,
  ) -> impl Future<Output = Result<UnresolvedLocalities, Self::Error>> + Send + 'a;
}
