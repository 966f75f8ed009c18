//! Aggregator: per-jurisdiction and statewide summary statistics.
//!
//! Summaries are recomputed from complete collections every time; nothing
//! here keeps running counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facility::{County, Facility, FacilityKind, LicenseStatus};

/// Aggregates over one jurisdiction's facility collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionSummary {
  pub total_facilities: u64,
  /// Sum of capacities, unknown capacity counted as zero.
  pub total_capacity:   u64,
  pub by_type:          BTreeMap<FacilityKind, u64>,
  pub by_status:        BTreeMap<LicenseStatus, u64>,
}

impl JurisdictionSummary {
  pub fn add(&mut self, facility: &Facility) {
    self.total_facilities += 1;
    self.total_capacity += facility.capacity_or_zero();
    *self.by_type.entry(facility.facility_type).or_insert(0) += 1;
    *self.by_status.entry(facility.status).or_insert(0) += 1;
  }

  /// Sum of two summaries; equal to the summary of the union of their
  /// (disjoint) collections.
  pub fn combine(&mut self, other: &Self) {
    self.total_facilities += other.total_facilities;
    self.total_capacity += other.total_capacity;
    add_counts(&mut self.by_type, &other.by_type);
    add_counts(&mut self.by_status, &other.by_status);
  }
}

fn add_counts<K: Ord + Copy>(into: &mut BTreeMap<K, u64>, from: &BTreeMap<K, u64>) {
  for (key, n) in from {
    *into.entry(*key).or_insert(0) += n;
  }
}

pub fn aggregate<'a>(
  facilities: impl IntoIterator<Item = &'a Facility>,
) -> JurisdictionSummary {
  let mut summary = JurisdictionSummary::default();
  for facility in facilities {
    summary.add(facility);
  }
  summary
}

// ─── Statewide ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatewideTotals {
  pub facilities: u64,
  pub capacity:   u64,
  pub by_type:    BTreeMap<FacilityKind, u64>,
}

/// Statewide roll-up, serialised as
/// `{ totals: {..}, jurisdictions: { <name>: {..} } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatewideSummary {
  pub totals:        StatewideTotals,
  pub jurisdictions: BTreeMap<County, JurisdictionSummary>,
}

/// Fold jurisdiction summaries into a statewide summary. A jurisdiction that
/// appears more than once has its summaries combined.
pub fn aggregate_all(
  summaries: impl IntoIterator<Item = (County, JurisdictionSummary)>,
) -> StatewideSummary {
  let mut jurisdictions: BTreeMap<County, JurisdictionSummary> = BTreeMap::new();
  for (county, summary) in summaries {
    jurisdictions.entry(county).or_default().combine(&summary);
  }

  let mut totals = StatewideTotals::default();
  for summary in jurisdictions.values() {
    totals.facilities += summary.total_facilities;
    totals.capacity += summary.total_capacity;
    add_counts(&mut totals.by_type, &summary.by_type);
  }

  StatewideSummary { totals, jurisdictions }
}
