//! The per-jurisdiction pipeline driver.
//!
//! A batch is normalized and deduplicated once, then split by county, and
//! each county runs load → fold → aggregate → save on its own task.
//! Jurisdictions share no mutable state, so a failure in one is recorded and
//! the rest carry on.
//!
//! A facility keeps one home across runs. When a batch record's identity is
//! already stored under another jurisdiction, the county merge decides where
//! it lives; a record that moves is removed from its old collection only
//! after its new one has been saved. The statewide summary is rebuilt from
//! what is stored once all jurisdictions have finished.

use std::{
  collections::{BTreeMap, BTreeSet},
  sync::Arc,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::{
  Error, Result,
  aggregate::{JurisdictionSummary, StatewideSummary, aggregate, aggregate_all},
  dedupe::{FacilitySet, IdentityKey, MergeOutcome, merge_facility},
  facility::{County, Facility},
  normalize::{NormalizeReport, Normalizer},
  profile::SourceProfile,
  raw::RawRow,
  store::FacilityStore,
  tables::StateTables,
};

pub const DEFAULT_MAX_PARALLEL: usize = 4;

// ─── Reports ─────────────────────────────────────────────────────────────────

/// A normalized, deduplicated batch split by jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct PreparedBatch {
  pub jurisdictions: BTreeMap<County, Vec<Facility>>,
  /// Accepted rows folded into another row of the same batch.
  pub duplicates:    usize,
  pub report:        NormalizeReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionOutcome {
  pub county:   County,
  /// Facilities in the batch for this jurisdiction.
  pub incoming: usize,
  /// New identities added to the collection.
  pub inserted: usize,
  /// Batch records folded into an existing identity.
  pub merged:   usize,
  pub summary:  JurisdictionSummary,
}

/// A jurisdiction that lost records to the collections they moved into.
#[derive(Debug, Clone, Serialize)]
pub struct EvictionOutcome {
  pub county:  County,
  pub removed: usize,
  pub summary: JurisdictionSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionFailure {
  pub county: County,
  pub error:  String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub state:               String,
  pub source:              String,
  pub scraped_at:          DateTime<Utc>,
  pub normalize:           NormalizeReport,
  pub duplicates:          usize,
  /// Batch records whose identity was stored under another jurisdiction.
  pub relocated:           usize,
  pub relocation_error:    Option<String>,
  pub completed:           Vec<JurisdictionOutcome>,
  pub evicted:             Vec<EvictionOutcome>,
  pub failed:              Vec<JurisdictionFailure>,
  pub unresolved_error:    Option<String>,
  pub state_summary:       Option<StatewideSummary>,
  pub state_summary_error: Option<String>,
}

impl RunReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
      && self.relocation_error.is_none()
      && self.unresolved_error.is_none()
      && self.state_summary_error.is_none()
  }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Pipeline {
  tables:       Arc<StateTables>,
  profile:      Arc<SourceProfile>,
  max_parallel: usize,
}

impl Pipeline {
  /// The profile must describe a source for the tables' state.
  pub fn new(tables: StateTables, profile: SourceProfile) -> Result<Self> {
    if !profile.state.eq_ignore_ascii_case(tables.state()) {
      return Err(Error::StateMismatch {
        profile:       profile.name,
        profile_state: profile.state,
        tables_state:  tables.state().to_owned(),
      });
    }
    Ok(Self {
      tables:       Arc::new(tables),
      profile:      Arc::new(profile),
      max_parallel: DEFAULT_MAX_PARALLEL,
    })
  }

  /// Cap on jurisdictions processed at once. Zero is treated as one.
  pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
    self.max_parallel = max_parallel.max(1);
    self
  }

  pub fn state(&self) -> &str { self.tables.state() }

  pub fn tables(&self) -> &StateTables { &self.tables }

  pub fn profile(&self) -> &SourceProfile { &self.profile }

  /// Normalize `rows`, fold records that share an identity, and partition
  /// the result by county. Rows of one facility that resolve to different
  /// counties end up in the county the merge picks; facilities the resolver
  /// could not place form their own `Unknown` collection.
  pub fn prepare(&self, rows: &[RawRow], scraped_at: DateTime<Utc>) -> PreparedBatch {
    let normalizer = Normalizer::new(&self.tables, &self.profile, scraped_at);
    let (facilities, report) = normalizer.normalize_batch(rows);

    let accepted = facilities.len();
    let set: FacilitySet = facilities.into_iter().collect();
    let duplicates = accepted - set.len();

    let mut jurisdictions: BTreeMap<County, Vec<Facility>> = BTreeMap::new();
    for facility in set.into_vec() {
      jurisdictions
        .entry(facility.county.clone())
        .or_default()
        .push(facility);
    }
    PreparedBatch { jurisdictions, duplicates, report }
  }

  /// Run a batch end to end against `store`.
  ///
  /// Never fails as a whole: per-jurisdiction errors, the unresolved-table
  /// write and the summary refresh are each reported separately.
  pub async fn run<S>(
    &self,
    store: Arc<S>,
    rows: &[RawRow],
    scraped_at: DateTime<Utc>,
  ) -> RunReport
  where
    S: FacilityStore + 'static,
  {
    let state = self.state().to_owned();
    let PreparedBatch { jurisdictions, duplicates, report } = self.prepare(rows, scraped_at);
    info!(
      state = %state,
      source = %self.profile.name,
      rows = rows.len(),
      accepted = report.accepted,
      dropped = report.dropped_total(),
      duplicates,
      jurisdictions = jurisdictions.len(),
      "normalized batch"
    );

    let planned = plan_relocations(&*store, &state, &jurisdictions).await;
    let (jurisdictions, relocation, relocation_error) = match planned {
      Ok(plan) => (plan.jurisdictions, plan.evictions, None),
      Err(e) => {
        warn!(state = %state, error = %e, "failed to index stored facilities");
        (jurisdictions, BTreeMap::new(), Some(e.to_string()))
      }
    };
    let relocated: usize = relocation.values().map(BTreeMap::len).sum();

    let semaphore = Arc::new(Semaphore::new(self.max_parallel));
    let mut handles = Vec::with_capacity(jurisdictions.len());
    for (county, facilities) in jurisdictions {
      let store = store.clone();
      let sem = semaphore.clone();
      let task_state = state.clone();
      let task_county = county.clone();
      let handle = tokio::spawn(async move {
        let _permit = sem.acquire().await.ok();
        run_jurisdiction(&*store, &task_state, &task_county, facilities)
          .await
          .map_err(|e| e.to_string())
      });
      handles.push((county, handle));
    }

    let mut completed = Vec::new();
    let mut failed = Vec::new();
    for (county, handle) in handles {
      let error = match handle.await {
        Ok(Ok(outcome)) => {
          completed.push(outcome);
          continue;
        }
        Ok(Err(error)) => error,
        Err(join) => format!("jurisdiction task aborted: {join}"),
      };
      warn!(state = %state, county = %county, error = %error, "jurisdiction failed");
      failed.push(JurisdictionFailure { county, error });
    }

    // Moved records leave their old home only once the new one is saved.
    let saved: BTreeSet<&County> = completed.iter().map(|o| &o.county).collect();
    let mut evicted = Vec::new();
    for (county, moves) in &relocation {
      let keys: BTreeSet<IdentityKey> = moves
        .iter()
        .filter(|(_, to)| saved.contains(to))
        .map(|(key, _)| key.clone())
        .collect();
      if keys.is_empty() {
        continue;
      }
      match evict(&*store, &state, county, &keys).await {
        Ok(outcome) => evicted.push(outcome),
        Err(e) => {
          warn!(state = %state, county = %county, error = %e, "eviction failed");
          failed.push(JurisdictionFailure { county: county.clone(), error: e.to_string() });
        }
      }
    }

    let unresolved_error = store
      .save_unresolved(&state, &self.profile.name, &report.unresolved)
      .await
      .err()
      .map(|e| {
        warn!(state = %state, error = %e, "failed to save unresolved localities");
        e.to_string()
      });

    let (state_summary, state_summary_error) =
      match refresh_state_summary(&*store, &state).await {
        Ok(summary) => (Some(summary), None),
        Err(e) => {
          warn!(state = %state, error = %e, "failed to refresh state summary");
          (None, Some(e.to_string()))
        }
      };

    info!(
      state = %state,
      completed = completed.len(),
      relocated,
      failed = failed.len(),
      unresolved = report.unresolved.len(),
      "run finished"
    );

    RunReport {
      state,
      source: self.profile.name.clone(),
      scraped_at,
      normalize: report,
      duplicates,
      relocated,
      relocation_error,
      completed,
      evicted,
      failed,
      unresolved_error,
      state_summary,
      state_summary_error,
    }
  }
}

// ─── Steps ───────────────────────────────────────────────────────────────────

/// Fold `incoming` into a jurisdiction's stored collection, recompute its
/// summary, and save both.
pub async fn run_jurisdiction<S: FacilityStore>(
  store: &S,
  state: &str,
  county: &County,
  incoming: Vec<Facility>,
) -> std::result::Result<JurisdictionOutcome, S::Error> {
  let existing = store.load_facilities(state, county).await?;
  let mut set = FacilitySet::from_existing(existing);

  let total = incoming.len();
  let mut inserted = 0;
  for facility in incoming {
    if set.insert(facility) == MergeOutcome::Inserted {
      inserted += 1;
    }
  }

  let facilities = set.into_vec();
  let summary = aggregate(&facilities);
  store.save_jurisdiction(state, county, &facilities, &summary).await?;

  info!(
    state,
    county = %county,
    facilities = summary.total_facilities,
    capacity = summary.total_capacity,
    inserted,
    "jurisdiction saved"
  );

  Ok(JurisdictionOutcome {
    county: county.clone(),
    incoming: total,
    inserted,
    merged: total - inserted,
    summary,
  })
}

/// Batch jurisdictions after relocation, and the records to drop from their
/// old homes: stored county → identity → the county it moved to.
#[derive(Debug, Default)]
struct RelocationPlan {
  jurisdictions: BTreeMap<County, Vec<Facility>>,
  evictions:     BTreeMap<County, BTreeMap<IdentityKey, County>>,
}

/// Route each batch record against where its identity is already stored.
///
/// When the merged record stays in the stored county, the batch record is
/// filed there. When it moves, the stored record travels with it so none of
/// its fields are lost, and an eviction is planned for the old collection.
async fn plan_relocations<S: FacilityStore>(
  store: &S,
  state: &str,
  batch: &BTreeMap<County, Vec<Facility>>,
) -> std::result::Result<RelocationPlan, S::Error> {
  let mut homes: BTreeMap<IdentityKey, (County, Facility)> = BTreeMap::new();
  for county in store.list_jurisdictions(state).await? {
    for facility in store.load_facilities(state, &county).await? {
      homes.insert(IdentityKey::of(&facility), (county.clone(), facility));
    }
  }

  let mut plan = RelocationPlan::default();
  for (county, facilities) in batch {
    for facility in facilities {
      let key = IdentityKey::of(facility);
      let destination = match homes.get(&key) {
        Some((home, stored)) if home != county => {
          let merged = merge_facility(stored.clone(), facility.clone());
          if merged.county == *home {
            home.clone()
          } else {
            plan.jurisdictions.entry(county.clone()).or_default().push(stored.clone());
            plan
              .evictions
              .entry(home.clone())
              .or_default()
              .insert(key, county.clone());
            county.clone()
          }
        }
        _ => county.clone(),
      };
      plan.jurisdictions.entry(destination).or_default().push(facility.clone());
    }
  }
  Ok(plan)
}

/// Drop `keys` from a stored collection and re-save it with a fresh summary.
async fn evict<S: FacilityStore>(
  store: &S,
  state: &str,
  county: &County,
  keys: &BTreeSet<IdentityKey>,
) -> std::result::Result<EvictionOutcome, S::Error> {
  let stored = store.load_facilities(state, county).await?;
  let before = stored.len();
  let kept: Vec<Facility> = stored
    .into_iter()
    .filter(|f| !keys.contains(&IdentityKey::of(f)))
    .collect();

  let summary = aggregate(&kept);
  store.save_jurisdiction(state, county, &kept, &summary).await?;
  info!(state, county = %county, removed = before - kept.len(), "moved facilities evicted");

  Ok(EvictionOutcome { county: county.clone(), removed: before - kept.len(), summary })
}

/// Rebuild and save the statewide summary from every stored collection.
pub async fn refresh_state_summary<S: FacilityStore>(
  store: &S,
  state: &str,
) -> std::result::Result<StatewideSummary, S::Error> {
  let mut summaries = Vec::new();
  for county in store.list_jurisdictions(state).await? {
    let facilities = store.load_facilities(state, &county).await?;
    summaries.push((county, aggregate(&facilities)));
  }

  let summary = aggregate_all(summaries);
  store.save_state_summary(state, &summary).await?;
  Ok(summary)
}
