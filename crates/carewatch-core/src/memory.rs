//! In-process [`FacilityStore`], used by tests and dry runs.

use std::{
  collections::BTreeMap,
  convert::Infallible,
  sync::{Arc, Mutex, MutexGuard},
};

use crate::{
  aggregate::{JurisdictionSummary, StatewideSummary},
  county::UnresolvedLocalities,
  facility::{County, Facility},
  store::FacilityStore,
};

#[derive(Debug, Default)]
struct Inner {
  collections: BTreeMap<(String, County), (Vec<Facility>, JurisdictionSummary)>,
  summaries:   BTreeMap<String, StatewideSummary>,
  unresolved:  BTreeMap<(String, String), UnresolvedLocalities>,
}

/// A [`FacilityStore`] backed by maps behind a mutex. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    // Every write replaces whole values, so a poisoned lock still guards
    // consistent data.
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

fn state_key(state: &str) -> String { state.trim().to_uppercase() }

fn key(state: &str, county: &County) -> (String, County) {
  (state_key(state), county.clone())
}

impl FacilityStore for MemoryStore {
  type Error = Infallible;

  async fn load_facilities<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> Result<Vec<Facility>, Infallible> {
    Ok(
      self
        .lock()
        .collections
        .get(&key(state, county))
        .map(|(facilities, _)| facilities.clone())
        .unwrap_or_default(),
    )
  }

  async fn save_jurisdiction<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
    facilities: &'a [Facility],
    summary: &'a JurisdictionSummary,
  ) -> Result<(), Infallible> {
    let key = key(state, county);
    let facilities = facilities
      .iter()
      .map(|f| Facility { state: key.0.clone(), county: county.clone(), ..f.clone() })
      .collect();
    self.lock().collections.insert(key, (facilities, summary.clone()));
    Ok(())
  }

  async fn list_jurisdictions<'a>(
    &'a self,
    state: &'a str,
  ) -> Result<Vec<County>, Infallible> {
    let state = state_key(state);
    Ok(
      self
        .lock()
        .collections
        .keys()
        .filter(|(s, _)| *s == state)
        .map(|(_, county)| county.clone())
        .collect(),
    )
  }

  async fn load_jurisdiction_summary<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> Result<Option<JurisdictionSummary>, Infallible> {
    Ok(
      self
        .lock()
        .collections
        .get(&key(state, county))
        .map(|(_, summary)| summary.clone()),
    )
  }

  async fn save_state_summary<'a>(
    &'a self,
    state: &'a str,
    summary: &'a StatewideSummary,
  ) -> Result<(), Infallible> {
    self.lock().summaries.insert(state_key(state), summary.clone());
    Ok(())
  }

  async fn load_state_summary<'a>(
    &'a self,
    state: &'a str,
  ) -> Result<Option<StatewideSummary>, Infallible> {
    Ok(self.lock().summaries.get(&state_key(state)).cloned())
  }

  async fn save_unresolved<'a>(
    &'a self,
    state: &'a str,
    source: &'a str,
    unresolved: &'a UnresolvedLocalities,
  ) -> Result<(), Infallible> {
    self
      .lock()
      .unresolved
      .insert((state_key(state), source.to_owned()), unresolved.clone());
    Ok(())
  }

  async fn load_unresolved<'a>(
    &'a self,
    state: &'a str,
  ) -> Result<UnresolvedLocalities, Infallible> {
    let state = state_key(state);
    let mut merged = UnresolvedLocalities::new();
    for ((s, _), table) in &self.lock().unresolved {
      if *s == state {
        merged.merge(table);
      }
    }
    Ok(merged)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::aggregate::aggregate;

  #[tokio::test]
  async fn rows_are_filed_under_the_saved_key() {
    let store = MemoryStore::new();
    let at = Utc.with_ymd_and_hms(2024, 11, 21, 0, 0, 0).unwrap();
    let ramsey = County::Named("Ramsey".into());
    let stray = vec![Facility::new("Border Kids", "wi ", at)];

    store
      .save_jurisdiction(" mn", &ramsey, &stray, &aggregate(&stray))
      .await
      .unwrap();

    let loaded = store.load_facilities("MN", &ramsey).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].state, "MN");
    assert_eq!(loaded[0].county, ramsey);
    assert_eq!(store.list_jurisdictions("mn").await.unwrap(), [ramsey]);
  }
}
