//! [`SqliteStore`]: the SQLite implementation of [`FacilityStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use carewatch_core::{
  aggregate::{JurisdictionSummary, StatewideSummary},
  county::UnresolvedLocalities,
  facility::{County, Facility},
  store::FacilityStore,
};

use crate::{
  Error, Result,
  encode::{FACILITY_COLUMNS, RawFacility},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A carewatch facility store backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Every state with a stored statewide summary.
  pub async fn list_states(&self) -> Result<Vec<String>> {
    let states = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT state FROM state_summaries ORDER BY state")?;
        let rows = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(states)
  }
}

fn state_key(state: &str) -> String { state.trim().to_uppercase() }

// ─── FacilityStore impl ──────────────────────────────────────────────────────

impl FacilityStore for SqliteStore {
  type Error = Error;

  // ── Jurisdiction collections ──────────────────────────────────────────────

  async fn load_facilities<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> Result<Vec<Facility>> {
    let state = state_key(state);
    let county = county.to_string();

    let raws: Vec<RawFacility> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FACILITY_COLUMNS} FROM facilities
           WHERE state = ?1 AND county = ?2
           ORDER BY position"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![state, county], RawFacility::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFacility::into_facility).collect()
  }

  async fn save_jurisdiction<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
    facilities: &'a [Facility],
    summary: &'a JurisdictionSummary,
  ) -> Result<()> {
    let state = state_key(state);
    let county = county.to_string();
    let rows: Vec<RawFacility> = facilities.iter().map(RawFacility::from_facility).collect();
    let summary_json = serde_json::to_string(summary)?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM facilities WHERE state = ?1 AND county = ?2",
          rusqlite::params![state, county],
        )?;
        {
          let mut insert = tx.prepare(&format!(
            "INSERT INTO facilities (position, {FACILITY_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                     ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)"
          ))?;
          for (position, row) in rows.iter().enumerate() {
            // Rows are filed under the state and jurisdiction being saved.
            insert.execute(rusqlite::params![
              position as i64,
              row.license_number,
              row.name,
              row.address,
              row.city,
              state,
              row.zip_code,
              county,
              row.facility_type,
              row.facility_type_raw,
              row.capacity,
              row.capacity_estimated,
              row.status,
              row.license_first_date,
              row.license_expiration_date,
              row.last_inspection_date,
              row.total_visits,
              row.total_citations,
              row.total_complaints,
              row.phone,
              row.source_url,
              row.scraped_at,
            ])?;
          }
        }
        tx.execute(
          "INSERT INTO jurisdiction_summaries (state, county, summary_json)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (state, county) DO UPDATE SET summary_json = excluded.summary_json",
          rusqlite::params![state, county, summary_json],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_jurisdictions<'a>(&'a self, state: &'a str) -> Result<Vec<County>> {
    let state = state_key(state);
    let names: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT county FROM jurisdiction_summaries WHERE state = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![state], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    let mut counties: Vec<County> = names.into_iter().map(County::from).collect();
    counties.sort();
    Ok(counties)
  }

  async fn load_jurisdiction_summary<'a>(
    &'a self,
    state: &'a str,
    county: &'a County,
  ) -> Result<Option<JurisdictionSummary>> {
    let state = state_key(state);
    let county = county.to_string();
    let json: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT summary_json FROM jurisdiction_summaries
               WHERE state = ?1 AND county = ?2",
              rusqlite::params![state, county],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    json.map(|j| serde_json::from_str(&j).map_err(Error::from)).transpose()
  }

  // ── Statewide summary ─────────────────────────────────────────────────────

  async fn save_state_summary<'a>(
    &'a self,
    state: &'a str,
    summary: &'a StatewideSummary,
  ) -> Result<()> {
    let state = state_key(state);
    let json = serde_json::to_string(summary)?;
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO state_summaries (state, summary_json) VALUES (?1, ?2)
           ON CONFLICT (state) DO UPDATE SET summary_json = excluded.summary_json",
          rusqlite::params![state, json],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn load_state_summary<'a>(
    &'a self,
    state: &'a str,
  ) -> Result<Option<StatewideSummary>> {
    let state = state_key(state);
    let json: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT summary_json FROM state_summaries WHERE state = ?1",
              rusqlite::params![state],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    json.map(|j| serde_json::from_str(&j).map_err(Error::from)).transpose()
  }

  // ── Unresolved localities ─────────────────────────────────────────────────

  async fn save_unresolved<'a>(
    &'a self,
    state: &'a str,
    source: &'a str,
    unresolved: &'a UnresolvedLocalities,
  ) -> Result<()> {
    let state = state_key(state);
    let source = source.to_owned();
    let entries: Vec<(String, i64)> = unresolved
      .iter()
      .map(|(locality, n)| (locality.to_owned(), i64::try_from(n).unwrap_or(i64::MAX)))
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM unresolved_localities WHERE state = ?1 AND source = ?2",
          rusqlite::params![state, source],
        )?;
        {
          let mut insert = tx.prepare(
            "INSERT INTO unresolved_localities (state, source, locality, occurrences)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (locality, n) in &entries {
            insert.execute(rusqlite::params![state, source, locality, n])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn load_unresolved<'a>(&'a self, state: &'a str) -> Result<UnresolvedLocalities> {
    let state = state_key(state);
    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT locality, occurrences FROM unresolved_localities WHERE state = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![state], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut merged = UnresolvedLocalities::new();
    for (locality, n) in rows {
      merged.add(locality, u64::try_from(n).unwrap_or(0));
    }
    Ok(merged)
  }
}
