//! Record normalizer: raw adapter rows → canonical [`Facility`] values.
//!
//! Rows missing identity fields are dropped and counted; nothing in here
//! fails a batch.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tracing::debug;

use crate::{
  capacity::CapacityEstimator,
  county::{CountyResolver, UnresolvedLocalities},
  dedupe::is_placeholder_license,
  facility::{County, Facility, FacilityKind},
  profile::{Field, SourceProfile},
  raw::{RawRow, RawValue},
  tables::StateTables,
};

/// Why a row was dropped.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
  /// No usable facility name.
  MissingName,
  /// Neither an address nor a city.
  MissingLocation,
}

/// Per-batch normalization counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeReport {
  pub accepted:           u64,
  pub dropped:            BTreeMap<DropReason, u64>,
  /// Accepted rows whose capacity came from the estimator.
  pub estimated_capacity: u64,
  /// Accepted rows that landed in the `Unknown` jurisdiction.
  pub unknown_county:     u64,
  pub unresolved:         UnresolvedLocalities,
}

impl NormalizeReport {
  pub fn dropped_total(&self) -> u64 { self.dropped.values().sum() }
}

pub struct Normalizer<'a> {
  tables:     &'a StateTables,
  profile:    &'a SourceProfile,
  resolver:   CountyResolver<'a>,
  estimator:  CapacityEstimator<'a>,
  scraped_at: DateTime<Utc>,
}

impl<'a> Normalizer<'a> {
  pub fn new(
    tables: &'a StateTables,
    profile: &'a SourceProfile,
    scraped_at: DateTime<Utc>,
  ) -> Self {
    Self {
      tables,
      profile,
      resolver: CountyResolver::new(tables),
      estimator: CapacityEstimator::new(tables.capacity()),
      scraped_at,
    }
  }

  fn value<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r RawValue> {
    self
      .profile
      .keys(field)
      .filter_map(|key| row.get(key))
      .find(|v| !matches!(v, RawValue::Null))
  }

  fn text(&self, row: &RawRow, field: Field) -> Option<String> {
    self
      .profile
      .keys(field)
      .find_map(|key| row.get(key).and_then(RawValue::as_text))
  }

  fn count(&self, row: &RawRow, field: Field) -> Option<u32> {
    self.value(row, field).and_then(RawValue::as_count)
  }

  fn date(&self, row: &RawRow, field: Field) -> Option<NaiveDate> {
    self.text(row, field).as_deref().and_then(parse_date)
  }

  /// Normalize one row. Unresolved localities are tallied in `unresolved`.
  pub fn normalize(
    &self,
    row: &RawRow,
    unresolved: &mut UnresolvedLocalities,
  ) -> Result<Facility, DropReason> {
    let name = self.text(row, Field::Name).ok_or(DropReason::MissingName)?;
    let address = self.text(row, Field::Address);
    let mut city = self.text(row, Field::City);
    let mut zip_code = self.text(row, Field::ZipCode);

    if self.profile.locality_from_address && (city.is_none() || zip_code.is_none())
    {
      if let Some((tail_city, tail_zip)) = address
        .as_deref()
        .and_then(|a| locality_from_address(a, self.tables.state()))
      {
        city = city.or(Some(tail_city));
        zip_code = zip_code.or(tail_zip);
      }
    }

    if address.is_none() && city.is_none() {
      return Err(DropReason::MissingLocation);
    }

    let mut facility = Facility::new(name, self.tables.state(), self.scraped_at);
    facility.license_number = self
      .text(row, Field::LicenseNumber)
      .filter(|l| !is_placeholder_license(l) && !self.profile.is_placeholder_prefix(l));
    facility.county =
      self.county(self.text(row, Field::County).as_deref(), city.as_deref(), unresolved);
    facility.address = address;
    facility.city = city;
    facility.zip_code = zip_code;

    let type_text = self.text(row, Field::FacilityType);
    facility.facility_type = type_text
      .as_deref()
      .map_or(FacilityKind::Other, |t| self.profile.facility_kind(t));
    facility.facility_type_raw = type_text;

    let capacity = self
      .count(row, Field::Capacity)
      .filter(|&c| !(c == 0 && self.profile.zero_capacity_is_missing));
    match capacity {
      Some(c) => facility.capacity = Some(c),
      None => {
        // Source text first; coded vocabularies (`FCCH`) fall back to the
        // label of the kind they translate to.
        let estimate = facility
          .facility_type_raw
          .as_deref()
          .and_then(|raw| self.estimator.classify(raw))
          .or_else(|| self.estimator.classify(facility.facility_type.label()))
          .unwrap_or(self.tables.capacity().default);
        facility.capacity = Some(estimate);
        facility.capacity_estimated = true;
      }
    }

    facility.status = match self.text(row, Field::Status) {
      Some(text) => self.profile.license_status(&text).unwrap_or_else(|| {
        debug!(source = %self.profile.name, status = %text, "unmapped status");
        Default::default()
      }),
      None => self.profile.default_status,
    };

    facility.license_first_date = self.date(row, Field::LicenseFirstDate);
    facility.license_expiration_date = self.date(row, Field::LicenseExpirationDate);
    facility.last_inspection_date = self.date(row, Field::LastInspectionDate);
    facility.total_visits = self.count(row, Field::TotalVisits);
    facility.total_citations = self.count(row, Field::TotalCitations);
    facility.total_complaints = self.count(row, Field::TotalComplaints);
    facility.phone = self.text(row, Field::Phone);
    facility.source_url = self.text(row, Field::SourceUrl).or_else(|| {
      facility
        .license_number
        .as_deref()
        .and_then(|l| self.profile.detail_url(l))
    });

    Ok(facility)
  }

  /// A source-supplied county wins when it names a member of the universe;
  /// otherwise the city goes through the resolver.
  fn county(
    &self,
    source_county: Option<&str>,
    city: Option<&str>,
    unresolved: &mut UnresolvedLocalities,
  ) -> County {
    if let Some(county) = source_county
      .map(strip_county_suffix)
      .and_then(|c| self.tables.jurisdictions().county(c))
    {
      return county;
    }
    let locality = city.or(source_county).unwrap_or_default();
    self.resolver.resolve(locality, unresolved)
  }

  /// Normalize a whole batch. Output order follows input order.
  pub fn normalize_batch<'r>(
    &self,
    rows: impl IntoIterator<Item = &'r RawRow>,
  ) -> (Vec<Facility>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let mut facilities = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
      match self.normalize(row, &mut report.unresolved) {
        Ok(facility) => {
          report.accepted += 1;
          report.estimated_capacity += u64::from(facility.capacity_estimated);
          report.unknown_county += u64::from(facility.county.is_unknown());
          facilities.push(facility);
        }
        Err(reason) => {
          debug!(source = %self.profile.name, row = index, %reason, "dropped row");
          *report.dropped.entry(reason).or_insert(0) += 1;
        }
      }
    }

    (facilities, report)
  }
}

// ─── Field parsers ───────────────────────────────────────────────────────────

fn strip_county_suffix(county: &str) -> &str {
  let county = county.trim();
  const SUFFIX: &str = " county";
  match county.len().checked_sub(SUFFIX.len()) {
    Some(cut)
      if county
        .get(cut..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(SUFFIX)) =>
    {
      county[..cut].trim_end()
    }
    _ => county,
  }
}

/// `MM/DD/YYYY`, `YYYY-MM-DD`, or anything starting with an ISO date
/// (RFC 3339 timestamps).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  NaiveDate::parse_from_str(text, "%m/%d/%Y")
    .ok()
    .or_else(|| NaiveDate::parse_from_str(text.get(..10)?, "%Y-%m-%d").ok())
}

/// City and ZIP from an address ending in `"<city>, <ST> <zip>"`.
fn locality_from_address(address: &str, state: &str) -> Option<(String, Option<String>)> {
  let (head, tail) = address.rsplit_once(',')?;
  let mut tail = tail.split_whitespace();
  if !tail.next()?.eq_ignore_ascii_case(state) {
    return None;
  }
  let zip = tail
    .next()
    .and_then(|z| z.get(..5))
    .filter(|z| z.bytes().all(|b| b.is_ascii_digit()))
    .map(str::to_owned);

  let city = head.rsplit_once(',').map_or(head, |(_, c)| c).trim();
  (!city.is_empty()).then(|| (city.to_owned(), zip))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::facility::LicenseStatus;

  fn at() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 11, 21, 0, 0, 0).unwrap() }

  fn row(pairs: &[(&str, RawValue)]) -> RawRow {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
  }

  fn normalize_one(
    tables: &StateTables,
    profile: &SourceProfile,
    raw: &RawRow,
  ) -> (Result<Facility, DropReason>, UnresolvedLocalities) {
    let mut unresolved = UnresolvedLocalities::new();
    let result = Normalizer::new(tables, profile, at()).normalize(raw, &mut unresolved);
    (result, unresolved)
  }

  #[test]
  fn sunshine_center_in_st_paul() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_dhs();
    let raw = row(&[
      ("name", "Sunshine Center".into()),
      ("city", "St. Paul".into()),
      ("facility_type", "Child Care Center".into()),
      ("capacity", RawValue::Null),
    ]);

    let (facility, unresolved) = normalize_one(&tables, &profile, &raw);
    let facility = facility.unwrap();
    assert_eq!(facility.county, County::Named("Ramsey".into()));
    assert_eq!(facility.capacity, Some(75));
    assert!(facility.capacity_estimated);
    assert_eq!(facility.facility_type, FacilityKind::ChildCareCenter);
    assert_eq!(facility.facility_type_raw.as_deref(), Some("Child Care Center"));
    assert_eq!(facility.state, "MN");
    assert_eq!(facility.scraped_at, at());
    assert!(unresolved.is_empty());
  }

  #[test]
  fn source_capacity_is_authoritative() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_dhs();
    let raw = row(&[
      ("name", "Tiny Tots".into()),
      ("city", "Duluth".into()),
      ("capacity", "14".into()),
    ]);
    let facility = normalize_one(&tables, &profile, &raw).0.unwrap();
    assert_eq!(facility.capacity, Some(14));
    assert!(!facility.capacity_estimated);
  }

  #[test]
  fn non_numeric_capacity_is_estimated() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_dhs();
    let raw = row(&[
      ("name", "Tiny Tots".into()),
      ("city", "Duluth".into()),
      ("license_type", "Family Child Care".into()),
      ("capacity", "call for details".into()),
    ]);
    let facility = normalize_one(&tables, &profile, &raw).0.unwrap();
    assert_eq!(facility.capacity, Some(12));
    assert!(facility.capacity_estimated);
  }

  #[test]
  fn zero_capacity_is_missing_only_where_configured() {
    let ca = StateTables::builtin("CA").unwrap();
    let raw = row(&[
      ("FacilityName", "Bright Start".into()),
      ("FacilityCity", "FRESNO".into()),
      ("FacilityCounty", "FRESNO".into()),
      ("FacilityTypeName", "CHILD CARE CENTER".into()),
      ("FacilityCapacity", RawValue::Integer(0)),
    ]);
    let facility = normalize_one(&ca, &SourceProfile::ca_ccld(), &raw).0.unwrap();
    assert_eq!(facility.capacity, Some(75));
    assert!(facility.capacity_estimated);
    assert_eq!(facility.county, County::Named("Fresno".into()));

    let mn = StateTables::builtin("MN").unwrap();
    let raw = row(&[
      ("name", "Closed Room".into()),
      ("city", "Duluth".into()),
      ("capacity", RawValue::Integer(0)),
    ]);
    let facility = normalize_one(&mn, &SourceProfile::mn_dhs(), &raw).0.unwrap();
    assert_eq!(facility.capacity, Some(0));
    assert!(!facility.capacity_estimated);
  }

  #[test]
  fn estimate_follows_source_type_text() {
    let ca = StateTables::builtin("CA").unwrap();
    let profile = SourceProfile::ca_ccld();
    let estimate_for = |type_text: &str| {
      let raw = row(&[
        ("FacilityName", "Bright Start".into()),
        ("FacilityCity", "FRESNO".into()),
        ("FacilityCounty", "FRESNO".into()),
        ("FacilityTypeName", type_text.into()),
        ("FacilityCapacity", RawValue::Integer(0)),
      ]);
      normalize_one(&ca, &profile, &raw).0.unwrap().capacity
    };
    // "center" is tested before "school"/"age" on the source text.
    assert_eq!(estimate_for("SCHOOL AGE DAY CARE CENTER"), Some(75));
    assert_eq!(estimate_for("FAMILY CHILD CARE HOME - LARGE"), Some(12));
  }

  #[test]
  fn coded_types_estimate_from_their_kind() {
    let tables = StateTables::builtin("MD").unwrap();
    let profile = SourceProfile::md_checkccmd();
    let raw = row(&[
      ("name", "Busy Bees".into()),
      ("address", "3 Elm St, Rockville, MD 20850".into()),
      ("facility_type", "FCCH".into()),
    ]);
    let facility = normalize_one(&tables, &profile, &raw).0.unwrap();
    assert_eq!(facility.facility_type, FacilityKind::FamilyChildCare);
    assert_eq!(facility.capacity, Some(12));
    assert!(facility.capacity_estimated);
  }

  #[test]
  fn rows_without_identity_are_dropped() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_dhs();
    let normalizer = Normalizer::new(&tables, &profile, at());
    let rows = vec![
      row(&[("name", "  ".into()), ("city", "Duluth".into())]),
      row(&[("name", "No Place".into())]),
      row(&[("name", "Somewhere".into()), ("address", "1 Main St".into())]),
    ];

    let (facilities, report) = normalizer.normalize_batch(&rows);
    assert_eq!(facilities.len(), 1);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.dropped[&DropReason::MissingName], 1);
    assert_eq!(report.dropped[&DropReason::MissingLocation], 1);
    assert_eq!(report.dropped_total(), 2);
    // Address without a city: kept, but the county is unknown.
    assert_eq!(report.unknown_county, 1);
    assert_eq!(report.unresolved.get(crate::county::BLANK_LOCALITY), 1);
  }

  #[test]
  fn county_is_always_in_universe_or_unknown() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_dhs();
    let normalizer = Normalizer::new(&tables, &profile, at());
    let cities = ["Minneapolis", "ST CLOUD", "Fargo", "", "duluth", "Hennepin"];
    let rows: Vec<RawRow> = cities
      .iter()
      .map(|c| row(&[("name", "X".into()), ("address", "1 A St".into()), ("city", (*c).into())]))
      .collect();

    let (facilities, report) = normalizer.normalize_batch(&rows);
    for f in &facilities {
      match &f.county {
        County::Named(name) => assert!(tables.jurisdictions().contains(name)),
        County::Unknown => {}
      }
    }
    assert_eq!(report.unresolved.get("Fargo"), 1);
    assert_eq!(report.unresolved.get("Hennepin"), 1);
  }

  #[test]
  fn source_county_accepted_with_suffix() {
    let tables = StateTables::builtin("MD").unwrap();
    let profile = SourceProfile::md_checkccmd();
    let raw = row(&[
      ("name", "Little Sprouts".into()),
      ("address", "12 Oak Ave, Nowhere, MD 20850".into()),
      ("county", "montgomery county".into()),
    ]);
    let facility = normalize_one(&tables, &profile, &raw).0.unwrap();
    assert_eq!(facility.county, County::Named("Montgomery".into()));
  }

  #[test]
  fn maryland_roster_row() {
    let tables = StateTables::builtin("MD").unwrap();
    let profile = SourceProfile::md_checkccmd();
    let raw = row(&[
      ("Provider Names", "Little  Sprouts\nAcademy".into()),
      ("address", "12 Oak Ave, Rockville, MD 20850-1234".into()),
      ("license_number", "MD-MONT-0001".into()),
      ("facility_type", "LOC".into()),
      ("status", "Open".into()),
    ]);
    let (facility, unresolved) = normalize_one(&tables, &profile, &raw);
    let facility = facility.unwrap();
    assert_eq!(facility.name, "Little Sprouts Academy");
    assert_eq!(facility.license_number, None);
    assert_eq!(facility.city.as_deref(), Some("Rockville"));
    assert_eq!(facility.zip_code.as_deref(), Some("20850"));
    assert_eq!(facility.county, County::Named("Montgomery".into()));
    assert_eq!(facility.facility_type, FacilityKind::LetterOfCompliance);
    assert_eq!(facility.status, LicenseStatus::Licensed);
    assert_eq!(facility.capacity, Some(25));
    assert!(facility.capacity_estimated);
    assert!(unresolved.is_empty());
  }

  #[test]
  fn geopackage_row_uses_aliases_and_default_status() {
    let tables = StateTables::builtin("MN").unwrap();
    let profile = SourceProfile::mn_geopackage();
    let raw = row(&[
      ("License_Number", RawValue::Integer(1096154)),
      ("License_Type", "Group Family Child Care".into()),
      ("Name_of_Program", "Happy Days".into()),
      ("AddressLine1", "400 1st Ave".into()),
      ("City", "Rochester".into()),
      ("Zip", RawValue::Float(55901.0)),
    ]);
    let facility = normalize_one(&tables, &profile, &raw).0.unwrap();
    assert_eq!(facility.license_number.as_deref(), Some("1096154"));
    assert_eq!(facility.zip_code.as_deref(), Some("55901"));
    assert_eq!(facility.county, County::Named("Olmsted".into()));
    assert_eq!(facility.facility_type, FacilityKind::LargeFamilyChildCare);
    assert_eq!(facility.capacity, Some(14));
    assert_eq!(facility.status, LicenseStatus::Licensed);
    assert_eq!(
      facility.source_url.as_deref(),
      Some("https://licensinglookup.dhs.state.mn.us/Details.aspx?l=1096154")
    );
  }

  #[test]
  fn unmapped_status_is_unknown() {
    let tables = StateTables::builtin("MN").unwrap();
    let raw = row(&[
      ("name", "X".into()),
      ("city", "Duluth".into()),
      ("license_status", "Under review".into()),
    ]);
    let facility = normalize_one(&tables, &SourceProfile::mn_dhs(), &raw).0.unwrap();
    assert_eq!(facility.status, LicenseStatus::Unknown);
  }

  #[test]
  fn dates() {
    let d = NaiveDate::from_ymd_opt(2025, 3, 31);
    assert_eq!(parse_date("03/31/2025"), d);
    assert_eq!(parse_date("2025-03-31"), d);
    assert_eq!(parse_date("2025-03-31T00:00:00Z"), d);
    assert_eq!(parse_date("March 31, 2025"), None);
    assert_eq!(parse_date(""), None);
  }

  #[test]
  fn address_tail_parsing() {
    assert_eq!(
      locality_from_address("1 Main St, Silver Spring, MD 20901", "MD"),
      Some(("Silver Spring".into(), Some("20901".into())))
    );
    assert_eq!(
      locality_from_address("1 Main St, Bethesda, md", "MD"),
      Some(("Bethesda".into(), None))
    );
    assert_eq!(locality_from_address("1 Main St, Arlington, VA 22201", "MD"), None);
    assert_eq!(locality_from_address("1 Main St", "MD"), None);
  }

  #[test]
  fn county_suffix() {
    assert_eq!(strip_county_suffix("Anne Arundel County "), "Anne Arundel");
    assert_eq!(strip_county_suffix("Baltimore City"), "Baltimore City");
    assert_eq!(strip_county_suffix("County"), "County");
  }
}
