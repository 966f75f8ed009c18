//! Facility: the canonical unit of the carewatch dataset.
//!
//! A facility is one licensed childcare site. Every raw row, whatever its
//! source, is mapped onto this schema by the normalizer; everything
//! downstream (deduplication, aggregation, persistence, the read API) works
//! only with these types.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ─── Jurisdiction ────────────────────────────────────────────────────────────

/// The jurisdiction (county or county-equivalent) a facility is licensed
/// under.
///
/// `Named` values are only ever produced from a state's jurisdiction universe
/// (see [`crate::tables::JurisdictionSet`]); `Unknown` is the sentinel for
/// localities the resolver could not place. Serialised as a bare string, with
/// the sentinel spelled `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum County {
  Named(String),
  Unknown,
}

impl County {
  pub const UNKNOWN: &'static str = "Unknown";

  pub fn is_unknown(&self) -> bool { matches!(self, Self::Unknown) }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Named(name) => name,
      Self::Unknown => Self::UNKNOWN,
    }
  }
}

impl fmt::Display for County {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for County {
  fn from(value: String) -> Self {
    if value == Self::UNKNOWN {
      Self::Unknown
    } else {
      Self::Named(value)
    }
  }
}

impl From<County> for String {
  fn from(value: County) -> Self {
    match value {
      County::Named(name) => name,
      County::Unknown => County::UNKNOWN.to_owned(),
    }
  }
}

// ─── Taxonomies ──────────────────────────────────────────────────────────────

/// Canonical facility type. Source vocabularies are translated into this
/// closed set by a [`crate::profile::SourceProfile`]; the verbatim source text
/// travels alongside in [`Facility::facility_type_raw`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FacilityKind {
  ChildCareCenter,
  FamilyChildCare,
  /// Large or group family homes (CA "large", MN "group").
  LargeFamilyChildCare,
  SchoolAge,
  HeadStart,
  EarlyHeadStart,
  LetterOfCompliance,
  #[default]
  Other,
}

impl FacilityKind {
  /// Human-readable label, chosen so that it hits the capacity table's exact
  /// entries.
  pub fn label(self) -> &'static str {
    match self {
      Self::ChildCareCenter => "Child Care Center",
      Self::FamilyChildCare => "Family Child Care",
      Self::LargeFamilyChildCare => "Large Family Child Care",
      Self::SchoolAge => "School Age Child Care",
      Self::HeadStart => "Head Start",
      Self::EarlyHeadStart => "Early Head Start",
      Self::LetterOfCompliance => "Letter of Compliance",
      Self::Other => "Other",
    }
  }
}

/// Canonical licensing status.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LicenseStatus {
  Licensed,
  Pending,
  Probation,
  Closed,
  Suspended,
  Revoked,
  #[default]
  Unknown,
}

// ─── Facility ────────────────────────────────────────────────────────────────

/// A licensed childcare site in canonical form.
///
/// Field order is the interchange order; every optional field serialises as
/// `null` rather than being omitted, because map and dashboard consumers key
/// on field presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
  /// Identifier issued by the licensing authority. Placeholders are
  /// normalised to `None`.
  pub license_number:          Option<String>,
  pub name:                    String,
  pub address:                 Option<String>,
  pub city:                    Option<String>,
  /// Two-letter state code.
  pub state:                   String,
  pub zip_code:                Option<String>,
  pub county:                  County,
  pub facility_type:           FacilityKind,
  /// The facility type exactly as the source spelled it.
  pub facility_type_raw:       Option<String>,
  pub capacity:                Option<u32>,
  /// `true` iff `capacity` came from the capacity estimator rather than the
  /// source.
  pub capacity_estimated:      bool,
  pub status:                  LicenseStatus,
  pub license_first_date:      Option<NaiveDate>,
  pub license_expiration_date: Option<NaiveDate>,
  pub last_inspection_date:    Option<NaiveDate>,
  pub total_visits:            Option<u32>,
  pub total_citations:         Option<u32>,
  pub total_complaints:        Option<u32>,
  pub phone:                   Option<String>,
  /// Detail page at the licensing authority, when known.
  pub source_url:              Option<String>,
  /// When the batch this record came from was extracted.
  pub scraped_at:              DateTime<Utc>,
}

impl Facility {
  /// A facility carrying only the identity fields; everything else unknown.
  pub fn new(
    name: impl Into<String>,
    state: impl Into<String>,
    scraped_at: DateTime<Utc>,
  ) -> Self {
    Self {
      license_number: None,
      name: name.into(),
      address: None,
      city: None,
      state: state.into(),
      zip_code: None,
      county: County::Unknown,
      facility_type: FacilityKind::Other,
      facility_type_raw: None,
      capacity: None,
      capacity_estimated: false,
      status: LicenseStatus::Unknown,
      license_first_date: None,
      license_expiration_date: None,
      last_inspection_date: None,
      total_visits: None,
      total_citations: None,
      total_complaints: None,
      phone: None,
      source_url: None,
      scraped_at,
    }
  }

  /// Capacity for summing purposes; unknown counts as zero.
  pub fn capacity_or_zero(&self) -> u64 { self.capacity.map_or(0, u64::from) }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use chrono::TimeZone;

  use super::*;

  #[test]
  fn county_sentinel_round_trips_as_string() {
    let json = serde_json::to_string(&County::Unknown).unwrap();
    assert_eq!(json, "\"Unknown\"");
    let back: County = serde_json::from_str("\"Hennepin\"").unwrap();
    assert_eq!(back, County::Named("Hennepin".into()));
  }

  #[test]
  fn status_parses_case_insensitively() {
    assert_eq!(LicenseStatus::from_str("licensed").unwrap(), LicenseStatus::Licensed);
    assert_eq!(LicenseStatus::Closed.to_string(), "CLOSED");
    assert!(LicenseStatus::from_str("open").is_err());
  }

  #[test]
  fn optional_fields_serialise_as_null() {
    let at = Utc.with_ymd_and_hms(2024, 11, 21, 0, 0, 0).unwrap();
    let facility = Facility::new("Sunshine Center", "MN", at);
    let value = serde_json::to_value(&facility).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 21);
    assert!(object["capacity"].is_null());
    assert!(object["license_first_date"].is_null());
    assert_eq!(object["county"], "Unknown");
    assert_eq!(object["facility_type"], "other");
    assert_eq!(object["status"], "UNKNOWN");
  }
}
