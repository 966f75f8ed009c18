//! Source profiles: the per-source translation tables.
//!
//! Each source adapter documents its key names and vocabularies; a profile
//! records them so the normalizer can stay source-agnostic. Type and status
//! translation go through the closed [`FacilityKind`] / [`LicenseStatus`]
//! enums, never through ad hoc string checks elsewhere in the pipeline.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::{
  Error, Result,
  facility::{FacilityKind, LicenseStatus},
};

// ─── Canonical fields ────────────────────────────────────────────────────────

/// A canonical field a raw row may carry. The snake_case name doubles as the
/// default raw key.
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
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  LicenseNumber,
  Name,
  Address,
  City,
  State,
  ZipCode,
  County,
  FacilityType,
  Capacity,
  Status,
  LicenseFirstDate,
  LicenseExpirationDate,
  LastInspectionDate,
  TotalVisits,
  TotalCitations,
  TotalComplaints,
  Phone,
  SourceUrl,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProfile {
  /// Profile name, e.g. `"mn-geopackage"`.
  pub name:                         String,
  /// Two-letter state code the source covers.
  pub state:                        String,
  /// Raw keys to try for each field, in order, before the canonical name.
  #[serde(default)]
  pub aliases:                      BTreeMap<Field, Vec<String>>,
  /// Source facility-type text → canonical kind (case-insensitive keys).
  #[serde(default)]
  pub facility_types:               BTreeMap<String, FacilityKind>,
  /// Source status text → canonical status (case-insensitive keys).
  #[serde(default)]
  pub statuses:                     BTreeMap<String, LicenseStatus>,
  /// Status assumed when a row carries none.
  #[serde(default)]
  pub default_status:               LicenseStatus,
  /// Treat a reported capacity of 0 as "not supplied".
  #[serde(default)]
  pub zero_capacity_is_missing:     bool,
  /// License numbers with these prefixes were generated, not issued.
  #[serde(default)]
  pub placeholder_license_prefixes: Vec<String>,
  /// Recover city and ZIP from an address ending in `"<city>, <ST> <zip>"`.
  #[serde(default)]
  pub locality_from_address:        bool,
  /// Detail-page URL with `{license}` standing for the license number.
  #[serde(default)]
  pub detail_url_template:          Option<String>,
}

impl SourceProfile {
  pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      state: state.into().to_uppercase(),
      aliases: BTreeMap::new(),
      facility_types: BTreeMap::new(),
      statuses: BTreeMap::new(),
      default_status: LicenseStatus::Unknown,
      zero_capacity_is_missing: false,
      placeholder_license_prefixes: Vec::new(),
      locality_from_address: false,
      detail_url_template: None,
    }
  }

  /// Look up one of the built-in profiles by name.
  pub fn builtin(name: &str) -> Result<Self> {
    match name {
      "mn-geopackage" => Ok(Self::mn_geopackage()),
      "mn-dhs" => Ok(Self::mn_dhs()),
      "ca-ccld" => Ok(Self::ca_ccld()),
      "md-checkccmd" => Ok(Self::md_checkccmd()),
      other => Err(Error::UnknownSource(other.to_owned())),
    }
  }

  pub fn builtin_names() -> &'static [&'static str] {
    &["mn-geopackage", "mn-dhs", "ca-ccld", "md-checkccmd"]
  }

  fn alias(mut self, field: Field, keys: &[&str]) -> Self {
    self
      .aliases
      .insert(field, keys.iter().map(|k| (*k).to_owned()).collect());
    self
  }

  fn types(mut self, entries: &[(&str, FacilityKind)]) -> Self {
    for (text, kind) in entries {
      self.facility_types.insert((*text).to_owned(), *kind);
    }
    self
  }

  fn statuses(mut self, entries: &[(&str, LicenseStatus)]) -> Self {
    for (text, status) in entries {
      self.statuses.insert((*text).to_owned(), *status);
    }
    self
  }

  /// Raw keys for `field`: configured aliases first, then the canonical name.
  pub fn keys(&self, field: Field) -> impl Iterator<Item = &str> {
    self
      .aliases
      .get(&field)
      .into_iter()
      .flatten()
      .map(String::as_str)
      .chain(std::iter::once(<&'static str>::from(field)))
  }

  /// Translate source facility-type text. Unlisted text that happens to be a
  /// canonical tag is accepted; anything else is [`FacilityKind::Other`].
  pub fn facility_kind(&self, text: &str) -> FacilityKind {
    lookup_folded(&self.facility_types, text)
      .or_else(|| FacilityKind::from_str(text).ok())
      .unwrap_or(FacilityKind::Other)
  }

  /// Translate source status text, or `None` if the vocabulary is unknown.
  pub fn license_status(&self, text: &str) -> Option<LicenseStatus> {
    lookup_folded(&self.statuses, text)
      .or_else(|| LicenseStatus::from_str(text).ok())
  }

  pub fn is_placeholder_prefix(&self, license: &str) -> bool {
    self.placeholder_license_prefixes.iter().any(|prefix| {
      license
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
  }

  pub fn detail_url(&self, license: &str) -> Option<String> {
    self
      .detail_url_template
      .as_ref()
      .map(|template| template.replace("{license}", license))
  }
}

fn lookup_folded<V: Copy>(table: &BTreeMap<String, V>, text: &str) -> Option<V> {
  let text = text.trim();
  table.get(text).copied().or_else(|| {
    table
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(text))
      .map(|(_, v)| *v)
  })
}

// ─── Built-in profiles ───────────────────────────────────────────────────────

impl SourceProfile {
  /// Minnesota spatial database export. One row per licensed program; the
  /// export only lists active licenses and carries no capacity or county.
  pub fn mn_geopackage() -> Self {
    Self::new("mn-geopackage", "MN")
      .alias(Field::LicenseNumber, &["License_Number"])
      .alias(Field::FacilityType, &["License_Type"])
      .alias(Field::Name, &["Name_of_Program"])
      .alias(Field::Address, &["AddressLine1"])
      .alias(Field::City, &["City"])
      .alias(Field::State, &["State"])
      .alias(Field::ZipCode, &["Zip"])
      .types(MN_TYPES)
      .with_default_status(LicenseStatus::Licensed)
      .with_detail_url(
        "https://licensinglookup.dhs.state.mn.us/Details.aspx?l={license}",
      )
  }

  /// Minnesota license lookup detail pages.
  pub fn mn_dhs() -> Self {
    Self::new("mn-dhs", "MN")
      .alias(Field::Address, &["full_address"])
      .alias(Field::FacilityType, &["license_type"])
      .alias(Field::Status, &["license_status"])
      .alias(Field::LicenseFirstDate, &["effective_date"])
      .alias(Field::LicenseExpirationDate, &["expiration_date"])
      .alias(Field::SourceUrl, &["detail_url"])
      .types(MN_TYPES)
      .statuses(&[
        ("Active", LicenseStatus::Licensed),
        ("Licensed", LicenseStatus::Licensed),
        ("Conditional", LicenseStatus::Probation),
        ("Closed", LicenseStatus::Closed),
        ("Inactive", LicenseStatus::Closed),
        ("Suspended", LicenseStatus::Suspended),
        ("Temporary Immediate Suspension", LicenseStatus::Suspended),
        ("Revoked", LicenseStatus::Revoked),
        ("Pending", LicenseStatus::Pending),
      ])
      .with_detail_url(
        "https://licensinglookup.dhs.state.mn.us/Details.aspx?l={license}",
      )
  }

  /// California Community Care Licensing search API, optionally enriched with
  /// detail-page visit/citation/complaint counts. The API reports missing
  /// capacity as 0.
  pub fn ca_ccld() -> Self {
    let mut profile = Self::new("ca-ccld", "CA")
      .alias(Field::LicenseNumber, &["FacilityNumber"])
      .alias(Field::Name, &["FacilityName"])
      .alias(Field::Address, &["FacilityAddress"])
      .alias(Field::City, &["FacilityCity"])
      .alias(Field::ZipCode, &["FacilityZip"])
      .alias(Field::County, &["FacilityCounty"])
      .alias(Field::FacilityType, &["FacilityTypeName"])
      .alias(Field::Capacity, &["FacilityCapacity"])
      .alias(Field::Status, &["FacilityStatus"])
      .alias(Field::Phone, &["FacilityPhone"])
      .alias(Field::SourceUrl, &["ccld_url"])
      .types(&[
        ("CHILD CARE CENTER", FacilityKind::ChildCareCenter),
        ("INFANT CENTER", FacilityKind::ChildCareCenter),
        ("SCHOOL AGE DAY CARE CENTER", FacilityKind::SchoolAge),
        ("FAMILY CHILD CARE HOME - LARGE", FacilityKind::LargeFamilyChildCare),
        ("FAMILY CHILD CARE HOME - SMALL", FacilityKind::FamilyChildCare),
      ])
      .statuses(&[
        ("LICENSED", LicenseStatus::Licensed),
        ("PENDING", LicenseStatus::Pending),
        ("ON PROBATION", LicenseStatus::Probation),
        ("CLOSED", LicenseStatus::Closed),
        ("SUSPENDED", LicenseStatus::Suspended),
        ("REVOKED", LicenseStatus::Revoked),
      ])
      .with_detail_url(
        "https://www.ccld.dss.ca.gov/carefacilitysearch/FacilityDetail/{license}",
      );
    profile.zero_capacity_is_missing = true;
    profile
  }

  /// Maryland CheckCCMD PDF roster. Rows carry no license number of their
  /// own; earlier tooling filled in generated `MD-` identifiers.
  pub fn md_checkccmd() -> Self {
    let mut profile = Self::new("md-checkccmd", "MD")
      .alias(Field::Name, &["Provider Names"])
      .alias(Field::FacilityType, &["prog_type"])
      .types(&[
        ("CTR", FacilityKind::ChildCareCenter),
        ("FCCH", FacilityKind::FamilyChildCare),
        ("LFCCH", FacilityKind::LargeFamilyChildCare),
        ("LOC", FacilityKind::LetterOfCompliance),
        ("Child Care Center", FacilityKind::ChildCareCenter),
        ("Family Child Care Home", FacilityKind::FamilyChildCare),
        ("Large Family Child Care Home", FacilityKind::LargeFamilyChildCare),
        ("Letter of Compliance", FacilityKind::LetterOfCompliance),
      ])
      .statuses(&[
        ("Open", LicenseStatus::Licensed),
        ("Closed", LicenseStatus::Closed),
        ("Suspended", LicenseStatus::Suspended),
        ("Revoked", LicenseStatus::Revoked),
      ]);
    profile.placeholder_license_prefixes = vec!["MD-".to_owned()];
    profile.locality_from_address = true;
    profile
  }

  fn with_default_status(mut self, status: LicenseStatus) -> Self {
    self.default_status = status;
    self
  }

  fn with_detail_url(mut self, template: &str) -> Self {
    self.detail_url_template = Some(template.to_owned());
    self
  }
}

const MN_TYPES: &[(&str, FacilityKind)] = &[
  ("Child Care Center", FacilityKind::ChildCareCenter),
  ("Certified Child Care Center", FacilityKind::ChildCareCenter),
  ("Family Child Care", FacilityKind::FamilyChildCare),
  ("Family Day Care", FacilityKind::FamilyChildCare),
  ("Group Family Child Care", FacilityKind::LargeFamilyChildCare),
  ("Group Family Day Care", FacilityKind::LargeFamilyChildCare),
  ("School Age Child Care", FacilityKind::SchoolAge),
  ("Head Start", FacilityKind::HeadStart),
  ("Early Head Start", FacilityKind::EarlyHeadStart),
];
