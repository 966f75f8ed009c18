//! Deduplicator: folds normalized facilities into a jurisdiction's collection
//! so that each real-world facility appears exactly once.
//!
//! Merging is field-wise. For every field the more authoritative value wins:
//! a concrete value beats an absent or sentinel one, an authoritative
//! capacity beats an estimated one, and between equals the newer
//! `scraped_at` wins. Equal timestamps fall back to a fixed ordering of the
//! values themselves, so the result never depends on arrival order.

use std::{cmp::Ordering, collections::BTreeMap};

use chrono::NaiveDate;

use crate::{
  county::collapse_whitespace,
  facility::{County, Facility, FacilityKind, LicenseStatus},
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The key under which two records are considered the same facility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityKey {
  /// Upper-cased license number.
  License(String),
  /// Lower-cased, whitespace-collapsed name and address. When a record has
  /// no street address its city stands in.
  NameAddress { name: String, address: String },
}

impl IdentityKey {
  pub fn of(facility: &Facility) -> Self {
    if let Some(license) = facility
      .license_number
      .as_deref()
      .filter(|l| !is_placeholder_license(l))
    {
      return Self::License(collapse_whitespace(license).to_uppercase());
    }

    let address = facility
      .address
      .as_deref()
      .or(facility.city.as_deref())
      .unwrap_or_default();
    Self::NameAddress {
      name:    fold(&facility.name),
      address: fold(address),
    }
  }
}

fn fold(s: &str) -> String { collapse_whitespace(s).to_lowercase() }

/// License numbers that carry no identity: blanks, zeros and the usual
/// "nothing here" markers.
pub fn is_placeholder_license(license: &str) -> bool {
  let license = license.trim();
  if license.is_empty() || license.chars().all(|c| c == '0' || c == '-') {
    return true;
  }
  ["N/A", "NA", "NONE", "NULL", "PENDING", "UNKNOWN", "TBD"]
    .iter()
    .any(|marker| license.eq_ignore_ascii_case(marker))
}

// ─── Field merge ─────────────────────────────────────────────────────────────

/// A field value as seen by the merge.
trait Mergeable {
  /// Authority tier. Tier 0 is "absent"; a higher tier always wins.
  fn tier(&self) -> u8;

  /// Order between two values of the same tier when timestamps tie. The
  /// greater value is kept.
  fn tie_break(&self, other: &Self) -> Ordering;
}

fn text_order(a: &str, b: &str) -> Ordering {
  a.trim()
    .chars()
    .count()
    .cmp(&b.trim().chars().count())
    .then_with(|| a.cmp(b))
}

impl Mergeable for Option<String> {
  fn tier(&self) -> u8 { u8::from(self.as_deref().is_some_and(|s| !s.trim().is_empty())) }

  fn tie_break(&self, other: &Self) -> Ordering {
    text_order(self.as_deref().unwrap_or_default(), other.as_deref().unwrap_or_default())
  }
}

impl Mergeable for String {
  fn tier(&self) -> u8 { u8::from(!self.trim().is_empty()) }

  fn tie_break(&self, other: &Self) -> Ordering { text_order(self, other) }
}

macro_rules! mergeable_option {
  ($($t:ty),*) => {$(
    impl Mergeable for Option<$t> {
      fn tier(&self) -> u8 { u8::from(self.is_some()) }

      fn tie_break(&self, other: &Self) -> Ordering { self.cmp(other) }
    }
  )*};
}

mergeable_option!(u32, NaiveDate);

impl Mergeable for County {
  fn tier(&self) -> u8 { u8::from(!self.is_unknown()) }

  fn tie_break(&self, other: &Self) -> Ordering {
    text_order(self.as_str(), other.as_str())
  }
}

impl Mergeable for LicenseStatus {
  fn tier(&self) -> u8 { u8::from(*self != LicenseStatus::Unknown) }

  fn tie_break(&self, other: &Self) -> Ordering { self.cmp(other) }
}

/// Canonical type and the source text it came from travel together.
impl Mergeable for (FacilityKind, Option<String>) {
  fn tier(&self) -> u8 {
    u8::from(self.0 != FacilityKind::Other || self.1.tier() > 0)
  }

  fn tie_break(&self, other: &Self) -> Ordering {
    self.0.cmp(&other.0).then_with(|| self.1.tie_break(&other.1))
  }
}

/// Capacity and its estimation flag: absent < estimated < authoritative.
impl Mergeable for (Option<u32>, bool) {
  fn tier(&self) -> u8 {
    match self {
      (None, _) => 0,
      (Some(_), true) => 1,
      (Some(_), false) => 2,
    }
  }

  fn tie_break(&self, other: &Self) -> Ordering { self.0.cmp(&other.0) }
}

/// `incoming_age` is how the incoming record's `scraped_at` compares to the
/// existing one's.
fn merge_field<T: Mergeable>(slot: &mut T, incoming: T, incoming_age: Ordering) {
  let take = match incoming.tier().cmp(&slot.tier()) {
    Ordering::Greater => true,
    Ordering::Less => false,
    Ordering::Equal if slot.tier() == 0 => false,
    Ordering::Equal => match incoming_age {
      Ordering::Greater => true,
      Ordering::Less => false,
      Ordering::Equal => incoming.tie_break(slot) == Ordering::Greater,
    },
  };
  if take {
    *slot = incoming;
  }
}

/// Merge two records that share an identity key.
///
/// The result does not depend on which argument is `existing`: every field
/// is decided by tier, then timestamp, then value order.
pub fn merge_facility(mut existing: Facility, incoming: Facility) -> Facility {
  let age = incoming.scraped_at.cmp(&existing.scraped_at);
  let Facility {
    license_number,
    name,
    address,
    city,
    state,
    zip_code,
    county,
    facility_type,
    facility_type_raw,
    capacity,
    capacity_estimated,
    status,
    license_first_date,
    license_expiration_date,
    last_inspection_date,
    total_visits,
    total_citations,
    total_complaints,
    phone,
    source_url,
    scraped_at,
  } = incoming;

  merge_field(&mut existing.license_number, license_number, age);
  merge_field(&mut existing.name, name, age);
  merge_field(&mut existing.address, address, age);
  merge_field(&mut existing.city, city, age);
  merge_field(&mut existing.state, state, age);
  merge_field(&mut existing.zip_code, zip_code, age);
  merge_field(&mut existing.county, county, age);

  let mut kind = (existing.facility_type, existing.facility_type_raw.take());
  merge_field(&mut kind, (facility_type, facility_type_raw), age);
  (existing.facility_type, existing.facility_type_raw) = kind;

  let mut cap = (existing.capacity, existing.capacity_estimated);
  merge_field(&mut cap, (capacity, capacity_estimated), age);
  (existing.capacity, existing.capacity_estimated) = cap;

  merge_field(&mut existing.status, status, age);
  merge_field(&mut existing.license_first_date, license_first_date, age);
  merge_field(&mut existing.license_expiration_date, license_expiration_date, age);
  merge_field(&mut existing.last_inspection_date, last_inspection_date, age);
  merge_field(&mut existing.total_visits, total_visits, age);
  merge_field(&mut existing.total_citations, total_citations, age);
  merge_field(&mut existing.total_complaints, total_complaints, age);
  merge_field(&mut existing.phone, phone, age);
  merge_field(&mut existing.source_url, source_url, age);

  existing.scraped_at = existing.scraped_at.max(scraped_at);
  existing
}

// ─── Collection ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
  /// No record shared the identity key.
  Inserted,
  /// Folded into an existing record.
  Merged,
}

/// A jurisdiction's facility collection, keyed by identity.
///
/// Iteration and [`FacilitySet::into_vec`] yield records in identity-key
/// order, so the same contents always produce the same sequence.
#[derive(Debug, Clone, Default)]
pub struct FacilitySet {
  entries: BTreeMap<IdentityKey, Facility>,
}

impl FacilitySet {
  pub fn new() -> Self { Self::default() }

  /// Seed from a stored collection. Duplicates already present in it are
  /// folded as well.
  pub fn from_existing(facilities: impl IntoIterator<Item = Facility>) -> Self {
    let mut set = Self::new();
    set.extend(facilities);
    set
  }

  pub fn insert(&mut self, facility: Facility) -> MergeOutcome {
    let key = IdentityKey::of(&facility);
    match self.entries.remove(&key) {
      Some(existing) => {
        self.entries.insert(key, merge_facility(existing, facility));
        MergeOutcome::Merged
      }
      None => {
        self.entries.insert(key, facility);
        MergeOutcome::Inserted
      }
    }
  }

  pub fn get(&self, key: &IdentityKey) -> Option<&Facility> { self.entries.get(key) }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &Facility> { self.entries.values() }

  pub fn into_vec(self) -> Vec<Facility> { self.entries.into_values().collect() }
}

impl Extend<Facility> for FacilitySet {
  fn extend<I: IntoIterator<Item = Facility>>(&mut self, iter: I) {
    for facility in iter {
      self.insert(facility);
    }
  }
}

impl FromIterator<Facility> for FacilitySet {
  fn from_iter<I: IntoIterator<Item = Facility>>(iter: I) -> Self {
    Self::from_existing(iter)
  }
}

/// Fold one new facility into an existing collection.
pub fn merge(existing: Vec<Facility>, facility: Facility) -> Vec<Facility> {
  let mut set = FacilitySet::from_existing(existing);
  set.insert(facility);
  set.into_vec()
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, TimeZone, Utc};

  use super::*;

  fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, 0, 0, 0).unwrap()
  }

  fn licensed(license: &str, day: u32) -> Facility {
    let mut f = Facility::new("Sunshine Center", "MN", at(day));
    f.license_number = Some(license.into());
    f
  }

  #[test]
  fn authoritative_capacity_survives_later_null() {
    let mut first = licensed("12345", 1);
    first.capacity = Some(40);
    let second = licensed("12345", 2);

    let merged = merge(merge(Vec::new(), first), second);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].capacity, Some(40));
    assert!(!merged[0].capacity_estimated);
    assert_eq!(merged[0].scraped_at, at(2));
  }

  #[test]
  fn authoritative_capacity_survives_later_estimate() {
    let mut first = licensed("12345", 1);
    first.capacity = Some(40);
    let mut second = licensed("12345", 2);
    second.capacity = Some(75);
    second.capacity_estimated = true;

    for (a, b) in [(first.clone(), second.clone()), (second, first)] {
      let merged = merge_facility(a, b);
      assert_eq!(merged.capacity, Some(40));
      assert!(!merged.capacity_estimated);
    }
  }

  #[test]
  fn estimate_is_replaced_by_authoritative() {
    let mut first = licensed("12345", 2);
    first.capacity = Some(75);
    first.capacity_estimated = true;
    let mut second = licensed("12345", 1);
    second.capacity = Some(52);

    let merged = merge_facility(first, second);
    assert_eq!(merged.capacity, Some(52));
    assert!(!merged.capacity_estimated);
  }

  #[test]
  fn newer_authoritative_value_wins() {
    let mut old = licensed("12345", 1);
    old.capacity = Some(40);
    old.phone = Some("651-555-0100".into());
    let mut new = licensed("12345", 3);
    new.capacity = Some(44);

    let merged = merge_facility(old, new);
    assert_eq!(merged.capacity, Some(44));
    // Null in the newer record never erases a known value.
    assert_eq!(merged.phone.as_deref(), Some("651-555-0100"));
  }

  #[test]
  fn equal_timestamps_break_ties_by_value() {
    let mut a = licensed("12345", 1);
    a.capacity = Some(40);
    a.address = Some("1 Main St".into());
    a.status = LicenseStatus::Licensed;
    let mut b = licensed("12345", 1);
    b.capacity = Some(44);
    b.address = Some("1 Main Street".into());
    b.status = LicenseStatus::Closed;

    let ab = merge_facility(a.clone(), b.clone());
    let ba = merge_facility(b, a);
    assert_eq!(ab, ba);
    assert_eq!(ab.capacity, Some(44));
    assert_eq!(ab.address.as_deref(), Some("1 Main Street"));
    assert_eq!(ab.status, LicenseStatus::Closed);
  }

  #[test]
  fn sentinels_lose_to_concrete_values() {
    let mut a = licensed("12345", 3);
    a.county = County::Unknown;
    a.status = LicenseStatus::Unknown;
    let mut b = licensed("12345", 1);
    b.county = County::Named("Ramsey".into());
    b.status = LicenseStatus::Licensed;
    b.facility_type = FacilityKind::ChildCareCenter;
    b.facility_type_raw = Some("Child Care Center".into());

    let merged = merge_facility(a, b);
    assert_eq!(merged.county, County::Named("Ramsey".into()));
    assert_eq!(merged.status, LicenseStatus::Licensed);
    assert_eq!(merged.facility_type, FacilityKind::ChildCareCenter);
    assert_eq!(merged.facility_type_raw.as_deref(), Some("Child Care Center"));
  }

  #[test]
  fn name_and_address_identify_unlicensed_rows() {
    let mut a = Facility::new("Little Sprouts", "MD", at(1));
    a.address = Some("12 Oak Ave".into());
    let mut b = Facility::new("LITTLE  SPROUTS", "MD", at(2));
    b.address = Some("12 oak ave ".into());
    b.phone = Some("301-555-0199".into());

    let set: FacilitySet = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
    let only = set.iter().next().unwrap();
    assert_eq!(only.phone.as_deref(), Some("301-555-0199"));
  }

  #[test]
  fn placeholder_licenses_fall_back_to_name_address() {
    let mut a = Facility::new("Little Sprouts", "MD", at(1));
    a.license_number = Some("N/A".into());
    a.address = Some("12 Oak Ave".into());
    let mut b = Facility::new("Little Sprouts", "MD", at(1));
    b.license_number = Some("000".into());
    b.address = Some("12 Oak Ave".into());

    let mut set = FacilitySet::new();
    assert_eq!(set.insert(a), MergeOutcome::Inserted);
    assert_eq!(set.insert(b), MergeOutcome::Merged);
  }

  #[test]
  fn placeholder_detection() {
    for text in ["", "  ", "0", "0000", "-", "n/a", "None", "PENDING", "unknown"] {
      assert!(is_placeholder_license(text), "{text:?}");
    }
    for text in ["12345", "0123", "DC-100"] {
      assert!(!is_placeholder_license(text), "{text:?}");
    }
  }

  #[test]
  fn license_keys_are_case_insensitive() {
    let a = licensed("ab-100", 1);
    let b = licensed("AB-100", 2);
    assert_eq!(IdentityKey::of(&a), IdentityKey::of(&b));
  }

  #[test]
  fn refolding_is_idempotent() {
    let mut a = licensed("1", 1);
    a.capacity = Some(12);
    let mut b = Facility::new("Tiny Tots", "MN", at(2));
    b.city = Some("Duluth".into());
    b.capacity = Some(14);
    b.capacity_estimated = true;

    let once: FacilitySet = [a.clone(), b.clone()].into_iter().collect();
    let mut twice = FacilitySet::from_existing(once.clone().into_vec());
    twice.extend([a, b]);
    assert_eq!(once.into_vec(), twice.into_vec());
  }

  #[test]
  fn authority_never_decreases_regardless_of_order() {
    let variants: Vec<(Option<u32>, bool, u32)> = vec![
      (None, false, 1),
      (Some(75), true, 2),
      (Some(40), false, 1),
      (Some(60), true, 3),
      (None, false, 4),
    ];
    let records: Vec<Facility> = variants
      .into_iter()
      .map(|(capacity, estimated, day)| {
        let mut f = licensed("9", day);
        f.capacity = capacity;
        f.capacity_estimated = estimated;
        f
      })
      .collect();

    // Every rotation of the arrival order ends on the authoritative value.
    for start in 0..records.len() {
      let mut order = records.clone();
      order.rotate_left(start);
      let merged = order.into_iter().reduce(merge_facility).unwrap();
      assert_eq!(merged.capacity, Some(40));
      assert!(!merged.capacity_estimated);
    }
  }
}
