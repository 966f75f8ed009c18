//! Encoding and decoding helpers between carewatch domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`, and the
//! canonical enums by their serialised tag. Summaries are stored as JSON.

use std::str::FromStr;

use carewatch_core::facility::{County, Facility, FacilityKind, LicenseStatus};
use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Tags and counts ─────────────────────────────────────────────────────────

fn decode_tag<T: FromStr>(column: &'static str, s: &str) -> Result<T> {
  T::from_str(s).map_err(|_| Error::InvalidValue { column, value: s.to_owned() })
}

fn decode_count(column: &'static str, n: Option<i64>) -> Result<Option<u32>> {
  n.map(|n| {
    u32::try_from(n).map_err(|_| Error::InvalidValue { column, value: n.to_string() })
  })
  .transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawFacility`]'s field order.
pub const FACILITY_COLUMNS: &str = "license_number, name, address, city, state, \
   zip_code, county, facility_type, facility_type_raw, capacity, \
   capacity_estimated, status, license_first_date, license_expiration_date, \
   last_inspection_date, total_visits, total_citations, total_complaints, \
   phone, source_url, scraped_at";

/// A `facilities` row as plain column values.
pub struct RawFacility {
  pub license_number:          Option<String>,
  pub name:                    String,
  pub address:                 Option<String>,
  pub city:                    Option<String>,
  pub state:                   String,
  pub zip_code:                Option<String>,
  pub county:                  String,
  pub facility_type:           String,
  pub facility_type_raw:       Option<String>,
  pub capacity:                Option<i64>,
  pub capacity_estimated:      bool,
  pub status:                  String,
  pub license_first_date:      Option<String>,
  pub license_expiration_date: Option<String>,
  pub last_inspection_date:    Option<String>,
  pub total_visits:            Option<i64>,
  pub total_citations:         Option<i64>,
  pub total_complaints:        Option<i64>,
  pub phone:                   Option<String>,
  pub source_url:              Option<String>,
  pub scraped_at:              String,
}

impl RawFacility {
  pub fn from_facility(f: &Facility) -> Self {
    Self {
      license_number:          f.license_number.clone(),
      name:                    f.name.clone(),
      address:                 f.address.clone(),
      city:                    f.city.clone(),
      state:                   f.state.clone(),
      zip_code:                f.zip_code.clone(),
      county:                  f.county.to_string(),
      facility_type:           f.facility_type.as_ref().to_owned(),
      facility_type_raw:       f.facility_type_raw.clone(),
      capacity:                f.capacity.map(i64::from),
      capacity_estimated:      f.capacity_estimated,
      status:                  f.status.as_ref().to_owned(),
      license_first_date:      f.license_first_date.map(encode_date),
      license_expiration_date: f.license_expiration_date.map(encode_date),
      last_inspection_date:    f.last_inspection_date.map(encode_date),
      total_visits:            f.total_visits.map(i64::from),
      total_citations:         f.total_citations.map(i64::from),
      total_complaints:        f.total_complaints.map(i64::from),
      phone:                   f.phone.clone(),
      source_url:              f.source_url.clone(),
      scraped_at:              encode_dt(f.scraped_at),
    }
  }

  /// Read a row selected with [`FACILITY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      license_number:          row.get(0)?,
      name:                    row.get(1)?,
      address:                 row.get(2)?,
      city:                    row.get(3)?,
      state:                   row.get(4)?,
      zip_code:                row.get(5)?,
      county:                  row.get(6)?,
      facility_type:           row.get(7)?,
      facility_type_raw:       row.get(8)?,
      capacity:                row.get(9)?,
      capacity_estimated:      row.get(10)?,
      status:                  row.get(11)?,
      license_first_date:      row.get(12)?,
      license_expiration_date: row.get(13)?,
      last_inspection_date:    row.get(14)?,
      total_visits:            row.get(15)?,
      total_citations:         row.get(16)?,
      total_complaints:        row.get(17)?,
      phone:                   row.get(18)?,
      source_url:              row.get(19)?,
      scraped_at:              row.get(20)?,
    })
  }

  pub fn into_facility(self) -> Result<Facility> {
    let date = |s: Option<String>| s.as_deref().map(decode_date).transpose();
    Ok(Facility {
      license_number:          self.license_number,
      name:                    self.name,
      address:                 self.address,
      city:                    self.city,
      state:                   self.state,
      zip_code:                self.zip_code,
      county:                  County::from(self.county),
      facility_type:           decode_tag::<FacilityKind>("facility_type", &self.facility_type)?,
      facility_type_raw:       self.facility_type_raw,
      capacity:                decode_count("capacity", self.capacity)?,
      capacity_estimated:      self.capacity_estimated,
      status:                  decode_tag::<LicenseStatus>("status", &self.status)?,
      license_first_date:      date(self.license_first_date)?,
      license_expiration_date: date(self.license_expiration_date)?,
      last_inspection_date:    date(self.last_inspection_date)?,
      total_visits:            decode_count("total_visits", self.total_visits)?,
      total_citations:         decode_count("total_citations", self.total_citations)?,
      total_complaints:        decode_count("total_complaints", self.total_complaints)?,
      phone:                   self.phone,
      source_url:              self.source_url,
      scraped_at:              decode_dt(&self.scraped_at)?,
    })
  }
}
