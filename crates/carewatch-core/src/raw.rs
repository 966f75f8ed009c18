//! Raw extracted rows, as handed over by source adapters.
//!
//! A row is a flat map of string keys to scalar values. Nothing about key
//! names is assumed here; the [`crate::profile::SourceProfile`] says which
//! keys carry which canonical field.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, county::collapse_whitespace};

// ─── RawValue ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  Text(String),
}

impl RawValue {
  /// Text form with whitespace trimmed and collapsed. Integral numbers are
  /// rendered without a fractional part (ZIP codes and license numbers often
  /// arrive as numbers). Blank text is `None`.
  pub fn as_text(&self) -> Option<String> {
    let text = match self {
      Self::Null => return None,
      Self::Bool(b) => b.to_string(),
      Self::Integer(n) => n.to_string(),
      Self::Float(f) if f.is_finite() && f.fract() == 0.0 => {
        format!("{f:.0}")
      }
      Self::Float(f) => f.to_string(),
      Self::Text(s) => collapse_whitespace(s),
    };
    (!text.is_empty()).then_some(text)
  }

  /// Non-negative whole number, or `None` for anything absent, negative,
  /// fractional, or non-numeric. Text may carry thousands separators.
  pub fn as_count(&self) -> Option<u32> {
    match self {
      Self::Integer(n) => u32::try_from(*n).ok(),
      Self::Float(f) => float_to_count(*f),
      Self::Text(s) => {
        let cleaned: String =
          s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
        cleaned
          .parse::<u32>()
          .ok()
          .or_else(|| cleaned.parse::<f64>().ok().and_then(float_to_count))
      }
      Self::Null | Self::Bool(_) => None,
    }
  }
}

fn float_to_count(f: f64) -> Option<u32> {
  (f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX))
    .then_some(f as u32)
}

impl From<&str> for RawValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for RawValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<i64> for RawValue {
  fn from(n: i64) -> Self { Self::Integer(n) }
}

impl From<f64> for RawValue {
  fn from(f: f64) -> Self { Self::Float(f) }
}

impl From<bool> for RawValue {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
  fn from(v: Option<T>) -> Self { v.map_or(Self::Null, Into::into) }
}

// ─── RawRow ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, RawValue>);

impl RawRow {
  pub fn new() -> Self { Self::default() }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
    self.0.insert(key.into(), value.into());
  }

  /// Value under `key`, matched exactly and then ASCII case-insensitively.
  pub fn get(&self, key: &str) -> Option<&RawValue> {
    self.0.get(key).or_else(|| {
      self
        .0
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
    })
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
  K: Into<String>,
  V: Into<RawValue>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

// ─── RawBatch ────────────────────────────────────────────────────────────────

/// One adapter run's output. Accepted on the wire either as a bare array of
/// rows or as an envelope carrying the extraction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBatch {
  /// Source profile name, if the adapter recorded it.
  #[serde(default)]
  pub source:       Option<String>,
  #[serde(default)]
  pub extracted_at: Option<DateTime<Utc>>,
  pub rows:         Vec<RawRow>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchWire {
  Envelope(RawBatch),
  Rows(Vec<RawRow>),
}

impl RawBatch {
  pub fn from_json(json: &str) -> Result<Self> {
    Ok(match serde_json::from_str(json)? {
      BatchWire::Envelope(batch) => batch,
      BatchWire::Rows(rows) => Self { rows, ..Self::default() },
    })
  }
}
