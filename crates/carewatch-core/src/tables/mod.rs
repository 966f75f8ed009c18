//! Per-state lookup tables: the jurisdiction universe, the city table, and
//! the capacity table.
//!
//! Tables are immutable configuration. They are built once at process start,
//! either from the built-in data below or from a JSON file, validated, and
//! then passed by reference into the resolver and estimator.

mod california;
mod maryland;
mod minnesota;

use std::{
  collections::{BTreeMap, HashMap},
  path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, facility::County};

// ─── Jurisdictions ───────────────────────────────────────────────────────────

/// The closed set of jurisdictions for one state.
#[derive(Debug, Clone)]
pub struct JurisdictionSet {
  names:  Vec<String>,
  /// Lower-cased name → index into `names`.
  folded: HashMap<String, usize>,
}

impl JurisdictionSet {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut set = Self { names: Vec::new(), folded: HashMap::new() };
    for name in names {
      let name = name.into();
      let key = name.to_lowercase();
      if !set.folded.contains_key(&key) {
        set.folded.insert(key, set.names.len());
        set.names.push(name);
      }
    }
    set
  }

  pub fn len(&self) -> usize { self.names.len() }

  pub fn is_empty(&self) -> bool { self.names.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  /// Exact membership test.
  pub fn contains(&self, name: &str) -> bool {
    self
      .folded
      .get(&name.to_lowercase())
      .is_some_and(|&i| self.names[i] == name)
  }

  /// Case-insensitive lookup returning the canonical spelling.
  pub fn canonical(&self, name: &str) -> Option<&str> {
    self
      .folded
      .get(&name.trim().to_lowercase())
      .map(|&i| self.names[i].as_str())
  }

  /// The [`County`] for a canonical or case-variant name, if it is a member.
  pub fn county(&self, name: &str) -> Option<County> {
    self.canonical(name).map(|n| County::Named(n.to_owned()))
  }
}

// ─── Capacity ────────────────────────────────────────────────────────────────

/// Typical licensed capacity by facility type, used when a source omits
/// capacity.
///
/// `exact` is consulted first with the type text as given; the per-category
/// fields back the keyword classification in
/// [`crate::capacity::CapacityEstimator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityTable {
  pub exact:            BTreeMap<String, u32>,
  pub center:           u32,
  pub group_family:     u32,
  pub family:           u32,
  pub school_age:       u32,
  pub head_start:       u32,
  pub early_head_start: u32,
  pub default:          u32,
}

impl Default for CapacityTable {
  /// Medians and statutory limits from Minnesota licensing rules; used for
  /// every state until a state-specific table is configured.
  fn default() -> Self {
    let exact = [
      ("Child Care Center", 75),
      ("child care center", 75),
      ("Family Child Care", 12),
      ("family child care", 12),
      ("Family Day Care", 12),
      ("Group Family Child Care", 14),
      ("Group Family Day Care", 14),
      ("Large Family Child Care", 14),
      ("School Age Child Care", 50),
      ("School-Age", 50),
      ("Head Start", 60),
      ("Early Head Start", 20),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v))
    .collect();

    Self {
      exact,
      center: 75,
      group_family: 14,
      family: 12,
      school_age: 50,
      head_start: 60,
      early_head_start: 20,
      default: 25,
    }
  }
}

// ─── StateTables ─────────────────────────────────────────────────────────────

/// On-disk shape of a state table file (`<tables_dir>/<STATE>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTablesFile {
  pub state:         String,
  pub jurisdictions: Vec<String>,
  #[serde(default)]
  pub cities:        BTreeMap<String, String>,
  #[serde(default)]
  pub capacity:      CapacityTable,
}

/// Validated lookup tables for one state.
#[derive(Debug, Clone)]
pub struct StateTables {
  state:         String,
  jurisdictions: JurisdictionSet,
  /// City text (exact spelling) → canonical jurisdiction name.
  cities:        HashMap<String, String>,
  capacity:      CapacityTable,
}

impl StateTables {
  /// Build and validate tables. Every city must map into the jurisdiction
  /// universe; city values are rewritten to the universe's spelling.
  pub fn new<J, C, K, V>(
    state: impl Into<String>,
    jurisdictions: J,
    cities: C,
    capacity: CapacityTable,
  ) -> Result<Self>
  where
    J: IntoIterator,
    J::Item: Into<String>,
    C: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
  {
    let state = state.into().to_uppercase();
    let jurisdictions = JurisdictionSet::new(jurisdictions);
    if jurisdictions.is_empty() {
      return Err(Error::EmptyUniverse(state));
    }
    if let Some(name) = jurisdictions.canonical(County::UNKNOWN) {
      return Err(Error::ReservedJurisdiction { state, name: name.to_owned() });
    }

    let mut table = HashMap::new();
    for (city, county) in cities {
      let city = city.into();
      let Some(canonical) = jurisdictions.canonical(county.as_ref()) else {
        return Err(Error::CityOutsideUniverse {
          state,
          city,
          county: county.as_ref().to_owned(),
        });
      };
      table.insert(city, canonical.to_owned());
    }

    Ok(Self { state, jurisdictions, cities: table, capacity })
  }

  /// Built-in tables for `state` (`MN`, `CA` or `MD`, case-insensitive).
  pub fn builtin(state: &str) -> Result<Self> {
    let (code, jurisdictions, cities) = match state.to_uppercase().as_str() {
      minnesota::STATE => {
        (minnesota::STATE, minnesota::JURISDICTIONS, minnesota::CITIES)
      }
      california::STATE => {
        (california::STATE, california::JURISDICTIONS, california::CITIES)
      }
      maryland::STATE => {
        (maryland::STATE, maryland::JURISDICTIONS, maryland::CITIES)
      }
      _ => return Err(Error::UnknownState(state.to_owned())),
    };
    Self::new(
      code,
      jurisdictions.iter().copied(),
      cities.iter().copied(),
      CapacityTable::default(),
    )
  }

  pub fn from_file(file: StateTablesFile) -> Result<Self> {
    Self::new(file.state, file.jurisdictions, file.cities, file.capacity)
  }

  pub fn from_json(json: &str) -> Result<Self> {
    Self::from_file(serde_json::from_str(json)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    Self::from_json(&json)
  }

  pub fn state(&self) -> &str { &self.state }

  pub fn jurisdictions(&self) -> &JurisdictionSet { &self.jurisdictions }

  pub fn capacity(&self) -> &CapacityTable { &self.capacity }

  /// Exact city-table lookup; no normalisation.
  pub fn city(&self, city: &str) -> Option<&str> {
    self.cities.get(city).map(String::as_str)
  }

  pub fn city_count(&self) -> usize { self.cities.len() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_tables_validate() {
    let mn = StateTables::builtin("mn").unwrap();
    assert_eq!(mn.state(), "MN");
    assert_eq!(mn.jurisdictions().len(), 87);
    assert_eq!(mn.city("St. Paul"), Some("Ramsey"));
    assert_eq!(mn.city("Duluth"), Some("St. Louis"));

    let ca = StateTables::builtin("CA").unwrap();
    assert_eq!(ca.jurisdictions().len(), 58);
    assert_eq!(ca.city_count(), 0);

    let md = StateTables::builtin("MD").unwrap();
    assert_eq!(md.jurisdictions().len(), 24);
    assert_eq!(md.city("Rockville"), Some("Montgomery"));
  }

  #[test]
  fn later_city_entry_wins() {
    // The source data lists Two Harbors under both St. Louis and Lake.
    let mn = StateTables::builtin("MN").unwrap();
    assert_eq!(mn.city("Two Harbors"), Some("Lake"));
  }

  #[test]
  fn unknown_state_is_an_error() {
    assert!(matches!(
      StateTables::builtin("TX"),
      Err(Error::UnknownState(s)) if s == "TX"
    ));
  }

  #[test]
  fn city_outside_universe_rejected() {
    let err = StateTables::new(
      "MN",
      ["Hennepin"],
      [("Minneapolis", "Hennepin"), ("Fargo", "Cass ND")],
      CapacityTable::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::CityOutsideUniverse { city, .. } if city == "Fargo"));
  }

  #[test]
  fn sentinel_name_is_not_a_jurisdiction() {
    let json = r#"{ "state": "WI", "jurisdictions": ["Dane", "unknown"] }"#;
    let err = StateTables::from_json(json).unwrap_err();
    assert!(matches!(err, Error::ReservedJurisdiction { name, .. } if name == "unknown"));
  }

  #[test]
  fn city_values_take_universe_spelling() {
    let tables = StateTables::new(
      "mn",
      ["St. Louis"],
      [("Duluth", "st. louis")],
      CapacityTable::default(),
    )
    .unwrap();
    assert_eq!(tables.city("Duluth"), Some("St. Louis"));
    assert!(tables.jurisdictions().contains("St. Louis"));
    assert!(!tables.jurisdictions().contains("st. louis"));
  }

  #[test]
  fn tables_load_from_json() {
    let json = r#"{
      "state": "WI",
      "jurisdictions": ["Dane", "Milwaukee"],
      "cities": { "Madison": "Dane" },
      "capacity": { "default": 30 }
    }"#;
    let tables = StateTables::from_json(json).unwrap();
    assert_eq!(tables.state(), "WI");
    assert_eq!(tables.city("Madison"), Some("Dane"));
    assert_eq!(tables.capacity().default, 30);
    // Unspecified capacity fields keep their defaults.
    assert_eq!(tables.capacity().center, 75);
  }
}
