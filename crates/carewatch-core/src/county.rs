//! County resolver: free-text locality → canonical jurisdiction.
//!
//! A static, table-driven lookup. There is no fuzzy matching: a locality that
//! does not hit the city table after the fixed normalisation steps resolves to
//! [`County::Unknown`] and is recorded in [`UnresolvedLocalities`] so the table
//! can be extended.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{facility::County, tables::StateTables};

/// Key recorded for rows that carried no locality at all.
pub const BLANK_LOCALITY: &str = "(blank)";

// ─── Unresolved tally ────────────────────────────────────────────────────────

/// Locality text that failed to resolve → number of rows carrying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnresolvedLocalities(BTreeMap<String, u64>);

impl UnresolvedLocalities {
  pub fn new() -> Self { Self::default() }

  /// Count one occurrence. Returns `true` on the first sighting.
  pub fn record(&mut self, locality: &str) -> bool {
    let key = collapse_whitespace(locality);
    let key = if key.is_empty() { BLANK_LOCALITY.to_owned() } else { key };
    let count = self.0.entry(key).or_insert(0);
    *count += 1;
    *count == 1
  }

  pub fn add(&mut self, locality: impl Into<String>, occurrences: u64) {
    *self.0.entry(locality.into()).or_insert(0) += occurrences;
  }

  pub fn merge(&mut self, other: &Self) {
    for (locality, n) in &other.0 {
      self.add(locality.clone(), *n);
    }
  }

  pub fn get(&self, locality: &str) -> u64 {
    self.0.get(locality).copied().unwrap_or(0)
  }

  pub fn total(&self) -> u64 { self.0.values().sum() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }

  /// Entries ordered by descending count, then name.
  pub fn most_frequent(&self) -> Vec<(&str, u64)> {
    let mut entries: Vec<_> = self.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    entries
  }
}

// ─── Resolver ────────────────────────────────────────────────────────────────

pub struct CountyResolver<'a> {
  tables: &'a StateTables,
}

impl<'a> CountyResolver<'a> {
  pub fn new(tables: &'a StateTables) -> Self { Self { tables } }

  /// Resolve `locality` to a canonical jurisdiction name, or `None`.
  ///
  /// Fallback chain, first hit wins:
  /// 1. exact (after trimming and collapsing whitespace)
  /// 2. punctuation stripped
  /// 3. title case
  /// 4. leading `St`/`St.` expanded to `Saint`, title-cased
  pub fn lookup(&self, locality: &str) -> Option<&'a str> {
    let text = collapse_whitespace(locality);
    if text.is_empty() {
      return None;
    }
    let tables = self.tables;

    if let Some(county) = tables.city(&text) {
      return Some(county);
    }

    let stripped = strip_punctuation(&text);
    if let Some(county) = tables.city(&stripped) {
      return Some(county);
    }

    for candidate in [title_case(&text), title_case(&stripped)] {
      if let Some(county) = tables.city(&candidate) {
        return Some(county);
      }
    }

    expand_saint(&text).and_then(|expanded| tables.city(&expanded))
  }

  /// Resolve to a [`County`]; misses become [`County::Unknown`] and are
  /// tallied in `unresolved`.
  pub fn resolve(
    &self,
    locality: &str,
    unresolved: &mut UnresolvedLocalities,
  ) -> County {
    match self.lookup(locality) {
      Some(name) => County::Named(name.to_owned()),
      None => {
        if unresolved.record(locality) {
          warn!(state = self.tables.state(), locality, "unresolved locality");
        }
        County::Unknown
      }
    }
  }
}

// ─── Text helpers ────────────────────────────────────────────────────────────

/// Trim and collapse every run of whitespace (including newlines) to a single
/// space.
pub fn collapse_whitespace(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_punctuation(s: &str) -> String {
  let without: String = s.chars().filter(|c| !matches!(c, '.' | ',')).collect();
  collapse_whitespace(&without)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
/// "SOUTH ST. PAUL" → "South St. Paul", "o'brien" → "O'Brien".
pub fn title_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut at_word_start = true;
  for c in s.chars() {
    if c.is_alphabetic() {
      if at_word_start {
        out.extend(c.to_uppercase());
      } else {
        out.extend(c.to_lowercase());
      }
      at_word_start = false;
    } else {
      out.push(c);
      at_word_start = true;
    }
  }
  out
}

fn expand_saint(s: &str) -> Option<String> {
  let rest = ["st. ", "st "].iter().find_map(|prefix| {
    s.get(..prefix.len())
      .filter(|head| head.eq_ignore_ascii_case(prefix))
      .map(|_| &s[prefix.len()..])
  })?;
  Some(format!("Saint {}", title_case(rest.trim_start())))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tables::CapacityTable;

  fn fixture() -> StateTables {
    StateTables::new(
      "MN",
      ["Hennepin", "Ramsey", "Stearns", "Dakota"],
      [
        ("Minneapolis", "Hennepin"),
        ("St. Paul", "Ramsey"),
        ("Saint Cloud", "Stearns"),
        ("South Saint Paul", "Dakota"),
        ("Brooklyn Park", "Hennepin"),
      ],
      CapacityTable::default(),
    )
    .unwrap()
  }

  #[test]
  fn exact_match() {
    let tables = fixture();
    let r = CountyResolver::new(&tables);
    assert_eq!(r.lookup("Minneapolis"), Some("Hennepin"));
    assert_eq!(r.lookup("  Minneapolis \n"), Some("Hennepin"));
  }

  #[test]
  fn punctuation_stripped() {
    let tables = StateTables::new(
      "MN",
      ["Ramsey"],
      [("St Paul", "Ramsey")],
      CapacityTable::default(),
    )
    .unwrap();
    let r = CountyResolver::new(&tables);
    assert_eq!(r.lookup("St. Paul"), Some("Ramsey"));
  }

  #[test]
  fn title_cased() {
    let tables = fixture();
    let r = CountyResolver::new(&tables);
    assert_eq!(r.lookup("BROOKLYN PARK"), Some("Hennepin"));
    assert_eq!(r.lookup("minneapolis"), Some("Hennepin"));
  }

  #[test]
  fn saint_prefix_expanded() {
    let tables = fixture();
    let r = CountyResolver::new(&tables);
    assert_eq!(r.lookup("ST CLOUD"), Some("Stearns"));
    assert_eq!(r.lookup("st. cloud"), Some("Stearns"));
    // Only a leading abbreviation is expanded.
    assert_eq!(r.lookup("SOUTH ST PAUL"), None);
  }

  #[test]
  fn no_fuzzy_matching() {
    let tables = fixture();
    let r = CountyResolver::new(&tables);
    assert_eq!(r.lookup("Minneapolls"), None);
    assert_eq!(r.lookup("Minneapolis Heights"), None);
    assert_eq!(r.lookup(""), None);
  }

  #[test]
  fn misses_are_tallied() {
    let tables = fixture();
    let r = CountyResolver::new(&tables);
    let mut unresolved = UnresolvedLocalities::new();

    assert_eq!(r.resolve("Fargo", &mut unresolved), County::Unknown);
    assert_eq!(r.resolve(" Fargo ", &mut unresolved), County::Unknown);
    assert_eq!(r.resolve("", &mut unresolved), County::Unknown);
    assert_eq!(
      r.resolve("St. Paul", &mut unresolved),
      County::Named("Ramsey".into())
    );

    assert_eq!(unresolved.get("Fargo"), 2);
    assert_eq!(unresolved.get(BLANK_LOCALITY), 1);
    assert_eq!(unresolved.total(), 3);
    assert_eq!(unresolved.most_frequent()[0], ("Fargo", 2));
  }

  #[test]
  fn title_case_matches_word_boundaries() {
    assert_eq!(title_case("SOUTH ST. PAUL"), "South St. Paul");
    assert_eq!(title_case("o'brien"), "O'Brien");
    assert_eq!(title_case("lac qui parle"), "Lac Qui Parle");
  }
}
