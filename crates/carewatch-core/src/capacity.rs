//! Capacity estimator: a defensible default capacity when a source omits it.
//!
//! Output of this module is always flagged on the record
//! (`capacity_estimated = true`) and never replaces a source-supplied value.

use crate::tables::CapacityTable;

pub struct CapacityEstimator<'a> {
  table: &'a CapacityTable,
}

impl<'a> CapacityEstimator<'a> {
  pub fn new(table: &'a CapacityTable) -> Self { Self { table } }

  /// Estimated capacity for a facility type.
  ///
  /// Exact table match first, then keyword classification on the lower-cased
  /// text, then the table default.
  pub fn estimate(&self, facility_type: &str) -> u32 {
    self.classify(facility_type).unwrap_or(self.table.default)
  }

  /// Like [`estimate`](Self::estimate), but `None` when the text matches
  /// neither a table entry nor a keyword.
  ///
  /// The keyword order matters: group family is tested before family,
  /// early head start before head start.
  pub fn classify(&self, facility_type: &str) -> Option<u32> {
    let t = self.table;
    let text = facility_type.trim();
    if text.is_empty() {
      return None;
    }
    if let Some(&exact) = t.exact.get(text) {
      return Some(exact);
    }

    let lower = text.to_lowercase();
    let estimate = if lower.contains("center") {
      t.center
    } else if lower.contains("family") && lower.contains("group") {
      t.group_family
    } else if lower.contains("family") {
      t.family
    } else if lower.contains("school") || lower.contains("age") {
      t.school_age
    } else if lower.contains("head start") {
      if lower.contains("early") {
        t.early_head_start
      } else {
        t.head_start
      }
    } else {
      return None;
    };
    Some(estimate)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn estimate(text: &str) -> u32 {
    let table = CapacityTable::default();
    CapacityEstimator::new(&table).estimate(text)
  }

  #[test]
  fn exact_matches() {
    assert_eq!(estimate("Child Care Center"), 75);
    assert_eq!(estimate("Group Family Day Care"), 14);
    assert_eq!(estimate("Early Head Start"), 20);
  }

  #[test]
  fn keyword_fallbacks() {
    assert_eq!(estimate("CHILD CARE CENTER"), 75);
    assert_eq!(estimate("Certified License-Exempt Center"), 75);
    assert_eq!(estimate("Licensed Group Family Home"), 14);
    assert_eq!(estimate("FAMILY CHILD CARE HOME - SMALL"), 12);
    assert_eq!(estimate("School Age Program"), 50);
    assert_eq!(estimate("Preschool"), 50);
  }

  #[test]
  fn head_start_split() {
    assert_eq!(estimate("Tribal Head Start"), 60);
    assert_eq!(estimate("tribal early head start"), 20);
  }

  #[test]
  fn more_specific_category_wins() {
    // "center" is tested first, so a head start center is a center.
    assert_eq!(estimate("Head Start Center"), 75);
    // "group family" must not fall through to plain "family".
    assert_eq!(estimate("group family"), 14);
  }

  #[test]
  fn default_for_blank_or_unknown() {
    assert_eq!(estimate(""), 25);
    assert_eq!(estimate("   "), 25);
    assert_eq!(estimate("Letter of Compliance"), 25);
  }

  #[test]
  fn classify_reports_unmatched_text() {
    let table = CapacityTable::default();
    let estimator = CapacityEstimator::new(&table);
    assert_eq!(estimator.classify("FCCH"), None);
    assert_eq!(estimator.classify(""), None);
    assert_eq!(estimator.classify("School Age Day Care Center"), Some(75));
  }

  #[test]
  fn configured_table_is_used() {
    let table = CapacityTable { default: 10, family: 8, ..CapacityTable::default() };
    let estimator = CapacityEstimator::new(&table);
    assert_eq!(estimator.estimate("Unlisted"), 10);
    assert_eq!(estimator.estimate("family home"), 8);
  }
}
