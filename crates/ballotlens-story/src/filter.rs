use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::normalize::TypedRecord;

/// A `field == value` condition on a record's categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub field: String,
    pub value: String,
}

impl Constraint {
    #[must_use]
    pub fn matches(&self, record: &TypedRecord) -> bool {
        record.category(&self.field) == Some(self.value.as_str())
    }
}

/// The filter narrowing the records a profile view summarizes.
///
/// A record passes when it satisfies the fixed outer constraint and, if a
/// value is selected, has that value in the filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    outer: Constraint,
    field: String,
    selected: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn new(outer: Constraint, field: String) -> Self {
        Self {
            outer,
            field,
            selected: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replaces the selected value; `None` lifts only the optional restriction.
    pub fn set(&mut self, value: Option<String>) {
        self.selected = value;
    }

    #[must_use]
    pub fn matches(&self, record: &TypedRecord) -> bool {
        self.outer.matches(record)
            && self
                .selected
                .as_deref()
                .is_none_or(|value| record.category(&self.field) == Some(value))
    }

    /// Returns the records passing the filter, in input order.
    #[must_use]
    pub fn current_subset<'a>(&self, records: &'a [TypedRecord]) -> Vec<&'a TypedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Lists the selectable values of the filter field, sorted and deduplicated.
    #[must_use]
    pub fn options(&self, records: &[TypedRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.category(&self.field))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record(party: &str, state: &str) -> TypedRecord {
        TypedRecord {
            values: vec![],
            group: None,
            categories: BTreeMap::from([
                ("PARTY_R".to_owned(), party.to_owned()),
                ("STATE".to_owned(), state.to_owned()),
            ]),
        }
    }

    fn filter() -> FilterState {
        FilterState::new(
            Constraint {
                field: "PARTY_R".to_owned(),
                value: "1".to_owned(),
            },
            "STATE".to_owned(),
        )
    }

    #[test]
    fn test_outer_constraint_always_applies() {
        let records = [
            record("1", "GA"),
            record("0", "GA"),
            record("1", "TX"),
            record("0", "TX"),
        ];
        let mut filter = filter();
        assert_eq!(filter.current_subset(&records).len(), 2);

        filter.set(Some("GA".to_owned()));
        let subset = filter.current_subset(&records);
        assert_eq!(subset, vec![&records[0]]);

        filter.set(None);
        let subset = filter.current_subset(&records);
        assert_eq!(subset, vec![&records[0], &records[2]]);
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let records = [record("1", "GA")];
        let mut filter = filter();
        filter.set(Some("ZZ".to_owned()));
        assert!(filter.current_subset(&records).is_empty());
    }

    #[test]
    fn test_options_sorted_and_unique() {
        let records = [
            record("1", "TX"),
            record("0", "GA"),
            record("1", "AL"),
            record("1", "GA"),
        ];
        assert_eq!(filter().options(&records), vec!["AL", "GA", "TX"]);
    }
}
