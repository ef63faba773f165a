//! Aggregate YES/NO bars
//!
//! The bar view shows, for every `(state, series)` pair, the share of records
//! in the positive and negative group, followed by one total bar per series.
//! Bars are aggregated once from the unfiltered records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{group::GroupKey, normalize::TypedRecord, step::BarHighlight};

/// Opacity of bars that are not highlighted.
pub const DIMMED_OPACITY: f64 = 0.3;

/// One stacked bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    /// Category of the breakdown field, `None` for a total bar.
    pub category: Option<String>,
    /// Series value, e.g. the party.
    pub series: String,
    pub count: usize,
    /// Share of positive-group records, in percent.
    pub positive_percent: f64,
    /// Share of the remaining records, in percent.
    pub negative_percent: f64,
}

impl BarRow {
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.category.is_none()
    }

    /// Opacity of this bar under `highlight`.
    #[must_use]
    pub fn opacity(&self, highlight: &BarHighlight) -> f64 {
        let lit = match highlight {
            BarHighlight::None => true,
            BarHighlight::Total { series } => self.is_total() && self.series == *series,
            BarHighlight::Series { series } => !self.is_total() && self.series == *series,
        };
        if lit { 1.0 } else { DIMMED_OPACITY }
    }
}

#[derive(Debug, Clone, Default)]
struct Tally {
    count: usize,
    positive: usize,
}

impl Tally {
    fn add(&mut self, record: &TypedRecord) {
        self.count += 1;
        if record.group == Some(GroupKey::Positive) {
            self.positive += 1;
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn into_row(self, category: Option<String>, series: String) -> BarRow {
        let positive_percent = if self.count == 0 {
            0.0
        } else {
            self.positive as f64 / self.count as f64 * 100.0
        };
        BarRow {
            category,
            series,
            count: self.count,
            positive_percent,
            negative_percent: if self.count == 0 {
                0.0
            } else {
                100.0 - positive_percent
            },
        }
    }
}

/// Groups `records` by `key`, keeping keys in order of first appearance.
fn tally_by<'a, I, F>(records: I, mut key: F) -> Vec<(Option<&'a str>, Tally)>
where
    I: IntoIterator<Item = &'a TypedRecord>,
    F: FnMut(&'a TypedRecord) -> Option<&'a str>,
{
    let mut positions = HashMap::new();
    let mut tallies: Vec<(Option<&str>, Tally)> = vec![];
    for record in records {
        let k = key(record);
        let idx = *positions.entry(k).or_insert_with(|| {
            tallies.push((k, Tally::default()));
            tallies.len() - 1
        });
        tallies[idx].1.add(record);
    }
    tallies
}

/// Per-category and total bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub rows: Vec<BarRow>,
}

impl BarChart {
    /// Aggregates bars over `records`.
    ///
    /// Category bars come first, ordered by first appearance of the category and
    /// then of the series within it; total bars follow in order of first
    /// appearance of the series. Records lacking either field are skipped.
    #[must_use]
    pub fn compute(records: &[TypedRecord], category_field: &str, series_field: &str) -> Self {
        let mut rows = vec![];

        let complete = records
            .iter()
            .filter(|r| r.category(category_field).is_some() && r.category(series_field).is_some())
            .collect::<Vec<_>>();

        for (category, _) in tally_by(complete.iter().copied(), |r| r.category(category_field)) {
            let in_category = complete
                .iter()
                .copied()
                .filter(|r| r.category(category_field) == category);
            for (series, tally) in tally_by(in_category, |r| r.category(series_field)) {
                rows.push(tally.into_row(
                    category.map(str::to_owned),
                    series.unwrap_or_default().to_owned(),
                ));
            }
        }

        for (series, tally) in tally_by(complete.iter().copied(), |r| r.category(series_field)) {
            rows.push(tally.into_row(None, series.unwrap_or_default().to_owned()));
        }

        Self { rows }
    }

    pub fn totals(&self) -> impl Iterator<Item = &BarRow> {
        self.rows.iter().filter(|r| r.is_total())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record(state: &str, party: &str, yes: bool) -> TypedRecord {
        TypedRecord {
            values: vec![],
            group: Some(if yes {
                GroupKey::Positive
            } else {
                GroupKey::Negative
            }),
            categories: BTreeMap::from([
                ("STATE".to_owned(), state.to_owned()),
                ("PARTY_R".to_owned(), party.to_owned()),
            ]),
        }
    }

    fn chart() -> BarChart {
        let records = [
            record("TX", "1", true),
            record("GA", "0", false),
            record("TX", "0", true),
            record("TX", "1", false),
            record("GA", "1", true),
            record("GA", "0", true),
        ];
        BarChart::compute(&records, "STATE", "PARTY_R")
    }

    #[test]
    fn test_rows_in_first_appearance_order() {
        let keys = chart()
            .rows
            .iter()
            .map(|r| (r.category.clone(), r.series.clone()))
            .collect::<Vec<_>>();
        let s = |v: &str| v.to_owned();
        assert_eq!(
            keys,
            vec![
                (Some(s("TX")), s("1")),
                (Some(s("TX")), s("0")),
                (Some(s("GA")), s("0")),
                (Some(s("GA")), s("1")),
                (None, s("1")),
                (None, s("0")),
            ]
        );
    }

    #[test]
    fn test_percentages() {
        let chart = chart();
        let tx_r = &chart.rows[0];
        assert_eq!(tx_r.count, 2);
        assert_eq!(tx_r.positive_percent, 50.0);
        assert_eq!(tx_r.negative_percent, 50.0);

        let total_d = chart.totals().find(|r| r.series == "0").unwrap();
        assert_eq!(total_d.count, 3);
        assert!((total_d.positive_percent - 200.0 / 3.0).abs() < 1e-9);
        assert!((total_d.positive_percent + total_d.negative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_highlight_opacity() {
        let chart = chart();
        let total = BarHighlight::Total {
            series: "1".to_owned(),
        };
        let series = BarHighlight::Series {
            series: "1".to_owned(),
        };
        let lit = |h: &BarHighlight| {
            chart
                .rows
                .iter()
                .map(|r| r.opacity(h) == 1.0)
                .collect::<Vec<_>>()
        };
        assert_eq!(lit(&BarHighlight::None), vec![true; 6]);
        assert_eq!(lit(&total), vec![false, false, false, false, true, false]);
        assert_eq!(lit(&series), vec![true, false, false, true, false, false]);
        assert_eq!(chart.rows[1].opacity(&series), DIMMED_OPACITY);
    }

    #[test]
    fn test_empty_records() {
        let chart = BarChart::compute(&[], "STATE", "PARTY_R");
        assert!(chart.rows.is_empty());
    }
}
