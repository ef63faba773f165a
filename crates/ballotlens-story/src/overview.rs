use std::collections::BTreeSet;

use ballotlens_stats::rounding::round_half_up;
use serde::{Deserialize, Serialize};

use crate::{config::StoryConfig, group::GroupKey, normalize::TypedRecord};

/// Group shares within one series value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTally {
    pub value: String,
    pub label: String,
    pub count: usize,
    /// Percent of positive-group records, rounded half-up.
    pub positive_percent: f64,
    /// Percent of records outside the positive group, rounded half-up.
    ///
    /// Records whose group value matches neither group count here, so the two
    /// shares agree with the bar chart.
    pub negative_percent: f64,
}

/// Headline numbers quoted by the story's narrative text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub record_count: usize,
    /// One entry per configured series category, in configuration order.
    pub series: Vec<SeriesTally>,
    /// Distinct values of the filter field, sorted.
    pub filter_values: Vec<String>,
}

impl Overview {
    #[must_use]
    pub fn compute(records: &[TypedRecord], config: &StoryConfig) -> Self {
        let series = config
            .series
            .categories
            .iter()
            .map(|category| {
                let members = records
                    .iter()
                    .filter(|r| r.category(&config.series.field) == Some(category.value.as_str()))
                    .collect::<Vec<_>>();
                let positives = members
                    .iter()
                    .filter(|r| r.group == Some(GroupKey::Positive))
                    .count();
                SeriesTally {
                    value: category.value.clone(),
                    label: category.label.clone(),
                    count: members.len(),
                    positive_percent: percent(positives, members.len()),
                    negative_percent: percent(members.len() - positives, members.len()),
                }
            })
            .collect();

        let filter_values = records
            .iter()
            .filter_map(|r| r.category(&config.filter_field))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();

        Self {
            record_count: records.len(),
            series,
            filter_values,
        }
    }

    #[must_use]
    pub fn series(&self, value: &str) -> Option<&SeriesTally> {
        self.series.iter().find(|s| s.value == value)
    }
}

#[expect(clippy::cast_precision_loss)]
fn percent(n: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_half_up(n as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::bars::BarChart;

    fn record(party: &str, state: &str, group: Option<GroupKey>) -> TypedRecord {
        TypedRecord {
            values: vec![],
            group,
            categories: BTreeMap::from([
                ("PARTY_R".to_owned(), party.to_owned()),
                ("STATE".to_owned(), state.to_owned()),
            ]),
        }
    }

    #[test]
    fn test_overview_counts() {
        let records = [
            record("1", "TX", Some(GroupKey::Positive)),
            record("1", "GA", Some(GroupKey::Positive)),
            record("1", "TX", Some(GroupKey::Negative)),
            record("0", "AL", Some(GroupKey::Negative)),
            record("0", "TX", Some(GroupKey::Negative)),
            record("0", "GA", Some(GroupKey::Positive)),
        ];
        let overview = Overview::compute(&records, &StoryConfig::default());

        assert_eq!(overview.record_count, 6);
        assert_eq!(overview.filter_values, vec!["AL", "GA", "TX"]);

        let republican = overview.series("1").unwrap();
        assert_eq!(republican.label, "Republican");
        assert_eq!(republican.count, 3);
        // 2/3 = 66.67
        assert_eq!(republican.positive_percent, 67.0);

        let democrat = overview.series("0").unwrap();
        assert_eq!(democrat.negative_percent, 67.0);
        assert_eq!(democrat.positive_percent, 33.0);
    }

    #[test]
    fn test_ungrouped_records_agree_with_bars() {
        let records = [
            record("0", "TX", Some(GroupKey::Positive)),
            record("0", "TX", Some(GroupKey::Negative)),
            record("0", "GA", None),
        ];
        let overview = Overview::compute(&records, &StoryConfig::default());
        let democrat = overview.series("0").unwrap();
        assert_eq!(democrat.positive_percent, 33.0);
        assert_eq!(democrat.negative_percent, 67.0);

        let chart = BarChart::compute(&records, "STATE", "PARTY_R");
        let total = chart.totals().find(|r| r.series == "0").unwrap();
        assert_eq!(round_half_up(total.positive_percent), democrat.positive_percent);
        assert_eq!(round_half_up(total.negative_percent), democrat.negative_percent);
    }

    #[test]
    fn test_empty_series_has_zero_percent() {
        let overview = Overview::compute(&[], &StoryConfig::default());
        assert_eq!(overview.record_count, 0);
        for tally in &overview.series {
            assert_eq!(tally.count, 0);
            assert_eq!(tally.positive_percent, 0.0);
            assert_eq!(tally.negative_percent, 0.0);
        }
    }
}
