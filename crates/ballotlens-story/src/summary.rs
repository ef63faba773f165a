//! Group-wise distribution summaries
//!
//! [`GroupSummaries::compute`] partitions a record subset by [`GroupKey`] and
//! summarizes every dimension of every group with its quartiles and mean.
//! Both groups are always present in the result; a group without records
//! gets [`DistributionSummary::ZERO`] for every dimension.

use ballotlens_stats::{
    descriptive::DescriptiveStats, percentiles::Percentiles, rounding::round_half_up,
};
use serde::{Deserialize, Serialize};

use crate::{
    group::{GroupKey, GroupMap},
    normalize::{DimensionId, TypedRecord},
};

/// Quartiles and mean of one dimension within one group.
///
/// All values are rounded half-up to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub mean: f64,
}

impl DistributionSummary {
    /// The summary of an empty group.
    pub const ZERO: Self = Self {
        first_quartile: 0.0,
        median: 0.0,
        third_quartile: 0.0,
        mean: 0.0,
    };

    /// Summarizes unsorted values.
    ///
    /// Quartiles use linear interpolation between order statistics.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let Some(stats) = DescriptiveStats::from_sorted(&values) else {
            return Self::ZERO;
        };
        let quartiles = Percentiles::from_sorted(&values, &[25.0, 75.0]);
        let quartile = |p| quartiles.get(p).map_or(0.0, round_half_up);

        Self {
            first_quartile: quartile(25.0),
            median: round_half_up(stats.median),
            third_quartile: quartile(75.0),
            mean: round_half_up(stats.mean),
        }
    }
}

/// Number of records in each partition of a subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionCounts {
    pub positive: usize,
    pub negative: usize,
    /// Records whose group field matches neither group.
    pub ungrouped: usize,
}

impl PartitionCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.ungrouped
    }

    #[must_use]
    pub fn get(&self, key: GroupKey) -> usize {
        match key {
            GroupKey::Positive => self.positive,
            GroupKey::Negative => self.negative,
        }
    }
}

/// Per-group, per-dimension summaries of a record subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummaries {
    pub counts: PartitionCounts,
    /// Summaries per group, indexed by [`DimensionId`].
    pub groups: GroupMap<Vec<DistributionSummary>>,
}

impl GroupSummaries {
    /// Partitions `records` with `key` and summarizes each dimension per group.
    pub fn compute<'a, I, F>(records: I, dimension_count: usize, mut key: F) -> Self
    where
        I: IntoIterator<Item = &'a TypedRecord>,
        F: FnMut(&TypedRecord) -> Option<GroupKey>,
    {
        let mut counts = PartitionCounts::default();
        let mut columns: GroupMap<Vec<Vec<f64>>> =
            GroupMap::from_fn(|_| vec![vec![]; dimension_count]);

        for record in records {
            let Some(group) = key(record) else {
                counts.ungrouped += 1;
                continue;
            };
            match group {
                GroupKey::Positive => counts.positive += 1,
                GroupKey::Negative => counts.negative += 1,
            }
            for (column, &value) in columns[group].iter_mut().zip(&record.values) {
                column.push(value);
            }
        }

        let groups = columns.map(|_, columns| {
            columns
                .into_iter()
                .map(DistributionSummary::from_values)
                .collect()
        });

        Self { counts, groups }
    }

    /// Returns the summary of `dimension` within `group`.
    #[must_use]
    pub fn get(&self, group: GroupKey, dimension: DimensionId) -> &DistributionSummary {
        &self.groups[group][dimension.0]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record(group: Option<GroupKey>, values: &[f64]) -> TypedRecord {
        TypedRecord {
            values: values.to_vec(),
            group,
            categories: BTreeMap::new(),
        }
    }

    #[test]
    fn test_summary_rounds_each_field() {
        let summary = DistributionSummary::from_values(vec![1.0, 2.0, 4.0, 8.0]);
        // q1 = 1.75, median = 3.0, q3 = 5.0, mean = 3.75
        assert_eq!(
            summary,
            DistributionSummary {
                first_quartile: 2.0,
                median: 3.0,
                third_quartile: 5.0,
                mean: 4.0,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_values_is_zero() {
        assert_eq!(
            DistributionSummary::from_values(vec![]),
            DistributionSummary::ZERO
        );
    }

    #[test]
    fn test_summary_single_value() {
        let summary = DistributionSummary::from_values(vec![7.4]);
        assert_eq!(summary.first_quartile, 7.0);
        assert_eq!(summary.median, 7.0);
        assert_eq!(summary.third_quartile, 7.0);
        assert_eq!(summary.mean, 7.0);
    }

    #[test]
    fn test_summary_just_below_half_rounds_down() {
        let below_half = 0.5 - f64::EPSILON / 4.0;
        assert_eq!(
            DistributionSummary::from_values(vec![below_half]),
            DistributionSummary::ZERO
        );
    }

    #[test]
    fn test_both_groups_present_when_one_is_empty() {
        let records = [
            record(Some(GroupKey::Positive), &[10.0]),
            record(Some(GroupKey::Positive), &[20.0]),
        ];
        let summaries = GroupSummaries::compute(&records, 1, |r| r.group);

        assert_eq!(summaries.counts.positive, 2);
        assert_eq!(summaries.counts.negative, 0);
        assert_eq!(summaries.get(GroupKey::Positive, DimensionId(0)).mean, 15.0);
        assert_eq!(
            *summaries.get(GroupKey::Negative, DimensionId(0)),
            DistributionSummary::ZERO
        );
    }

    #[test]
    fn test_counts_include_ungrouped_records() {
        let records = [
            record(Some(GroupKey::Positive), &[1.0]),
            record(None, &[100.0]),
            record(Some(GroupKey::Negative), &[3.0]),
        ];
        let summaries = GroupSummaries::compute(&records, 1, |r| r.group);

        assert_eq!(summaries.counts.total(), records.len());
        assert_eq!(summaries.counts.ungrouped, 1);
        // Ungrouped values never leak into either group.
        assert_eq!(summaries.get(GroupKey::Positive, DimensionId(0)).mean, 1.0);
        assert_eq!(summaries.get(GroupKey::Negative, DimensionId(0)).mean, 3.0);
    }

    #[test]
    fn test_no_dimensions() {
        let records = [record(Some(GroupKey::Negative), &[])];
        let summaries = GroupSummaries::compute(&records, 0, |r| r.group);
        assert_eq!(summaries.counts.negative, 1);
        assert!(summaries.groups.positive.is_empty());
    }
}
