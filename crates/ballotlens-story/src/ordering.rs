//! Ranking of dimensions by how well they separate the two groups
//!
//! For each dimension the separation is the absolute difference of the two
//! group means divided by the dimension's global span:
//!
//! ```text
//! separation = |mean(positive) - mean(negative)| / span
//! ```
//!
//! Dimensions are sorted by ascending separation, so the least separating
//! dimensions come first and the most separating ones last. Ties keep their
//! input order. A dimension with zero span has zero separation.

use serde::{Deserialize, Serialize};

use crate::{
    group::GroupKey,
    normalize::{DimensionId, DimensionRanges},
    summary::GroupSummaries,
};

/// Separation of the two group means along one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separation {
    pub dimension: DimensionId,
    /// `|mean(positive) - mean(negative)|` in the dimension's own unit.
    pub raw_difference: f64,
    /// `raw_difference` divided by the global span, or zero for a zero span.
    pub normalized: f64,
}

impl Separation {
    #[must_use]
    pub fn compute(
        dimension: DimensionId,
        summaries: &GroupSummaries,
        ranges: &DimensionRanges,
    ) -> Self {
        let positive = summaries.get(GroupKey::Positive, dimension).mean;
        let negative = summaries.get(GroupKey::Negative, dimension).mean;
        let raw_difference = (positive - negative).abs();
        let normalized = ranges.get(dimension).normalize_delta(raw_difference);
        Self {
            dimension,
            raw_difference,
            normalized,
        }
    }
}

/// Orders `dimensions` by ascending normalized separation.
///
/// The result is a permutation of `dimensions`; equal separations keep their
/// relative input order.
#[must_use]
pub fn order(
    dimensions: &[DimensionId],
    summaries: &GroupSummaries,
    ranges: &DimensionRanges,
) -> Vec<Separation> {
    let mut separations = dimensions
        .iter()
        .map(|&dim| Separation::compute(dim, summaries, ranges))
        .collect::<Vec<_>>();
    // `sort_by` is stable
    separations.sort_by(|a, b| a.normalized.total_cmp(&b.normalized));
    separations
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::normalize::TypedRecord;

    fn record(group: GroupKey, values: &[f64]) -> TypedRecord {
        TypedRecord {
            values: values.to_vec(),
            group: Some(group),
            categories: BTreeMap::new(),
        }
    }

    fn ids(n: usize) -> Vec<DimensionId> {
        (0..n).map(DimensionId).collect()
    }

    #[test]
    fn test_separation_example() {
        let records = [
            record(GroupKey::Positive, &[10.0]),
            record(GroupKey::Positive, &[20.0]),
            record(GroupKey::Negative, &[30.0]),
            record(GroupKey::Negative, &[40.0]),
        ];
        let summaries = GroupSummaries::compute(&records, 1, |r| r.group);
        let ranges = DimensionRanges::compute(&records, 1);

        let sep = Separation::compute(DimensionId(0), &summaries, &ranges);
        assert_eq!(sep.raw_difference, 20.0);
        assert!((sep.normalized - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_separation_is_symmetric() {
        let forward = [
            record(GroupKey::Positive, &[5.0]),
            record(GroupKey::Negative, &[25.0]),
        ];
        let swapped = [
            record(GroupKey::Positive, &[25.0]),
            record(GroupKey::Negative, &[5.0]),
        ];
        let ranges = DimensionRanges::compute(&forward, 1);
        let a = Separation::compute(
            DimensionId(0),
            &GroupSummaries::compute(&forward, 1, |r| r.group),
            &ranges,
        );
        let b = Separation::compute(
            DimensionId(0),
            &GroupSummaries::compute(&swapped, 1, |r| r.group),
            &ranges,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_span_has_zero_separation() {
        let records = [
            record(GroupKey::Positive, &[3.0]),
            record(GroupKey::Negative, &[3.0]),
        ];
        let summaries = GroupSummaries::compute(&records, 1, |r| r.group);
        let ranges = DimensionRanges::compute(&records, 1);
        let sep = Separation::compute(DimensionId(0), &summaries, &ranges);
        assert_eq!(sep.normalized, 0.0);
    }

    #[test]
    fn test_order_ascending_with_stable_ties() {
        // dim0: separation 0.5, dim1: 0, dim2: 1, dim3: 0
        let records = [
            record(GroupKey::Positive, &[0.0, 1.0, 0.0, 4.0]),
            record(GroupKey::Positive, &[10.0, 1.0, 0.0, 4.0]),
            record(GroupKey::Negative, &[10.0, 1.0, 20.0, 4.0]),
            record(GroupKey::Negative, &[10.0, 1.0, 20.0, 4.0]),
        ];
        let summaries = GroupSummaries::compute(&records, 4, |r| r.group);
        let ranges = DimensionRanges::compute(&records, 4);
        let ordered = order(&ids(4), &summaries, &ranges)
            .into_iter()
            .map(|s| s.dimension.0)
            .collect::<Vec<_>>();
        assert_eq!(ordered, vec![1, 3, 0, 2]);

        let reversed = ids(4).into_iter().rev().collect::<Vec<_>>();
        let ordered = order(&reversed, &summaries, &ranges)
            .into_iter()
            .map(|s| s.dimension.0)
            .collect::<Vec<_>>();
        assert_eq!(ordered, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_order_is_idempotent_permutation() {
        let records = [
            record(GroupKey::Positive, &[1.0, 50.0, 7.0]),
            record(GroupKey::Negative, &[9.0, 10.0, 7.5]),
        ];
        let summaries = GroupSummaries::compute(&records, 3, |r| r.group);
        let ranges = DimensionRanges::compute(&records, 3);

        let first = order(&ids(3), &summaries, &ranges);
        let second = order(&ids(3), &summaries, &ranges);
        assert_eq!(first, second);

        let mut dims = first.iter().map(|s| s.dimension).collect::<Vec<_>>();
        dims.sort();
        assert_eq!(dims, ids(3));
    }
}
