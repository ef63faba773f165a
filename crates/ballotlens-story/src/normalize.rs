//! Coercion of raw records into typed records
//!
//! [`normalize`] parses every declared dimension of every record into an
//! `f64`, classifies the record into a [`GroupKey`], keeps the remaining
//! fields as category labels, and computes the global range of each
//! dimension over the full, unfiltered record set.
//!
//! # Lossy coercion
//!
//! A missing or non-numeric dimension value is read as `0.0`. This keeps the
//! pipeline total, but an absent measurement becomes indistinguishable from an
//! observed zero in the aggregate statistics. The number of substituted values
//! is reported in [`NormalizedData::coerced`] and logged as a warning.
//!
//! # Global ranges
//!
//! [`DimensionRanges`] are computed here, once per load, and are the
//! normalization baseline for every filter state. They are never recomputed
//! from a filtered subset.

use std::collections::BTreeMap;

use ballotlens_stats::extent::Extent;
use serde::{Deserialize, Serialize};

use crate::{
    config::{DimensionSpec, GroupSpec},
    group::GroupKey,
    record::Record,
};

/// Index of a dimension in the declared dimension list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct DimensionId(pub usize);

/// A record with parsed dimension values.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    /// Dimension values, indexed by [`DimensionId`].
    pub values: Vec<f64>,
    /// Outcome group, or `None` if the group field matches neither group.
    pub group: Option<GroupKey>,
    /// Non-null fields rendered as category labels.
    pub categories: BTreeMap<String, String>,
}

impl TypedRecord {
    #[must_use]
    pub fn value(&self, dimension: DimensionId) -> f64 {
        self.values[dimension.0]
    }

    #[must_use]
    pub fn category(&self, field: &str) -> Option<&str> {
        self.categories.get(field).map(String::as_str)
    }
}

/// Global extent of each dimension, indexed by [`DimensionId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionRanges(Vec<Extent>);

impl DimensionRanges {
    /// Computes the extent of every dimension over `records` in a single pass.
    ///
    /// Dimensions of an empty record set get [`Extent::ZERO`].
    #[must_use]
    pub fn compute(records: &[TypedRecord], dimension_count: usize) -> Self {
        let mut extents: Vec<Option<Extent>> = vec![None; dimension_count];
        for record in records {
            for (extent, &value) in extents.iter_mut().zip(&record.values) {
                *extent = match *extent {
                    None => Some(Extent {
                        min: value,
                        max: value,
                    }),
                    Some(Extent { min, max }) => Some(Extent {
                        min: min.min(value),
                        max: max.max(value),
                    }),
                };
            }
        }
        Self(
            extents
                .into_iter()
                .map(|e| e.unwrap_or(Extent::ZERO))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, dimension: DimensionId) -> &Extent {
        &self.0[dimension.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DimensionId, &Extent)> {
        self.0.iter().enumerate().map(|(i, e)| (DimensionId(i), e))
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone)]
pub struct NormalizedData {
    pub records: Vec<TypedRecord>,
    pub ranges: DimensionRanges,
    /// Number of dimension values that were missing or malformed and read as zero.
    pub coerced: usize,
}

/// Coerces raw records into typed records and computes global dimension ranges.
#[must_use]
pub fn normalize(records: &[Record], dimensions: &[DimensionSpec], group: &GroupSpec) -> NormalizedData {
    let mut coerced = 0;
    let typed = records
        .iter()
        .map(|record| {
            let values = dimensions
                .iter()
                .map(|dim| {
                    record
                        .get(&dim.field)
                        .and_then(|v| v.as_number())
                        .unwrap_or_else(|| {
                            coerced += 1;
                            0.0
                        })
                })
                .collect();
            let categories = record
                .fields()
                .filter_map(|(field, value)| Some((field.to_owned(), value.as_category()?)))
                .collect::<BTreeMap<_, _>>();
            let group = categories
                .get(&group.field)
                .and_then(|value| group.classify(value));
            TypedRecord {
                values,
                group,
                categories,
            }
        })
        .collect::<Vec<_>>();

    if coerced > 0 {
        log::warn!("{coerced} missing or non-numeric dimension values were read as zero");
    }
    let ungrouped = typed.iter().filter(|r| r.group.is_none()).count();
    if ungrouped > 0 {
        log::warn!(
            "{ungrouped} records have a '{}' value matching neither group",
            group.field
        );
    }

    let ranges = DimensionRanges::compute(&typed, dimensions.len());
    for ((_, extent), dim) in ranges.iter().zip(dimensions) {
        log::debug!(
            "global range of {}: [{}, {}] (span {})",
            dim.field,
            extent.min,
            extent.max,
            extent.span()
        );
    }

    NormalizedData {
        records: typed,
        ranges,
        coerced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::StoryConfig, record::RawValue};

    fn dims(fields: &[&str]) -> Vec<DimensionSpec> {
        fields
            .iter()
            .map(|f| DimensionSpec {
                field: (*f).to_owned(),
                label: (*f).to_owned(),
            })
            .collect()
    }

    #[test]
    fn test_coerces_missing_and_malformed_to_zero() {
        let records = vec![
            Record::from_iter([("X", RawValue::from("12")), ("YES", RawValue::from("1"))]),
            Record::from_iter([("X", RawValue::from("bogus")), ("YES", RawValue::from("0"))]),
            Record::from_iter([("YES", RawValue::from(1.0))]),
            Record::from_iter([("X", RawValue::Null), ("YES", RawValue::from("0"))]),
        ];
        let data = normalize(&records, &dims(&["X"]), &StoryConfig::default().group);

        let values = data.records.iter().map(|r| r.values[0]).collect::<Vec<_>>();
        assert_eq!(values, vec![12.0, 0.0, 0.0, 0.0]);
        assert_eq!(data.coerced, 3);
    }

    #[test]
    fn test_classifies_groups() {
        let records = vec![
            Record::from_iter([("YES", RawValue::from("1"))]),
            Record::from_iter([("YES", RawValue::from(0.0))]),
            Record::from_iter([("YES", RawValue::from("maybe"))]),
            Record::default(),
        ];
        let data = normalize(&records, &dims(&["X"]), &StoryConfig::default().group);
        let groups = data.records.iter().map(|r| r.group).collect::<Vec<_>>();
        assert_eq!(
            groups,
            vec![
                Some(GroupKey::Positive),
                Some(GroupKey::Negative),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_global_ranges_cover_all_records() {
        let records = vec![
            Record::from_iter([("X", 10.0), ("Y", 5.0)]),
            Record::from_iter([("X", 40.0), ("Y", 5.0)]),
            Record::from_iter([("X", -2.0), ("Y", 5.0)]),
        ];
        let data = normalize(&records, &dims(&["X", "Y"]), &StoryConfig::default().group);

        let x = data.ranges.get(DimensionId(0));
        assert_eq!((x.min, x.max, x.span()), (-2.0, 40.0, 42.0));
        let y = data.ranges.get(DimensionId(1));
        assert_eq!(y.span(), 0.0);
    }

    #[test]
    fn test_empty_input_has_zero_ranges() {
        let data = normalize(&[], &dims(&["X", "Y"]), &StoryConfig::default().group);
        assert!(data.records.is_empty());
        assert_eq!(data.ranges.len(), 2);
        assert_eq!(*data.ranges.get(DimensionId(1)), Extent::ZERO);
    }
}
