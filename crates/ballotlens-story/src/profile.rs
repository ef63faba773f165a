//! Profile comparison views
//!
//! A [`ProfileView`] owns one [`FilterState`] and the statistics derived from
//! it. Every filter change runs the whole pipeline synchronously before
//! returning:
//!
//! ```text
//! FilterState ─▶ subset ─▶ GroupSummaries ─▶ order ─▶ axis domains
//! ```
//!
//! so a caller reading the snapshot right after [`ProfileView::set_filter`]
//! never observes a partially updated state.

use ballotlens_stats::extent::Extent;
use serde::{Deserialize, Serialize};

use crate::{
    filter::FilterState,
    normalize::{DimensionId, NormalizedData},
    ordering::{self, Separation},
    summary::GroupSummaries,
};

/// Statistics derived from a profile view's current filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// The selected filter value, `None` for no restriction.
    pub filter: Option<String>,
    pub summaries: GroupSummaries,
    /// Dimensions by ascending normalized separation.
    pub order: Vec<Separation>,
    /// Extent of each dimension within the filtered subset, `[0, 1]` if empty.
    /// Indexed by [`DimensionId`].
    pub axis_domains: Vec<Extent>,
}

const EMPTY_AXIS_DOMAIN: Extent = Extent { min: 0.0, max: 1.0 };

#[derive(Debug, Clone)]
pub struct ProfileView {
    filter: FilterState,
    snapshot: ProfileSnapshot,
}

impl ProfileView {
    /// Creates a view with no selected filter value and computes its statistics.
    #[must_use]
    pub fn new(filter: FilterState, data: &NormalizedData) -> Self {
        let snapshot = derive(&filter, data);
        Self { filter, snapshot }
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    /// Selects a filter value and recomputes every derived value.
    pub fn set_filter(&mut self, data: &NormalizedData, value: Option<String>) -> &ProfileSnapshot {
        self.filter.set(value);
        self.snapshot = derive(&self.filter, data);
        &self.snapshot
    }
}

fn derive(filter: &FilterState, data: &NormalizedData) -> ProfileSnapshot {
    let dimension_count = data.ranges.len();
    let subset = filter.current_subset(&data.records);

    let summaries = GroupSummaries::compute(subset.iter().copied(), dimension_count, |r| r.group);
    let declared = (0..dimension_count).map(DimensionId).collect::<Vec<_>>();
    let order = ordering::order(&declared, &summaries, &data.ranges);
    let axis_domains = declared
        .iter()
        .map(|&dim| Extent::new(subset.iter().map(|r| r.value(dim))).unwrap_or(EMPTY_AXIS_DOMAIN))
        .collect();

    log::debug!(
        "profile recomputed for filter {:?}: {} records ({} positive, {} negative), order {:?}",
        filter.selected(),
        subset.len(),
        summaries.counts.positive,
        summaries.counts.negative,
        order.iter().map(|s| s.dimension.0).collect::<Vec<_>>()
    );

    ProfileSnapshot {
        filter: filter.selected().map(str::to_owned),
        summaries,
        order,
        axis_domains,
    }
}
