//! The assembled story
//!
//! [`DataStory`] owns the normalized records, the aggregate bar chart, the two
//! profile views and the step machine. It is the only place where step entry
//! and filter changes meet: entering a step rebinds both profile views to the
//! filters the step names, while [`DataStory::set_filter`] changes the primary
//! view until the next step is entered.

use ballotlens_stats::extent::Extent;
use serde::{Deserialize, Serialize};

use crate::{
    bars::{BarChart, BarRow},
    config::{CategorySpec, ConfigError, DimensionSpec, StoryConfig},
    filter::FilterState,
    group::{GroupKey, GroupMap},
    normalize::{self, DimensionId, DimensionRanges, NormalizedData},
    ordering::Separation,
    overview::Overview,
    profile::{ProfileSnapshot, ProfileView},
    record::Record,
    scroll::ScrollEvent,
    step::{BarHighlight, ProfileBinding, Step, StepMachine},
    summary::DistributionSummary,
};

/// Identifies one of the two profile views.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    #[display("primary")]
    Primary,
    #[display("secondary")]
    Secondary,
}

/// Position in the step sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPosition {
    pub index: usize,
    pub count: usize,
    pub name: String,
    pub caption: String,
}

/// A bar together with its opacity under the current highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBar {
    #[serde(flatten)]
    pub row: BarRow,
    pub series_label: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarsSnapshot {
    pub highlight: BarHighlight,
    pub bars: Vec<RenderedBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub visible: bool,
    pub profile: ProfileSnapshot,
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub step: StepPosition,
    pub dimensions: Vec<DimensionSpec>,
    pub ranges: DimensionRanges,
    pub groups: GroupMap<CategorySpec>,
    /// `None` while the bar view is hidden.
    pub bars: Option<BarsSnapshot>,
    pub primary: ViewSnapshot,
    pub secondary: ViewSnapshot,
}

impl StorySnapshot {
    #[must_use]
    pub fn view(&self, view: ViewId) -> &ViewSnapshot {
        match view {
            ViewId::Primary => &self.primary,
            ViewId::Secondary => &self.secondary,
        }
    }

    #[must_use]
    pub fn dimension(&self, dimension: DimensionId) -> &DimensionSpec {
        &self.dimensions[dimension.0]
    }
}

#[derive(Debug, Clone)]
pub struct DataStory {
    config: StoryConfig,
    data: NormalizedData,
    bars: BarChart,
    overview: Overview,
    primary: ProfileView,
    secondary: ProfileView,
    steps: StepMachine,
}

impl DataStory {
    /// Normalizes `records`, derives every view and enters the first step.
    pub fn new(records: &[Record], config: StoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let steps = StepMachine::new(config.steps.clone())?;

        let data = normalize::normalize(records, &config.dimensions, &config.group);
        let bars = BarChart::compute(&data.records, &config.filter_field, &config.series.field);
        let overview = Overview::compute(&data.records, &config);
        let filter = FilterState::new(config.outer_constraint.clone(), config.filter_field.clone());
        let primary = ProfileView::new(filter.clone(), &data);
        let secondary = ProfileView::new(filter, &data);

        log::info!(
            "story ready: {} records, {} dimensions, {} steps, {} bars",
            data.records.len(),
            config.dimensions.len(),
            steps.len(),
            bars.rows.len()
        );

        let mut story = Self {
            config,
            data,
            bars,
            overview,
            primary,
            secondary,
            steps,
        };
        story.go_to_step(0);
        Ok(story)
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &NormalizedData {
        &self.data
    }

    #[must_use]
    pub fn bars(&self) -> &BarChart {
        &self.bars
    }

    #[must_use]
    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    #[must_use]
    pub fn view(&self, view: ViewId) -> &ProfileView {
        match view {
            ViewId::Primary => &self.primary,
            ViewId::Secondary => &self.secondary,
        }
    }

    #[must_use]
    pub fn current_step(&self) -> &Step {
        self.steps.current()
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.steps.current_index()
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Looks up a dimension by its field name.
    #[must_use]
    pub fn dimension_id(&self, field: &str) -> Option<DimensionId> {
        self.config
            .dimensions
            .iter()
            .position(|d| d.field == field)
            .map(DimensionId)
    }

    /// Separations of the primary view, ascending.
    #[must_use]
    pub fn order(&self) -> &[Separation] {
        &self.primary.snapshot().order
    }

    /// Dimensions of the primary view in display order.
    pub fn ordered_dimensions(&self) -> impl Iterator<Item = &DimensionSpec> {
        let dimensions = &self.config.dimensions;
        self.order().iter().map(move |s| &dimensions[s.dimension.0])
    }

    /// Summary of `field` within `group` under the primary view's filter.
    #[must_use]
    pub fn summary(&self, group: GroupKey, field: &str) -> Option<&DistributionSummary> {
        let dimension = self.dimension_id(field)?;
        Some(self.primary.snapshot().summaries.get(group, dimension))
    }

    /// Selectable values of the filter field.
    #[must_use]
    pub fn filter_options(&self) -> Vec<String> {
        self.primary.filter().options(&self.data.records)
    }

    /// Sets the primary view's filter; holds until the next step is entered.
    pub fn set_filter(&mut self, value: Option<String>) -> &ProfileSnapshot {
        self.set_view_filter(ViewId::Primary, value)
    }

    pub fn set_view_filter(&mut self, view: ViewId, value: Option<String>) -> &ProfileSnapshot {
        log::debug!("{view} view filter set to {value:?}");
        let view = match view {
            ViewId::Primary => &mut self.primary,
            ViewId::Secondary => &mut self.secondary,
        };
        view.set_filter(&self.data, value)
    }

    /// Enters the step at `index`, clamped into range, and returns the entered index.
    pub fn go_to_step(&mut self, index: i64) -> usize {
        let step = self.steps.go_to(index);
        bind(&mut self.primary, &self.data, &step.primary);
        bind(&mut self.secondary, &self.data, &step.secondary);
        self.steps.current_index()
    }

    pub fn handle(&mut self, event: ScrollEvent) -> usize {
        log::debug!(
            "scroll {:?} across marker {}",
            event.direction,
            event.step_index
        );
        self.go_to_step(event.target_step())
    }

    #[must_use]
    pub fn snapshot(&self) -> StorySnapshot {
        let step = self.steps.current();
        let bars = step.bars.as_ref().map(|highlight| BarsSnapshot {
            highlight: highlight.clone(),
            bars: self
                .bars
                .rows
                .iter()
                .map(|row| RenderedBar {
                    row: row.clone(),
                    series_label: self.config.series.label(&row.series).to_owned(),
                    opacity: row.opacity(highlight),
                })
                .collect(),
        });
        let view = |view: &ProfileView, binding: &ProfileBinding| ViewSnapshot {
            visible: binding.visible,
            profile: view.snapshot().clone(),
        };

        StorySnapshot {
            step: StepPosition {
                index: self.steps.current_index(),
                count: self.steps.len(),
                name: step.name.clone(),
                caption: step.caption.clone(),
            },
            dimensions: self.config.dimensions.clone(),
            ranges: self.data.ranges.clone(),
            groups: GroupMap::from_fn(|key| self.config.group.category(key).clone()),
            bars,
            primary: view(&self.primary, &step.primary),
            secondary: view(&self.secondary, &step.secondary),
        }
    }

    /// Global extent of a dimension, the normalization baseline of every view.
    #[must_use]
    pub fn range(&self, dimension: DimensionId) -> &Extent {
        self.data.ranges.get(dimension)
    }
}

fn bind(view: &mut ProfileView, data: &NormalizedData, binding: &ProfileBinding) {
    if view.filter().selected() != binding.filter.as_deref() {
        view.set_filter(data, binding.filter.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawValue;

    fn records() -> Vec<Record> {
        let rows = [
            ("1", "GA", "1", 10.0),
            ("1", "GA", "0", 30.0),
            ("1", "TX", "1", 20.0),
            ("1", "TX", "0", 40.0),
            ("0", "TX", "0", 90.0),
        ];
        rows.iter()
            .map(|&(party, state, yes, x)| {
                let categories = [("PARTY_R", party), ("STATE", state), ("YES", yes)]
                    .map(|(field, value)| (field.to_owned(), RawValue::from(value)));
                let dimensions = StoryConfig::default()
                    .dimensions
                    .into_iter()
                    .map(|dim| (dim.field, RawValue::from(x)));
                categories.into_iter().chain(dimensions).collect::<Record>()
            })
            .collect()
    }

    fn story() -> DataStory {
        DataStory::new(&records(), StoryConfig::default()).unwrap()
    }

    #[test]
    fn test_new_enters_first_step() {
        let story = story();
        assert_eq!(story.step_index(), 0);
        assert_eq!(story.current_step().name, "step0");
        let snapshot = story.snapshot();
        assert_eq!(snapshot.step.name, "step0");
        assert!(snapshot.bars.is_some());
        assert!(!snapshot.primary.visible);
        assert!(!snapshot.secondary.visible);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StoryConfig::default();
        config.steps.clear();
        assert!(matches!(
            DataStory::new(&records(), config),
            Err(ConfigError::NoSteps)
        ));
    }

    #[test]
    fn test_summary_by_field_name() {
        let story = story();
        let yes = story.summary(GroupKey::Positive, "PERCENT_RURAL").unwrap();
        assert_eq!(yes.mean, 15.0);
        let no = story.summary(GroupKey::Negative, "PERCENT_RURAL").unwrap();
        assert_eq!(no.mean, 35.0);
        assert!(story.summary(GroupKey::Positive, "UNKNOWN").is_none());
    }

    #[test]
    fn test_step_rebinds_filters() {
        let mut story = story();
        story.go_to_step(6);
        let snapshot = story.snapshot();
        assert!(snapshot.primary.visible);
        assert_eq!(snapshot.primary.profile.filter, None);
        assert!(snapshot.secondary.visible);
        assert_eq!(snapshot.secondary.profile.filter.as_deref(), Some("GA"));

        story.set_filter(Some("TX".to_owned()));
        assert_eq!(story.snapshot().primary.profile.filter.as_deref(), Some("TX"));

        // Re-entering any step restores its own bindings.
        story.go_to_step(6);
        assert_eq!(story.snapshot(), snapshot);
        story.go_to_step(2);
        assert_eq!(story.snapshot().secondary.profile.filter, None);
    }

    #[test]
    fn test_ordered_dimensions_follow_order() {
        let mut story = story();
        for filter in [None, Some("GA"), Some("TX")] {
            story.set_filter(filter.map(str::to_owned));
            let expected = story
                .order()
                .iter()
                .map(|s| story.config().dimensions[s.dimension.0].label.clone())
                .collect::<Vec<_>>();
            let labels = story
                .ordered_dimensions()
                .map(|d| d.label.clone())
                .collect::<Vec<_>>();
            assert_eq!(labels, expected);
            assert_eq!(labels.len(), story.config().dimensions.len());
        }
    }

    #[test]
    fn test_handle_scroll_events() {
        let mut story = story();
        assert_eq!(story.handle(ScrollEvent::forward(3)), 3);
        assert_eq!(story.handle(ScrollEvent::backward(3)), 2);
        assert_eq!(story.handle(ScrollEvent::forward(42)), story.step_count() - 1);
    }

    #[test]
    fn test_bar_snapshot_applies_highlight() {
        let mut story = story();
        story.go_to_step(1);
        let bars = story.snapshot().bars.unwrap();
        assert_eq!(
            bars.highlight,
            BarHighlight::Total {
                series: "0".to_owned()
            }
        );
        for bar in &bars.bars {
            let lit = bar.row.is_total() && bar.row.series == "0";
            assert_eq!(bar.opacity == 1.0, lit);
        }
        let democrat = bars.bars.iter().find(|b| b.row.series == "0").unwrap();
        assert_eq!(democrat.series_label, "Democrat");

        story.go_to_step(4);
        assert!(story.snapshot().bars.is_none());
    }

    #[test]
    fn test_filter_options() {
        assert_eq!(story().filter_options(), vec!["GA", "TX"]);
    }
}
