//! Story configuration
//!
//! [`StoryConfig`] names every field the story reads and the fixed step
//! sequence it walks through. [`StoryConfig::default`] reproduces the
//! district-level vote story: six demographic dimensions, `YES` as the outcome
//! field, members of party `"1"` as the fixed population of the profile views
//! and `STATE` as the selectable filter.
//!
//! Configurations are plain JSON, so an alternative dataset can be described
//! without recompiling:
//!
//! ```json
//! {
//!   "dimensions": [{ "field": "PERCENT_RURAL", "label": "Percent Rural Population (%)" }],
//!   "group": {
//!     "field": "YES",
//!     "positive": { "value": "1", "label": "Yes" },
//!     "negative": { "value": "0", "label": "No" }
//!   },
//!   "series": { "field": "PARTY_R", "categories": [{ "value": "1", "label": "Republican" }] },
//!   "outer_constraint": { "field": "PARTY_R", "value": "1" },
//!   "filter_field": "STATE",
//!   "steps": [{ "name": "step0", "bars": { "highlight": "none" } }]
//! }
//! ```

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    filter::Constraint,
    group::GroupKey,
    step::{BarHighlight, ProfileBinding, Step},
};

/// A numeric field compared across groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub field: String,
    pub label: String,
}

/// A categorical value with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub value: String,
    pub label: String,
}

/// The categorical field partitioning records into the two compared groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub field: String,
    pub positive: CategorySpec,
    pub negative: CategorySpec,
}

impl GroupSpec {
    /// Classifies a category value; values matching neither group yield `None`.
    #[must_use]
    pub fn classify(&self, value: &str) -> Option<GroupKey> {
        if value == self.positive.value {
            Some(GroupKey::Positive)
        } else if value == self.negative.value {
            Some(GroupKey::Negative)
        } else {
            None
        }
    }

    #[must_use]
    pub fn category(&self, key: GroupKey) -> &CategorySpec {
        match key {
            GroupKey::Positive => &self.positive,
            GroupKey::Negative => &self.negative,
        }
    }
}

/// The categorical field the aggregate bar view breaks records down by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub field: String,
    pub categories: Vec<CategorySpec>,
}

impl SeriesSpec {
    /// Returns the display label of a series value, falling back to the value itself.
    #[must_use]
    pub fn label<'a>(&'a self, value: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.value == value)
            .map_or(value, |c| c.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryConfig {
    pub dimensions: Vec<DimensionSpec>,
    pub group: GroupSpec,
    pub series: SeriesSpec,
    pub outer_constraint: Constraint,
    pub filter_field: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("at least one dimension must be configured")]
    NoDimensions,
    #[display("dimension field '{field}' is configured more than once")]
    DuplicateDimension { field: String },
    #[display("at least one step must be configured")]
    NoSteps,
    #[display("failed to open config file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoryConfig {
    /// Loads a configuration from a JSON file and validates it.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_owned(),
            source,
        })?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_owned(),
                    source,
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions.is_empty() {
            return Err(ConfigError::NoDimensions);
        }
        let mut seen = HashSet::new();
        for dim in &self.dimensions {
            if !seen.insert(dim.field.as_str()) {
                return Err(ConfigError::DuplicateDimension {
                    field: dim.field.clone(),
                });
            }
        }
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }
        Ok(())
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        let dimension = |field: &str, label: &str| DimensionSpec {
            field: field.to_owned(),
            label: label.to_owned(),
        };
        let category = |value: &str, label: &str| CategorySpec {
            value: value.to_owned(),
            label: label.to_owned(),
        };

        Self {
            dimensions: vec![
                dimension("PERCENT_RURAL", "Percent Rural Population (%)"),
                dimension("MEAN_INCOME", "Mean Income by Household ($)"),
                dimension("PERCENT_PRIVATE", "Percent of Students in Private School (%)"),
                dimension("PERCENT_21_W", "Percent White Population (%)"),
                dimension("PERCENT_21_B", "Percent Black Population (%)"),
                dimension("PERCENT_21_H", "Percent Hispanic Population (%)"),
            ],
            group: GroupSpec {
                field: "YES".to_owned(),
                positive: category("1", "Yes"),
                negative: category("0", "No"),
            },
            series: SeriesSpec {
                field: "PARTY_R".to_owned(),
                categories: vec![category("0", "Democrat"), category("1", "Republican")],
            },
            outer_constraint: Constraint {
                field: "PARTY_R".to_owned(),
                value: "1".to_owned(),
            },
            filter_field: "STATE".to_owned(),
            steps: default_steps(),
        }
    }
}

fn default_steps() -> Vec<Step> {
    let bars = |name: &str, caption: &str, highlight: BarHighlight| Step {
        name: name.to_owned(),
        caption: caption.to_owned(),
        bars: Some(highlight),
        primary: ProfileBinding::HIDDEN,
        secondary: ProfileBinding::HIDDEN,
    };
    let profiles = |name: &str, caption: &str, secondary: ProfileBinding| Step {
        name: name.to_owned(),
        caption: caption.to_owned(),
        bars: None,
        primary: ProfileBinding::visible(None),
        secondary,
    };
    let georgia = || ProfileBinding::visible(Some("GA".to_owned()));

    vec![
        bars("step0", "Total bar chart", BarHighlight::None),
        bars(
            "step1",
            "Highlighting total Democrats",
            BarHighlight::Total {
                series: "0".to_owned(),
            },
        ),
        bars(
            "step2",
            "Highlighting total Republicans",
            BarHighlight::Total {
                series: "1".to_owned(),
            },
        ),
        bars(
            "step3",
            "Highlighting Republican party details",
            BarHighlight::Series {
                series: "1".to_owned(),
            },
        ),
        profiles(
            "step4",
            "Showing parallel coordinates",
            ProfileBinding::HIDDEN,
        ),
        profiles(
            "step5",
            "Showing parallel coordinate comparison",
            ProfileBinding::HIDDEN,
        ),
        profiles("step6", "Showing Republican demographics", georgia()),
        profiles("step7", "Showing Independent demographics", georgia()),
        profiles("step8", "Showing complete view", georgia()),
    ]
}
