//! The scroll step machine
//!
//! A story is a fixed, ordered list of [`Step`]s. [`StepMachine`] holds the
//! index of the current step; [`StepMachine::go_to`] accepts any index and
//! clamps it into range.
//!
//! Every step is absolute: it names the visibility and filter of every view,
//! so entering a step yields the same configuration no matter which step was
//! active before or in which direction the reader scrolled.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Which bars of the aggregate view are emphasized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "highlight", rename_all = "snake_case")]
pub enum BarHighlight {
    /// All bars at full opacity.
    #[default]
    None,
    /// Only the total bar of the given series.
    Total { series: String },
    /// Only the per-category bars of the given series.
    Series { series: String },
}

/// Visibility and filter of one profile view within a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBinding {
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub filter: Option<String>,
}

impl ProfileBinding {
    pub const HIDDEN: Self = Self {
        visible: false,
        filter: None,
    };

    #[must_use]
    pub fn visible(filter: Option<String>) -> Self {
        Self {
            visible: true,
            filter,
        }
    }
}

/// One named configuration of the story's views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default)]
    pub caption: String,
    /// Bar view highlight, `None` when the bar view is hidden.
    #[serde(default)]
    pub bars: Option<BarHighlight>,
    #[serde(default)]
    pub primary: ProfileBinding,
    #[serde(default)]
    pub secondary: ProfileBinding,
}

#[derive(Debug, Clone)]
pub struct StepMachine {
    steps: Vec<Step>,
    current: usize,
}

impl StepMachine {
    /// Creates a machine positioned at the first step.
    pub fn new(steps: Vec<Step>) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }
        Ok(Self { steps, current: 0 })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Step {
        &self.steps[self.current]
    }

    /// Clamps `index` into `[0, len - 1]`.
    #[must_use]
    pub fn clamp(&self, index: i64) -> usize {
        let last = self.steps.len() - 1;
        usize::try_from(index).map_or(0, |i| i.min(last))
    }

    /// Enters the step at `index`, clamped into range.
    pub fn go_to(&mut self, index: i64) -> &Step {
        let target = self.clamp(index);
        if i64::try_from(target).ok() != Some(index) {
            log::debug!("step index {index} clamped to {target}");
        }
        self.current = target;
        let step = &self.steps[target];
        log::debug!("entering step {target} ({}): {}", step.name, step.caption);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoryConfig;

    fn machine() -> StepMachine {
        StepMachine::new(StoryConfig::default().steps).unwrap()
    }

    #[test]
    fn test_starts_at_zero() {
        let machine = machine();
        assert_eq!(machine.current_index(), 0);
        assert_eq!(machine.current().name, "step0");
    }

    #[test]
    fn test_go_to_clamps() {
        let mut machine = machine();
        let count = i64::try_from(machine.len()).unwrap();

        assert_eq!(machine.go_to(-1).name, "step0");
        assert_eq!(machine.current_index(), 0);

        machine.go_to(count + 5);
        assert_eq!(machine.current_index(), machine.len() - 1);

        machine.go_to(i64::MIN);
        assert_eq!(machine.current_index(), 0);
        machine.go_to(i64::MAX);
        assert_eq!(machine.current_index(), machine.len() - 1);
    }

    #[test]
    fn test_go_to_is_history_independent() {
        let mut machine = machine();
        let direct = machine.go_to(6).clone();
        machine.go_to(2);
        machine.go_to(8);
        assert_eq!(*machine.go_to(6), direct);
    }

    #[test]
    fn test_empty_steps_rejected() {
        assert!(matches!(StepMachine::new(vec![]), Err(ConfigError::NoSteps)));
    }

    #[test]
    fn test_step_json_defaults() {
        let step: Step = serde_json::from_str(r#"{"name": "intro"}"#).unwrap();
        assert_eq!(step.bars, None);
        assert_eq!(step.primary, ProfileBinding::HIDDEN);

        let step: Step = serde_json::from_str(
            r#"{"name": "bars", "bars": {"highlight": "total", "series": "0"},
                "secondary": {"visible": true, "filter": "GA"}}"#,
        )
        .unwrap();
        assert_eq!(
            step.bars,
            Some(BarHighlight::Total {
                series: "0".to_owned()
            })
        );
        assert_eq!(step.secondary, ProfileBinding::visible(Some("GA".to_owned())));
    }
}
