use serde::{Deserialize, Serialize};

/// Direction the reader was scrolling when a step marker was crossed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// A step marker crossing reported by the scroll detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub step_index: i64,
    pub direction: Direction,
}

impl ScrollEvent {
    #[must_use]
    pub fn forward(step_index: i64) -> Self {
        Self {
            step_index,
            direction: Direction::Forward,
        }
    }

    #[must_use]
    pub fn backward(step_index: i64) -> Self {
        Self {
            step_index,
            direction: Direction::Backward,
        }
    }

    /// The step to enter in response to this event.
    ///
    /// Crossing a marker forward enters its step. Crossing it backward means the
    /// reader scrolled above it, which re-enters the preceding step.
    #[must_use]
    pub fn target_step(&self) -> i64 {
        match self.direction {
            Direction::Forward => self.step_index,
            Direction::Backward => self.step_index.saturating_sub(1).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_step() {
        assert_eq!(ScrollEvent::forward(3).target_step(), 3);
        assert_eq!(ScrollEvent::backward(3).target_step(), 2);
        assert_eq!(ScrollEvent::backward(0).target_step(), 0);
        assert_eq!(ScrollEvent::backward(i64::MIN).target_step(), 0);
    }

    #[test]
    fn test_json_shape() {
        let event: ScrollEvent =
            serde_json::from_str(r#"{"step_index": 4, "direction": "backward"}"#).unwrap();
        assert_eq!(event, ScrollEvent::backward(4));
    }
}
