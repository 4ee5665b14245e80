//! Session configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use surya_core::{Accuracy, ComparatorConfig};

/// Session Progression Controller configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Scoring tick cadence
    pub scoring_interval: Duration,
    /// Duration ticker cadence
    pub duration_interval: Duration,
    /// Minimum accuracy for a scoring tick to count as correct
    pub validation_threshold: Accuracy,
    /// Consecutive correct ticks needed to complete a pose
    pub required_correct_frames: u32,
    /// Grace delay between completion and advancing the cursor
    pub advance_delay: Duration,
    /// Accuracy at or above which the holding highlight turns on
    pub holding_on: Accuracy,
    /// Accuracy below which the holding highlight turns off
    pub holding_off: Accuracy,
    /// Cycles in one set (one per leading leg)
    pub cycles_per_set: u32,
    /// Distinct mistakes kept in the persisted summary
    pub max_summary_mistakes: usize,
    /// Comparator tolerances
    pub comparator: ComparatorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            scoring_interval: Duration::from_millis(100),
            duration_interval: Duration::from_secs(1),
            validation_threshold: Accuracy::from_ratio(0.8),
            required_correct_frames: 30,
            advance_delay: Duration::from_millis(1500),
            holding_on: Accuracy::from_percent(75),
            holding_off: Accuracy::from_percent(65),
            cycles_per_set: 2,
            max_summary_mistakes: 5,
            comparator: ComparatorConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Gentler acceptance for first sessions
    pub fn beginner() -> Self {
        SessionConfig {
            validation_threshold: Accuracy::from_ratio(0.7),
            required_correct_frames: 20,
            advance_delay: Duration::from_secs(2),
            ..Default::default()
        }
    }

    /// Longer holds scored against key angles
    pub fn advanced() -> Self {
        SessionConfig {
            validation_threshold: Accuracy::from_ratio(0.9),
            required_correct_frames: 50,
            advance_delay: Duration::from_secs(1),
            comparator: ComparatorConfig::angle_checked(),
            ..Default::default()
        }
    }

    /// Time a pose must be held, at the configured scoring cadence
    pub fn required_hold(&self) -> Duration {
        self.scoring_interval * self.required_correct_frames
    }
}
