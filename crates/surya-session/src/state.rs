//! Session state
//!
//! Everything the controller mutates while a session is live. The
//! cursor arithmetic lives here so it can be tested without timers.

use std::time::Instant;

use surya_core::{Accuracy, ComparisonResult, Detection, POSE_COUNT};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Completed,
}

/// Where the cursor landed after an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Next pose in the same cycle
    Pose,
    /// Wrapped into the next cycle of the same set
    Cycle,
    /// Wrapped into a new set
    Set,
}

/// Mutable state of one practice session
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current pose index, 0..=11
    pub cursor: usize,
    /// Current cycle within the set, starting at 1
    pub cycle: u32,
    /// Current set, starting at 1
    pub set: u32,
    /// Session start on the host clock
    pub started_at: Instant,
    /// Whole seconds since start, updated by the duration tick
    pub duration_secs: u64,
    /// Scoring ticks counted on the current pose
    pub pose_ticks: u32,
    /// Consecutive scoring ticks at or above threshold
    pub consecutive_correct: u32,
    /// Current pose has been held long enough
    pub pose_completed: bool,
    /// Hysteresis flag for the holding highlight
    pub holding: bool,
    /// Latest detected accuracy
    pub accuracy: Accuracy,
    accuracy_sum: u64,
    scored_frames: u64,
    /// Distinct corrections in first-seen order
    pub mistakes: Vec<String>,
    pub last_comparison: Option<ComparisonResult>,
    pub last_detection: Option<Detection>,
}

impl SessionState {
    pub fn new(started_at: Instant, cursor: usize) -> Self {
        SessionState {
            cursor,
            cycle: 1,
            set: 1,
            started_at,
            duration_secs: 0,
            pose_ticks: 0,
            consecutive_correct: 0,
            pose_completed: false,
            holding: false,
            accuracy: Accuracy::ZERO,
            accuracy_sum: 0,
            scored_frames: 0,
            mistakes: Vec::new(),
            last_comparison: None,
            last_detection: None,
        }
    }

    /// Fold a comparison into the running statistics.
    ///
    /// Undetected frames still replace `last_comparison` (so the scoring
    /// tick sees the drop) but leave accuracy and mistakes untouched.
    pub fn record(&mut self, result: ComparisonResult, holding_on: Accuracy, holding_off: Accuracy) {
        if result.is_detected() {
            self.accuracy = result.accuracy;
            self.accuracy_sum += result.accuracy.percent() as u64;
            self.scored_frames += 1;

            if result.accuracy >= holding_on {
                self.holding = true;
            } else if result.accuracy < holding_off {
                self.holding = false;
            }

            for correction in result.corrections() {
                if !self.mistakes.contains(correction) {
                    self.mistakes.push(correction.clone());
                }
            }
        } else {
            self.holding = false;
        }
        self.last_comparison = Some(result);
    }

    /// Mean detected accuracy over the session
    pub fn average_accuracy(&self) -> Accuracy {
        if self.scored_frames == 0 {
            return Accuracy::ZERO;
        }
        let mean = (2 * self.accuracy_sum + self.scored_frames) / (2 * self.scored_frames);
        Accuracy::from_percent(mean.min(100) as u8)
    }

    pub fn scored_frames(&self) -> u64 {
        self.scored_frames
    }

    /// Step to the next pose, rolling cycles and sets
    pub fn advance(&mut self, cycles_per_set: u32) -> Progression {
        self.reset_pose();
        if self.cursor + 1 < POSE_COUNT {
            self.cursor += 1;
            return Progression::Pose;
        }
        self.cursor = 0;
        if self.cycle < cycles_per_set.max(1) {
            self.cycle += 1;
            Progression::Cycle
        } else {
            self.cycle = 1;
            self.set += 1;
            Progression::Set
        }
    }

    /// Move the cursor by hand; cycle and set are left alone
    pub fn jump_to(&mut self, cursor: usize) {
        self.reset_pose();
        self.cursor = cursor.min(POSE_COUNT - 1);
    }

    fn reset_pose(&mut self) {
        self.consecutive_correct = 0;
        self.pose_completed = false;
        self.holding = false;
        self.pose_ticks = 0;
    }
}
