//! Pose Comparator - scores a detection against a reference pose
//!
//! Pure function of (detection, target pose). No hidden state beyond the
//! tolerance configuration, no mutation of its inputs.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, ReferencePose};
use crate::geometry::{angle_at, angle_delta, midpoint, Point2};
use crate::{
    Accuracy, AngleSpec, BodyLandmark, Detection, Joint, JointCheck, DEFAULT_MIN_VISIBILITY,
};

/// Feedback returned when nothing can be scored
pub const UNABLE_TO_DETECT: &str = "Unable to detect pose";

/// How joints without a dedicated geometric check are judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointPolicy {
    /// Any trusted joint passes. Coarse baseline scoring.
    #[default]
    VisibleIsCorrect,
    /// Joints with an expected angle in the pose must be within the angle
    /// tolerance; joints without one fall back to visible-is-correct.
    AngleCheck,
    /// Like `AngleCheck`, but joints with nothing to measure fail.
    Strict,
}

/// Comparator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Allowed deviation from a key angle, in degrees
    pub angle_tolerance_deg: f32,
    /// Allowed normalized offset for position checks
    pub position_tolerance: f32,
    /// Landmarks below this visibility are not trusted
    pub min_visibility: f32,
    /// Policy for joints lacking a dedicated check
    pub joint_policy: JointPolicy,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        ComparatorConfig {
            angle_tolerance_deg: 15.0,
            position_tolerance: 0.1,
            min_visibility: DEFAULT_MIN_VISIBILITY,
            joint_policy: JointPolicy::VisibleIsCorrect,
        }
    }
}

impl ComparatorConfig {
    /// Angle-checked scoring
    pub fn angle_checked() -> Self {
        ComparatorConfig {
            joint_policy: JointPolicy::AngleCheck,
            ..Default::default()
        }
    }

    /// Every joint must pass a geometric measurement
    pub fn strict() -> Self {
        ComparatorConfig {
            joint_policy: JointPolicy::Strict,
            ..Default::default()
        }
    }
}

/// Outcome of one scoring call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub accuracy: Accuracy,
    pub correct_joints: Vec<Joint>,
    pub incorrect_joints: Vec<Joint>,
    /// Overall message first, then one correction per incorrect joint
    pub feedback: Vec<String>,
}

impl ComparisonResult {
    /// Zero result for a missing detection or unknown pose
    pub fn undetected() -> Self {
        ComparisonResult {
            accuracy: Accuracy::ZERO,
            correct_joints: Vec::new(),
            incorrect_joints: Vec::new(),
            feedback: vec![UNABLE_TO_DETECT.to_string()],
        }
    }

    /// Per-joint corrections, without the overall message
    pub fn corrections(&self) -> &[String] {
        let start = self.feedback.len().saturating_sub(self.incorrect_joints.len());
        &self.feedback[start..]
    }

    /// Whether any joint was actually evaluated
    pub fn is_detected(&self) -> bool {
        !(self.correct_joints.is_empty() && self.incorrect_joints.is_empty())
    }
}

/// Pose comparator
#[derive(Debug, Clone, Default)]
pub struct PoseComparator {
    config: ComparatorConfig,
}

impl PoseComparator {
    /// Create a comparator with default tolerances
    pub fn new() -> Self {
        Self::with_config(ComparatorConfig::default())
    }

    /// Create a comparator with custom tolerances
    pub fn with_config(config: ComparatorConfig) -> Self {
        PoseComparator { config }
    }

    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Score a detection against the pose at `target`
    pub fn compare(&self, detection: Option<&Detection>, target: usize) -> ComparisonResult {
        let (detection, reference) = match (detection, catalog::reference(target)) {
            (Some(d), Ok(r)) => (d, r),
            _ => return ComparisonResult::undetected(),
        };

        let mut correct_joints = Vec::with_capacity(reference.critical_joints.len());
        let mut incorrect_joints = Vec::new();
        let mut corrections = Vec::new();

        for &joint in reference.critical_joints {
            if self.is_joint_correct(detection, joint, reference) {
                correct_joints.push(joint);
            } else {
                incorrect_joints.push(joint);
                corrections.push(joint.correction().to_string());
            }
        }

        let accuracy = Accuracy::from_counts(correct_joints.len(), reference.critical_joints.len());

        let mut feedback = Vec::with_capacity(corrections.len() + 1);
        feedback.push(accuracy.overall_feedback().to_string());
        feedback.extend(corrections);

        ComparisonResult {
            accuracy,
            correct_joints,
            incorrect_joints,
            feedback,
        }
    }

    fn is_joint_correct(&self, detection: &Detection, joint: Joint, reference: &ReferencePose) -> bool {
        let min_visibility = self.config.min_visibility;
        let trusted = joint
            .landmarks()
            .iter()
            .all(|slot| detection.trusted(*slot, min_visibility).is_some());
        if !trusted {
            return false;
        }

        match joint.check() {
            JointCheck::SpineAlignment => self.spine_aligned(detection),
            JointCheck::ShoulderPresence => {
                let present = joint
                    .landmarks()
                    .iter()
                    .filter_map(|slot| detection.get(*slot))
                    .all(|lm| lm.visibility > min_visibility);
                present && self.angle_within_tolerance(detection, joint, reference).unwrap_or(true)
            }
            JointCheck::Unchecked => match self.angle_within_tolerance(detection, joint, reference) {
                Some(ok) => ok,
                None => self.config.joint_policy != JointPolicy::Strict,
            },
        }
    }

    /// Horizontal offset between shoulder and hip midpoints within tolerance
    fn spine_aligned(&self, detection: &Detection) -> bool {
        let (Some(ls), Some(rs), Some(lh), Some(rh)) = (
            detection.get(BodyLandmark::LeftShoulder),
            detection.get(BodyLandmark::RightShoulder),
            detection.get(BodyLandmark::LeftHip),
            detection.get(BodyLandmark::RightHip),
        ) else {
            return false;
        };

        let shoulders = midpoint(ls, rs);
        let hips = midpoint(lh, rh);
        (shoulders.x - hips.x).abs() < self.config.position_tolerance
    }

    /// `None` when the policy does not measure angles, the pose has no key
    /// angle for the joint or the joint has no angle definition.
    fn angle_within_tolerance(
        &self,
        detection: &Detection,
        joint: Joint,
        reference: &ReferencePose,
    ) -> Option<bool> {
        if self.config.joint_policy == JointPolicy::VisibleIsCorrect {
            return None;
        }
        let expected = reference.key_angle(joint)?;
        let spec = joint.angle()?;
        let ok = self
            .measure_angle(detection, spec)
            .map(|measured| angle_delta(measured, expected) <= self.config.angle_tolerance_deg)
            .unwrap_or(false);
        Some(ok)
    }

    fn measure_angle(&self, detection: &Detection, spec: AngleSpec) -> Option<f32> {
        let min_visibility = self.config.min_visibility;
        let point = |slot: BodyLandmark| -> Option<Point2> {
            detection.trusted(slot, min_visibility).map(Point2::from)
        };
        let pair = |slots: [BodyLandmark; 2]| -> Option<Point2> {
            let a = detection.trusted(slots[0], min_visibility)?;
            let b = detection.trusted(slots[1], min_visibility)?;
            Some(midpoint(a, b))
        };

        match spec {
            AngleSpec::Single(a, vertex, c) => Some(angle_at(point(a)?, point(vertex)?, point(c)?)),
            AngleSpec::Paired(a, vertex, c) => Some(angle_at(pair(a)?, pair(vertex)?, pair(c)?)),
        }
    }
}
