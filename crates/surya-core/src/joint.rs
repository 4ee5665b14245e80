//! Joints - the named body parts a reference pose checks
//!
//! Every joint carries an explicit table entry: its wire name, the
//! landmarks it depends on, the geometric check applied to it and the
//! corrective message shown when it is wrong.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BodyLandmark;

/// Joint or body segment referenced by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    // Arms
    LeftWrist,
    RightWrist,
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftArm,
    RightArm,

    // Hips and legs
    LeftHip,
    RightHip,
    Hip,
    LeftKnee,
    RightKnee,

    // Torso
    Spine,
    Chest,
}

/// Geometric check applied to a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointCheck {
    /// Horizontal offset between shoulder and hip midpoints must stay
    /// under the position tolerance
    SpineAlignment,
    /// Shoulder must be detected with confidence above the threshold
    ShoulderPresence,
    /// No geometric check defined
    Unchecked,
}

/// Three landmarks whose middle one is the angle vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleSpec {
    Single(BodyLandmark, BodyLandmark, BodyLandmark),
    /// Vertex and arms taken as midpoints of left/right pairs
    Paired([BodyLandmark; 2], [BodyLandmark; 2], [BodyLandmark; 2]),
}

impl Joint {
    /// All joints in table order
    pub fn all() -> &'static [Joint] {
        use Joint::*;
        &[
            LeftWrist,
            RightWrist,
            LeftElbow,
            RightElbow,
            LeftShoulder,
            RightShoulder,
            LeftArm,
            RightArm,
            LeftHip,
            RightHip,
            Hip,
            LeftKnee,
            RightKnee,
            Spine,
            Chest,
        ]
    }

    /// Name used on the wire and in results
    pub fn name(self) -> &'static str {
        match self {
            Joint::LeftWrist => "leftWrist",
            Joint::RightWrist => "rightWrist",
            Joint::LeftElbow => "leftElbow",
            Joint::RightElbow => "rightElbow",
            Joint::LeftShoulder => "leftShoulder",
            Joint::RightShoulder => "rightShoulder",
            Joint::LeftArm => "leftArm",
            Joint::RightArm => "rightArm",
            Joint::LeftHip => "leftHip",
            Joint::RightHip => "rightHip",
            Joint::Hip => "hip",
            Joint::LeftKnee => "leftKnee",
            Joint::RightKnee => "rightKnee",
            Joint::Spine => "spine",
            Joint::Chest => "chest",
        }
    }

    /// Landmarks that must all be trusted before the joint can be judged
    pub fn landmarks(self) -> &'static [BodyLandmark] {
        use BodyLandmark as B;
        match self {
            Joint::LeftWrist => &[B::LeftWrist],
            Joint::RightWrist => &[B::RightWrist],
            Joint::LeftElbow => &[B::LeftElbow],
            Joint::RightElbow => &[B::RightElbow],
            Joint::LeftShoulder | Joint::LeftArm => &[B::LeftShoulder],
            Joint::RightShoulder | Joint::RightArm => &[B::RightShoulder],
            Joint::LeftHip => &[B::LeftHip],
            Joint::RightHip => &[B::RightHip],
            Joint::Hip => &[B::LeftHip, B::RightHip],
            Joint::LeftKnee => &[B::LeftKnee],
            Joint::RightKnee => &[B::RightKnee],
            Joint::Spine => &[B::LeftShoulder, B::RightShoulder, B::LeftHip, B::RightHip],
            Joint::Chest => &[B::LeftShoulder, B::RightShoulder],
        }
    }

    /// Geometric check for this joint
    pub fn check(self) -> JointCheck {
        match self {
            Joint::Spine => JointCheck::SpineAlignment,
            Joint::LeftShoulder | Joint::RightShoulder => JointCheck::ShoulderPresence,
            _ => JointCheck::Unchecked,
        }
    }

    /// Landmarks forming the angle measured at this joint, if any
    pub fn angle(self) -> Option<AngleSpec> {
        use BodyLandmark as B;
        let spec = match self {
            Joint::LeftElbow => AngleSpec::Single(B::LeftShoulder, B::LeftElbow, B::LeftWrist),
            Joint::RightElbow => AngleSpec::Single(B::RightShoulder, B::RightElbow, B::RightWrist),
            Joint::LeftShoulder => AngleSpec::Single(B::LeftElbow, B::LeftShoulder, B::LeftHip),
            Joint::RightShoulder => AngleSpec::Single(B::RightElbow, B::RightShoulder, B::RightHip),
            Joint::LeftArm => AngleSpec::Single(B::LeftHip, B::LeftShoulder, B::LeftWrist),
            Joint::RightArm => AngleSpec::Single(B::RightHip, B::RightShoulder, B::RightWrist),
            Joint::LeftHip => AngleSpec::Single(B::LeftShoulder, B::LeftHip, B::LeftKnee),
            Joint::RightHip => AngleSpec::Single(B::RightShoulder, B::RightHip, B::RightKnee),
            Joint::LeftKnee => AngleSpec::Single(B::LeftHip, B::LeftKnee, B::LeftAnkle),
            Joint::RightKnee => AngleSpec::Single(B::RightHip, B::RightKnee, B::RightAnkle),
            Joint::Hip => AngleSpec::Paired(
                [B::LeftShoulder, B::RightShoulder],
                [B::LeftHip, B::RightHip],
                [B::LeftKnee, B::RightKnee],
            ),
            Joint::LeftWrist | Joint::RightWrist | Joint::Spine | Joint::Chest => return None,
        };
        Some(spec)
    }

    /// Corrective message shown when the joint is judged incorrect
    pub fn correction(self) -> &'static str {
        match self {
            Joint::Spine => "Keep your spine straight and aligned",
            Joint::LeftShoulder => "Adjust your left shoulder position",
            Joint::RightShoulder => "Adjust your right shoulder position",
            Joint::LeftElbow => "Check your left elbow alignment",
            Joint::RightElbow => "Check your right elbow alignment",
            Joint::LeftWrist => "Position your left wrist correctly",
            Joint::RightWrist => "Position your right wrist correctly",
            Joint::LeftHip => "Align your left hip properly",
            Joint::RightHip => "Align your right hip properly",
            Joint::LeftKnee => "Adjust your left knee position",
            Joint::RightKnee => "Adjust your right knee position",
            // No dedicated coaching line for these; generic wording
            Joint::LeftArm => "Adjust your leftArm position",
            Joint::RightArm => "Adjust your rightArm position",
            Joint::Hip => "Adjust your hip position",
            Joint::Chest => "Adjust your chest position",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
