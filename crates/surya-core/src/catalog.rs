//! Reference Pose Catalog - the 12 poses of the Sun Salutation
//!
//! Static, read-only, loaded once. Each entry pairs the descriptive
//! metadata shown to the user with the geometric reference the
//! comparator scores against.

use serde::{Deserialize, Serialize};

use crate::{Joint, SuryaError, SuryaResult};

/// Number of poses in one cycle
pub const POSE_COUNT: usize = 12;

/// Breathing cue for a pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breathing {
    Inhale,
    Exhale,
    Hold,
    Normal,
}

/// Descriptive metadata for a pose
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseInfo {
    pub name: &'static str,
    pub english_name: &'static str,
    /// 1-based position in the sequence
    pub step: u8,
    pub breathing: Breathing,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub key_points: &'static [&'static str],
    /// Suggested hold in seconds
    pub duration_secs: u32,
}

/// Geometric reference for a pose
#[derive(Debug, Clone, Copy)]
pub struct ReferencePose {
    pub index: usize,
    pub name: &'static str,
    /// Expected angle in degrees at a joint or segment
    pub key_angles: &'static [(Joint, f32)],
    /// Qualitative expected state per body region
    pub key_positions: &'static [(&'static str, &'static str)],
    /// Joints actually checked when scoring, in feedback order
    pub critical_joints: &'static [Joint],
}

impl ReferencePose {
    /// Expected angle at a joint, if the pose defines one
    pub fn key_angle(&self, joint: Joint) -> Option<f32> {
        self.key_angles
            .iter()
            .find(|(j, _)| *j == joint)
            .map(|(_, deg)| *deg)
    }

    /// Expected qualitative state of a region
    pub fn key_position(&self, region: &str) -> Option<&'static str> {
        self.key_positions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, tag)| *tag)
    }
}

/// One catalog slot
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub info: PoseInfo,
    pub reference: ReferencePose,
}

/// Look up a pose by index (0..=11)
pub fn get(index: usize) -> SuryaResult<&'static CatalogEntry> {
    CATALOG.get(index).ok_or(SuryaError::PoseNotFound(index))
}

/// Geometric reference for a pose
pub fn reference(index: usize) -> SuryaResult<&'static ReferencePose> {
    get(index).map(|e| &e.reference)
}

/// Metadata for a pose
pub fn info(index: usize) -> SuryaResult<&'static PoseInfo> {
    get(index).map(|e| &e.info)
}

/// All entries in sequence order
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn len() -> usize {
    CATALOG.len()
}

pub fn is_empty() -> bool {
    CATALOG.is_empty()
}

use Joint::*;

const PRAYER_BENEFITS: &[&str] = &[
    "Helps maintain balance",
    "Improves concentration",
    "Calms the nervous system",
    "Brings awareness to the present moment",
];

const RAISED_ARMS_BENEFITS: &[&str] = &[
    "Stretches the abdomen",
    "Improves digestion",
    "Exercises arm and shoulder muscles",
    "Expands the lungs",
];

const FORWARD_BEND_BENEFITS: &[&str] = &[
    "Makes spine supple",
    "Stretches hamstrings",
    "Improves blood circulation to the head",
    "Stimulates digestive system",
];

const EQUESTRIAN_BENEFITS: &[&str] = &[
    "Strengthens leg muscles",
    "Improves balance",
    "Stretches hip flexors",
    "Opens the chest",
];

const MOUNTAIN_BENEFITS: &[&str] = &[
    "Strengthens arms and legs",
    "Increases blood flow to the brain",
    "Stretches spine and hamstrings",
    "Energizes the body",
];

const MOUNTAIN_DESCRIPTION: &str =
    "Exhale, lift your hips up and back, forming an inverted 'V' with your body.";

const MOUNTAIN_KEY_POINTS: &[&str] = &[
    "Form inverted V shape",
    "Lift hips up and back",
    "Straight arms and legs",
    "Heels toward floor",
];

const RAISED_ARMS_REFERENCE: ReferencePose = ReferencePose {
    index: 1,
    name: "Hastauttanasana",
    key_angles: &[
        (LeftArm, 160.0),
        (RightArm, 160.0),
        (Spine, 165.0),
        (LeftShoulder, 160.0),
        (RightShoulder, 160.0),
    ],
    key_positions: &[("arms", "raised"), ("spine", "slight_backbend"), ("feet", "together")],
    critical_joints: &[LeftWrist, RightWrist, LeftShoulder, RightShoulder, Spine],
};

const FORWARD_BEND_REFERENCE: ReferencePose = ReferencePose {
    index: 2,
    name: "Hastapadasana",
    key_angles: &[(Hip, 45.0), (LeftKnee, 180.0), (RightKnee, 180.0), (Spine, 90.0)],
    key_positions: &[("hands", "floor"), ("spine", "forward_fold"), ("legs", "straight")],
    critical_joints: &[LeftHip, RightHip, LeftKnee, RightKnee, Spine],
};

static CATALOG: [CatalogEntry; POSE_COUNT] = [
    CatalogEntry {
        info: PoseInfo {
            name: "Pranamasana",
            english_name: "Prayer Pose",
            step: 1,
            breathing: Breathing::Normal,
            description: "Stand at the edge of your mat, feet together, and balance your weight \
                equally on both feet. Expand your chest and relax your shoulders. As you breathe \
                in, lift both arms up from the sides, and as you exhale, bring your palms \
                together in front of the chest in prayer position.",
            benefits: PRAYER_BENEFITS,
            key_points: &[
                "Keep feet together",
                "Balance weight equally",
                "Palms together in front of chest",
                "Shoulders relaxed",
            ],
            duration_secs: 3,
        },
        reference: ReferencePose {
            index: 0,
            name: "Pranamasana",
            key_angles: &[
                (LeftElbow, 90.0),
                (RightElbow, 90.0),
                (Spine, 180.0),
                (LeftShoulder, 90.0),
                (RightShoulder, 90.0),
            ],
            key_positions: &[("hands", "center"), ("feet", "together"), ("spine", "straight")],
            critical_joints: &[LeftWrist, RightWrist, LeftShoulder, RightShoulder, Spine],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Hasta Uttanasana",
            english_name: "Raised Arms Pose",
            step: 2,
            breathing: Breathing::Inhale,
            description: "Inhale and lift the arms up and back, keeping the biceps close to the \
                ears. The aim is to stretch the whole body up from the heels to the tips of the \
                fingers.",
            benefits: RAISED_ARMS_BENEFITS,
            key_points: &[
                "Keep biceps close to ears",
                "Stretch from heels to fingertips",
                "Gentle backward bend",
                "Deep inhalation",
            ],
            duration_secs: 4,
        },
        reference: RAISED_ARMS_REFERENCE,
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Pada Hastasana",
            english_name: "Standing Forward Bend",
            step: 3,
            breathing: Breathing::Exhale,
            description: "Exhale and bend forward from the waist, keeping the spine erect. Bring \
                the hands down to the floor beside the feet.",
            benefits: FORWARD_BEND_BENEFITS,
            key_points: &[
                "Bend from the waist",
                "Keep spine erect",
                "Hands beside feet",
                "Can bend knees if needed",
            ],
            duration_secs: 4,
        },
        reference: FORWARD_BEND_REFERENCE,
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Ashwa Sanchalanasana",
            english_name: "Equestrian Pose",
            step: 4,
            breathing: Breathing::Inhale,
            description: "Inhale and push your right leg back, as far back as possible. Bring \
                the right knee to the floor and look up.",
            benefits: EQUESTRIAN_BENEFITS,
            key_points: &["Right leg back", "Right knee on floor", "Look up", "Chest open"],
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 3,
            name: "Ashwa Sanchalanasana",
            key_angles: &[(LeftKnee, 90.0), (RightKnee, 180.0), (LeftHip, 90.0), (Spine, 160.0)],
            key_positions: &[("frontLeg", "bent"), ("backLeg", "straight"), ("chest", "open")],
            critical_joints: &[LeftKnee, RightKnee, LeftHip, RightHip, Chest],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Parvatasana",
            english_name: "Mountain Pose / Downward Dog",
            step: 5,
            breathing: Breathing::Exhale,
            description: MOUNTAIN_DESCRIPTION,
            benefits: MOUNTAIN_BENEFITS,
            key_points: MOUNTAIN_KEY_POINTS,
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 4,
            name: "Dandasana",
            key_angles: &[
                (Spine, 180.0),
                (LeftElbow, 180.0),
                (RightElbow, 180.0),
                (LeftKnee, 180.0),
                (RightKnee, 180.0),
            ],
            key_positions: &[("body", "straight_line"), ("arms", "straight"), ("core", "engaged")],
            critical_joints: &[Spine, LeftElbow, RightElbow, LeftKnee, RightKnee],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Ashtanga Namaskara",
            english_name: "Salute with Eight Parts",
            step: 6,
            breathing: Breathing::Hold,
            description: "Hold, Gently bring your knees down to the floor and exhale. Take the \
                hips back slightly, slide forward, rest your chest and chin on the floor. The two \
                hands, two feet, two knees, chest, and chin (eight parts of the body) should \
                touch the floor.",
            benefits: &[
                "Strengthens leg and arm muscles",
                "Develops chest muscles",
                "Increases flexibility of spine",
                "Builds core strength",
            ],
            key_points: &[
                "Eight body parts touch floor",
                "Knees, chest, chin down",
                "Hands and feet grounded",
                "Hips slightly back",
            ],
            duration_secs: 3,
        },
        reference: ReferencePose {
            index: 5,
            name: "Ashtanga Namaskara",
            key_angles: &[
                (LeftElbow, 90.0),
                (RightElbow, 90.0),
                (LeftKnee, 90.0),
                (RightKnee, 90.0),
                (Chest, 45.0),
            ],
            key_positions: &[("knees", "ground"), ("chest", "ground"), ("chin", "ground")],
            critical_joints: &[LeftElbow, RightElbow, LeftKnee, RightKnee, Chest],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Bhujangasana",
            english_name: "Cobra Pose",
            step: 7,
            breathing: Breathing::Inhale,
            description: "Inhale, Slide forward and raise the chest up into the Cobra posture. \
                You may keep your elbows bent in this pose, with the shoulders away from the ears.",
            benefits: &[
                "Increases spine flexibility",
                "Strengthens back muscles",
                "Opens chest and shoulders",
                "Improves posture",
            ],
            key_points: &[
                "Slide forward first",
                "Lift chest up",
                "Elbows may be bent",
                "Shoulders away from ears",
            ],
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 6,
            name: "Bhujangasana",
            key_angles: &[(Spine, 145.0), (LeftElbow, 160.0), (RightElbow, 160.0), (LeftHip, 180.0)],
            key_positions: &[("chest", "lifted"), ("hips", "ground"), ("arms", "support")],
            critical_joints: &[Spine, LeftElbow, RightElbow, Chest],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Parvatasana",
            english_name: "Mountain Pose / Downward Dog",
            step: 8,
            breathing: Breathing::Exhale,
            description: MOUNTAIN_DESCRIPTION,
            benefits: MOUNTAIN_BENEFITS,
            key_points: MOUNTAIN_KEY_POINTS,
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 7,
            name: "Adho Mukha Svanasana",
            key_angles: &[
                (Spine, 120.0),
                (LeftElbow, 180.0),
                (RightElbow, 180.0),
                (LeftKnee, 180.0),
                (RightKnee, 180.0),
                (Hip, 60.0),
            ],
            key_positions: &[("hips", "up"), ("arms", "straight"), ("legs", "straight")],
            critical_joints: &[Spine, LeftElbow, RightElbow, LeftKnee, RightKnee, Hip],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Ashwa Sanchalanasana",
            english_name: "Equestrian Pose",
            step: 9,
            breathing: Breathing::Inhale,
            description: "Inhale and bring the right foot forward in between the two hands, left \
                knee down to the floor, press the hips down and look up.",
            benefits: EQUESTRIAN_BENEFITS,
            key_points: &["Right foot forward", "Left knee down", "Press hips down", "Look up"],
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 8,
            name: "Ashwa Sanchalanasana",
            key_angles: &[(RightKnee, 90.0), (LeftKnee, 180.0), (RightHip, 90.0), (Spine, 160.0)],
            key_positions: &[("frontLeg", "bent"), ("backLeg", "straight"), ("chest", "open")],
            critical_joints: &[LeftKnee, RightKnee, LeftHip, RightHip, Chest],
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Pada Hastasana",
            english_name: "Standing Forward Bend",
            step: 10,
            breathing: Breathing::Exhale,
            description: "Exhale and bring the left foot forward. Keep the palms on the floor. You \
                may bend the knees, if necessary.",
            benefits: FORWARD_BEND_BENEFITS,
            key_points: &["Left foot forward", "Palms on floor", "Can bend knees", "Both feet together"],
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 9,
            ..FORWARD_BEND_REFERENCE
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Hasta Uttanasana",
            english_name: "Raised Arms Pose",
            step: 11,
            breathing: Breathing::Inhale,
            description: "Inhale, roll the spine up, hands go up and bend backward a little bit, \
                pushing the hips slightly outward.",
            benefits: RAISED_ARMS_BENEFITS,
            key_points: &[
                "Roll spine up slowly",
                "Arms overhead",
                "Gentle backward bend",
                "Hips slightly forward",
            ],
            duration_secs: 4,
        },
        reference: ReferencePose {
            index: 10,
            ..RAISED_ARMS_REFERENCE
        },
    },
    CatalogEntry {
        info: PoseInfo {
            name: "Pranamasana",
            english_name: "Prayer Pose",
            step: 12,
            breathing: Breathing::Exhale,
            description: "As you exhale, first straighten the body, then bring the arms down. \
                Relax in this position, observe the sensations in your body.",
            benefits: &[
                "Helps maintain balance",
                "Improves concentration",
                "Calms the nervous system",
                "Completes the energy circuit",
            ],
            key_points: &[
                "Straighten body",
                "Bring arms down",
                "Return to prayer position",
                "Observe body sensations",
            ],
            duration_secs: 3,
        },
        reference: ReferencePose {
            index: 11,
            name: "Tadasana",
            key_angles: &[
                (Spine, 180.0),
                (LeftElbow, 180.0),
                (RightElbow, 180.0),
                (LeftKnee, 180.0),
                (RightKnee, 180.0),
            ],
            key_positions: &[("arms", "sides"), ("spine", "straight"), ("feet", "together")],
            critical_joints: &[Spine, LeftShoulder, RightShoulder, LeftHip, RightHip],
        },
    },
];
