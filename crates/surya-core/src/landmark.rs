//! Landmarks - body points delivered by the pose-detection model
//!
//! The detector is an external collaborator. It hands us one ordered
//! sequence of up to 33 landmarks per frame, or nothing when no person
//! is visible. Slot indices are stable across frames.

use serde::{Deserialize, Serialize};

/// Visibility below this value means the point's position is not trusted
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Number of canonical landmark slots
pub const LANDMARK_COUNT: usize = 33;

/// Canonical landmark slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BodyLandmark {
    // Face
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,

    // Arms
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,

    // Hands
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,

    // Legs
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,

    // Feet
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyLandmark {
    /// All slots in index order
    pub fn all() -> &'static [BodyLandmark] {
        use BodyLandmark::*;
        &[
            Nose,
            LeftEyeInner,
            LeftEye,
            LeftEyeOuter,
            RightEyeInner,
            RightEye,
            RightEyeOuter,
            LeftEar,
            RightEar,
            MouthLeft,
            MouthRight,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftPinky,
            RightPinky,
            LeftIndex,
            RightIndex,
            LeftThumb,
            RightThumb,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
            LeftHeel,
            RightHeel,
            LeftFootIndex,
            RightFootIndex,
        ]
    }

    /// Slot index in the detector output
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot for a raw index
    pub fn from_index(index: usize) -> Option<BodyLandmark> {
        Self::all().get(index).copied()
    }
}

/// One tracked body point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to [0, 1]
    pub x: f32,
    /// Vertical position, normalized to [0, 1] (grows downwards)
    pub y: f32,
    /// Depth relative to the hips
    pub z: f32,
    /// Detector confidence in [0, 1]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Fully visible point in the image plane
    pub fn visible(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }

    /// Whether the position can be trusted at the given threshold
    #[inline]
    pub fn is_trusted(&self, min_visibility: f32) -> bool {
        self.visibility >= min_visibility
    }
}

/// One detector frame: an ordered landmark sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Detection {
    landmarks: Vec<Landmark>,
}

impl Detection {
    /// Wrap a detector frame. Slots past the canonical 33 are dropped.
    pub fn new(mut landmarks: Vec<Landmark>) -> Self {
        landmarks.truncate(LANDMARK_COUNT);
        Self { landmarks }
    }

    /// Full frame with every slot set to the same landmark
    pub fn filled(landmark: Landmark) -> Self {
        Self {
            landmarks: vec![landmark; LANDMARK_COUNT],
        }
    }

    /// Get a landmark by slot
    pub fn get(&self, slot: BodyLandmark) -> Option<&Landmark> {
        self.landmarks.get(slot.index())
    }

    /// Get a landmark by slot, only if trusted
    pub fn trusted(&self, slot: BodyLandmark, min_visibility: f32) -> Option<&Landmark> {
        self.get(slot).filter(|lm| lm.is_trusted(min_visibility))
    }

    /// Set a landmark, growing the frame if the slot is past its end
    pub fn set(&mut self, slot: BodyLandmark, landmark: Landmark) {
        let idx = slot.index();
        if idx >= self.landmarks.len() {
            self.landmarks.resize(idx + 1, Landmark::default());
        }
        self.landmarks[idx] = landmark;
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

impl From<Vec<Landmark>> for Detection {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Detection::new(landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_are_canonical() {
        assert_eq!(BodyLandmark::all().len(), LANDMARK_COUNT);
        for (i, slot) in BodyLandmark::all().iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(BodyLandmark::from_index(i), Some(*slot));
        }
        assert_eq!(BodyLandmark::LeftShoulder.index(), 11);
        assert_eq!(BodyLandmark::RightHip.index(), 24);
        assert_eq!(BodyLandmark::from_index(33), None);
    }

    #[test]
    fn test_short_detection_has_missing_slots() {
        let detection = Detection::new(vec![Landmark::visible(0.5, 0.5); 12]);
        assert!(detection.get(BodyLandmark::LeftShoulder).is_some());
        assert!(detection.get(BodyLandmark::RightShoulder).is_none());
    }

    #[test]
    fn test_trusted_filters_low_visibility() {
        let mut detection = Detection::filled(Landmark::visible(0.5, 0.5));
        detection.set(BodyLandmark::LeftKnee, Landmark::new(0.4, 0.8, 0.0, 0.49));

        assert!(detection.trusted(BodyLandmark::LeftKnee, DEFAULT_MIN_VISIBILITY).is_none());
        assert!(detection.trusted(BodyLandmark::RightKnee, DEFAULT_MIN_VISIBILITY).is_some());
    }

    #[test]
    fn test_oversized_frame_is_truncated() {
        let detection = Detection::new(vec![Landmark::default(); 40]);
        assert_eq!(detection.len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_set_grows_frame() {
        let mut detection = Detection::default();
        detection.set(BodyLandmark::Nose, Landmark::visible(0.1, 0.2));
        detection.set(BodyLandmark::LeftWrist, Landmark::visible(0.3, 0.4));
        assert_eq!(detection.len(), 16);
        assert_eq!(detection.get(BodyLandmark::LeftWrist).map(|l| l.x), Some(0.3));
    }

    #[test]
    fn test_detection_serializes_as_plain_array() {
        let detection = Detection::new(vec![Landmark::new(0.1, 0.2, 0.3, 0.9)]);
        let json = serde_json::to_string(&detection).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"visibility\""));
    }
}
