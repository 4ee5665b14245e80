//! Synthetic detector
//!
//! Produces detector frames for a simulated practitioner:
//! - Posture (aligned, leaning, arms out of frame)
//! - Positional jitter
//! - Per-landmark visibility dropouts
//! - Whole-frame loss

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use surya_core::{BodyLandmark, Detection, Landmark};

/// Visibility given to a dropped or hidden landmark
pub const HIDDEN_VISIBILITY: f32 = 0.1;

/// Detector noise configuration
#[derive(Clone, Debug)]
pub struct DetectorNoise {
    /// Standard deviation of positional jitter (normalized units)
    pub position_jitter: f32,
    /// Probability that a single landmark drops below visibility (0.0 - 1.0)
    pub visibility_dropout: f64,
    /// Probability that a whole frame is lost (0.0 - 1.0)
    pub frame_loss: f64,
}

impl Default for DetectorNoise {
    fn default() -> Self {
        DetectorNoise {
            position_jitter: 0.005,
            visibility_dropout: 0.01,
            frame_loss: 0.02,
        }
    }
}

impl DetectorNoise {
    /// Noiseless detector
    pub fn none() -> Self {
        DetectorNoise {
            position_jitter: 0.0,
            visibility_dropout: 0.0,
            frame_loss: 0.0,
        }
    }

    /// Poor lighting, busy background
    pub fn harsh() -> Self {
        DetectorNoise {
            position_jitter: 0.03,
            visibility_dropout: 0.08,
            frame_loss: 0.15,
        }
    }
}

/// What the simulated body is doing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Posture {
    /// Shoulders stacked over hips, everything in frame
    Aligned,
    /// Shoulders shifted sideways by `offset`
    Leaning { offset: f32 },
    /// Wrists and elbows out of frame
    ArmsHidden,
}

/// Seeded frame generator
pub struct SyntheticDetector {
    noise: DetectorNoise,
    posture: Posture,
    rng: StdRng,
    frames: u64,
    lost: u64,
}

impl SyntheticDetector {
    pub fn new(noise: DetectorNoise, seed: u64) -> Self {
        SyntheticDetector {
            noise,
            posture: Posture::Aligned,
            rng: StdRng::seed_from_u64(seed),
            frames: 0,
            lost: 0,
        }
    }

    /// Noiseless aligned body
    pub fn ideal() -> Self {
        Self::new(DetectorNoise::none(), 0)
    }

    pub fn set_posture(&mut self, posture: Posture) {
        self.posture = posture;
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    /// Next frame, or `None` if it was lost
    pub fn next_frame(&mut self) -> Option<Detection> {
        self.frames += 1;
        if self.noise.frame_loss > 0.0 && self.rng.gen_bool(self.noise.frame_loss.min(1.0)) {
            self.lost += 1;
            return None;
        }

        let mut detection = body(self.posture);
        for &slot in BodyLandmark::all() {
            let Some(&base) = detection.get(slot) else {
                continue;
            };
            let mut lm = base;
            if self.noise.position_jitter > 0.0 {
                lm.x = (lm.x + self.gaussian() * self.noise.position_jitter).clamp(0.0, 1.0);
                lm.y = (lm.y + self.gaussian() * self.noise.position_jitter).clamp(0.0, 1.0);
            }
            if self.noise.visibility_dropout > 0.0 && self.rng.gen_bool(self.noise.visibility_dropout.min(1.0)) {
                lm.visibility = HIDDEN_VISIBILITY;
            }
            detection.set(slot, lm);
        }
        Some(detection)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lost_frames(&self) -> u64 {
        self.lost
    }

    /// Standard normal sample (Box-Muller)
    fn gaussian(&mut self) -> f32 {
        let u1: f64 = self.rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = self.rng.gen();
        ((-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()) as f32
    }
}

/// Noiseless frame for a posture
pub fn body(posture: Posture) -> Detection {
    use BodyLandmark as B;

    let mut d = Detection::filled(Landmark::visible(0.5, 0.5));
    d.set(B::Nose, Landmark::visible(0.5, 0.15));
    d.set(B::LeftShoulder, Landmark::visible(0.45, 0.30));
    d.set(B::RightShoulder, Landmark::visible(0.55, 0.30));
    d.set(B::LeftElbow, Landmark::visible(0.42, 0.42));
    d.set(B::RightElbow, Landmark::visible(0.58, 0.42));
    d.set(B::LeftWrist, Landmark::visible(0.48, 0.38));
    d.set(B::RightWrist, Landmark::visible(0.52, 0.38));
    d.set(B::LeftHip, Landmark::visible(0.46, 0.55));
    d.set(B::RightHip, Landmark::visible(0.54, 0.55));
    d.set(B::LeftKnee, Landmark::visible(0.46, 0.75));
    d.set(B::RightKnee, Landmark::visible(0.54, 0.75));
    d.set(B::LeftAnkle, Landmark::visible(0.46, 0.95));
    d.set(B::RightAnkle, Landmark::visible(0.54, 0.95));

    match posture {
        Posture::Aligned => {}
        Posture::Leaning { offset } => {
            for slot in [B::LeftShoulder, B::RightShoulder] {
                if let Some(&lm) = d.get(slot) {
                    d.set(slot, Landmark::visible(lm.x + offset, lm.y));
                }
            }
        }
        Posture::ArmsHidden => {
            for slot in [B::LeftWrist, B::RightWrist, B::LeftElbow, B::RightElbow] {
                if let Some(&lm) = d.get(slot) {
                    d.set(slot, Landmark::new(lm.x, lm.y, lm.z, HIDDEN_VISIBILITY));
                }
            }
        }
    }
    d
}
