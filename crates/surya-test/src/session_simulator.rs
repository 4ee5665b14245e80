//! Session Simulator - drives a controller on virtual time
//!
//! Simulates:
//! - A camera delivering frames at a fixed rate
//! - Detector noise and frame loss
//! - The host clock ticking the controller after every frame

use std::time::{Duration, Instant};

use surya_core::SuryaResult;
use surya_session::{MemoryLog, PushSource, SessionConfig, SessionController, SessionOutcome, SessionPhase};

use crate::detector::{DetectorNoise, Posture, SyntheticDetector};

/// Typical webcam rate
pub const FRAME_INTERVAL: Duration = Duration::from_micros(33_333);

/// Counters collected while a simulation runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    /// Frames delivered to the controller
    pub frames: u64,
    /// Frames lost by the detector
    pub frames_lost: u64,
    /// Cursor changes caused by completed holds
    pub advances: u32,
    /// Simulated time covered
    pub elapsed: Duration,
}

/// Controller plus synthetic detector on a virtual clock
pub struct SessionSimulator {
    controller: SessionController,
    detector: SyntheticDetector,
    started: Instant,
    now: Instant,
    frame_interval: Duration,
}

impl SessionSimulator {
    /// Start a session with default configuration and an in-memory log
    pub fn new(noise: DetectorNoise, seed: u64) -> SuryaResult<Self> {
        Self::with_config(SessionConfig::default(), noise, seed)
    }

    pub fn with_config(config: SessionConfig, noise: DetectorNoise, seed: u64) -> SuryaResult<Self> {
        let mut controller = SessionController::with_config(config, Box::new(MemoryLog::new()));
        let started = Instant::now();
        controller.start(Box::new(PushSource), started)?;
        Ok(SessionSimulator {
            controller,
            detector: SyntheticDetector::new(noise, seed),
            started,
            now: started,
            frame_interval: FRAME_INTERVAL,
        })
    }

    pub fn set_posture(&mut self, posture: Posture) {
        self.detector.set_posture(posture);
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    /// Virtual time since the session started
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.started)
    }

    /// Run for a duration of virtual time
    pub fn run(&mut self, duration: Duration) -> SimulationResult {
        let mut result = SimulationResult::default();
        let steps = (duration.as_micros() / self.frame_interval.as_micros()) as u64;

        for _ in 0..steps {
            self.step(&mut result);
        }
        result.frames_lost = self.detector.lost_frames();
        result.elapsed = self.elapsed();
        result
    }

    /// One camera frame followed by a controller tick
    fn step(&mut self, result: &mut SimulationResult) {
        self.now += self.frame_interval;
        let before = self.position();

        let frame = self.detector.next_frame();
        if frame.is_some() {
            result.frames += 1;
        }
        self.controller.on_detection(frame, self.now);
        self.controller.tick(self.now);

        if self.controller.phase() == SessionPhase::Active && self.position() != before {
            result.advances += 1;
        }
    }

    fn position(&self) -> (usize, u32, u32) {
        self.controller
            .state()
            .map(|s| (s.cursor, s.cycle, s.set))
            .unwrap_or_default()
    }

    /// Stop the session at the current virtual time
    pub fn stop(&mut self) -> Option<SessionOutcome> {
        self.controller.stop(self.now)
    }
}

/// Pre-built scenarios
pub mod scenarios {
    use super::*;

    /// Noiseless practitioner holding every pose
    pub fn ideal() -> SuryaResult<SessionSimulator> {
        SessionSimulator::new(DetectorNoise::none(), 0)
    }

    /// Everyday webcam noise
    pub fn webcam(seed: u64) -> SuryaResult<SessionSimulator> {
        SessionSimulator::new(DetectorNoise::default(), seed)
    }

    /// Practitioner whose arms stay out of frame
    pub fn arms_hidden() -> SuryaResult<SessionSimulator> {
        let mut sim = SessionSimulator::new(DetectorNoise::none(), 0)?;
        sim.set_posture(Posture::ArmsHidden);
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surya_core::Joint;

    #[test]
    fn test_ideal_first_pose_timing() {
        let mut sim = scenarios::ideal().unwrap();
        let result = sim.run(Duration::from_secs(4));
        assert_eq!(result.advances, 0);
        assert!(sim.controller().state().unwrap().pose_completed);

        let result = sim.run(Duration::from_secs(1));
        assert_eq!(result.advances, 1);
        assert_eq!(sim.controller().current_pose(), 1);
    }

    #[test]
    fn test_ideal_rolls_into_second_cycle() {
        let mut sim = scenarios::ideal().unwrap();
        sim.run(Duration::from_secs(60));
        let state = sim.controller().state().unwrap();
        assert_eq!((state.cycle, state.set), (2, 1));
    }

    #[test]
    fn test_hidden_arms_never_advance() {
        let mut sim = scenarios::arms_hidden().unwrap();
        let result = sim.run(Duration::from_secs(20));
        assert_eq!(result.advances, 0);

        let outcome = sim.stop().unwrap();
        assert_eq!(outcome.summary.accuracy_score.percent(), 60);
        assert!(outcome
            .summary
            .mistakes
            .contains(&Joint::LeftWrist.correction().to_string()));
        assert_eq!(outcome.summary.session_duration, 19);
    }

    #[test]
    fn test_frames_counted() {
        let mut sim = scenarios::webcam(3).unwrap();
        let result = sim.run(Duration::from_secs(10));
        assert_eq!(result.frames + result.frames_lost, 300);
    }
}
