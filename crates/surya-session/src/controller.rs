//! Session Progression Controller
//!
//! Owns one practice session: feeds detections through the comparator,
//! validates holds on the scoring tick, advances through the 12-pose
//! sequence and archives a summary on stop.
//!
//! All timers go through [`Scheduler`]; the host drives them with
//! [`SessionController::tick`]. Late events after `stop` are impossible
//! because `stop` clears the queue before finalizing.

use std::time::{Duration, Instant};

use surya_core::{catalog, Accuracy, ComparisonResult, Detection, PoseComparator, SuryaError, SuryaResult, POSE_COUNT};

use crate::config::SessionConfig;
use crate::log::{ResultsPayload, SessionLog, SessionSummary};
use crate::scheduler::{Scheduler, SessionEvent};
use crate::source::LandmarkSource;
use crate::state::{Progression, SessionPhase, SessionState};

const MIN_INTERVAL: Duration = Duration::from_millis(1);
/// Upper bound on any configured interval, keeps `Instant` arithmetic finite
const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Everything produced by a stopped session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Record handed to the session log
    pub summary: SessionSummary,
    /// Payload for the results view
    pub results: ResultsPayload,
    /// Whether the log accepted the summary
    pub persisted: bool,
    /// Mean accuracy over every detected frame
    pub average_accuracy: Accuracy,
    pub cycle: u32,
    pub set: u32,
}

/// Session Progression Controller
pub struct SessionController {
    config: SessionConfig,
    comparator: PoseComparator,
    log: Box<dyn SessionLog>,
    phase: SessionPhase,
    /// Cursor used while no session is active
    browse_cursor: usize,
    state: Option<SessionState>,
    scheduler: Scheduler,
    source: Option<Box<dyn LandmarkSource>>,
}

impl SessionController {
    /// Create a controller with default configuration
    pub fn new(log: Box<dyn SessionLog>) -> Self {
        Self::with_config(SessionConfig::default(), log)
    }

    /// Create a controller with custom configuration
    pub fn with_config(config: SessionConfig, log: Box<dyn SessionLog>) -> Self {
        let comparator = PoseComparator::with_config(config.comparator.clone());
        SessionController {
            config,
            comparator,
            log,
            phase: SessionPhase::Idle,
            browse_cursor: 0,
            state: None,
            scheduler: Scheduler::new(),
            source: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Live or last finished session state
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn log(&self) -> &dyn SessionLog {
        self.log.as_ref()
    }

    /// Pose the user is looking at
    pub fn current_pose(&self) -> usize {
        match (&self.state, self.phase) {
            (Some(state), SessionPhase::Active) => state.cursor,
            _ => self.browse_cursor,
        }
    }

    /// Latest comparison for the current pose
    pub fn last_comparison(&self) -> Option<&ComparisonResult> {
        self.state.as_ref().and_then(|s| s.last_comparison.as_ref())
    }

    /// Start a session at the first pose
    pub fn start(&mut self, source: Box<dyn LandmarkSource>, now: Instant) -> SuryaResult<()> {
        self.start_at(source, 0, now)
    }

    /// Start a session at a chosen pose
    pub fn start_at(&mut self, mut source: Box<dyn LandmarkSource>, pose: usize, now: Instant) -> SuryaResult<()> {
        if self.phase == SessionPhase::Active {
            return Err(SuryaError::SessionActive);
        }
        catalog::get(pose)?;

        if let Err(e) = source.open() {
            tracing::warn!("Landmark source failed to open: {}", e);
            return Err(e.into());
        }

        self.scheduler.clear();
        self.scheduler
            .schedule(now + self.scoring_interval(), SessionEvent::ScoringTick);
        self.scheduler
            .schedule(now + self.duration_interval(), SessionEvent::DurationTick);

        self.state = Some(SessionState::new(now, pose));
        self.source = Some(source);
        self.browse_cursor = pose;
        self.phase = SessionPhase::Active;

        tracing::info!("Session started at pose {}", pose);
        Ok(())
    }

    /// Feed one detector frame (or its absence).
    ///
    /// Returns the comparison, or `None` when no session is active.
    pub fn on_detection(&mut self, detection: Option<Detection>, _now: Instant) -> Option<&ComparisonResult> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let state = self.state.as_mut()?;

        let result = self.comparator.compare(detection.as_ref(), state.cursor);
        state.record(result, self.config.holding_on, self.config.holding_off);
        if detection.is_some() {
            state.last_detection = detection;
        }
        state.last_comparison.as_ref()
    }

    /// Drain every event due at or before `now`
    pub fn tick(&mut self, now: Instant) {
        while self.phase == SessionPhase::Active {
            let Some((due, event)) = self.scheduler.pop_due(now) else {
                break;
            };
            match event {
                SessionEvent::ScoringTick => {
                    let next = next_periodic(due, self.scoring_interval(), now);
                    self.scheduler.schedule(next, SessionEvent::ScoringTick);
                    self.on_scoring_tick(due);
                }
                SessionEvent::DurationTick => {
                    let next = next_periodic(due, self.duration_interval(), now);
                    self.scheduler.schedule(next, SessionEvent::DurationTick);
                    if let Some(state) = self.state.as_mut() {
                        state.duration_secs = due.saturating_duration_since(state.started_at).as_secs();
                    }
                }
                SessionEvent::Advance => self.on_advance(),
            }
        }
    }

    fn on_scoring_tick(&mut self, due: Instant) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.pose_completed {
            return;
        }
        let Some(result) = state.last_comparison.as_ref() else {
            return;
        };

        state.pose_ticks += 1;
        if result.accuracy >= self.config.validation_threshold {
            state.consecutive_correct += 1;
            if state.consecutive_correct >= self.config.required_correct_frames {
                state.pose_completed = true;
                state.consecutive_correct = 0;
                self.scheduler
                    .schedule(due + self.config.advance_delay.min(MAX_INTERVAL), SessionEvent::Advance);
                tracing::debug!("Pose {} held, advancing", state.cursor);
            }
        } else {
            state.consecutive_correct = 0;
        }
    }

    fn on_advance(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match state.advance(self.config.cycles_per_set) {
            Progression::Pose => {}
            Progression::Cycle => tracing::debug!("Cycle {} of set {}", state.cycle, state.set),
            Progression::Set => tracing::debug!("Set {} started", state.set),
        }
        self.recompare();
    }

    /// Step forward one pose, stopping at the last
    pub fn next_pose(&mut self) {
        let cursor = (self.current_pose() + 1).min(POSE_COUNT - 1);
        self.jump(cursor);
    }

    /// Step back one pose, stopping at the first
    pub fn previous_pose(&mut self) {
        let cursor = self.current_pose().saturating_sub(1);
        self.jump(cursor);
    }

    /// Jump to a pose by index
    pub fn select_pose(&mut self, index: usize) -> SuryaResult<()> {
        catalog::get(index)?;
        self.jump(index);
        Ok(())
    }

    fn jump(&mut self, cursor: usize) {
        self.browse_cursor = cursor;
        if self.phase != SessionPhase::Active {
            return;
        }
        self.scheduler.cancel(SessionEvent::Advance);
        if let Some(state) = self.state.as_mut() {
            state.jump_to(cursor);
        }
        self.recompare();
    }

    /// Re-score the last seen frame against the new cursor pose
    fn recompare(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.last_comparison = state
                .last_detection
                .as_ref()
                .map(|d| self.comparator.compare(Some(d), state.cursor));
        }
    }

    /// End the session and archive its summary.
    ///
    /// Returns `None` when no session is active, so repeated calls
    /// archive nothing.
    pub fn stop(&mut self, now: Instant) -> Option<SessionOutcome> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        self.scheduler.clear();
        if let Some(mut source) = self.source.take() {
            source.close();
        }
        self.phase = SessionPhase::Completed;

        let state = self.state.as_mut()?;
        state.duration_secs = now.saturating_duration_since(state.started_at).as_secs();
        self.browse_cursor = state.cursor;

        let pose_name = catalog::info(state.cursor)
            .map(|info| info.name.to_string())
            .unwrap_or_default();
        let summary = SessionSummary {
            pose_index: state.cursor,
            pose_name: pose_name.clone(),
            accuracy_score: state.accuracy,
            mistakes: state
                .mistakes
                .iter()
                .take(self.config.max_summary_mistakes)
                .cloned()
                .collect(),
            session_duration: state.duration_secs,
            user_keypoints: state
                .last_detection
                .as_ref()
                .map(|d| d.landmarks().to_vec())
                .unwrap_or_default(),
        };
        let results = ResultsPayload {
            accuracy: state.accuracy,
            pose_name,
            duration: state.duration_secs,
            mistakes: state.mistakes.clone(),
        };
        let average_accuracy = state.average_accuracy();
        let (cycle, set) = (state.cycle, state.set);

        let persisted = match self.log.append(summary.clone()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist session summary: {}", e);
                false
            }
        };

        tracing::info!(
            "Session stopped after {}s at pose {} ({})",
            summary.session_duration,
            summary.pose_index,
            summary.accuracy_score
        );

        Some(SessionOutcome {
            summary,
            results,
            persisted,
            average_accuracy,
            cycle,
            set,
        })
    }

    /// Leave the completed screen
    pub fn reset(&mut self) -> SuryaResult<()> {
        if self.phase == SessionPhase::Active {
            return Err(SuryaError::SessionActive);
        }
        self.state = None;
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Scoring cadence as actually scheduled, within 1 ms..=1 h
    pub fn scoring_interval(&self) -> Duration {
        self.config.scoring_interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
    }

    fn duration_interval(&self) -> Duration {
        self.config.duration_interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
        }
    }
}

/// Next slot for a periodic event. A host that fell behind skips the
/// missed slots instead of replaying them.
fn next_periodic(due: Instant, interval: Duration, now: Instant) -> Instant {
    let next = due + interval;
    if next <= now {
        now + interval
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use surya_core::{BodyLandmark, Joint, Landmark};

    use crate::log::MemoryLog;
    use crate::source::{CaptureError, PushSource};

    const STEP: Duration = Duration::from_millis(100);

    /// Counts open/close calls
    #[derive(Clone, Default)]
    struct CountingSource {
        opened: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
    }

    impl LandmarkSource for CountingSource {
        fn open(&mut self) -> Result<(), CaptureError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct DeniedSource;

    impl LandmarkSource for DeniedSource {
        fn open(&mut self) -> Result<(), CaptureError> {
            Err(CaptureError("permission denied".into()))
        }

        fn close(&mut self) {}
    }

    struct BrokenLog;

    impl SessionLog for BrokenLog {
        fn append(&mut self, _summary: SessionSummary) -> SuryaResult<()> {
            Err(SuryaError::LogFormat("disk full".into()))
        }

        fn load(&self) -> SuryaResult<Vec<SessionSummary>> {
            Ok(Vec::new())
        }
    }

    /// Upright body with level shoulders and hips
    fn standing() -> Detection {
        let mut d = Detection::filled(Landmark::visible(0.5, 0.5));
        d.set(BodyLandmark::LeftShoulder, Landmark::visible(0.45, 0.30));
        d.set(BodyLandmark::RightShoulder, Landmark::visible(0.55, 0.30));
        d.set(BodyLandmark::LeftHip, Landmark::visible(0.46, 0.55));
        d.set(BodyLandmark::RightHip, Landmark::visible(0.54, 0.55));
        d
    }

    /// Shoulders far off the hip line
    fn leaning() -> Detection {
        let mut d = standing();
        d.set(BodyLandmark::LeftShoulder, Landmark::visible(0.75, 0.30));
        d.set(BodyLandmark::RightShoulder, Landmark::visible(0.85, 0.30));
        d
    }

    fn controller() -> SessionController {
        SessionController::new(Box::new(MemoryLog::new()))
    }

    fn result(percent: u8) -> ComparisonResult {
        ComparisonResult {
            accuracy: Accuracy::from_percent(percent),
            correct_joints: vec![Joint::Spine],
            incorrect_joints: vec![],
            feedback: vec![Accuracy::from_percent(percent).overall_feedback().to_string()],
        }
    }

    /// Advance the clock one scoring step and tick
    fn step(c: &mut SessionController, now: &mut Instant) {
        *now += STEP;
        c.tick(*now);
    }

    #[test]
    fn test_start_initializes_state() {
        let mut c = controller();
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();

        let state = c.state().unwrap();
        assert_eq!((state.cursor, state.cycle, state.set), (0, 1, 1));
        assert!(c.scheduler().is_pending(SessionEvent::ScoringTick));
        assert!(c.scheduler().is_pending(SessionEvent::DurationTick));
        assert!(matches!(c.start(Box::new(PushSource), t0), Err(SuryaError::SessionActive)));
    }

    #[test]
    fn test_capture_failure_stays_idle() {
        let mut c = controller();
        let err = c.start(Box::new(DeniedSource), Instant::now()).unwrap_err();
        assert!(matches!(err, SuryaError::Capture(ref m) if m == "permission denied"));
        assert_eq!(c.phase(), SessionPhase::Idle);
        assert!(c.state().is_none());
        assert!(c.scheduler().is_empty());
    }

    #[test]
    fn test_start_at_unknown_pose() {
        let mut c = controller();
        assert!(matches!(
            c.start_at(Box::new(PushSource), 12, Instant::now()),
            Err(SuryaError::PoseNotFound(12))
        ));
    }

    #[test]
    fn test_detection_ignored_when_idle() {
        let mut c = controller();
        assert!(c.on_detection(Some(standing()), Instant::now()).is_none());
    }

    #[test]
    fn test_thirty_correct_ticks_complete_pose() {
        let mut c = controller();
        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();
        let accuracy = c.on_detection(Some(standing()), now).unwrap().accuracy;
        assert_eq!(accuracy, Accuracy::PERFECT);

        for _ in 0..29 {
            step(&mut c, &mut now);
        }
        assert!(!c.state().unwrap().pose_completed);
        step(&mut c, &mut now);
        assert!(c.state().unwrap().pose_completed);
        assert_eq!(c.state().unwrap().consecutive_correct, 0);
        assert!(c.scheduler().is_pending(SessionEvent::Advance));

        // 1.5 s grace before the cursor moves
        for _ in 0..14 {
            step(&mut c, &mut now);
        }
        assert_eq!(c.current_pose(), 0);
        step(&mut c, &mut now);
        assert_eq!(c.current_pose(), 1);
        assert!(!c.state().unwrap().pose_completed);
    }

    #[test]
    fn test_low_tick_resets_counter() {
        let mut c = controller();
        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();

        c.state.as_mut().unwrap().last_comparison = Some(result(90));
        for _ in 0..29 {
            step(&mut c, &mut now);
        }
        c.state.as_mut().unwrap().last_comparison = Some(result(50));
        step(&mut c, &mut now);

        let state = c.state().unwrap();
        assert!(!state.pose_completed);
        assert_eq!(state.consecutive_correct, 0);
        assert_eq!(state.pose_ticks, 30);
    }

    #[test]
    fn test_oversized_intervals_are_capped() {
        let config: SessionConfig = serde_json::from_str(
            r#"{
                "scoring_interval": {"secs": 18446744073709551615, "nanos": 0},
                "duration_interval": {"secs": 18446744073709551615, "nanos": 0},
                "advance_delay": {"secs": 18446744073709551615, "nanos": 0},
                "required_correct_frames": 1
            }"#,
        )
        .unwrap();
        let mut c = SessionController::with_config(config, Box::new(MemoryLog::new()));
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();
        c.on_detection(Some(standing()), t0);

        let hour = Duration::from_secs(3600);
        c.tick(t0 + hour);
        assert!(c.state().unwrap().pose_completed);
        assert_eq!(c.state().unwrap().duration_secs, 3600);

        c.tick(t0 + hour * 2);
        assert_eq!(c.current_pose(), 1);
        assert!(c.stop(t0 + hour * 2).is_some());
    }

    #[test]
    fn test_no_comparison_no_progress() {
        let mut c = controller();
        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();
        for _ in 0..40 {
            step(&mut c, &mut now);
        }
        let state = c.state().unwrap();
        assert_eq!(state.pose_ticks, 0);
        assert!(!state.pose_completed);
    }

    #[test]
    fn test_duration_ticks() {
        let mut c = controller();
        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();
        for _ in 0..25 {
            step(&mut c, &mut now);
        }
        assert_eq!(c.state().unwrap().duration_secs, 2);
    }

    #[test]
    fn test_late_host_skips_missed_ticks() {
        let mut c = controller();
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();
        c.on_detection(Some(standing()), t0);

        c.tick(t0 + Duration::from_secs(10));
        let state = c.state().unwrap();
        assert_eq!(state.pose_ticks, 1);
        assert!(!state.pose_completed);
    }

    #[test]
    fn test_manual_navigation_clamps_and_cancels_advance() {
        let mut c = controller();
        c.previous_pose();
        assert_eq!(c.current_pose(), 0);
        c.select_pose(11).unwrap();
        c.next_pose();
        assert_eq!(c.current_pose(), 11);
        assert!(matches!(c.select_pose(40), Err(SuryaError::PoseNotFound(40))));

        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();
        c.on_detection(Some(standing()), now);
        for _ in 0..30 {
            step(&mut c, &mut now);
        }
        assert!(c.scheduler().is_pending(SessionEvent::Advance));

        c.select_pose(5).unwrap();
        assert!(!c.scheduler().is_pending(SessionEvent::Advance));
        let state = c.state().unwrap();
        assert_eq!((state.cursor, state.cycle, state.set), (5, 1, 1));
        assert!(!state.pose_completed);
        assert!(state.last_comparison.is_some());

        for _ in 0..20 {
            step(&mut c, &mut now);
        }
        assert_eq!(c.current_pose(), 5);
    }

    #[test]
    fn test_stop_archives_once() {
        let opened = CountingSource::default();
        let mut c = controller();
        let t0 = Instant::now();
        c.start(Box::new(opened.clone()), t0).unwrap();
        c.on_detection(Some(leaning()), t0);

        let outcome = c.stop(t0 + Duration::from_secs(7)).unwrap();
        assert!(outcome.persisted);
        assert_eq!(outcome.summary.session_duration, 7);
        assert_eq!(outcome.summary.pose_name, "Pranamasana");
        assert_eq!(outcome.summary.mistakes, vec![Joint::Spine.correction()]);
        assert_eq!(outcome.summary.user_keypoints.len(), 33);
        assert_eq!(outcome.results.pose_name, "Pranamasana");

        assert!(c.stop(t0 + Duration::from_secs(8)).is_none());
        assert_eq!(c.log().load().unwrap().len(), 1);
        assert_eq!(opened.opened.load(Ordering::SeqCst), 1);
        assert_eq!(opened.closed.load(Ordering::SeqCst), 1);
        assert!(c.scheduler().is_empty());
        assert_eq!(c.phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let mut c = controller();
        let mut now = Instant::now();
        c.start(Box::new(PushSource), now).unwrap();
        c.on_detection(Some(standing()), now);
        for _ in 0..30 {
            step(&mut c, &mut now);
        }
        c.stop(now);

        c.tick(now + Duration::from_secs(5));
        assert_eq!(c.state().unwrap().cursor, 0);
        assert!(c.on_detection(Some(standing()), now).is_none());
    }

    #[test]
    fn test_summary_keeps_five_mistakes() {
        let mut c = controller();
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();
        let seven = [
            "Raise your left arm",
            "Raise your right arm",
            "Straighten your left arm",
            "Straighten your right arm",
            "Keep your spine straight and aligned",
            "Bend your left knee",
            "Bend your right knee",
        ];
        c.state.as_mut().unwrap().mistakes = seven.iter().map(|s| s.to_string()).collect();

        let outcome = c.stop(t0).unwrap();
        assert_eq!(outcome.summary.mistakes, seven[..5]);
        assert_eq!(outcome.results.mistakes.len(), 7);
    }

    #[test]
    fn test_log_failure_still_returns_results() {
        let mut c = SessionController::new(Box::new(BrokenLog));
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();
        c.on_detection(Some(standing()), t0);

        let outcome = c.stop(t0 + Duration::from_secs(3)).unwrap();
        assert!(!outcome.persisted);
        assert_eq!(outcome.results.accuracy, Accuracy::PERFECT);
        assert_eq!(outcome.results.duration, 3);
    }

    #[test]
    fn test_reset_and_restart() {
        let mut c = controller();
        let t0 = Instant::now();
        c.start(Box::new(PushSource), t0).unwrap();
        assert!(matches!(c.reset(), Err(SuryaError::SessionActive)));
        c.stop(t0);
        c.reset().unwrap();
        assert_eq!(c.phase(), SessionPhase::Idle);
        assert!(c.state().is_none());

        c.start_at(Box::new(PushSource), 4, t0).unwrap();
        assert_eq!(c.current_pose(), 4);
    }
}
