//! Progress statistics over the session log

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Serialize;
use surya_core::Accuracy;

use crate::log::SessionSummary;

/// Poses listed in the "most practised" ranking
pub const TOP_POSES: usize = 5;

/// Sessions shown in the accuracy trend
pub const TREND_WINDOW: usize = 10;

/// Per-pose aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseStats {
    pub pose_name: String,
    pub sessions: usize,
    pub average_accuracy: Accuracy,
    pub best_accuracy: Accuracy,
}

/// Aggregates shown on the progress view
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_sessions: usize,
    pub average_accuracy: Accuracy,
    pub best_accuracy: Accuracy,
    /// Whole seconds across every session
    pub total_practice_secs: u64,
    /// Keyed by pose name
    pub poses: BTreeMap<String, PoseStats>,
}

impl ProgressStats {
    pub fn from_sessions(sessions: &[SessionSummary]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let mut sums: BTreeMap<&str, (usize, u64, Accuracy)> = BTreeMap::new();
        for s in sessions {
            let entry = sums.entry(s.pose_name.as_str()).or_insert((0, 0, Accuracy::ZERO));
            entry.0 += 1;
            entry.1 += s.accuracy_score.percent() as u64;
            entry.2 = entry.2.max(s.accuracy_score);
        }

        let poses = sums
            .into_iter()
            .map(|(name, (count, sum, best))| {
                let stats = PoseStats {
                    pose_name: name.to_string(),
                    sessions: count,
                    average_accuracy: mean(sum, count),
                    best_accuracy: best,
                };
                (name.to_string(), stats)
            })
            .collect();

        let total: u64 = sessions.iter().map(|s| s.accuracy_score.percent() as u64).sum();
        ProgressStats {
            total_sessions: sessions.len(),
            average_accuracy: mean(total, sessions.len()),
            best_accuracy: sessions
                .iter()
                .map(|s| s.accuracy_score)
                .max()
                .unwrap_or(Accuracy::ZERO),
            total_practice_secs: sessions
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.session_duration)),
            poses,
        }
    }

    /// Most practised poses, highest count first, ties by name
    pub fn top_poses(&self) -> Vec<&PoseStats> {
        let mut ranked: Vec<&PoseStats> = self.poses.values().collect();
        ranked.sort_by(|a, b| b.sessions.cmp(&a.sessions).then_with(|| a.pose_name.cmp(&b.pose_name)));
        ranked.truncate(TOP_POSES);
        ranked
    }

    pub fn total_practice(&self) -> Duration {
        Duration::from_secs(self.total_practice_secs)
    }
}

/// Accuracy of the latest sessions, oldest first
pub fn accuracy_trend(sessions: &[SessionSummary]) -> Vec<Accuracy> {
    let start = sessions.len().saturating_sub(TREND_WINDOW);
    sessions[start..].iter().map(|s| s.accuracy_score).collect()
}

fn mean(sum: u64, count: usize) -> Accuracy {
    if count == 0 {
        return Accuracy::ZERO;
    }
    let count = count as u64;
    Accuracy::from_percent(((2 * sum + count) / (2 * count)).min(100) as u8)
}

/// `m:ss`
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Practitioner level for set recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl PracticeLevel {
    /// One set is two cycles, roughly two minutes
    pub const SET_DURATION: Duration = Duration::from_secs(120);

    pub fn all() -> &'static [PracticeLevel] {
        &[PracticeLevel::Beginner, PracticeLevel::Intermediate, PracticeLevel::Advanced]
    }

    pub fn recommended_sets(self) -> RangeInclusive<u32> {
        match self {
            PracticeLevel::Beginner => 2..=4,
            PracticeLevel::Intermediate => 6..=8,
            PracticeLevel::Advanced => 12..=12,
        }
    }

    /// Practice time for the recommended sets
    pub fn recommended_time(self) -> RangeInclusive<Duration> {
        let sets = self.recommended_sets();
        Self::SET_DURATION * *sets.start()..=Self::SET_DURATION * *sets.end()
    }

    pub fn description(self) -> &'static str {
        match self {
            PracticeLevel::Beginner => "Start with 2-4 sets for beginners and teens",
            PracticeLevel::Intermediate => "Intermediate practitioners can do 6-8 sets",
            PracticeLevel::Advanced => "Advanced practitioners often do 12 sets, typically in the morning",
        }
    }
}
