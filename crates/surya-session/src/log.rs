//! Session log - persisted summaries of finished sessions

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use surya_core::{Accuracy, Grade, Landmark, SuryaError, SuryaResult};

/// One finished session, as stored in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub pose_index: usize,
    pub pose_name: String,
    pub accuracy_score: Accuracy,
    /// At most `max_summary_mistakes` distinct corrections
    #[serde(default)]
    pub mistakes: Vec<String>,
    /// Whole seconds
    pub session_duration: u64,
    /// Last captured landmark snapshot
    #[serde(default)]
    pub user_keypoints: Vec<Landmark>,
}

/// Payload handed to the results view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPayload {
    pub accuracy: Accuracy,
    pub pose_name: String,
    pub duration: u64,
    pub mistakes: Vec<String>,
}

impl ResultsPayload {
    pub fn grade(&self) -> Grade {
        self.accuracy.grade()
    }

    pub fn message(&self) -> &'static str {
        self.accuracy.results_message()
    }
}

/// Append-only store of session summaries
pub trait SessionLog: Send {
    fn append(&mut self, summary: SessionSummary) -> SuryaResult<()>;

    fn load(&self) -> SuryaResult<Vec<SessionSummary>>;
}

/// In-process log
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    entries: Vec<SessionSummary>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SessionSummary] {
        &self.entries
    }
}

impl SessionLog for MemoryLog {
    fn append(&mut self, summary: SessionSummary) -> SuryaResult<()> {
        self.entries.push(summary);
        Ok(())
    }

    fn load(&self) -> SuryaResult<Vec<SessionSummary>> {
        Ok(self.entries.clone())
    }
}

/// Log kept as a single JSON array on disk.
///
/// A missing or blank file reads as an empty log. Appends rewrite the
/// whole file.
#[derive(Debug, Clone)]
pub struct JsonFileLog {
    path: PathBuf,
}

impl JsonFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionLog for JsonFileLog {
    fn append(&mut self, summary: SessionSummary) -> SuryaResult<()> {
        let mut entries = self.load()?;
        entries.push(summary);
        let json = serde_json::to_string(&entries).map_err(|e| SuryaError::LogFormat(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> SuryaResult<Vec<SessionSummary>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| SuryaError::LogFormat(e.to_string()))
    }
}
