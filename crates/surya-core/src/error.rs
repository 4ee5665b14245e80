//! Error types for SURYA

use thiserror::Error;

/// Core SURYA errors
#[derive(Error, Debug)]
pub enum SuryaError {
    // Catalog errors
    #[error("Pose not found: index {0} (catalog holds 0..=11)")]
    PoseNotFound(usize),

    // Capture errors
    #[error("Capture device failure: {0}")]
    Capture(String),

    // Session errors
    #[error("Session already active")]
    SessionActive,

    // Session log errors
    #[error("Session log I/O error: {0}")]
    LogIo(#[from] std::io::Error),

    #[error("Session log format error: {0}")]
    LogFormat(String),
}

/// Result type for SURYA operations
pub type SuryaResult<T> = Result<T, SuryaError>;
