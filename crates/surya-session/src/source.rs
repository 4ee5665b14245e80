//! Landmark source lifecycle
//!
//! Camera capture and pose inference run on the host. The controller
//! only needs to open the device when a session starts and release it
//! when the session stops; frames arrive through `on_detection`.

use surya_core::SuryaError;
use thiserror::Error;

/// Capture device could not be acquired
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CaptureError(pub String);

impl From<CaptureError> for SuryaError {
    fn from(e: CaptureError) -> Self {
        SuryaError::Capture(e.0)
    }
}

/// External producer of detector frames
pub trait LandmarkSource: Send {
    /// Acquire the capture device
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Release the capture device. Called at most once per `open`.
    fn close(&mut self);
}

/// Source for hosts that manage capture themselves and only push frames
#[derive(Debug, Default, Clone, Copy)]
pub struct PushSource;

impl LandmarkSource for PushSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn close(&mut self) {}
}
