//! Tokio driver for a live session
//!
//! One task serializes the three mutation sources (detections, the
//! scoring interval and cancellation) onto the shared controller.

use std::sync::Arc;

use parking_lot::Mutex;
use surya_core::Detection;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::controller::{SessionController, SessionOutcome};

/// Frames buffered between the detector and the controller
pub const DETECTION_BUFFER: usize = 32;

/// Handle used by the detector to push frames
pub type DetectionFeed = mpsc::Sender<Option<Detection>>;

/// Runs a started controller on the tokio clock
pub struct SessionDriver {
    controller: Arc<Mutex<SessionController>>,
    feed: DetectionFeed,
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SessionDriver {
    /// Spawn the driver task. Must be called from within a tokio runtime.
    pub fn spawn(controller: Arc<Mutex<SessionController>>) -> Self {
        let period = controller.lock().scoring_interval();
        let (feed, mut frames) = mpsc::channel(DETECTION_BUFFER);
        let (cancel, mut cancelled) = watch::channel(false);

        let shared = controller.clone();
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut feed_open = true;

            loop {
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = interval.tick() => {
                        shared.lock().tick(Instant::now().into_std());
                    }
                    frame = frames.recv(), if feed_open => match frame {
                        Some(detection) => {
                            shared.lock().on_detection(detection, Instant::now().into_std());
                        }
                        None => feed_open = false,
                    },
                }
            }
            tracing::debug!("Session driver stopped");
        });

        SessionDriver {
            controller,
            feed,
            cancel,
            task: Some(task),
        }
    }

    /// Sender for detector frames
    pub fn feed(&self) -> DetectionFeed {
        self.feed.clone()
    }

    /// Push one frame. Returns false once the driver has stopped.
    pub async fn submit(&self, detection: Option<Detection>) -> bool {
        self.feed.send(detection).await.is_ok()
    }

    pub fn controller(&self) -> &Arc<Mutex<SessionController>> {
        &self.controller
    }

    /// Cancel the task, wait for it, then finalize the session
    pub async fn stop(mut self) -> Option<SessionOutcome> {
        let _ = self.cancel.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Session driver task failed: {}", e);
            }
        }
        let now = Instant::now().into_std();
        self.controller.lock().stop(now)
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
