//! SURYA Session - Guided Sun Salutation practice
//!
//! The controller walks a practitioner through the 12-pose sequence:
//! - Detections are scored against the pose under the cursor
//! - A pose counts as held after enough consecutive correct scoring ticks
//! - Held poses advance the cursor after a short grace delay
//! - Cycles and sets roll over without end until the user stops
//!
//! Timers are explicit scheduler entries drained by `tick(now)`, so the
//! controller runs identically under a real clock ([`SessionDriver`])
//! and under simulated time.

pub mod config;
pub mod controller;
pub mod driver;
pub mod log;
pub mod scheduler;
pub mod source;
pub mod state;
pub mod stats;

pub use config::*;
pub use controller::*;
pub use driver::*;
pub use log::*;
pub use scheduler::*;
pub use source::*;
pub use state::*;
pub use stats::*;
