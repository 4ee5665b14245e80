//! SURYA Test Harness - Simulation and validation tools
//!
//! This crate provides:
//! - A seeded synthetic detector with posture and noise models
//! - A session simulator running the controller on virtual time
//! - Tracing setup for tests and host binaries

pub mod detector;
pub mod session_simulator;

pub use detector::*;
pub use session_simulator::*;

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
