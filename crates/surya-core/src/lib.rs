//! SURYA Core - Landmarks, reference poses and pose comparison
//!
//! This crate defines the scoring side of the Sun Salutation coach:
//! - Landmarks delivered by the external pose detector
//! - Joints and the checks applied to them
//! - The static 12-pose reference catalog
//! - The pose comparator and its accuracy/feedback output
//!
//! Capture and inference stay outside; the comparator only consumes a
//! detector frame (or its absence).

pub mod catalog;
pub mod comparator;
pub mod error;
pub mod geometry;
pub mod joint;
pub mod landmark;
pub mod score;

pub use catalog::{Breathing, CatalogEntry, PoseInfo, ReferencePose, POSE_COUNT};
pub use comparator::*;
pub use error::*;
pub use geometry::*;
pub use joint::*;
pub use landmark::*;
pub use score::*;
