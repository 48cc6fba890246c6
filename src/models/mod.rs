//! Trained regression models loaded from the training side's JSON artifact.
//!
//! Models are plain data (`serde`) with a single inference entry point,
//! `ModelArtifact::predict`, so the rest of the crate never needs to know which
//! model kind was trained.

pub mod model;

pub use model::*;
