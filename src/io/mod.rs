//! Input/output helpers.
//!
//! - training column list read + validation (`schema`)
//! - model artifact read + the load-once `ArtifactContext` (`artifacts`)

pub mod artifacts;
pub mod schema;

pub use artifacts::*;
pub use schema::*;
