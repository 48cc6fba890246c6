//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the bounded form fields and their ranges (`Field`, `FieldRange`)
//! - the raw per-request record (`RawInput`, `HolidayFlag`)
//! - the resolved runtime configuration (`AppConfig`)

pub mod types;

pub use types::*;
