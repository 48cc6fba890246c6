//! `weekly-sales` library crate.
//!
//! The binary (`wsp`) is a thin wrapper around this library so that:
//!
//! - the encode/align/predict pipeline is testable without a terminal
//! - the form and the one-shot CLI share exactly the same code path

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
