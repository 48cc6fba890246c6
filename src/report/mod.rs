//! Formatted terminal output: currency values, prediction summaries, and the
//! artifact overview printed by `wsp inspect`.

pub mod format;

pub use format::*;
