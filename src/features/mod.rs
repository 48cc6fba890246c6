//! Feature preparation: date check, indicator encoding, schema alignment.
//!
//! The three steps are independent pure functions so each can be tested on its
//! own. `app::pipeline` chains them together.

pub mod align;
pub mod date;
pub mod encode;

pub use align::*;
pub use date::*;
pub use encode::*;
