//! Required-speed generation.
//!
//! Each commodity needs a minimum speed its whole path must support. Speeds
//! are drawn per severity from overlapping sub-bands of a configured range,
//! using an injected random generator so runs are reproducible.

mod generator;

pub use generator::{RequiredSpeedGenerator, SpeedRange};
