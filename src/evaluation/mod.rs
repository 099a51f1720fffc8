//! Solution decoding and route auditing.
//!
//! Converts an optimal arc-selection assignment into ordered routes with
//! distance, time and cost, and re-checks routes against the instance.

mod audit;
mod decoder;

pub use audit::{audit_route, Violation, ViolationType};
pub use decoder::{SolutionDecoder, SELECTION_THRESHOLD};
