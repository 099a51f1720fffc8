//! Domain model types for emergency routing.
//!
//! Severity classes and cost rates, routing requests collapsed into
//! commodities, the problem instance that binds them to a network, and the
//! routes and solution produced by decoding.

mod commodity;
mod problem;
mod route;
mod severity;
mod solution;

pub use commodity::{Commodity, CommodityKey, CommoditySet, EmergencyRequest};
pub use problem::ProblemInstance;
pub use route::{Route, RouteMetrics};
pub use severity::{CostRates, ParseSeverityError, Severity};
pub use solution::RoutingSolution;
