//! # emergency-routing
//!
//! Emergency response routing as a multi-commodity binary integer program.
//! Each request (destination, severity) becomes a commodity that needs one
//! path from a shared origin; every arc on that path must support the
//! commodity's required speed, and the total severity-weighted travel time
//! is minimized.
//!
//! ## Modules
//!
//! - [`network`] — Road network model (nodes, arcs with length, time and speed capacity)
//! - [`models`] — Severity, commodities, problem instance, routes and solution
//! - [`speed`] — Required-speed generation from per-severity bands
//! - [`formulation`] — Variable index, objective and constraint rows
//! - [`solver`] — Backend seam, `microlp` backend, time-budgeted sessions
//! - [`evaluation`] — Path decoding and route auditing
//! - [`export`] — JSON export of decoded routes
//! - [`config`] — Engine configuration
//! - [`engine`] — End-to-end orchestration
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use emergency_routing::{EngineConfig, EmergencyRequest, RoutingEngine, Severity, SolveStatus};
//! use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
//!
//! let net = RoadNetwork::from_records(
//!     vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.01), Node::new(3, 0.01, 0.01)],
//!     vec![
//!         ArcRecord::new(1, 2, 0).with_length(1100.0).with_travel_time(80.0).with_capacity(90.0),
//!         ArcRecord::new(2, 3, 0).with_length(1100.0).with_travel_time(80.0).with_capacity(90.0),
//!     ],
//! ).unwrap();
//!
//! let engine = RoutingEngine::new(EngineConfig::default().with_seed(7)).unwrap();
//! let requests = [
//!     EmergencyRequest::new(3, Severity::Critical),
//!     EmergencyRequest::new(2, Severity::Low),
//! ];
//! let instance = engine.prepare(net, NodeId(1), &requests).unwrap();
//! let report = engine.solve(&instance).unwrap();
//!
//! assert_eq!(report.outcome().status(), SolveStatus::Optimal);
//! let json = emergency_routing::export::to_json(report.solution().unwrap()).unwrap();
//! assert!(json.contains("3_Critical"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod formulation;
pub mod models;
pub mod network;
pub mod solver;
pub mod speed;

pub use config::EngineConfig;
pub use engine::{RoutingEngine, RunReport};
pub use error::RoutingError;
pub use models::{EmergencyRequest, Severity};
pub use solver::SolveStatus;
