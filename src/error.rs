//! Error taxonomy.
//!
//! Infeasibility and time-budget exhaustion are solve *outcomes*
//! ([`SolveStatus`](crate::solver::SolveStatus)), not errors. Everything here
//! is a defect in the inputs, the backend, or the decoded assignment.

use thiserror::Error;

use crate::evaluation::Violation;
use crate::models::CommodityKey;
use crate::network::{ArcId, NodeId};

/// Malformed road-network data, raised before any variable is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// A required arc attribute was not supplied by the provider.
    #[error("arc {arc} is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// Offending arc.
        arc: ArcId,
        /// Attribute name (`length`, `travel_time` or `capacity`).
        attribute: &'static str,
    },
    /// An arc attribute is out of its admissible domain.
    #[error("arc {arc} has invalid `{attribute}` = {value}")]
    InvalidAttribute {
        /// Offending arc.
        arc: ArcId,
        /// Attribute name.
        attribute: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// An arc endpoint is not a node of the network.
    #[error("arc {arc} references unknown node {node}")]
    UnknownNode {
        /// Offending arc.
        arc: ArcId,
        /// Missing endpoint.
        node: NodeId,
    },
    /// Two arcs share the same (tail, head, key) identity.
    #[error("duplicate arc {0}")]
    DuplicateArc(ArcId),
    /// Two nodes share the same identifier.
    #[error("duplicate node {0}")]
    DuplicateNode(NodeId),
}

/// An invalid problem instance or parameter set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    /// The origin is not a node of the network.
    #[error("origin {0} is not in the network")]
    UnknownOrigin(NodeId),
    /// A request targets a node that is not in the network.
    #[error("destination {0} is not in the network")]
    UnknownDestination(NodeId),
    /// A request targets the origin itself.
    #[error("destination {0} coincides with the origin")]
    DestinationIsOrigin(NodeId),
    /// No routing request was supplied.
    #[error("at least one emergency request is required")]
    NoRequests,
    /// The required-speed range is empty, non-positive or non-finite.
    #[error("invalid speed range [{r_min}, {r_max}]")]
    InvalidSpeedRange {
        /// Lower bound in km/h.
        r_min: f64,
        /// Upper bound in km/h.
        r_max: f64,
    },
    /// A cost rate is negative or non-finite.
    #[error("invalid cost rate {rate} for severity {severity}")]
    InvalidCostRate {
        /// Severity class the rate belongs to.
        severity: crate::models::Severity,
        /// Supplied rate.
        rate: f64,
    },
    /// No required speed was supplied for a commodity.
    #[error("no required speed supplied for commodity {0}")]
    MissingRequiredSpeed(CommodityKey),
    /// A required speed is not strictly positive and finite.
    #[error("invalid required speed {speed} for commodity {commodity}")]
    InvalidRequiredSpeed {
        /// Commodity concerned.
        commodity: CommodityKey,
        /// Supplied speed in km/h.
        speed: f64,
    },
    /// The solve time budget is not strictly positive and finite.
    #[error("invalid time limit {0} s")]
    InvalidTimeLimit(f64),
}

/// Failure of the solver backend itself (as opposed to a solve outcome).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The backend reported an error it could not classify.
    #[error("solver backend `{backend}` failed: {message}")]
    Backend {
        /// Backend name.
        backend: &'static str,
        /// Backend message.
        message: String,
    },
    /// The solver worker terminated without reporting a result.
    #[error("solver worker for `{0}` terminated without a result")]
    WorkerLost(&'static str),
    /// The solver worker thread could not be started.
    #[error("failed to spawn solver worker: {0}")]
    Spawn(String),
}

/// A selected-arc set that cannot be linearized into a single path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// More than one selected arc leaves the same node for one commodity.
    #[error("commodity {commodity}: node {node} has two selected successors ({first} and {second})")]
    BranchingSuccessor {
        /// Commodity concerned.
        commodity: CommodityKey,
        /// Node with two outgoing selections.
        node: NodeId,
        /// First selected arc.
        first: ArcId,
        /// Second selected arc.
        second: ArcId,
    },
    /// The successor chain stops before reaching the destination.
    #[error("commodity {commodity}: path stops at node {node} before reaching the destination")]
    DeadEnd {
        /// Commodity concerned.
        commodity: CommodityKey,
        /// Last node reached.
        node: NodeId,
    },
    /// The successor chain loops back onto a node already on the path.
    #[error("commodity {commodity}: path revisits node {node}")]
    Revisit {
        /// Commodity concerned.
        commodity: CommodityKey,
        /// Revisited node.
        node: NodeId,
    },
    /// The assignment does not match the model's variable count.
    #[error("assignment has {actual} values, model has {expected} variables")]
    AssignmentLength {
        /// Variable count of the model.
        expected: usize,
        /// Length of the supplied assignment.
        actual: usize,
    },
}

/// Any error surfaced by the routing engine.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Malformed network data.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// Invalid instance or parameters.
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// Solver backend failure.
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// Solution decoding failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A decoded route breaks an instance constraint.
    #[error("route for commodity {commodity} fails audit with {} violation(s)", violations.len())]
    RouteAudit {
        /// Commodity whose route was rejected.
        commodity: CommodityKey,
        /// Violations found.
        violations: Vec<Violation>,
    },
    /// JSON export or configuration (de)serialization failure.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_missing_attribute_names_arc() {
        let arc = ArcId::new(NodeId(1), NodeId(2), 0);
        let err = NetworkError::MissingAttribute {
            arc,
            attribute: "capacity",
        };
        let msg = err.to_string();
        assert!(msg.contains("1->2#0"));
        assert!(msg.contains("capacity"));
    }

    #[test]
    fn test_decode_error_names_commodity() {
        let err = DecodeError::DeadEnd {
            commodity: CommodityKey::new(NodeId(9), Severity::Critical),
            node: NodeId(4),
        };
        let msg = err.to_string();
        assert!(msg.contains("9/Critical"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_routing_error_from() {
        let err: RoutingError = ProblemError::NoRequests.into();
        assert!(matches!(err, RoutingError::Problem(ProblemError::NoRequests)));
    }
}
