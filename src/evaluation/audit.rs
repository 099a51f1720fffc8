//! Independent feasibility check of decoded routes.

use crate::models::{ProblemInstance, Route};
use crate::network::{ArcId, NodeId};

/// Kind of route violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route does not start at the origin.
    WrongStart {
        /// First node of the route.
        found: NodeId,
    },
    /// Route does not end at the commodity's destination.
    WrongEnd {
        /// Last node of the route.
        found: NodeId,
    },
    /// Consecutive nodes are not joined by the listed arc.
    Disconnected {
        /// Position of the offending arc in the route.
        position: usize,
    },
    /// Arc is not part of the network.
    UnknownArc(ArcId),
    /// Arc capacity is below the commodity's required speed.
    SpeedExceedsCapacity {
        /// Offending arc.
        arc: ArcId,
        /// Required speed in km/h.
        required: f64,
        /// Arc capacity in km/h.
        capacity: f64,
    },
    /// The commodity is not part of the instance.
    UnknownCommodity,
}

/// A route constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks a route against the instance it was decoded from.
///
/// An empty result means the route starts at the origin, ends at its
/// destination, is arc-connected, and every arc admits the commodity's
/// required speed.
pub fn audit_route(instance: &ProblemInstance, route: &Route) -> Vec<Violation> {
    let mut violations = Vec::new();
    let net = instance.network();

    let Some(k) = instance.commodities().position(route.commodity()) else {
        violations.push(Violation::new(ViolationType::UnknownCommodity));
        return violations;
    };
    let required = instance.commodity(k).required_speed();

    if route.start() != instance.origin() {
        violations.push(Violation::new(ViolationType::WrongStart {
            found: route.start(),
        }));
    }
    if route.end() != route.commodity().destination {
        violations.push(Violation::new(ViolationType::WrongEnd { found: route.end() }));
    }

    for (position, &id) in route.arcs().iter().enumerate() {
        if id.tail != route.nodes()[position] || id.head != route.nodes()[position + 1] {
            violations.push(Violation::new(ViolationType::Disconnected { position }));
        }
        match net.arc_index(id) {
            None => violations.push(Violation::new(ViolationType::UnknownArc(id))),
            Some(a) => {
                let arc = net.arc(a);
                if !arc.admits(required) {
                    violations.push(Violation::new(ViolationType::SpeedExceedsCapacity {
                        arc: id,
                        required,
                        capacity: arc.capacity(),
                    }));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::models::{CommodityKey, CommoditySet, CostRates, EmergencyRequest, RouteMetrics, Severity};
    use crate::network::{ArcRecord, Node, RoadNetwork};

    fn instance(speed: f64) -> ProblemInstance {
        let net = RoadNetwork::from_records(
            (1..=3).map(|i| Node::new(i, 0.0, 0.0)).collect(),
            vec![
                ArcRecord::new(1, 2, 0).with_length(100.0).with_travel_time(10.0).with_capacity(50.0),
                ArcRecord::new(2, 3, 0).with_length(100.0).with_travel_time(10.0).with_capacity(30.0),
            ],
        )
        .expect("valid");
        let requests = [EmergencyRequest::new(3, Severity::Medium)];
        let speeds: HashMap<CommodityKey, f64> = requests.iter().map(|r| (r.key(), speed)).collect();
        let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &speeds)
            .expect("valid");
        ProblemInstance::new(net, NodeId(1), set).expect("valid")
    }

    fn route(speed: f64) -> Route {
        Route::new(
            CommodityKey::new(NodeId(3), Severity::Medium),
            speed,
            vec![NodeId(1), NodeId(2), NodeId(3)],
            vec![
                ArcId::new(NodeId(1), NodeId(2), 0),
                ArcId::new(NodeId(2), NodeId(3), 0),
            ],
            RouteMetrics::from_totals(200.0, 20.0, 250.0),
        )
    }

    #[test]
    fn test_valid_route_has_no_violations() {
        assert!(audit_route(&instance(30.0), &route(30.0)).is_empty());
    }

    #[test]
    fn test_speed_above_capacity_flagged() {
        let v = audit_route(&instance(40.0), &route(40.0));
        assert_eq!(v.len(), 1);
        assert!(matches!(
            v[0].kind,
            ViolationType::SpeedExceedsCapacity { capacity, .. } if capacity == 30.0
        ));
    }

    #[test]
    fn test_wrong_endpoints_and_unknown_arc() {
        let bad = Route::new(
            CommodityKey::new(NodeId(3), Severity::Medium),
            30.0,
            vec![NodeId(2), NodeId(1)],
            vec![ArcId::new(NodeId(2), NodeId(1), 0)],
            RouteMetrics::from_totals(0.0, 0.0, 0.0),
        );
        let kinds: Vec<_> = audit_route(&instance(30.0), &bad)
            .into_iter()
            .map(|v| v.kind)
            .collect();
        assert!(kinds.contains(&ViolationType::WrongStart { found: NodeId(2) }));
        assert!(kinds.contains(&ViolationType::WrongEnd { found: NodeId(1) }));
        assert!(kinds.contains(&ViolationType::UnknownArc(ArcId::new(NodeId(2), NodeId(1), 0))));
    }

    #[test]
    fn test_foreign_commodity() {
        let foreign = Route::new(
            CommodityKey::new(NodeId(3), Severity::Low),
            30.0,
            vec![NodeId(1), NodeId(2), NodeId(3)],
            route(30.0).arcs().to_vec(),
            RouteMetrics::from_totals(0.0, 0.0, 0.0),
        );
        let v = audit_route(&instance(30.0), &foreign);
        assert_eq!(v, vec![Violation::new(ViolationType::UnknownCommodity)]);
    }
}
