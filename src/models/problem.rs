//! Problem instance: one origin, one network snapshot, a commodity set.

use super::{Commodity, CommoditySet};
use crate::error::ProblemError;
use crate::network::{NodeId, RoadNetwork};

/// A self-contained routing problem.
///
/// Owns its network snapshot and commodity set so independent instances can
/// be built and solved on separate threads. Immutable once constructed.
///
/// Reachability of destinations is not checked here; an unreachable
/// destination surfaces as an infeasible solve.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use emergency_routing::models::{CommoditySet, CostRates, EmergencyRequest, ProblemInstance, Severity};
/// use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
///
/// let net = RoadNetwork::from_records(
///     vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.001)],
///     vec![ArcRecord::new(1, 2, 0).with_length(100.0).with_travel_time(7.2).with_capacity(50.0)],
/// ).unwrap();
/// let requests = [EmergencyRequest::new(2, Severity::Low)];
/// let speeds: HashMap<_, _> = requests.iter().map(|r| (r.key(), 20.0)).collect();
/// let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &speeds).unwrap();
///
/// let instance = ProblemInstance::new(net, NodeId(1), set).unwrap();
/// assert_eq!(instance.num_commodities(), 1);
/// assert_eq!(instance.destination_index(0), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    network: RoadNetwork,
    origin: usize,
    destinations: Vec<usize>,
    commodities: CommoditySet,
}

impl ProblemInstance {
    /// Binds a commodity set to a network and origin.
    pub fn new(
        network: RoadNetwork,
        origin: NodeId,
        commodities: CommoditySet,
    ) -> Result<Self, ProblemError> {
        if commodities.is_empty() {
            return Err(ProblemError::NoRequests);
        }
        let origin_idx = network
            .node_index(origin)
            .ok_or(ProblemError::UnknownOrigin(origin))?;

        let mut destinations = Vec::with_capacity(commodities.len());
        for commodity in &commodities {
            let dest = commodity.destination();
            let idx = network
                .node_index(dest)
                .ok_or(ProblemError::UnknownDestination(dest))?;
            if idx == origin_idx {
                return Err(ProblemError::DestinationIsOrigin(dest));
            }
            destinations.push(idx);
        }

        Ok(Self {
            network,
            origin: origin_idx,
            destinations,
            commodities,
        })
    }

    /// Network snapshot.
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Origin node index.
    pub fn origin_index(&self) -> usize {
        self.origin
    }

    /// Origin node identifier.
    pub fn origin(&self) -> NodeId {
        self.network.node(self.origin).id()
    }

    /// Commodity set.
    pub fn commodities(&self) -> &CommoditySet {
        &self.commodities
    }

    /// Commodity at index `k`.
    pub fn commodity(&self, k: usize) -> &Commodity {
        self.commodities.get(k)
    }

    /// Number of commodities.
    pub fn num_commodities(&self) -> usize {
        self.commodities.len()
    }

    /// Destination node index of commodity `k`.
    pub fn destination_index(&self, k: usize) -> usize {
        self.destinations[k]
    }

    /// Flow balance `b(n)` of node `node` for commodity `k`:
    /// `+1` at the origin, `-1` at the destination, `0` elsewhere.
    pub fn balance(&self, k: usize, node: usize) -> f64 {
        if node == self.origin {
            1.0
        } else if node == self.destinations[k] {
            -1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRates, EmergencyRequest, Severity};
    use crate::network::{ArcRecord, Node};
    use std::collections::HashMap;

    fn network() -> RoadNetwork {
        RoadNetwork::from_records(
            vec![
                Node::new(1, 0.0, 0.0),
                Node::new(2, 0.0, 0.0),
                Node::new(3, 0.0, 0.0),
            ],
            vec![ArcRecord::new(1, 2, 0)
                .with_length(10.0)
                .with_travel_time(1.0)
                .with_capacity(40.0)],
        )
        .expect("valid")
    }

    fn set(requests: &[EmergencyRequest]) -> CommoditySet {
        let speeds: HashMap<_, _> = requests.iter().map(|r| (r.key(), 20.0)).collect();
        CommoditySet::with_required_speeds(requests, &CostRates::default(), &speeds)
            .expect("valid")
    }

    #[test]
    fn test_balance() {
        let inst = ProblemInstance::new(
            network(),
            NodeId(1),
            set(&[EmergencyRequest::new(2, Severity::Low)]),
        )
        .expect("valid");
        assert_eq!(inst.balance(0, 0), 1.0);
        assert_eq!(inst.balance(0, 1), -1.0);
        assert_eq!(inst.balance(0, 2), 0.0);
        assert_eq!(inst.origin(), NodeId(1));
    }

    #[test]
    fn test_unknown_origin() {
        let err = ProblemInstance::new(
            network(),
            NodeId(99),
            set(&[EmergencyRequest::new(2, Severity::Low)]),
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::UnknownOrigin(NodeId(99)));
    }

    #[test]
    fn test_unknown_destination() {
        let err = ProblemInstance::new(
            network(),
            NodeId(1),
            set(&[EmergencyRequest::new(7, Severity::Low)]),
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::UnknownDestination(NodeId(7)));
    }

    #[test]
    fn test_destination_equals_origin() {
        let err = ProblemInstance::new(
            network(),
            NodeId(1),
            set(&[EmergencyRequest::new(1, Severity::Critical)]),
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::DestinationIsOrigin(NodeId(1)));
    }

    #[test]
    fn test_unreachable_destination_accepted() {
        // Node 3 has no incoming arc; rejection is left to the solver.
        let inst = ProblemInstance::new(
            network(),
            NodeId(1),
            set(&[EmergencyRequest::new(3, Severity::Low)]),
        );
        assert!(inst.is_ok());
    }
}
