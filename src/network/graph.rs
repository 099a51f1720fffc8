//! Validated road-network snapshot.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{Arc, ArcId, ArcRecord, Node, NodeId};
use crate::error::NetworkError;

/// Immutable directed multigraph with per-arc length, travel time and capacity.
///
/// Nodes and arcs are addressed by compact indices (`0..num_nodes`,
/// `0..num_arcs`) in provider order. Each node keeps its outgoing and
/// incoming arc lists so conservation rows are built in O(|arcs|).
///
/// # Examples
///
/// ```
/// use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
///
/// let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.001)];
/// let arcs = vec![ArcRecord::new(1, 2, 0)
///     .with_length(110.0)
///     .with_travel_time(8.0)
///     .with_capacity(50.0)];
/// let net = RoadNetwork::from_records(nodes, arcs).unwrap();
/// assert_eq!(net.num_nodes(), 2);
/// assert_eq!(net.num_arcs(), 1);
/// let origin = net.node_index(NodeId(1)).unwrap();
/// assert_eq!(net.outgoing(origin).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    arcs: Vec<Arc>,
    arc_index: HashMap<ArcId, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl RoadNetwork {
    /// Validates provider data into a network snapshot.
    ///
    /// Fails fast on the first malformed record, naming the offending arc.
    pub fn from_records(nodes: Vec<Node>, arcs: Vec<ArcRecord>) -> Result<Self, NetworkError> {
        let mut node_index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id(), idx).is_some() {
                return Err(NetworkError::DuplicateNode(node.id()));
            }
        }

        let mut validated = Vec::with_capacity(arcs.len());
        let mut arc_index = HashMap::with_capacity(arcs.len());
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];

        for record in &arcs {
            let id = record.id();
            let tail = *node_index
                .get(&record.tail)
                .ok_or(NetworkError::UnknownNode {
                    arc: id,
                    node: record.tail,
                })?;
            let head = *node_index
                .get(&record.head)
                .ok_or(NetworkError::UnknownNode {
                    arc: id,
                    node: record.head,
                })?;
            let arc = record.validate(tail, head)?;

            let idx = validated.len();
            if arc_index.insert(id, idx).is_some() {
                return Err(NetworkError::DuplicateArc(id));
            }
            outgoing[tail].push(idx);
            incoming[head].push(idx);
            validated.push(arc);
        }

        debug!(
            nodes = nodes.len(),
            arcs = validated.len(),
            "road network snapshot validated"
        );

        Ok(Self {
            nodes,
            node_index,
            arcs: validated,
            arc_index,
            outgoing,
            incoming,
        })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All arcs in index order.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Node at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Arc at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn arc(&self, idx: usize) -> &Arc {
        &self.arcs[idx]
    }

    /// Compact index of a node identifier.
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    /// Compact index of an arc identity.
    pub fn arc_index(&self, id: ArcId) -> Option<usize> {
        self.arc_index.get(&id).copied()
    }

    /// Indices of arcs leaving node `idx`.
    pub fn outgoing(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Indices of arcs entering node `idx`.
    pub fn incoming(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    /// Node indices reachable from `from` using only arcs that admit `speed`.
    ///
    /// Diagnostic helper; the optimizer itself never pre-checks reachability.
    pub fn reachable_at_speed(&self, from: usize, speed: f64) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        seen.insert(from);
        while let Some(n) = stack.pop() {
            for &a in &self.outgoing[n] {
                let arc = &self.arcs[a];
                if arc.admits(speed) && seen.insert(arc.head()) {
                    stack.push(arc.head());
                }
            }
        }
        seen
    }
}
