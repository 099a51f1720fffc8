//! Node identifiers and coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a road-network node.
///
/// # Examples
///
/// ```
/// use emergency_routing::network::NodeId;
///
/// let id = NodeId(42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A road-network node with geographic coordinates.
///
/// Coordinates are carried for collaborators (rendering, reporting); the
/// optimizer only uses the node as a flow-conservation anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    lat: f64,
    lon: f64,
}

impl Node {
    /// Creates a node at the given latitude/longitude.
    pub fn new(id: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let n = Node::new(7, 6.2331, -75.5839);
        assert_eq!(n.id(), NodeId(7));
        assert_eq!(n.lat(), 6.2331);
        assert_eq!(n.lon(), -75.5839);
    }

    #[test]
    fn test_node_id_serde_transparent() {
        let json = serde_json::to_string(&NodeId(12)).expect("serialize");
        assert_eq!(json, "12");
    }
}
