//! Directed road segments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::error::NetworkError;

/// Identity of a directed arc: `(tail, head, key)`.
///
/// `key` discriminates parallel arcs between the same ordered node pair.
///
/// # Examples
///
/// ```
/// use emergency_routing::network::{ArcId, NodeId};
///
/// let a = ArcId::new(NodeId(1), NodeId(2), 0);
/// let b = ArcId::new(NodeId(1), NodeId(2), 1);
/// assert_ne!(a, b);
/// assert_eq!(a.to_string(), "1->2#0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArcId {
    /// Tail node.
    pub tail: NodeId,
    /// Head node.
    pub head: NodeId,
    /// Parallel-arc discriminator.
    pub key: u32,
}

impl ArcId {
    /// Creates an arc identity.
    pub fn new(tail: NodeId, head: NodeId, key: u32) -> Self {
        Self { tail, head, key }
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}#{}", self.tail, self.head, self.key)
    }
}

/// Raw arc data as delivered by a network provider.
///
/// Attributes are optional here; [`RoadNetwork::from_records`](super::RoadNetwork::from_records)
/// rejects any record that lacks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcRecord {
    /// Tail node.
    pub tail: NodeId,
    /// Head node.
    pub head: NodeId,
    /// Parallel-arc discriminator.
    #[serde(default)]
    pub key: u32,
    /// Length in meters.
    pub length: Option<f64>,
    /// Travel time in seconds.
    pub travel_time: Option<f64>,
    /// Maximum safe speed in km/h.
    pub capacity: Option<f64>,
}

impl ArcRecord {
    /// Creates a record with no attributes set.
    pub fn new(tail: impl Into<NodeId>, head: impl Into<NodeId>, key: u32) -> Self {
        Self {
            tail: tail.into(),
            head: head.into(),
            key,
            length: None,
            travel_time: None,
            capacity: None,
        }
    }

    /// Sets the length in meters.
    pub fn with_length(mut self, meters: f64) -> Self {
        self.length = Some(meters);
        self
    }

    /// Sets the travel time in seconds.
    pub fn with_travel_time(mut self, seconds: f64) -> Self {
        self.travel_time = Some(seconds);
        self
    }

    /// Sets the speed capacity in km/h.
    pub fn with_capacity(mut self, kmh: f64) -> Self {
        self.capacity = Some(kmh);
        self
    }

    /// Identity of this record.
    pub fn id(&self) -> ArcId {
        ArcId::new(self.tail, self.head, self.key)
    }

    /// Validates attributes and binds the record to resolved node indices.
    pub(crate) fn validate(&self, tail: usize, head: usize) -> Result<Arc, NetworkError> {
        let id = self.id();
        let length = require(id, "length", self.length)?;
        let travel_time = require(id, "travel_time", self.travel_time)?;
        let capacity = require(id, "capacity", self.capacity)?;

        if length < 0.0 {
            return Err(invalid(id, "length", length));
        }
        if travel_time < 0.0 {
            return Err(invalid(id, "travel_time", travel_time));
        }
        if capacity <= 0.0 {
            return Err(invalid(id, "capacity", capacity));
        }

        Ok(Arc {
            id,
            tail,
            head,
            length,
            travel_time,
            capacity,
        })
    }
}

fn require(arc: ArcId, attribute: &'static str, value: Option<f64>) -> Result<f64, NetworkError> {
    match value {
        None => Err(NetworkError::MissingAttribute { arc, attribute }),
        Some(v) if !v.is_finite() => Err(invalid(arc, attribute, v)),
        Some(v) => Ok(v),
    }
}

fn invalid(arc: ArcId, attribute: &'static str, value: f64) -> NetworkError {
    NetworkError::InvalidAttribute {
        arc,
        attribute,
        value,
    }
}

/// A validated arc inside a [`RoadNetwork`](super::RoadNetwork).
///
/// `tail`/`head` are compact node indices into the owning network.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    id: ArcId,
    tail: usize,
    head: usize,
    length: f64,
    travel_time: f64,
    capacity: f64,
}

impl Arc {
    /// Provider identity of this arc.
    pub fn id(&self) -> ArcId {
        self.id
    }

    /// Tail node index.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Head node index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Length in meters.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Travel time in seconds.
    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    /// Maximum safe speed in km/h.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns `true` if a commodity requiring `speed` km/h may use this arc.
    pub fn admits(&self, speed: f64) -> bool {
        speed <= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(tail: u64, head: u64) -> ArcRecord {
        ArcRecord::new(tail, head, 0)
            .with_length(120.0)
            .with_travel_time(9.0)
            .with_capacity(50.0)
    }

    #[test]
    fn test_validate_ok() {
        let arc = full(1, 2).validate(0, 1).expect("valid");
        assert_eq!(arc.tail(), 0);
        assert_eq!(arc.head(), 1);
        assert_eq!(arc.length(), 120.0);
        assert_eq!(arc.travel_time(), 9.0);
        assert_eq!(arc.capacity(), 50.0);
        assert!(arc.admits(50.0));
        assert!(!arc.admits(50.1));
    }

    #[test]
    fn test_validate_missing_capacity() {
        let mut rec = full(1, 2);
        rec.capacity = None;
        let err = rec.validate(0, 1).unwrap_err();
        assert_eq!(
            err,
            NetworkError::MissingAttribute {
                arc: ArcId::new(NodeId(1), NodeId(2), 0),
                attribute: "capacity",
            }
        );
    }

    #[test]
    fn test_validate_missing_length_reported_first() {
        let rec = ArcRecord::new(3, 4, 2);
        assert!(matches!(
            rec.validate(0, 1),
            Err(NetworkError::MissingAttribute {
                attribute: "length",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            full(1, 2).with_capacity(0.0).validate(0, 1),
            Err(NetworkError::InvalidAttribute {
                attribute: "capacity",
                ..
            })
        ));
        assert!(matches!(
            full(1, 2).with_length(-1.0).validate(0, 1),
            Err(NetworkError::InvalidAttribute {
                attribute: "length",
                ..
            })
        ));
        assert!(matches!(
            full(1, 2).with_travel_time(f64::NAN).validate(0, 1),
            Err(NetworkError::InvalidAttribute {
                attribute: "travel_time",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_length_and_time_allowed() {
        let arc = full(1, 2)
            .with_length(0.0)
            .with_travel_time(0.0)
            .validate(0, 1)
            .expect("valid");
        assert_eq!(arc.travel_time(), 0.0);
    }
}
