//! Read-only road-network model.
//!
//! A directed multigraph whose arcs carry length, travel time and a speed
//! capacity. Provider data arrives as [`Node`] and [`ArcRecord`] values and is
//! validated once into a [`RoadNetwork`] snapshot with compact indices.

mod arc;
mod graph;
mod node;

pub use arc::{Arc, ArcId, ArcRecord};
pub use graph::RoadNetwork;
pub use node::{Node, NodeId};
