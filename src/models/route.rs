//! Decoded routes and their metrics.

use serde::Serialize;

use super::CommodityKey;
use crate::network::{ArcId, NodeId};

/// Metrics derived from the arcs of one route.
///
/// # Examples
///
/// ```
/// use emergency_routing::models::RouteMetrics;
///
/// // 2 km in 180 s at 500/h
/// let m = RouteMetrics::from_totals(2000.0, 180.0, 500.0);
/// assert!((m.distance_km - 2.0).abs() < 1e-10);
/// assert!((m.time_minutes() - 3.0).abs() < 1e-10);
/// assert!((m.cost - 25.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMetrics {
    /// Total length in kilometers.
    pub distance_km: f64,
    /// Total travel time in seconds.
    pub time_seconds: f64,
    /// `cost_rate × time_seconds / 3600`.
    pub cost: f64,
}

impl RouteMetrics {
    /// Derives metrics from summed length (m), summed time (s) and an hourly rate.
    pub fn from_totals(length_m: f64, time_seconds: f64, cost_rate: f64) -> Self {
        Self {
            distance_km: length_m / 1000.0,
            time_seconds,
            cost: cost_rate * (time_seconds / 3600.0),
        }
    }

    /// Total travel time in minutes.
    pub fn time_minutes(&self) -> f64 {
        self.time_seconds / 60.0
    }
}

/// The path served to one commodity, origin first, destination last.
///
/// Routes are produced by decoding, which guarantees one more node than
/// arcs; they cannot be assembled outside the crate.
///
/// ```compile_fail
/// use emergency_routing::models::{CommodityKey, Route, RouteMetrics, Severity};
/// use emergency_routing::network::NodeId;
///
/// let _ = Route::new(
///     CommodityKey::new(NodeId(2), Severity::Low),
///     30.0,
///     vec![],
///     vec![],
///     RouteMetrics::from_totals(0.0, 0.0, 0.0),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    commodity: CommodityKey,
    required_speed: f64,
    nodes: Vec<NodeId>,
    arcs: Vec<ArcId>,
    metrics: RouteMetrics,
    detached_arcs: usize,
}

impl Route {
    /// Creates a route.
    ///
    /// `nodes` has one more element than `arcs`.
    pub(crate) fn new(
        commodity: CommodityKey,
        required_speed: f64,
        nodes: Vec<NodeId>,
        arcs: Vec<ArcId>,
        metrics: RouteMetrics,
    ) -> Self {
        debug_assert_eq!(nodes.len(), arcs.len() + 1);
        Self {
            commodity,
            required_speed,
            nodes,
            arcs,
            metrics,
            detached_arcs: 0,
        }
    }

    /// Records selected arcs that were not part of the origin-destination chain.
    pub fn with_detached_arcs(mut self, count: usize) -> Self {
        self.detached_arcs = count;
        self
    }

    /// Commodity served.
    pub fn commodity(&self) -> CommodityKey {
        self.commodity
    }

    /// Required speed of the commodity in km/h.
    pub fn required_speed(&self) -> f64 {
        self.required_speed
    }

    /// Ordered node sequence.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Ordered arc sequence.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Number of road segments.
    pub fn num_segments(&self) -> usize {
        self.arcs.len()
    }

    /// Route metrics.
    pub fn metrics(&self) -> &RouteMetrics {
        &self.metrics
    }

    /// Selected arcs outside the path (zero-cost cycles); normally 0.
    pub fn detached_arcs(&self) -> usize {
        self.detached_arcs
    }

    /// First node (the origin).
    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    /// Last node (the destination).
    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }
}
