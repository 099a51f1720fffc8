//! JSON export of decoded routes.
//!
//! One object per served commodity, keyed by [`CommodityKey::label`]
//! (`"<destination>_<Severity>"`), so repeated runs diff cleanly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{CommodityKey, Route, RoutingSolution, Severity};
use crate::network::NodeId;

/// Exported view of one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExport {
    /// Destination node.
    pub destination: NodeId,
    /// Severity class.
    pub severity: Severity,
    /// Node sequence, origin first.
    pub path: Vec<NodeId>,
    /// Total length in kilometers.
    pub distance_km: f64,
    /// Total travel time in minutes.
    pub time_minutes: f64,
    /// Route cost.
    pub cost: f64,
    /// Required speed in km/h.
    pub required_speed_kmh: f64,
    /// Number of road segments.
    pub num_segments: usize,
    /// Selected arcs left out of the path and its metrics.
    pub detached_arcs: usize,
}

impl From<&Route> for RouteExport {
    fn from(route: &Route) -> Self {
        let CommodityKey {
            destination,
            severity,
        } = route.commodity();
        Self {
            destination,
            severity,
            path: route.nodes().to_vec(),
            distance_km: route.metrics().distance_km,
            time_minutes: route.metrics().time_minutes(),
            cost: route.metrics().cost,
            required_speed_kmh: route.required_speed(),
            num_segments: route.num_segments(),
            detached_arcs: route.detached_arcs(),
        }
    }
}

/// Routes keyed by commodity label.
pub type SolutionExport = BTreeMap<String, RouteExport>;

/// Builds the export map; unserved commodities are omitted.
pub fn export_solution(solution: &RoutingSolution) -> SolutionExport {
    solution
        .routes()
        .iter()
        .map(|r| (r.commodity().label(), RouteExport::from(r)))
        .collect()
}

/// Serializes the export map as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use emergency_routing::export::to_json;
/// use emergency_routing::models::RoutingSolution;
///
/// assert_eq!(to_json(&RoutingSolution::new(0.0)).unwrap(), "{}");
/// ```
pub fn to_json(solution: &RoutingSolution) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&export_solution(solution))
}
