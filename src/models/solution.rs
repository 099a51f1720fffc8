//! Decoded routing solution.

use serde::Serialize;

use super::{CommodityKey, Route};

/// Routes for every served commodity plus the commodities left unserved.
///
/// # Examples
///
/// ```
/// use emergency_routing::models::RoutingSolution;
///
/// let sol = RoutingSolution::new(0.0);
/// assert_eq!(sol.num_served(), 0);
/// assert_eq!(sol.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingSolution {
    routes: Vec<Route>,
    unserved: Vec<CommodityKey>,
    objective: f64,
}

impl RoutingSolution {
    /// Creates an empty solution with the solver-reported objective value.
    pub fn new(objective: f64) -> Self {
        Self {
            routes: Vec::new(),
            unserved: Vec::new(),
            objective,
        }
    }

    /// Adds a served route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a commodity as unserved (empty selected-arc set).
    pub fn add_unserved(&mut self, commodity: CommodityKey) {
        self.unserved.push(commodity);
    }

    /// Served routes in commodity order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route of the given commodity, if served.
    pub fn route(&self, commodity: CommodityKey) -> Option<&Route> {
        self.routes.iter().find(|r| r.commodity() == commodity)
    }

    /// Commodities without a route.
    pub fn unserved(&self) -> &[CommodityKey] {
        &self.unserved
    }

    /// Number of served commodities.
    pub fn num_served(&self) -> usize {
        self.routes.len()
    }

    /// Objective value of the assignment.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Sum of route costs.
    pub fn total_cost(&self) -> f64 {
        self.routes.iter().map(|r| r.metrics().cost).sum()
    }

    /// Sum of route distances in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.routes.iter().map(|r| r.metrics().distance_km).sum()
    }

    /// Sum of route travel times in minutes.
    pub fn total_time_minutes(&self) -> f64 {
        self.routes.iter().map(|r| r.metrics().time_minutes()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RouteMetrics, Severity};
    use crate::network::{ArcId, NodeId};

    fn route(dest: u64, severity: Severity, time: f64, rate: f64) -> Route {
        Route::new(
            CommodityKey::new(NodeId(dest), severity),
            30.0,
            vec![NodeId(1), NodeId(dest)],
            vec![ArcId::new(NodeId(1), NodeId(dest), 0)],
            RouteMetrics::from_totals(1000.0, time, rate),
        )
    }

    #[test]
    fn test_totals() {
        let mut sol = RoutingSolution::new(150.0);
        sol.add_route(route(2, Severity::Low, 3600.0, 100.0));
        sol.add_route(route(3, Severity::Critical, 360.0, 500.0));
        sol.add_unserved(CommodityKey::new(NodeId(4), Severity::Medium));

        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.unserved().len(), 1);
        assert!((sol.total_cost() - 150.0).abs() < 1e-10);
        assert!((sol.total_distance_km() - 2.0).abs() < 1e-10);
        assert!((sol.total_time_minutes() - 66.0).abs() < 1e-10);
        assert_eq!(sol.objective(), 150.0);
    }

    #[test]
    fn test_route_lookup() {
        let mut sol = RoutingSolution::new(0.0);
        sol.add_route(route(2, Severity::Low, 10.0, 100.0));
        assert!(sol
            .route(CommodityKey::new(NodeId(2), Severity::Low))
            .is_some());
        assert!(sol
            .route(CommodityKey::new(NodeId(2), Severity::Critical))
            .is_none());
    }
}
