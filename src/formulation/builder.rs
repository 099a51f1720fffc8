//! Compiles a problem instance into a [`LinearProgram`].

use serde::Serialize;
use tracing::{debug, info};

use super::{LinearProgram, Row, RowOrigin, Sense, VariableIndex};
use crate::models::ProblemInstance;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Pre-solve size of the formulation.
///
/// Both columns and rows grow with |arcs| × |commodities|; callers should
/// check this before committing to a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    /// Nodes in the network.
    pub nodes: usize,
    /// Arcs in the network.
    pub arcs: usize,
    /// Distinct commodities.
    pub commodities: usize,
    /// Binary columns (`arcs × commodities`).
    pub variables: usize,
    /// Conservation rows (`nodes × commodities`).
    pub flow_constraints: usize,
    /// Speed rows (`arcs × commodities`).
    pub speed_constraints: usize,
}

impl SizeReport {
    /// Total number of rows.
    pub fn total_constraints(&self) -> usize {
        self.flow_constraints + self.speed_constraints
    }
}

/// Builds the arc-selection integer program for one problem instance.
///
/// - Objective: `Σ_k Σ_a rate_k · (time_a / 3600) · x[a,k]`
/// - Conservation: `Σ_out x − Σ_in x = b(n)` for every node and commodity
/// - Speed: `required_speed_k · x[a,k] <= capacity_a` for every arc and commodity
///
/// No column is pruned: infeasible `(arc, commodity)` pairs are switched off
/// by their speed row.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use emergency_routing::formulation::ModelBuilder;
/// use emergency_routing::models::{CommoditySet, CostRates, EmergencyRequest, ProblemInstance, Severity};
/// use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
///
/// let net = RoadNetwork::from_records(
///     vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)],
///     vec![ArcRecord::new(1, 2, 0).with_length(100.0).with_travel_time(36.0).with_capacity(50.0)],
/// ).unwrap();
/// let requests = [EmergencyRequest::new(2, Severity::Low)];
/// let speeds: HashMap<_, _> = requests.iter().map(|r| (r.key(), 20.0)).collect();
/// let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &speeds).unwrap();
/// let instance = ProblemInstance::new(net, NodeId(1), set).unwrap();
///
/// let builder = ModelBuilder::new(&instance);
/// let size = builder.size_report();
/// assert_eq!(size.variables, 1);
/// assert_eq!(size.total_constraints(), 3);
///
/// let lp = builder.build();
/// // 100/h × 36 s = 1.0
/// assert!((lp.objective()[0] - 1.0).abs() < 1e-12);
/// ```
pub struct ModelBuilder<'a> {
    instance: &'a ProblemInstance,
    index: VariableIndex,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        let index = VariableIndex::new(instance.network().num_arcs(), instance.num_commodities());
        Self { instance, index }
    }

    /// Column index the built program will use.
    pub fn index(&self) -> VariableIndex {
        self.index
    }

    /// Size of the program without building it.
    pub fn size_report(&self) -> SizeReport {
        let net = self.instance.network();
        let k = self.instance.num_commodities();
        SizeReport {
            nodes: net.num_nodes(),
            arcs: net.num_arcs(),
            commodities: k,
            variables: self.index.len(),
            flow_constraints: net.num_nodes() * k,
            speed_constraints: net.num_arcs() * k,
        }
    }

    /// Builds objective and all rows.
    pub fn build(&self) -> LinearProgram {
        let size = self.size_report();
        info!(
            variables = size.variables,
            constraints = size.total_constraints(),
            "building routing model"
        );

        let objective = self.objective();
        let mut rows = Vec::with_capacity(size.total_constraints());
        self.add_flow_conservation(&mut rows);
        self.add_speed_requirements(&mut rows);

        debug!(rows = rows.len(), "routing model built");
        LinearProgram::new(self.index, objective, rows)
    }

    fn objective(&self) -> Vec<f64> {
        let arcs = self.instance.network().arcs();
        let mut coefficients = vec![0.0; self.index.len()];
        for (k, commodity) in self.instance.commodities().iter().enumerate() {
            let rate = commodity.cost_rate();
            for (a, arc) in arcs.iter().enumerate() {
                coefficients[self.index.column(a, k)] =
                    rate * (arc.travel_time() / SECONDS_PER_HOUR);
            }
        }
        coefficients
    }

    fn add_flow_conservation(&self, rows: &mut Vec<Row>) {
        let net = self.instance.network();
        for k in 0..self.instance.num_commodities() {
            for node in 0..net.num_nodes() {
                let mut terms = Vec::with_capacity(net.outgoing(node).len() + net.incoming(node).len());
                for &a in net.outgoing(node) {
                    // self-loops cancel out
                    if net.arc(a).head() != node {
                        terms.push((self.index.column(a, k), 1.0));
                    }
                }
                for &a in net.incoming(node) {
                    if net.arc(a).tail() != node {
                        terms.push((self.index.column(a, k), -1.0));
                    }
                }
                rows.push(Row::new(
                    RowOrigin::Flow { commodity: k, node },
                    terms,
                    Sense::Equal,
                    self.instance.balance(k, node),
                ));
            }
        }
    }

    fn add_speed_requirements(&self, rows: &mut Vec<Row>) {
        let arcs = self.instance.network().arcs();
        for (k, commodity) in self.instance.commodities().iter().enumerate() {
            let speed = commodity.required_speed();
            for (a, arc) in arcs.iter().enumerate() {
                rows.push(Row::new(
                    RowOrigin::Speed { commodity: k, arc: a },
                    vec![(self.index.column(a, k), speed)],
                    Sense::LessOrEqual,
                    arc.capacity(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::ConstraintFamily;
    use crate::models::{CommodityKey, CommoditySet, CostRates, EmergencyRequest, Severity};
    use crate::network::{ArcRecord, Node, NodeId, RoadNetwork};
    use std::collections::HashMap;

    fn arc(tail: u64, head: u64, time: f64, cap: f64) -> ArcRecord {
        ArcRecord::new(tail, head, 0)
            .with_length(time * 10.0)
            .with_travel_time(time)
            .with_capacity(cap)
    }

    /// Diamond 1 -> {2, 3} -> 4, plus a self-loop on 2.
    fn instance(speeds: &[(EmergencyRequest, f64)]) -> ProblemInstance {
        let net = RoadNetwork::from_records(
            (1..=4).map(|i| Node::new(i, 0.0, 0.0)).collect(),
            vec![
                arc(1, 2, 60.0, 30.0),
                arc(2, 4, 60.0, 30.0),
                arc(1, 3, 100.0, 80.0),
                arc(3, 4, 100.0, 80.0),
                arc(2, 2, 5.0, 80.0),
            ],
        )
        .expect("valid");
        let requests: Vec<_> = speeds.iter().map(|(r, _)| *r).collect();
        let map: HashMap<CommodityKey, f64> = speeds.iter().map(|(r, s)| (r.key(), *s)).collect();
        let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &map)
            .expect("valid");
        ProblemInstance::new(net, NodeId(1), set).expect("valid")
    }

    #[test]
    fn test_size_report_matches_build() {
        let inst = instance(&[
            (EmergencyRequest::new(4, Severity::Low), 20.0),
            (EmergencyRequest::new(3, Severity::Critical), 60.0),
        ]);
        let builder = ModelBuilder::new(&inst);
        let size = builder.size_report();
        assert_eq!(size.variables, 10);
        assert_eq!(size.flow_constraints, 8);
        assert_eq!(size.speed_constraints, 10);

        let lp = builder.build();
        assert_eq!(lp.num_variables(), size.variables);
        assert_eq!(lp.count(ConstraintFamily::FlowConservation), size.flow_constraints);
        assert_eq!(lp.count(ConstraintFamily::SpeedFeasibility), size.speed_constraints);
        assert_eq!(lp.num_rows(), size.total_constraints());
    }

    #[test]
    fn test_objective_uses_hourly_rate() {
        let inst = instance(&[
            (EmergencyRequest::new(4, Severity::Low), 20.0),
            (EmergencyRequest::new(4, Severity::Critical), 60.0),
        ]);
        let builder = ModelBuilder::new(&inst);
        let lp = builder.build();
        let idx = builder.index();
        // arc 0: 60 s; Low 100/h -> 100/60; Critical 500/h -> 500/60
        assert!((lp.objective()[idx.column(0, 0)] - 100.0 / 60.0).abs() < 1e-12);
        assert!((lp.objective()[idx.column(0, 1)] - 500.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_flow_rows_balance() {
        let inst = instance(&[(EmergencyRequest::new(4, Severity::Low), 20.0)]);
        let lp = ModelBuilder::new(&inst).build();
        let flow: Vec<_> = lp
            .rows()
            .iter()
            .filter(|r| r.family() == ConstraintFamily::FlowConservation)
            .collect();
        assert_eq!(flow.len(), 4);
        assert_eq!(flow[0].rhs(), 1.0);
        assert_eq!(flow[1].rhs(), 0.0);
        assert_eq!(flow[3].rhs(), -1.0);
        // node 2 (index 1): in from arc 0, out to arc 1, self-loop excluded
        assert_eq!(flow[1].terms(), &[(1, 1.0), (0, -1.0)]);
    }

    #[test]
    fn test_known_path_satisfies_all_rows() {
        // Critical at 60 km/h must use 1 -> 3 -> 4 (arcs 2, 3)
        let inst = instance(&[(EmergencyRequest::new(4, Severity::Critical), 60.0)]);
        let lp = ModelBuilder::new(&inst).build();
        let mut values = vec![0.0; lp.num_variables()];
        values[2] = 1.0;
        values[3] = 1.0;
        assert_eq!(lp.violated_rows(&values, 1e-9).count(), 0);

        // The fast branch violates both speed rows.
        let mut fast = vec![0.0; lp.num_variables()];
        fast[0] = 1.0;
        fast[1] = 1.0;
        let violated: Vec<_> = lp.violated_rows(&fast, 1e-9).collect();
        assert_eq!(violated.len(), 2);
        assert!(violated
            .iter()
            .all(|r| r.family() == ConstraintFamily::SpeedFeasibility));
    }
}
