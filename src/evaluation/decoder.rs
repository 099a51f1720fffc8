//! Turns a raw arc-selection assignment into ordered routes.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::formulation::VariableIndex;
use crate::models::{ProblemInstance, Route, RouteMetrics, RoutingSolution};
use crate::solver::Assignment;

/// Column values above this are read as "arc selected".
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Decodes per-commodity paths and metrics from column values.
///
/// Decoding is a pure function of the instance and the values: commodities
/// are processed independently and nothing is cached between calls.
///
/// For each commodity the selected arcs form a successor map; starting at
/// the origin the map is followed until the destination. Branching, dead
/// ends and revisits are errors. Selected self-loops, and selected arcs the
/// chain never reaches, are counted on the route as detached and excluded
/// from its metrics. A zero-cost cycle leaving an intermediate path node
/// gives that node two successors and is a
/// [`DecodeError::BranchingSuccessor`].
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use emergency_routing::evaluation::SolutionDecoder;
/// use emergency_routing::models::{CommoditySet, CostRates, EmergencyRequest, ProblemInstance, Severity};
/// use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
///
/// let net = RoadNetwork::from_records(
///     vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)],
///     vec![ArcRecord::new(1, 2, 0).with_length(1500.0).with_travel_time(90.0).with_capacity(50.0)],
/// ).unwrap();
/// let requests = [EmergencyRequest::new(2, Severity::Low)];
/// let speeds: HashMap<_, _> = requests.iter().map(|r| (r.key(), 20.0)).collect();
/// let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &speeds).unwrap();
/// let instance = ProblemInstance::new(net, NodeId(1), set).unwrap();
///
/// let solution = SolutionDecoder::new(&instance).decode_values(&[1.0], 2.5).unwrap();
/// let route = &solution.routes()[0];
/// assert_eq!(route.nodes(), &[NodeId(1), NodeId(2)]);
/// assert!((route.metrics().distance_km - 1.5).abs() < 1e-10);
/// assert!((route.metrics().cost - 2.5).abs() < 1e-10);
/// ```
pub struct SolutionDecoder<'a> {
    instance: &'a ProblemInstance,
    index: VariableIndex,
}

impl<'a> SolutionDecoder<'a> {
    /// Creates a decoder for the instance's column layout.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            index: VariableIndex::new(instance.network().num_arcs(), instance.num_commodities()),
        }
    }

    /// Decodes an optimal assignment.
    pub fn decode(&self, assignment: &Assignment) -> Result<RoutingSolution, DecodeError> {
        self.decode_values(&assignment.values, assignment.objective)
    }

    /// Decodes raw column values.
    pub fn decode_values(&self, values: &[f64], objective: f64) -> Result<RoutingSolution, DecodeError> {
        if values.len() != self.index.len() {
            return Err(DecodeError::AssignmentLength {
                expected: self.index.len(),
                actual: values.len(),
            });
        }

        let mut solution = RoutingSolution::new(objective);
        for k in 0..self.instance.num_commodities() {
            match self.decode_commodity(values, k)? {
                Some(route) => solution.add_route(route),
                None => {
                    let key = self.instance.commodity(k).key();
                    warn!(commodity = %key, "commodity has no selected arcs");
                    solution.add_unserved(key);
                }
            }
        }
        Ok(solution)
    }

    /// Arc indices selected for commodity `k`, in arc order.
    pub fn selected_arcs(&self, values: &[f64], k: usize) -> Vec<usize> {
        self.index
            .commodity_columns(k)
            .filter(|&col| values[col] > SELECTION_THRESHOLD)
            .map(|col| self.index.decompose(col).0)
            .collect()
    }

    /// Decodes one commodity; `None` if it has no selected arcs.
    pub fn decode_commodity(&self, values: &[f64], k: usize) -> Result<Option<Route>, DecodeError> {
        let selected = self.selected_arcs(values, k);
        if selected.is_empty() {
            return Ok(None);
        }

        let net = self.instance.network();
        let commodity = self.instance.commodity(k);
        let key = commodity.key();

        let mut successor: HashMap<usize, usize> = HashMap::with_capacity(selected.len());
        for &a in &selected {
            let tail = net.arc(a).tail();
            // self-loops never advance the chain; they end up detached
            if net.arc(a).head() == tail {
                continue;
            }
            if let Some(&first) = successor.get(&tail) {
                return Err(DecodeError::BranchingSuccessor {
                    commodity: key,
                    node: net.node(tail).id(),
                    first: net.arc(first).id(),
                    second: net.arc(a).id(),
                });
            }
            successor.insert(tail, a);
        }

        let origin = self.instance.origin_index();
        let destination = self.instance.destination_index(k);
        let mut visited = vec![false; net.num_nodes()];
        visited[origin] = true;

        let mut nodes = vec![net.node(origin).id()];
        let mut arcs = Vec::new();
        let mut length = 0.0;
        let mut time = 0.0;
        let mut current = origin;

        while current != destination {
            let a = *successor.get(&current).ok_or(DecodeError::DeadEnd {
                commodity: key,
                node: net.node(current).id(),
            })?;
            let arc = net.arc(a);
            current = arc.head();
            if visited[current] {
                return Err(DecodeError::Revisit {
                    commodity: key,
                    node: net.node(current).id(),
                });
            }
            visited[current] = true;
            nodes.push(net.node(current).id());
            arcs.push(arc.id());
            length += arc.length();
            time += arc.travel_time();
        }

        let detached = selected.len() - arcs.len();
        if detached > 0 {
            warn!(
                commodity = %key,
                detached,
                "selected arcs off the origin-destination chain (zero-cost cycle)"
            );
        }
        debug!(commodity = %key, segments = arcs.len(), seconds = time, "route decoded");

        let metrics = RouteMetrics::from_totals(length, time, commodity.cost_rate());
        Ok(Some(
            Route::new(key, commodity.required_speed(), nodes, arcs, metrics)
                .with_detached_arcs(detached),
        ))
    }
}
