//! End-to-end routing runs: prepare an instance, build, solve, decode.

use std::collections::HashMap;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::RoutingError;
use crate::evaluation::{audit_route, SolutionDecoder};
use crate::formulation::{ModelBuilder, SizeReport};
use crate::models::{CommodityKey, CommoditySet, EmergencyRequest, ProblemInstance, RoutingSolution, Severity};
use crate::network::{NodeId, RoadNetwork};
use crate::solver::{IpSolver, MicrolpSolver, SolveOutcome, SolverSession};
use crate::speed::RequiredSpeedGenerator;

/// Result of one solve: model size, solver outcome and, when optimal, the
/// decoded routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    size: SizeReport,
    outcome: SolveOutcome,
    solution: Option<RoutingSolution>,
}

impl RunReport {
    /// Variable and constraint counts of the compiled model.
    pub fn size(&self) -> &SizeReport {
        &self.size
    }

    /// Solver outcome, including the raw status text.
    pub fn outcome(&self) -> &SolveOutcome {
        &self.outcome
    }

    /// Decoded routes; present only for an optimal outcome.
    pub fn solution(&self) -> Option<&RoutingSolution> {
        self.solution.as_ref()
    }
}

/// Orchestrates routing runs for a fixed configuration and backend.
///
/// Every [`solve`](Self::solve) opens its own [`SolverSession`], so one engine
/// may serve independent instances from several threads.
///
/// # Examples
///
/// ```
/// use emergency_routing::config::EngineConfig;
/// use emergency_routing::engine::RoutingEngine;
/// use emergency_routing::models::{EmergencyRequest, Severity};
/// use emergency_routing::network::{ArcRecord, Node, NodeId, RoadNetwork};
/// use emergency_routing::solver::SolveStatus;
///
/// let net = RoadNetwork::from_records(
///     vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.01)],
///     vec![ArcRecord::new(1, 2, 0).with_length(1000.0).with_travel_time(72.0).with_capacity(90.0)],
/// ).unwrap();
///
/// let engine = RoutingEngine::new(EngineConfig::default().with_seed(1)).unwrap();
/// let instance = engine
///     .prepare(net, NodeId(1), &[EmergencyRequest::new(2, Severity::Critical)])
///     .unwrap();
/// let report = engine.solve(&instance).unwrap();
///
/// assert_eq!(report.outcome().status(), SolveStatus::Optimal);
/// let route = &report.solution().unwrap().routes()[0];
/// assert_eq!(route.nodes(), &[NodeId(1), NodeId(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingEngine<S = MicrolpSolver> {
    config: EngineConfig,
    solver: S,
}

impl RoutingEngine<MicrolpSolver> {
    /// Creates an engine on the default `microlp` backend.
    pub fn new(config: EngineConfig) -> Result<Self, RoutingError> {
        Self::with_solver(config, MicrolpSolver)
    }
}

impl<S: IpSolver + Clone + 'static> RoutingEngine<S> {
    /// Creates an engine on a custom backend.
    pub fn with_solver(config: EngineConfig, solver: S) -> Result<Self, RoutingError> {
        config.validate()?;
        Ok(Self { config, solver })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds an instance, sampling required speeds from the configured
    /// range. Deterministic when the configuration carries a seed.
    pub fn prepare(
        &self,
        network: RoadNetwork,
        origin: NodeId,
        requests: &[EmergencyRequest],
    ) -> Result<ProblemInstance, RoutingError> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.prepare_with_rng(network, origin, requests, &mut rng)
    }

    /// Builds an instance, sampling required speeds from `rng`.
    pub fn prepare_with_rng<R: Rng + ?Sized>(
        &self,
        network: RoadNetwork,
        origin: NodeId,
        requests: &[EmergencyRequest],
        rng: &mut R,
    ) -> Result<ProblemInstance, RoutingError> {
        self.warn_zero_rates();
        let generator = RequiredSpeedGenerator::new(self.config.speed_range);
        let commodities = generator.commodities(requests, &self.config.cost_rates, rng)?;
        self.bind(network, origin, commodities)
    }

    /// Builds an instance with explicitly supplied required speeds.
    pub fn prepare_with_speeds(
        &self,
        network: RoadNetwork,
        origin: NodeId,
        requests: &[EmergencyRequest],
        speeds: &HashMap<CommodityKey, f64>,
    ) -> Result<ProblemInstance, RoutingError> {
        self.warn_zero_rates();
        let commodities = CommoditySet::with_required_speeds(requests, &self.config.cost_rates, speeds)?;
        self.bind(network, origin, commodities)
    }

    /// Compiles, solves and, when optimal, decodes `instance`.
    ///
    /// Infeasible and timed-out solves are reported through
    /// [`RunReport::outcome`], not as errors. A decoded route that fails
    /// [`audit_route`] is [`RoutingError::RouteAudit`].
    pub fn solve(&self, instance: &ProblemInstance) -> Result<RunReport, RoutingError> {
        let builder = ModelBuilder::new(instance);
        let size = builder.size_report();
        let program = Arc::new(builder.build());

        let session = SolverSession::new(self.solver.clone(), self.config.time_limit());
        let outcome = session.solve(program)?;

        let solution = match outcome.assignment() {
            Some(assignment) => {
                let solution = SolutionDecoder::new(instance).decode(assignment)?;
                for route in solution.routes() {
                    let violations = audit_route(instance, route);
                    if !violations.is_empty() {
                        return Err(RoutingError::RouteAudit {
                            commodity: route.commodity(),
                            violations,
                        });
                    }
                }
                info!(
                    served = solution.num_served(),
                    unserved = solution.unserved().len(),
                    total_cost = solution.total_cost(),
                    "solution decoded"
                );
                Some(solution)
            }
            None => None,
        };

        Ok(RunReport {
            size,
            outcome,
            solution,
        })
    }

    fn bind(
        &self,
        network: RoadNetwork,
        origin: NodeId,
        commodities: CommoditySet,
    ) -> Result<ProblemInstance, RoutingError> {
        let instance = ProblemInstance::new(network, origin, commodities)?;
        info!(
            origin = %origin,
            commodities = instance.num_commodities(),
            nodes = instance.network().num_nodes(),
            arcs = instance.network().num_arcs(),
            "instance prepared"
        );
        Ok(instance)
    }

    fn warn_zero_rates(&self) {
        for severity in Severity::ALL {
            if self.config.cost_rates.rate(severity) == 0.0 {
                warn!(%severity, "zero cost rate: cycles for this class are not suppressed by the objective");
            }
        }
    }
}
