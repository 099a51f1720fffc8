//! Integer-program backend seam.

use crate::error::SolverError;
use crate::formulation::LinearProgram;

/// What a backend reports for one program.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResult {
    /// Optimal column values.
    Optimal(Vec<f64>),
    /// Proven infeasible.
    Infeasible,
    /// Any other terminal state, with the backend's status text.
    Other(String),
}

/// An integer-program solver backend.
///
/// Implementations must be self-contained: every call to [`solve`](Self::solve)
/// works on its own model and shares no mutable state with other calls, so
/// a [`SolverSession`](super::SolverSession) can run it on a worker thread.
///
/// # Examples
///
/// ```
/// use emergency_routing::error::SolverError;
/// use emergency_routing::formulation::LinearProgram;
/// use emergency_routing::solver::{BackendResult, IpSolver};
///
/// /// Declares everything infeasible.
/// struct Pessimist;
///
/// impl IpSolver for Pessimist {
///     fn name(&self) -> &'static str { "pessimist" }
///     fn solve(&self, _program: &LinearProgram) -> Result<BackendResult, SolverError> {
///         Ok(BackendResult::Infeasible)
///     }
/// }
/// ```
pub trait IpSolver: Send + Sync {
    /// Short backend name for logs and outcomes.
    fn name(&self) -> &'static str;

    /// Solves `program` (minimization, binary columns) to optimality.
    fn solve(&self, program: &LinearProgram) -> Result<BackendResult, SolverError>;
}
