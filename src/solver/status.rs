//! Solve status classification.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Terminal outcome of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolveStatus {
    /// A proven optimal, feasible assignment was found within budget.
    Optimal,
    /// No assignment satisfies all constraints.
    Infeasible,
    /// The wall-clock budget ran out before optimality or infeasibility was proven.
    TimedOut,
    /// The backend stopped for another reason (see the raw status).
    Unknown,
}

impl SolveStatus {
    /// Returns `true` only for [`SolveStatus::Optimal`].
    pub fn is_success(self) -> bool {
        self == SolveStatus::Optimal
    }

    /// Returns `true` if waiting longer might change the outcome.
    ///
    /// Infeasibility is final for a given instance; only relaxed inputs can
    /// change it.
    pub fn may_succeed_with_more_time(self) -> bool {
        matches!(self, SolveStatus::TimedOut | SolveStatus::Unknown)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::TimedOut => "TimedOut",
            SolveStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Column values of an optimal solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// One value per column, as reported by the backend.
    pub values: Vec<f64>,
    /// Objective value at `values`.
    pub objective: f64,
}

/// Classified result of a solve, including the backend's own status text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    status: SolveStatus,
    raw_status: String,
    backend: &'static str,
    elapsed: Duration,
    assignment: Option<Assignment>,
}

impl SolveOutcome {
    /// Creates an outcome.
    pub fn new(
        status: SolveStatus,
        raw_status: impl Into<String>,
        backend: &'static str,
        elapsed: Duration,
        assignment: Option<Assignment>,
    ) -> Self {
        Self {
            status,
            raw_status: raw_status.into(),
            backend,
            elapsed,
            assignment,
        }
    }

    /// Classified status.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Status text as reported by the backend (or by the session on timeout).
    pub fn raw_status(&self) -> &str {
        &self.raw_status
    }

    /// Backend name.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Wall-clock time spent.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Column values; present only for [`SolveStatus::Optimal`].
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }
}
