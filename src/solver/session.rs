//! Time-budgeted solver session.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::{Assignment, BackendResult, IpSolver, SolveOutcome, SolveStatus};
use crate::error::SolverError;
use crate::formulation::LinearProgram;

/// One solver session: an owned backend plus a wall-clock budget.
///
/// The backend runs on a dedicated worker thread. If the budget expires
/// first, the session reports [`SolveStatus::TimedOut`] and abandons the
/// worker; its eventual result is discarded.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use emergency_routing::formulation::{LinearProgram, Row, RowOrigin, Sense, VariableIndex};
/// use emergency_routing::solver::{MicrolpSolver, SolveStatus, SolverSession};
///
/// // one arc 0 -> 1 at cost 2
/// let lp = LinearProgram::new(
///     VariableIndex::new(1, 1),
///     vec![2.0],
///     vec![
///         Row::new(RowOrigin::Flow { commodity: 0, node: 0 }, vec![(0, 1.0)], Sense::Equal, 1.0),
///         Row::new(RowOrigin::Flow { commodity: 0, node: 1 }, vec![(0, -1.0)], Sense::Equal, -1.0),
///     ],
/// );
/// let session = SolverSession::new(MicrolpSolver, Duration::from_secs(10));
/// let outcome = session.solve(Arc::new(lp)).unwrap();
/// assert_eq!(outcome.status(), SolveStatus::Optimal);
/// assert!((outcome.assignment().unwrap().objective - 2.0).abs() < 1e-6);
/// ```
pub struct SolverSession<S> {
    backend: Arc<S>,
    time_limit: Duration,
}

impl<S: IpSolver + 'static> SolverSession<S> {
    /// Creates a session owning `backend`.
    pub fn new(backend: S, time_limit: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            time_limit,
        }
    }

    /// Wall-clock budget.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Solves `program` within the budget and classifies the result.
    pub fn solve(&self, program: Arc<LinearProgram>) -> Result<SolveOutcome, SolverError> {
        let name = self.backend.name();
        let started = Instant::now();
        let (tx, rx) = mpsc::channel();

        let backend = Arc::clone(&self.backend);
        let worker_program = Arc::clone(&program);
        thread::Builder::new()
            .name(format!("{name}-solver"))
            .spawn(move || {
                let result = backend.solve(&worker_program);
                // the receiver is gone if the budget already expired
                let _ = tx.send(result);
            })
            .map_err(|e| SolverError::Spawn(e.to_string()))?;

        let outcome = match rx.recv_timeout(self.time_limit) {
            Ok(Ok(BackendResult::Optimal(values))) => {
                let objective = program.objective_value(&values);
                SolveOutcome::new(
                    SolveStatus::Optimal,
                    "optimal",
                    name,
                    started.elapsed(),
                    Some(Assignment { values, objective }),
                )
            }
            Ok(Ok(BackendResult::Infeasible)) => SolveOutcome::new(
                SolveStatus::Infeasible,
                "infeasible",
                name,
                started.elapsed(),
                None,
            ),
            Ok(Ok(BackendResult::Other(raw))) => {
                SolveOutcome::new(SolveStatus::Unknown, raw, name, started.elapsed(), None)
            }
            Ok(Err(err)) => return Err(err),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    backend = name,
                    limit_ms = self.time_limit.as_millis() as u64,
                    "solver time limit reached"
                );
                SolveOutcome::new(
                    SolveStatus::TimedOut,
                    format!("time limit of {:?} reached", self.time_limit),
                    name,
                    started.elapsed(),
                    None,
                )
            }
            Err(RecvTimeoutError::Disconnected) => return Err(SolverError::WorkerLost(name)),
        };

        info!(
            backend = name,
            status = %outcome.status(),
            elapsed_ms = outcome.elapsed().as_millis() as u64,
            "solve finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::VariableIndex;

    /// Backend that sleeps, then returns a fixed result.
    struct Scripted {
        delay: Duration,
        result: Result<BackendResult, SolverError>,
    }

    impl IpSolver for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn solve(&self, _program: &LinearProgram) -> Result<BackendResult, SolverError> {
            thread::sleep(self.delay);
            self.result.clone()
        }
    }

    struct Panicking;

    impl IpSolver for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn solve(&self, _program: &LinearProgram) -> Result<BackendResult, SolverError> {
            panic!("backend crashed")
        }
    }

    fn program() -> Arc<LinearProgram> {
        Arc::new(LinearProgram::new(VariableIndex::new(2, 1), vec![1.5, 2.0], vec![]))
    }

    fn session(delay_ms: u64, result: Result<BackendResult, SolverError>, limit_ms: u64) -> SolverSession<Scripted> {
        SolverSession::new(
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result,
            },
            Duration::from_millis(limit_ms),
        )
    }

    #[test]
    fn test_optimal_carries_objective() {
        let s = session(0, Ok(BackendResult::Optimal(vec![1.0, 1.0])), 5_000);
        let outcome = s.solve(program()).expect("ok");
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        assert_eq!(outcome.backend(), "scripted");
        let a = outcome.assignment().expect("assignment");
        assert!((a.objective - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_infeasible_is_distinct_from_timeout() {
        let infeasible = session(0, Ok(BackendResult::Infeasible), 5_000)
            .solve(program())
            .expect("ok");
        assert_eq!(infeasible.status(), SolveStatus::Infeasible);
        assert_eq!(infeasible.raw_status(), "infeasible");

        let timed_out = session(2_000, Ok(BackendResult::Infeasible), 50)
            .solve(program())
            .expect("ok");
        assert_eq!(timed_out.status(), SolveStatus::TimedOut);
        assert!(timed_out.raw_status().contains("time limit"));
        assert!(timed_out.assignment().is_none());
    }

    #[test]
    fn test_other_status_is_unknown_with_raw_text() {
        let outcome = session(0, Ok(BackendResult::Other("iteration limit".into())), 5_000)
            .solve(program())
            .expect("ok");
        assert_eq!(outcome.status(), SolveStatus::Unknown);
        assert_eq!(outcome.raw_status(), "iteration limit");
    }

    #[test]
    fn test_backend_error_propagates() {
        let err = session(
            0,
            Err(SolverError::Backend {
                backend: "scripted",
                message: "boom".into(),
            }),
            5_000,
        )
        .solve(program())
        .unwrap_err();
        assert!(matches!(err, SolverError::Backend { .. }));
    }

    #[test]
    fn test_panicking_backend_is_worker_lost() {
        let err = SolverSession::new(Panicking, Duration::from_secs(5))
            .solve(program())
            .unwrap_err();
        assert_eq!(err, SolverError::WorkerLost("panicking"));
    }
}
