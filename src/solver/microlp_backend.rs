//! `good_lp` backend using the pure-Rust `microlp` branch-and-bound solver.

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

use super::{BackendResult, IpSolver};
use crate::error::SolverError;
use crate::formulation::{LinearProgram, Sense};

const CONSTANT_ROW_TOL: f64 = 1e-9;

/// Default backend: builds a fresh `good_lp` model per call and solves it
/// with `microlp`.
///
/// Rows without terms are constants; an unsatisfiable one (e.g. an origin
/// with no outgoing arc) short-circuits to [`BackendResult::Infeasible`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl IpSolver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &LinearProgram) -> Result<BackendResult, SolverError> {
        if let Some(row) = program
            .rows()
            .iter()
            .find(|r| r.terms().is_empty() && !r.is_satisfied(&[], CONSTANT_ROW_TOL))
        {
            debug!(origin = ?row.origin(), "constant row cannot be satisfied");
            return Ok(BackendResult::Infeasible);
        }

        let mut vars = ProblemVariables::new();
        let columns: Vec<Variable> = (0..program.num_variables())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut objective = Expression::with_capacity(program.num_variables());
        for (col, &coef) in program.objective().iter().enumerate() {
            if coef != 0.0 {
                objective.add_mul(coef, columns[col]);
            }
        }

        let mut model = vars.minimise(objective).using(microlp);
        for row in program.rows().iter().filter(|r| !r.terms().is_empty()) {
            let mut lhs = Expression::with_capacity(row.terms().len());
            for &(col, coef) in row.terms() {
                lhs.add_mul(coef, columns[col]);
            }
            let c = match row.sense() {
                Sense::Equal => constraint::eq(lhs, row.rhs()),
                Sense::LessOrEqual => constraint::leq(lhs, row.rhs()),
            };
            model = model.with(c);
        }

        match model.solve() {
            Ok(solution) => Ok(BackendResult::Optimal(
                columns.iter().map(|&c| solution.value(c)).collect(),
            )),
            Err(ResolutionError::Infeasible) => Ok(BackendResult::Infeasible),
            Err(ResolutionError::Unbounded) => Ok(BackendResult::Other("unbounded".to_string())),
            Err(other) => Err(SolverError::Backend {
                backend: self.name(),
                message: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::{Row, RowOrigin, VariableIndex};

    fn flow(node: usize, terms: Vec<(usize, f64)>, rhs: f64) -> Row {
        Row::new(
            RowOrigin::Flow { commodity: 0, node },
            terms,
            Sense::Equal,
            rhs,
        )
    }

    #[test]
    fn test_picks_cheaper_parallel_column() {
        // two parallel arcs 0 -> 1, costs 3 and 1
        let lp = LinearProgram::new(
            VariableIndex::new(2, 1),
            vec![3.0, 1.0],
            vec![
                flow(0, vec![(0, 1.0), (1, 1.0)], 1.0),
                flow(1, vec![(0, -1.0), (1, -1.0)], -1.0),
            ],
        );
        let result = MicrolpSolver.solve(&lp).expect("solves");
        match result {
            BackendResult::Optimal(values) => {
                assert!(values[0] < 0.5);
                assert!(values[1] > 0.5);
            }
            other => panic!("expected optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_speed_gate_makes_infeasible() {
        let lp = LinearProgram::new(
            VariableIndex::new(1, 1),
            vec![1.0],
            vec![
                flow(0, vec![(0, 1.0)], 1.0),
                flow(1, vec![(0, -1.0)], -1.0),
                Row::new(
                    RowOrigin::Speed { commodity: 0, arc: 0 },
                    vec![(0, 36.0)],
                    Sense::LessOrEqual,
                    20.0,
                ),
            ],
        );
        assert_eq!(MicrolpSolver.solve(&lp).expect("solves"), BackendResult::Infeasible);
    }

    #[test]
    fn test_empty_unsatisfiable_row_short_circuits() {
        let lp = LinearProgram::new(
            VariableIndex::new(0, 1),
            vec![],
            vec![flow(0, vec![], 1.0), flow(1, vec![], -1.0)],
        );
        assert_eq!(MicrolpSolver.solve(&lp).expect("solves"), BackendResult::Infeasible);
    }
}
