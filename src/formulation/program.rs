//! Solver-independent linear program with binary columns.

use serde::Serialize;

use super::VariableIndex;

/// Constraint family a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstraintFamily {
    /// Per-commodity, per-node flow conservation.
    FlowConservation,
    /// Per-commodity, per-arc speed gating.
    SpeedFeasibility,
}

/// Where a row came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowOrigin {
    /// Conservation at node index `node` for commodity `commodity`.
    Flow {
        /// Commodity index.
        commodity: usize,
        /// Node index.
        node: usize,
    },
    /// Speed gate on arc index `arc` for commodity `commodity`.
    Speed {
        /// Commodity index.
        commodity: usize,
        /// Arc index.
        arc: usize,
    },
}

impl RowOrigin {
    /// Constraint family of this row.
    pub fn family(&self) -> ConstraintFamily {
        match self {
            RowOrigin::Flow { .. } => ConstraintFamily::FlowConservation,
            RowOrigin::Speed { .. } => ConstraintFamily::SpeedFeasibility,
        }
    }
}

/// Row sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    /// `lhs == rhs`
    Equal,
    /// `lhs <= rhs`
    LessOrEqual,
}

/// One sparse constraint row `Σ coef·x (sense) rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    origin: RowOrigin,
    terms: Vec<(usize, f64)>,
    sense: Sense,
    rhs: f64,
}

impl Row {
    /// Creates a row.
    pub fn new(origin: RowOrigin, terms: Vec<(usize, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            origin,
            terms,
            sense,
            rhs,
        }
    }

    /// Diagnostic origin.
    pub fn origin(&self) -> RowOrigin {
        self.origin
    }

    /// Constraint family.
    pub fn family(&self) -> ConstraintFamily {
        self.origin.family()
    }

    /// Sparse `(column, coefficient)` terms.
    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    /// Row sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Right-hand side.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Left-hand side evaluated at `values`.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(col, coef)| coef * values[col]).sum()
    }

    /// Returns `true` if `values` satisfy this row within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::Equal => (lhs - self.rhs).abs() <= tol,
            Sense::LessOrEqual => lhs <= self.rhs + tol,
        }
    }
}

/// A minimization program over binary columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    index: VariableIndex,
    objective: Vec<f64>,
    rows: Vec<Row>,
}

impl LinearProgram {
    /// Creates a program. `objective` has one coefficient per column.
    pub fn new(index: VariableIndex, objective: Vec<f64>, rows: Vec<Row>) -> Self {
        debug_assert_eq!(objective.len(), index.len());
        Self {
            index,
            objective,
            rows,
        }
    }

    /// Column index.
    pub fn index(&self) -> VariableIndex {
        self.index
    }

    /// Number of binary columns.
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Objective coefficients, one per column.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows in one family.
    pub fn count(&self, family: ConstraintFamily) -> usize {
        self.rows.iter().filter(|r| r.family() == family).count()
    }

    /// Objective value at `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }

    /// Rows not satisfied by `values` within `tol`.
    pub fn violated_rows<'a>(&'a self, values: &'a [f64], tol: f64) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |r| !r.is_satisfied(values, tol))
    }
}
