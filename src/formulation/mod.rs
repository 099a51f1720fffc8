//! Integer-program formulation of the multi-commodity routing problem.
//!
//! - [`VariableIndex`] — compact `(arc, commodity)` → column mapping
//! - [`LinearProgram`] — solver-independent objective and sparse rows
//! - [`ModelBuilder`] — compiles a [`ProblemInstance`](crate::models::ProblemInstance)
//!   into a [`LinearProgram`]; O(|arcs| × |commodities|) columns and rows
//!
//! Every column is binary: "commodity k's path uses arc a".

mod builder;
mod program;
mod variables;

pub use builder::{ModelBuilder, SizeReport};
pub use program::{ConstraintFamily, LinearProgram, Row, RowOrigin, Sense};
pub use variables::VariableIndex;
