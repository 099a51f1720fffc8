//! Solver adapter.
//!
//! - [`IpSolver`] — backend seam; [`MicrolpSolver`] is the default backend
//! - [`SolverSession`] — owns one backend and enforces the wall-clock budget
//! - [`SolveStatus`] / [`SolveOutcome`] — classified result with the raw status
//!
//! Infeasible and timed-out solves are outcomes, not errors; the adapter
//! never relaxes parameters or retries on its own.

mod backend;
mod microlp_backend;
mod session;
mod status;

pub use backend::{BackendResult, IpSolver};
pub use microlp_backend::MicrolpSolver;
pub use session::SolverSession;
pub use status::{Assignment, SolveOutcome, SolveStatus};
