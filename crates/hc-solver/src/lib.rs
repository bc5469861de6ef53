//! Loop-by-loop (Hardy-Cross) solver for closed pipe networks.
//!
//! The unknowns are pipe flows. Each loop's head-loss imbalance is turned
//! into a single flow correction, pipes shared by two loops are reconciled,
//! and the corrected flows are committed as a new state. Iteration stops when
//! every correction is below a tolerance or an iteration cap is reached.

pub mod balance;
pub mod corrector;
pub mod error;
pub mod problem;
pub mod reconcile;
pub mod solve;
pub mod state;

pub use balance::{JunctionBalance, junction_balances, loop_residuals, max_imbalance};
pub use corrector::{LoopCorrection, all_corrections, loop_correction};
pub use error::{SolverError, SolverResult};
pub use problem::HardyCrossProblem;
pub use reconcile::{Reconciliation, reconcile};
pub use solve::{
    HardyCrossConfig, IterationRecord, Solution, SolveStatus, solve, solve_with_observer, step,
};
pub use state::FlowState;
