//! Hardy-Cross driver: iterate loop corrections until they vanish.
//!
//! Each iteration:
//! 1. computes every loop's correction against the committed flow state
//! 2. reconciles shared pipes into one new state
//! 3. commits that state
//! 4. stops when every |Δ| is below the tolerance, or when the iteration cap
//!    is reached
//!
//! Hitting the cap is reported as [`SolveStatus::Exhausted`] with the last
//! state, never as an error and never as convergence. A loop whose
//! correction overflowed never counts as within tolerance.

use hc_core::{LoopId, Real};
use tracing::{debug, info, warn};

use crate::balance::{junction_balances, max_imbalance};
use crate::corrector::{LoopCorrection, all_corrections};
use crate::error::{SolverError, SolverResult};
use crate::problem::HardyCrossProblem;
use crate::reconcile::{Reconciliation, reconcile};
use crate::state::FlowState;

/// Hardy-Cross solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardyCrossConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Converged once every loop's |Δ| is below this (cfs)
    pub tolerance: Real,
    /// Shared-pipe merge rule
    pub reconciliation: Reconciliation,
}

impl Default for HardyCrossConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 0.01,
            reconciliation: Reconciliation::Average,
        }
    }
}

impl HardyCrossConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: format!("tolerance must be finite and > 0, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}

/// Terminal state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every loop correction fell below the tolerance.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

/// What happened in one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub iteration: usize,
    /// One entry per loop, in loop order.
    pub corrections: Vec<LoopCorrection>,
}

impl IterationRecord {
    pub fn max_abs_delta(&self) -> Real {
        self.corrections
            .iter()
            .map(|c| c.delta.abs())
            .fold(0.0, Real::max)
    }

    pub fn within(&self, tolerance: Real) -> bool {
        self.corrections
            .iter()
            .all(|c| !c.non_finite && c.delta.abs() < tolerance)
    }

    pub fn degenerate_loops(&self) -> Vec<LoopId> {
        self.corrections
            .iter()
            .filter(|c| c.degenerate)
            .map(|c| c.loop_id)
            .collect()
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolveStatus,
    /// Iterations performed (including the one that met the tolerance).
    pub iterations: usize,
    /// Final committed flows.
    pub flows: FlowState,
    /// Corrections from the last iteration.
    pub last_corrections: Vec<LoopCorrection>,
    /// Largest junction continuity residual of `flows` (cfs).
    pub junction_imbalance: Real,
}

impl Solution {
    pub fn is_converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    /// Loops whose last correction was forced to zero.
    pub fn degenerate_loops(&self) -> Vec<LoopId> {
        self.last_corrections
            .iter()
            .filter(|c| c.degenerate)
            .map(|c| c.loop_id)
            .collect()
    }
}

/// Run one Hardy-Cross iteration, returning the next state and its record.
///
/// `flows` is not modified.
pub fn step(
    problem: &HardyCrossProblem<'_>,
    flows: &FlowState,
    reconciliation: Reconciliation,
    iteration: usize,
) -> SolverResult<(FlowState, IterationRecord)> {
    let corrections = all_corrections(problem, flows)?;
    let next = reconcile(problem.network, flows, &corrections, reconciliation)?;
    Ok((
        next,
        IterationRecord {
            iteration,
            corrections,
        },
    ))
}

/// Solve a network from `initial` flows.
pub fn solve(
    problem: &HardyCrossProblem<'_>,
    initial: FlowState,
    config: &HardyCrossConfig,
) -> SolverResult<Solution> {
    solve_with_observer(problem, initial, config, &mut |_| {})
}

/// Like [`solve`], calling `observer` after every committed iteration.
pub fn solve_with_observer(
    problem: &HardyCrossProblem<'_>,
    initial: FlowState,
    config: &HardyCrossConfig,
    observer: &mut dyn FnMut(&IterationRecord),
) -> SolverResult<Solution> {
    config.validate()?;
    problem.validate()?;
    initial.ensure_matches(problem.network)?;

    let mut flows = initial;
    let mut last_corrections = Vec::new();

    for iteration in 1..=config.max_iterations {
        let (next, record) = step(problem, &flows, config.reconciliation, iteration)?;
        flows = next;

        for loop_id in record.degenerate_loops() {
            warn!(
                iteration,
                loop_id = %loop_id,
                "degenerate loop: slope sum is zero, correction set to 0"
            );
        }
        for c in record.corrections.iter().filter(|c| c.non_finite) {
            warn!(
                iteration,
                loop_id = %c.loop_id,
                "loop correction overflowed, correction set to 0"
            );
        }
        debug!(
            iteration,
            max_delta = record.max_abs_delta(),
            deltas = ?record.corrections.iter().map(|c| c.delta).collect::<Vec<_>>(),
            "hardy-cross iteration"
        );
        observer(&record);

        let converged = record.within(config.tolerance);
        last_corrections = record.corrections;

        if converged {
            info!(iterations = iteration, "hardy-cross converged");
            let junction_imbalance = max_imbalance(&junction_balances(problem.network, &flows)?);
            if junction_imbalance > config.tolerance {
                warn!(
                    junction_imbalance,
                    tolerance = config.tolerance,
                    reconciliation = ?config.reconciliation,
                    "converged flows do not conserve mass at every junction"
                );
            }
            return Ok(Solution {
                status: SolveStatus::Converged,
                iterations: iteration,
                flows,
                last_corrections,
                junction_imbalance,
            });
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        tolerance = config.tolerance,
        "hardy-cross did not converge"
    );
    let junction_imbalance = max_imbalance(&junction_balances(problem.network, &flows)?);
    Ok(Solution {
        status: SolveStatus::Exhausted,
        iterations: config.max_iterations,
        flows,
        last_corrections,
        junction_imbalance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = HardyCrossConfig::default();
        assert_eq!(cfg.max_iterations, 100);
        assert_eq!(cfg.tolerance, 0.01);
        assert_eq!(cfg.reconciliation, Reconciliation::Average);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_config() {
        let zero_cap = HardyCrossConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(zero_cap.validate().is_err());

        let bad_tol = HardyCrossConfig {
            tolerance: -1.0,
            ..Default::default()
        };
        assert!(bad_tol.validate().is_err());

        let nan_tol = HardyCrossConfig {
            tolerance: Real::NAN,
            ..Default::default()
        };
        assert!(nan_tol.validate().is_err());
    }

    fn correction(delta: Real, non_finite: bool) -> LoopCorrection {
        LoopCorrection {
            loop_id: LoopId::from_index(0),
            delta,
            head_loss_sum: 0.0,
            slope_sum: 0.0,
            zero_flow_pipes: Vec::new(),
            degenerate: false,
            non_finite,
        }
    }

    #[test]
    fn overflowed_correction_is_never_within_tolerance() {
        let finite = IterationRecord {
            iteration: 1,
            corrections: vec![correction(0.0, false)],
        };
        assert!(finite.within(0.01));

        let overflowed = IterationRecord {
            iteration: 1,
            corrections: vec![correction(0.0, true)],
        };
        assert!(!overflowed.within(0.01));
    }
}
