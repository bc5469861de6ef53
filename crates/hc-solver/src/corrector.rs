//! Per-loop head-loss balance and flow correction.
//!
//! For each member pipe of a loop:
//! - signed head loss h = k·|Q|^n·sign(Q)·orientation
//! - slope n·k·|Q|^(n-1), never negative
//!
//! and the loop correction is the first-order Newton step
//! Δ = -Σh / Σ(n·k·|Q|^(n-1)).
//!
//! Zero flow: a pipe at exactly Q = 0 contributes zero head loss and zero
//! slope. It is listed in [`LoopCorrection::zero_flow_pipes`]. If the whole
//! slope sum is zero the loop is degenerate and Δ is defined as 0.
//!
//! Overflow: if Δ comes out non-finite (head loss beyond `f64` range) it is
//! set to 0 and the loop is marked [`LoopCorrection::non_finite`]. Such a loop
//! never counts as converged.

use hc_core::{LoopId, PipeId, Real};
use hc_network::Loop;
use tracing::debug;

use crate::error::SolverResult;
use crate::problem::HardyCrossProblem;
use crate::state::FlowState;

/// Result of balancing one loop against a committed flow state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopCorrection {
    pub loop_id: LoopId,
    /// Flow correction in the loop's traversal direction (cfs).
    pub delta: Real,
    /// Σ signed head loss around the loop (ft).
    pub head_loss_sum: Real,
    /// Σ n·k·|Q|^(n-1) over the loop's pipes.
    pub slope_sum: Real,
    /// Slope sum was zero, so `delta` was forced to 0.
    pub degenerate: bool,
    /// The raw correction was not finite, so `delta` was forced to 0.
    pub non_finite: bool,
    /// Member pipes that were at exactly zero flow.
    pub zero_flow_pipes: Vec<PipeId>,
}

/// Compute the correction for `lp` without touching `flows`.
pub fn loop_correction(
    problem: &HardyCrossProblem<'_>,
    lp: &Loop,
    flows: &FlowState,
) -> SolverResult<LoopCorrection> {
    flows.ensure_matches(problem.network)?;

    let mut head_loss_sum = 0.0;
    let mut slope_sum = 0.0;
    let mut zero_flow_pipes = Vec::new();

    for member in &lp.members {
        let model = problem.model(member.pipe)?;
        let q = flows.flow(member.pipe)?;

        if q == 0.0 {
            zero_flow_pipes.push(member.pipe);
            continue;
        }

        head_loss_sum += model.head_loss(q) * member.orientation.sign();
        slope_sum += model.slope(q);
    }

    if !zero_flow_pipes.is_empty() {
        debug!(
            loop_name = %lp.name,
            pipes = ?zero_flow_pipes,
            "zero flow in loop members, treated as zero head loss and slope"
        );
    }

    let degenerate = slope_sum == 0.0;
    let raw = if degenerate {
        0.0
    } else {
        -head_loss_sum / slope_sum
    };
    let non_finite = !raw.is_finite();
    let delta = if non_finite { 0.0 } else { raw };

    Ok(LoopCorrection {
        loop_id: lp.id,
        delta,
        head_loss_sum,
        slope_sum,
        degenerate,
        non_finite,
        zero_flow_pipes,
    })
}

/// Corrections for every loop, all against the same committed state.
pub fn all_corrections(
    problem: &HardyCrossProblem<'_>,
    flows: &FlowState,
) -> SolverResult<Vec<LoopCorrection>> {
    problem
        .network
        .loops()
        .iter()
        .map(|lp| loop_correction(problem, lp, flows))
        .collect()
}
