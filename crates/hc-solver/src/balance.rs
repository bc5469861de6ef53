//! Post-solve diagnostics: junction continuity and loop head balance.
//!
//! Neither is used to decide convergence.

use hc_core::{JunctionId, LoopId, Real};
use hc_network::Network;

use crate::error::SolverResult;
use crate::problem::HardyCrossProblem;
use crate::state::FlowState;

/// Continuity at one junction.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionBalance {
    pub junction: JunctionId,
    /// Total flow arriving through pipes (cfs).
    pub inflow: Real,
    /// Total flow leaving through pipes (cfs).
    pub outflow: Real,
    /// External withdrawal (cfs).
    pub demand: Real,
    /// inflow - outflow - demand; ≈ 0 for a consistent solution.
    pub residual: Real,
}

pub fn junction_balances(
    network: &Network,
    flows: &FlowState,
) -> SolverResult<Vec<JunctionBalance>> {
    flows.ensure_matches(network)?;
    network
        .junctions()
        .iter()
        .map(|j| {
            let (mut inflow, mut outflow) = (0.0, 0.0);
            for (pipe, sign) in network.incident_pipes(j.id) {
                let arriving = flows.flow(pipe)? * sign;
                if arriving >= 0.0 {
                    inflow += arriving;
                } else {
                    outflow -= arriving;
                }
            }
            Ok(JunctionBalance {
                junction: j.id,
                inflow,
                outflow,
                demand: j.demand,
                residual: inflow - outflow - j.demand,
            })
        })
        .collect()
}

/// Largest |residual| over all junctions (0 for an empty network).
pub fn max_imbalance(balances: &[JunctionBalance]) -> Real {
    balances
        .iter()
        .map(|b| b.residual.abs())
        .fold(0.0, Real::max)
}

/// Σ signed head loss (ft) around every loop.
pub fn loop_residuals(
    problem: &HardyCrossProblem<'_>,
    flows: &FlowState,
) -> SolverResult<Vec<(LoopId, Real)>> {
    flows.ensure_matches(problem.network)?;
    problem
        .network
        .loops()
        .iter()
        .map(|lp| {
            let mut sum = 0.0;
            for member in &lp.members {
                let h = problem.model(member.pipe)?.head_loss(flows.flow(member.pipe)?);
                sum += h * member.orientation.sign();
            }
            Ok((lp.id, sum))
        })
        .collect()
}
