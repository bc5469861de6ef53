//! Printable and serializable view of a finished solve.

use hc_components::HeadLossModel;
use hc_core::{JunctionId, Real};
use hc_project::SolverInputs;
use hc_solver::{
    HardyCrossProblem, Solution, SolveStatus, SolverError, SolverResult, junction_balances,
    loop_residuals,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub name: String,
    pub status: &'static str,
    pub iterations: usize,
    pub reconciliation: &'static str,
    pub tolerance: Real,
    pub pipes: Vec<PipeRow>,
    pub loops: Vec<LoopRow>,
    pub junctions: Vec<JunctionRow>,
    pub max_imbalance_cfs: Real,
}

#[derive(Debug, Serialize)]
pub struct PipeRow {
    pub id: String,
    pub from: String,
    pub to: String,
    pub flow_cfs: Real,
    pub head_loss_ft: Real,
}

#[derive(Debug, Serialize)]
pub struct LoopRow {
    pub id: String,
    pub last_correction_cfs: Real,
    pub head_loss_sum_ft: Real,
    pub degenerate: bool,
    pub non_finite: bool,
}

#[derive(Debug, Serialize)]
pub struct JunctionRow {
    pub id: String,
    pub inflow_cfs: Real,
    pub outflow_cfs: Real,
    pub demand_cfs: Real,
    pub residual_cfs: Real,
}

impl SolveReport {
    pub fn new(
        name: &str,
        inputs: &SolverInputs,
        problem: &HardyCrossProblem<'_>,
        solution: &Solution,
    ) -> SolverResult<Self> {
        let network = &inputs.network;
        let junction_name = |id: JunctionId| {
            network
                .junction(id)
                .map(|j| j.name.clone())
                .unwrap_or_default()
        };

        let pipes = network
            .pipes()
            .iter()
            .zip(&inputs.models)
            .map(|(pipe, model)| {
                let q = solution
                    .flows
                    .get(pipe.id)
                    .ok_or_else(|| SolverError::ProblemSetup {
                        what: format!("no flow for pipe '{}' in solution", pipe.name),
                    })?;
                Ok(PipeRow {
                    id: pipe.name.clone(),
                    from: junction_name(pipe.from),
                    to: junction_name(pipe.to),
                    flow_cfs: q,
                    head_loss_ft: model.head_loss(q),
                })
            })
            .collect::<SolverResult<Vec<_>>>()?;

        let residuals = loop_residuals(problem, &solution.flows)?;
        let loops = network
            .loops()
            .iter()
            .zip(residuals)
            .map(|(lp, (_, head_loss_sum_ft))| {
                let last = solution.last_corrections.iter().find(|c| c.loop_id == lp.id);
                LoopRow {
                    id: lp.name.clone(),
                    last_correction_cfs: last.map_or(0.0, |c| c.delta),
                    head_loss_sum_ft,
                    degenerate: last.is_some_and(|c| c.degenerate),
                    non_finite: last.is_some_and(|c| c.non_finite),
                }
            })
            .collect();

        let balances = junction_balances(network, &solution.flows)?;
        let junctions = balances
            .into_iter()
            .map(|b| JunctionRow {
                id: junction_name(b.junction),
                inflow_cfs: b.inflow,
                outflow_cfs: b.outflow,
                demand_cfs: b.demand,
                residual_cfs: b.residual,
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            status: match solution.status {
                SolveStatus::Converged => "converged",
                SolveStatus::Exhausted => "exhausted",
            },
            iterations: solution.iterations,
            reconciliation: inputs.config.reconciliation.as_str(),
            tolerance: inputs.config.tolerance,
            pipes,
            loops,
            junctions,
            max_imbalance_cfs: solution.junction_imbalance,
        })
    }

    pub fn print_table(&self) {
        println!("Project: {}", self.name);
        println!(
            "Status: {} after {} iteration(s) (tolerance {}, {} reconciliation)",
            self.status, self.iterations, self.tolerance, self.reconciliation
        );

        println!("\nPipes:");
        println!("  {:<8} {:>6} {:>6} {:>12} {:>14}", "id", "from", "to", "flow (cfs)", "head loss (ft)");
        for p in &self.pipes {
            println!(
                "  {:<8} {:>6} {:>6} {:>12.4} {:>14.3e}",
                p.id, p.from, p.to, p.flow_cfs, p.head_loss_ft
            );
        }

        println!("\nLoops:");
        println!("  {:<8} {:>14} {:>16}", "id", "last Δ (cfs)", "Σ head loss (ft)");
        for l in &self.loops {
            let flag = if l.non_finite {
                "  (overflow)"
            } else if l.degenerate {
                "  (degenerate)"
            } else {
                ""
            };
            println!(
                "  {:<8} {:>14.6} {:>16.3e}{}",
                l.id, l.last_correction_cfs, l.head_loss_sum_ft, flag
            );
        }

        println!("\nJunctions:");
        println!(
            "  {:<8} {:>10} {:>10} {:>10} {:>12}",
            "id", "in (cfs)", "out (cfs)", "demand", "residual"
        );
        for j in &self.junctions {
            println!(
                "  {:<8} {:>10.4} {:>10.4} {:>10.4} {:>12.3e}",
                j.id, j.inflow_cfs, j.outflow_cfs, j.demand_cfs, j.residual_cfs
            );
        }
        println!("  max |residual|: {:.3e} cfs", self.max_imbalance_cfs);
    }
}
