//! Conversion from a validated project into solver inputs.

use std::collections::HashMap;

use hc_components::HazenWilliamsPipe;
use hc_core::units::{ft, inch};
use hc_core::{JunctionId, PipeId, Real};
use hc_network::{Network, NetworkBuilder, Orientation};
use hc_solver::{FlowState, HardyCrossConfig, HardyCrossProblem, Reconciliation, SolverResult};

use crate::ProjectResult;
use crate::schema::{OrientationDef, Project, ReconciliationDef, SolverDef};
use crate::validate::ValidationError;

/// Everything a solve needs, owned.
///
/// `models` and `initial_flows` are in pipe order.
#[derive(Debug, Clone)]
pub struct SolverInputs {
    pub network: Network,
    pub models: Vec<HazenWilliamsPipe>,
    pub initial_flows: Vec<Real>,
    pub config: HardyCrossConfig,
}

impl SolverInputs {
    pub fn from_project(project: &Project) -> ProjectResult<Self> {
        crate::validate::validate_project(project)?;
        let network = build_network(project)?;

        let models = project
            .pipes
            .iter()
            .map(|p| {
                HazenWilliamsPipe::new(p.id.clone(), ft(p.length_ft), inch(p.diameter_in), p.roughness)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let initial_flows = project.pipes.iter().map(|p| p.initial_flow_cfs).collect();

        Ok(Self {
            network,
            models,
            initial_flows,
            config: solver_config(&project.solver),
        })
    }

    pub fn problem(&self) -> SolverResult<HardyCrossProblem<'_>> {
        let mut problem = HardyCrossProblem::new(&self.network);
        for (pipe, model) in self.network.pipes().iter().zip(&self.models) {
            problem.add_pipe(pipe.id, model.clone())?;
        }
        Ok(problem)
    }

    pub fn initial_state(&self) -> SolverResult<FlowState> {
        FlowState::new(&self.network, self.initial_flows.clone())
    }
}

/// Build the network topology described by `project`.
pub fn build_network(project: &Project) -> Result<Network, ValidationError> {
    let mut builder = NetworkBuilder::new();

    let mut junctions: HashMap<&str, JunctionId> = HashMap::new();
    for j in &project.junctions {
        let id = builder.add_junction_with_demand(j.id.clone(), j.demand_cfs);
        junctions.insert(j.id.as_str(), id);
    }

    let mut pipes: HashMap<&str, PipeId> = HashMap::new();
    for p in &project.pipes {
        let from = lookup(&junctions, &p.from, || format!("pipe '{}' from", p.id))?;
        let to = lookup(&junctions, &p.to, || format!("pipe '{}' to", p.id))?;
        pipes.insert(p.id.as_str(), builder.add_pipe(p.id.clone(), from, to));
    }

    for lp in &project.loops {
        let members = lp
            .pipes
            .iter()
            .map(|m| {
                let pipe = lookup(&pipes, &m.pipe, || format!("loop '{}'", lp.id))?;
                Ok((pipe, orientation(m.orientation)))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        builder.add_loop(lp.id.clone(), members);
    }

    Ok(builder.build()?)
}

pub fn solver_config(solver: &SolverDef) -> HardyCrossConfig {
    HardyCrossConfig {
        max_iterations: solver.max_iterations,
        tolerance: solver.tolerance,
        reconciliation: match solver.reconciliation {
            ReconciliationDef::Average => Reconciliation::Average,
            ReconciliationDef::Superpose => Reconciliation::Superpose,
        },
    }
}

fn orientation(def: OrientationDef) -> Orientation {
    match def {
        OrientationDef::Forward => Orientation::Forward,
        OrientationDef::Reverse => Orientation::Reverse,
    }
}

fn lookup<T: Copy>(
    table: &HashMap<&str, T>,
    id: &str,
    context: impl FnOnce() -> String,
) -> Result<T, ValidationError> {
    table
        .get(id)
        .copied()
        .ok_or_else(|| ValidationError::MissingReference {
            id: id.to_string(),
            context: context(),
        })
}
