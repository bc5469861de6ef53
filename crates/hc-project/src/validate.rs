//! Project validation logic.

use crate::schema::{JunctionDef, LATEST_VERSION, LoopDef, PipeDef, Project, SolverDef};
use hc_network::NetworkError;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Topology error: {0}")]
    Topology(#[from] NetworkError),
}

/// Field-level checks followed by a full network build, so loop closure and
/// sharing rules are enforced here too.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_solver(&project.solver)?;

    let junction_ids = unique_ids(project.junctions.iter().map(|j| j.id.as_str()), "junctions")?;
    for junction in &project.junctions {
        validate_junction(junction)?;
    }

    let pipe_ids = unique_ids(project.pipes.iter().map(|p| p.id.as_str()), "pipes")?;
    for pipe in &project.pipes {
        validate_pipe(pipe, &junction_ids)?;
    }

    unique_ids(project.loops.iter().map(|l| l.id.as_str()), "loops")?;
    for lp in &project.loops {
        validate_loop(lp, &pipe_ids)?;
    }

    crate::build::build_network(project)?;
    Ok(())
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    context: &str,
) -> Result<HashSet<&'a str>, ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    if solver.max_iterations == 0 {
        return Err(ValidationError::InvalidValue {
            field: "solver.max_iterations".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    ensure_positive("solver.tolerance", solver.tolerance)
}

fn validate_junction(junction: &JunctionDef) -> Result<(), ValidationError> {
    if !junction.demand_cfs.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("junction '{}' demand_cfs", junction.id),
            value: junction.demand_cfs.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_pipe(pipe: &PipeDef, junction_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    for (end, id) in [("from", &pipe.from), ("to", &pipe.to)] {
        if !junction_ids.contains(id.as_str()) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: format!("pipe '{}' {}", pipe.id, end),
            });
        }
    }

    ensure_positive(&format!("pipe '{}' length_ft", pipe.id), pipe.length_ft)?;
    ensure_positive(&format!("pipe '{}' diameter_in", pipe.id), pipe.diameter_in)?;
    ensure_positive(&format!("pipe '{}' roughness", pipe.id), pipe.roughness)?;

    if !pipe.initial_flow_cfs.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("pipe '{}' initial_flow_cfs", pipe.id),
            value: pipe.initial_flow_cfs.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_loop(lp: &LoopDef, pipe_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    for member in &lp.pipes {
        if !pipe_ids.contains(member.pipe.as_str()) {
            return Err(ValidationError::MissingReference {
                id: member.pipe.clone(),
                context: format!("loop '{}'", lp.id),
            });
        }
    }
    Ok(())
}

fn ensure_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite and > 0".to_string(),
        });
    }
    Ok(())
}
