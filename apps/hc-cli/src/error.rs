use hc_project::ProjectError;
use hc_solver::SolverError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}

pub type CliResult<T> = Result<T, CliError>;
