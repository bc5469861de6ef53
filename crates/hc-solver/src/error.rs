//! Error types for solver operations.

use hc_components::ComponentError;
use hc_core::error::HcError;
use hc_network::NetworkError;
use thiserror::Error;

/// Errors that stop a solve before or during iteration.
///
/// Running out of iterations is not an error; it is reported through
/// [`SolveStatus::Exhausted`](crate::SolveStatus::Exhausted).
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] HcError),
}

pub type SolverResult<T> = Result<T, SolverError>;
