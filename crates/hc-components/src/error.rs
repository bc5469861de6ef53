//! Error types for component operations.

use thiserror::Error;

/// Errors that can occur while building a head-loss model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid pipe parameter {what}: {value} (must be finite and > 0)")]
    InvalidPipeParameter { what: &'static str, value: f64 },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::InvalidPipeParameter {
            what: "diameter",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pipe parameter diameter: 0 (must be finite and > 0)"
        );
    }
}
