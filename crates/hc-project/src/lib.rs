//! hc-project: YAML/JSON project files for pipe networks.
//!
//! A project lists junctions, pipes with their Hazen-Williams data and
//! initial flows, loops, and solver settings. Loading validates the file and
//! [`SolverInputs`] turns it into a network ready to solve.

use std::path::Path;

pub mod build;
pub mod schema;
pub mod validate;

pub use build::{SolverInputs, build_network, solver_config};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Component error: {0}")]
    Component(#[from] hc_components::ComponentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    fn decode(self, content: &str) -> ProjectResult<Project> {
        Ok(match self {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
        })
    }

    fn encode(self, project: &Project) -> ProjectResult<String> {
        Ok(match self {
            Format::Yaml => serde_yaml::to_string(project)?,
            Format::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

/// Parse and validate a project held in memory.
pub fn parse(content: &str, format: Format) -> ProjectResult<Project> {
    let project = format.decode(content)?;
    validate_project(&project)?;
    Ok(project)
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    read(path, Format::from_path(path))
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    read(path, Format::Yaml)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    read(path, Format::Json)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    write(path, project, Format::Yaml)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    write(path, project, Format::Json)
}

fn read(path: &Path, format: Format) -> ProjectResult<Project> {
    parse(&std::fs::read_to_string(path)?, format)
}

fn write(path: &Path, project: &Project, format: Format) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, format.encode(project)?)?;
    Ok(())
}
