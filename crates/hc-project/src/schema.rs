//! Project schema definitions.

use serde::{Deserialize, Serialize};

/// Newest schema version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub solver: SolverDef,
    #[serde(default)]
    pub junctions: Vec<JunctionDef>,
    #[serde(default)]
    pub pipes: Vec<PipeDef>,
    #[serde(default)]
    pub loops: Vec<LoopDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub reconciliation: ReconciliationDef,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            reconciliation: ReconciliationDef::default(),
        }
    }
}

fn default_max_iterations() -> usize {
    100
}

fn default_tolerance() -> f64 {
    0.01
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationDef {
    #[default]
    Average,
    Superpose,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JunctionDef {
    pub id: String,
    /// Withdrawal in cfs; negative for a supply.
    #[serde(default)]
    pub demand_cfs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub id: String,
    pub from: String,
    pub to: String,
    pub length_ft: f64,
    pub diameter_in: f64,
    /// Hazen-Williams C.
    pub roughness: f64,
    /// Starting guess in the from -> to direction.
    #[serde(default)]
    pub initial_flow_cfs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopDef {
    pub id: String,
    pub pipes: Vec<LoopMemberDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopMemberDef {
    pub pipe: String,
    pub orientation: OrientationDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrientationDef {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}
