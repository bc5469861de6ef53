//! Problem definition for loop-by-loop network solving.

use std::collections::HashMap;

use hc_components::{HazenWilliamsPipe, HeadLossModel};
use hc_core::PipeId;
use hc_network::Network;

use crate::error::{SolverError, SolverResult};

/// A network plus one head-loss model per pipe.
///
/// Coefficients are computed when the models are built, so the problem is
/// immutable for the lifetime of a solve.
pub struct HardyCrossProblem<'a> {
    /// Network topology
    pub network: &'a Network,

    /// Head-loss models indexed by PipeId
    pub models: HashMap<PipeId, Box<dyn HeadLossModel>>,
}

impl<'a> HardyCrossProblem<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            models: HashMap::new(),
        }
    }

    /// Attach a head-loss model to a pipe.
    pub fn add_model(&mut self, pipe: PipeId, model: Box<dyn HeadLossModel>) -> SolverResult<()> {
        if self.network.pipe(pipe).is_none() {
            return Err(SolverError::ProblemSetup {
                what: format!("Pipe {:?} is not part of the network", pipe),
            });
        }
        if self.models.contains_key(&pipe) {
            return Err(SolverError::ProblemSetup {
                what: format!("Pipe {:?} already has a head-loss model", pipe),
            });
        }
        self.models.insert(pipe, model);
        Ok(())
    }

    /// Shorthand for attaching a Hazen-Williams pipe.
    pub fn add_pipe(&mut self, pipe: PipeId, model: HazenWilliamsPipe) -> SolverResult<()> {
        self.add_model(pipe, Box::new(model))
    }

    /// Every pipe must have a model.
    pub fn validate(&self) -> SolverResult<()> {
        for pipe in self.network.pipes() {
            if !self.models.contains_key(&pipe.id) {
                return Err(SolverError::ProblemSetup {
                    what: format!("Pipe {} has no head-loss model", pipe.name),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn model(&self, pipe: PipeId) -> SolverResult<&dyn HeadLossModel> {
        self.models
            .get(&pipe)
            .map(|m| m.as_ref())
            .ok_or_else(|| SolverError::ProblemSetup {
                what: format!("Pipe {:?} not found", pipe),
            })
    }
}
