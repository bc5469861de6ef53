//! Flow state threaded through the iterations.

use hc_core::numeric::ensure_finite;
use hc_core::{HcError, PipeId, Real};
use hc_network::{Network, Orientation};

use crate::error::{SolverError, SolverResult};

/// Signed flow (cfs) for every pipe, in each pipe's reference direction.
///
/// A value, not a shared buffer: each iteration builds a new state from the
/// previous one, so no loop ever observes a partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    flows: Vec<Real>,
}

impl FlowState {
    /// One finite flow per pipe, in pipe order.
    pub fn new(network: &Network, flows: Vec<Real>) -> SolverResult<Self> {
        if flows.len() != network.pipes().len() {
            return Err(HcError::LengthMismatch {
                what: "initial flows",
                expected: network.pipes().len(),
                actual: flows.len(),
            }
            .into());
        }
        for &q in &flows {
            ensure_finite(q, "initial flow")?;
        }
        Ok(Self { flows })
    }

    /// All pipes at zero flow.
    pub fn zeros(network: &Network) -> Self {
        Self {
            flows: vec![0.0; network.pipes().len()],
        }
    }

    pub(crate) fn from_vec(flows: Vec<Real>) -> Self {
        Self { flows }
    }

    /// Flow in `pipe`'s reference direction, or `None` if `pipe` is outside
    /// this state.
    pub fn get(&self, pipe: PipeId) -> Option<Real> {
        self.flows.get(pipe.slot()).copied()
    }

    /// Flow as seen by a loop traversing `pipe` with `orientation`.
    pub fn in_loop_frame(&self, pipe: PipeId, orientation: Orientation) -> Option<Real> {
        self.get(pipe).map(|q| q * orientation.sign())
    }

    /// Fails unless this state holds exactly one flow per pipe of `network`.
    pub fn ensure_matches(&self, network: &Network) -> SolverResult<()> {
        if self.flows.len() != network.pipes().len() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "flow state has {} pipes, network has {}",
                    self.flows.len(),
                    network.pipes().len()
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn flow(&self, pipe: PipeId) -> SolverResult<Real> {
        self.get(pipe).ok_or_else(|| SolverError::ProblemSetup {
            what: format!("Pipe {:?} has no flow in this state", pipe),
        })
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// (pipe, flow) pairs in pipe order.
    pub fn iter(&self) -> impl Iterator<Item = (PipeId, Real)> + '_ {
        self.flows
            .iter()
            .enumerate()
            .map(|(i, &q)| (PipeId::from_index(i as u32), q))
    }

    /// Largest per-pipe change between two states of the same network.
    pub fn max_abs_diff(&self, other: &FlowState) -> Real {
        self.flows
            .iter()
            .zip(&other.flows)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, Real::max)
    }
}
