//! Incremental network builder.

use std::collections::HashMap;

use hc_core::{JunctionId, LoopId, PipeId, Real};

use crate::error::NetworkResult;
use crate::network::{Junction, Loop, LoopMember, Network, Orientation, Pipe};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_junction`, `add_pipe` and `add_loop` to describe the topology,
/// then call `build()` to validate and freeze it into an immutable `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    junctions: Vec<Junction>,
    pipes: Vec<Pipe>,
    loops: Vec<Loop>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a junction with no external demand and return its ID.
    pub fn add_junction(&mut self, name: impl Into<String>) -> JunctionId {
        self.add_junction_with_demand(name, 0.0)
    }

    /// Add a junction that withdraws `demand` (cfs) from the network.
    pub fn add_junction_with_demand(&mut self, name: impl Into<String>, demand: Real) -> JunctionId {
        let id = JunctionId::from_index(self.junctions.len() as u32);
        self.junctions.push(Junction {
            id,
            name: name.into(),
            demand,
        });
        id
    }

    /// Add a pipe whose reference direction runs `from` → `to`.
    pub fn add_pipe(&mut self, name: impl Into<String>, from: JunctionId, to: JunctionId) -> PipeId {
        let id = PipeId::from_index(self.pipes.len() as u32);
        self.pipes.push(Pipe {
            id,
            name: name.into(),
            from,
            to,
        });
        id
    }

    /// Add a loop from (pipe, orientation) pairs.
    ///
    /// Member order is kept for reporting; closure is checked in `build()`.
    pub fn add_loop(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (PipeId, Orientation)>,
    ) -> LoopId {
        let id = LoopId::from_index(self.loops.len() as u32);
        self.loops.push(Loop {
            id,
            name: name.into(),
            members: members
                .into_iter()
                .map(|(pipe, orientation)| LoopMember { pipe, orientation })
                .collect(),
        });
        id
    }

    /// Build and validate the network, returning an immutable `Network`.
    pub fn build(self) -> NetworkResult<Network> {
        validate::validate_structure(&self.junctions, &self.pipes, &self.loops)?;

        let memberships = Self::build_memberships(&self.pipes, &self.loops);
        validate::validate_sharing(&self.pipes, &memberships)?;

        let junction_names = validate::name_table("junction", self.junctions.iter().map(|j| (&j.name, j.id)))?;
        let pipe_names = validate::name_table("pipe", self.pipes.iter().map(|p| (&p.name, p.id)))?;
        let loop_names = validate::name_table("loop", self.loops.iter().map(|l| (&l.name, l.id)))?;

        Ok(Network {
            junctions: self.junctions,
            pipes: self.pipes,
            loops: self.loops,
            memberships,
            junction_names,
            pipe_names,
            loop_names,
        })
    }

    /// For each pipe, collect the loops it belongs to, in loop order.
    fn build_memberships(pipes: &[Pipe], loops: &[Loop]) -> Vec<Vec<(LoopId, Orientation)>> {
        let mut by_pipe: HashMap<PipeId, Vec<(LoopId, Orientation)>> = HashMap::new();
        for lp in loops {
            for member in &lp.members {
                by_pipe
                    .entry(member.pipe)
                    .or_default()
                    .push((lp.id, member.orientation));
            }
        }

        pipes
            .iter()
            .map(|p| by_pipe.remove(&p.id).unwrap_or_default())
            .collect()
    }
}
