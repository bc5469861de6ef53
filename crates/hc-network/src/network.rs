//! Core network data structures.

use std::collections::HashMap;

use hc_core::{JunctionId, LoopId, PipeId, Real};

use crate::error::{NetworkError, NetworkResult};

/// How a loop's traversal direction relates to a pipe's reference direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Traversal runs from the pipe's `from` junction to its `to` junction.
    Forward,
    /// Traversal runs against the pipe's reference direction.
    Reverse,
}

impl Orientation {
    /// +1.0 for forward, -1.0 for reverse.
    #[inline]
    pub fn sign(self) -> Real {
        match self {
            Orientation::Forward => 1.0,
            Orientation::Reverse => -1.0,
        }
    }
}

/// A junction where pipes meet.
///
/// `demand` is the volume rate (cfs) withdrawn from the network here;
/// negative values are supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
    pub demand: Real,
}

/// A pipe between two junctions. Positive flow runs `from` → `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipe {
    pub id: PipeId,
    pub name: String,
    pub from: JunctionId,
    pub to: JunctionId,
}

/// One pipe's place in a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopMember {
    pub pipe: PipeId,
    pub orientation: Orientation,
}

/// A closed loop of pipes, corrected as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub id: LoopId,
    pub name: String,
    pub members: Vec<LoopMember>,
}

/// A pipe on the common boundary of two loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedPipe {
    pub pipe: PipeId,
    pub first: (LoopId, Orientation),
    pub second: (LoopId, Orientation),
}

/// The network: a validated, immutable collection of junctions, pipes and loops.
///
/// All entities live in vectors indexed by their IDs. For each pipe the
/// network also records the loops it belongs to, so shared pipes are an O(1)
/// lookup.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) junctions: Vec<Junction>,
    pub(crate) pipes: Vec<Pipe>,
    pub(crate) loops: Vec<Loop>,

    /// pipe slot -> loops containing it (at most two after validation).
    pub(crate) memberships: Vec<Vec<(LoopId, Orientation)>>,

    pub(crate) junction_names: HashMap<String, JunctionId>,
    pub(crate) pipe_names: HashMap<String, PipeId>,
    pub(crate) loop_names: HashMap<String, LoopId>,
}

impl Network {
    /// Return all junctions.
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// Return all pipes.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Return all loops.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(id.slot())
    }

    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id.slot())
    }

    pub fn loop_def(&self, id: LoopId) -> Option<&Loop> {
        self.loops.get(id.slot())
    }

    pub fn junction_id(&self, name: &str) -> NetworkResult<JunctionId> {
        lookup(&self.junction_names, "junction", name)
    }

    pub fn pipe_id(&self, name: &str) -> NetworkResult<PipeId> {
        lookup(&self.pipe_names, "pipe", name)
    }

    pub fn loop_id(&self, name: &str) -> NetworkResult<LoopId> {
        lookup(&self.loop_names, "loop", name)
    }

    /// Loops containing `pipe`, with the pipe's orientation in each.
    pub fn memberships(&self, pipe: PipeId) -> &[(LoopId, Orientation)] {
        self.memberships
            .get(pipe.slot())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `pipe` lies on the boundary of two loops.
    pub fn is_shared(&self, pipe: PipeId) -> bool {
        self.memberships(pipe).len() > 1
    }

    /// Every shared pipe, in pipe order.
    pub fn shared_pipes(&self) -> Vec<SharedPipe> {
        self.pipes
            .iter()
            .filter_map(|p| match self.memberships(p.id) {
                [first, second] => Some(SharedPipe {
                    pipe: p.id,
                    first: *first,
                    second: *second,
                }),
                _ => None,
            })
            .collect()
    }

    /// Pipes meeting at `junction`, each with +1.0 when positive flow enters
    /// the junction and -1.0 when it leaves.
    pub fn incident_pipes(&self, junction: JunctionId) -> impl Iterator<Item = (PipeId, Real)> + '_ {
        self.pipes.iter().filter_map(move |p| {
            if p.to == junction {
                Some((p.id, 1.0))
            } else if p.from == junction {
                Some((p.id, -1.0))
            } else {
                None
            }
        })
    }
}

fn lookup<I: Copy>(table: &HashMap<String, I>, what: &'static str, name: &str) -> NetworkResult<I> {
    table
        .get(name)
        .copied()
        .ok_or_else(|| NetworkError::NameNotFound {
            what,
            name: name.to_string(),
        })
}
