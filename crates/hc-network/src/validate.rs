//! Network validation logic.

use std::collections::{HashMap, HashSet};

use hc_core::PipeId;

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Junction, Loop, Orientation, Pipe};

/// Validate references, pipe endpoints and loop closure.
pub(crate) fn validate_structure(
    junctions: &[Junction],
    pipes: &[Pipe],
    loops: &[Loop],
) -> NetworkResult<()> {
    for pipe in pipes {
        for end in [pipe.from, pipe.to] {
            if end.slot() >= junctions.len() {
                return Err(NetworkError::UnknownJunction {
                    pipe: pipe.name.clone(),
                    junction: end.index(),
                });
            }
        }
        if pipe.from == pipe.to {
            return Err(NetworkError::SelfLoopPipe {
                pipe: pipe.name.clone(),
            });
        }
    }

    for lp in loops {
        validate_loop(junctions, pipes, lp)?;
    }

    Ok(())
}

fn validate_loop(junctions: &[Junction], pipes: &[Pipe], lp: &Loop) -> NetworkResult<()> {
    if lp.members.is_empty() {
        return Err(NetworkError::EmptyLoop {
            loop_name: lp.name.clone(),
        });
    }

    let mut seen: HashSet<PipeId> = HashSet::new();
    for member in &lp.members {
        let Some(pipe) = pipes.get(member.pipe.slot()) else {
            return Err(NetworkError::UnknownPipe {
                loop_name: lp.name.clone(),
                pipe: member.pipe.index(),
            });
        };
        if !seen.insert(member.pipe) {
            return Err(NetworkError::RepeatedPipe {
                loop_name: lp.name.clone(),
                pipe: pipe.name.clone(),
            });
        }
    }

    // Walking each member in its orientation must leave every junction as
    // often as it enters it. Member order is irrelevant.
    let mut balance = vec![0_i32; junctions.len()];
    let mut parent: Vec<usize> = (0..junctions.len()).collect();
    for member in &lp.members {
        let pipe = &pipes[member.pipe.slot()];
        let (start, end) = match member.orientation {
            Orientation::Forward => (pipe.from, pipe.to),
            Orientation::Reverse => (pipe.to, pipe.from),
        };
        balance[start.slot()] -= 1;
        balance[end.slot()] += 1;
        union(&mut parent, start.slot(), end.slot());
    }

    if let Some((slot, _)) = balance.iter().enumerate().find(|(_, b)| **b != 0) {
        return Err(NetworkError::OpenLoop {
            loop_name: lp.name.clone(),
            junction: junctions[slot].name.clone(),
        });
    }

    let first = pipes[lp.members[0].pipe.slot()].from.slot();
    let root = find(&mut parent, first);
    for member in &lp.members {
        let slot = pipes[member.pipe.slot()].from.slot();
        if find(&mut parent, slot) != root {
            return Err(NetworkError::DisconnectedLoop {
                loop_name: lp.name.clone(),
            });
        }
    }

    Ok(())
}

/// A pipe may sit on the boundary of at most two loops.
pub(crate) fn validate_sharing<T>(pipes: &[Pipe], memberships: &[Vec<T>]) -> NetworkResult<()> {
    for (pipe, loops) in pipes.iter().zip(memberships) {
        if loops.len() > 2 {
            return Err(NetworkError::OverShared {
                pipe: pipe.name.clone(),
                loops: loops.len(),
            });
        }
    }
    Ok(())
}

/// Build a name -> id table, rejecting duplicate names.
pub(crate) fn name_table<'a, I: Copy>(
    kind: &'static str,
    entries: impl Iterator<Item = (&'a String, I)>,
) -> NetworkResult<HashMap<String, I>> {
    let mut table = HashMap::new();
    for (name, id) in entries {
        if table.insert(name.clone(), id).is_some() {
            return Err(NetworkError::DuplicateName {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(table)
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[ra] = rb;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::LoopMember;
    use hc_core::{JunctionId, LoopId};

    fn junctions(n: u32) -> Vec<Junction> {
        (0..n)
            .map(|i| Junction {
                id: JunctionId::from_index(i),
                name: format!("J{i}"),
                demand: 0.0,
            })
            .collect()
    }

    fn pipe(i: u32, from: u32, to: u32) -> Pipe {
        Pipe {
            id: PipeId::from_index(i),
            name: format!("P{i}"),
            from: JunctionId::from_index(from),
            to: JunctionId::from_index(to),
        }
    }

    fn lp(members: &[(u32, Orientation)]) -> Loop {
        Loop {
            id: LoopId::from_index(0),
            name: "L".into(),
            members: members
                .iter()
                .map(|&(p, orientation)| LoopMember {
                    pipe: PipeId::from_index(p),
                    orientation,
                })
                .collect(),
        }
    }

    #[test]
    fn validate_empty_network() {
        assert!(validate_structure(&[], &[], &[]).is_ok());
    }

    #[test]
    fn validate_invalid_junction_ref() {
        let result = validate_structure(&junctions(1), &[pipe(0, 0, 9)], &[]);
        assert!(matches!(
            result,
            Err(NetworkError::UnknownJunction { junction: 9, .. })
        ));
    }

    #[test]
    fn validate_open_loop() {
        // J0 -> J1 -> J2 with no way back
        let pipes = [pipe(0, 0, 1), pipe(1, 1, 2)];
        let loops = [lp(&[(0, Orientation::Forward), (1, Orientation::Forward)])];
        let result = validate_structure(&junctions(3), &pipes, &loops);
        assert!(matches!(result, Err(NetworkError::OpenLoop { .. })));
    }

    #[test]
    fn validate_wrong_orientation_is_open() {
        let pipes = [pipe(0, 0, 1), pipe(1, 1, 2), pipe(2, 0, 2)];
        // P2 should be reversed to close J0 -> J1 -> J2 -> J0
        let loops = [lp(&[
            (0, Orientation::Forward),
            (1, Orientation::Forward),
            (2, Orientation::Forward),
        ])];
        let result = validate_structure(&junctions(3), &pipes, &loops);
        assert!(matches!(result, Err(NetworkError::OpenLoop { .. })));
    }

    #[test]
    fn validate_disconnected_cycles() {
        // Two separate two-pipe cycles listed as one loop
        let pipes = [pipe(0, 0, 1), pipe(1, 1, 0), pipe(2, 2, 3), pipe(3, 3, 2)];
        let loops = [lp(&[
            (0, Orientation::Forward),
            (1, Orientation::Forward),
            (2, Orientation::Forward),
            (3, Orientation::Forward),
        ])];
        let result = validate_structure(&junctions(4), &pipes, &loops);
        assert!(matches!(result, Err(NetworkError::DisconnectedLoop { .. })));
    }

    #[test]
    fn validate_repeated_pipe() {
        let pipes = [pipe(0, 0, 1)];
        let loops = [lp(&[(0, Orientation::Forward), (0, Orientation::Reverse)])];
        let result = validate_structure(&junctions(2), &pipes, &loops);
        assert!(matches!(result, Err(NetworkError::RepeatedPipe { .. })));
    }

    #[test]
    fn name_table_rejects_duplicates() {
        let names = ["A".to_string(), "A".to_string()];
        let result = name_table(
            "junction",
            names.iter().enumerate().map(|(i, n)| (n, i)),
        );
        assert_eq!(
            result.unwrap_err(),
            NetworkError::DuplicateName {
                kind: "junction",
                name: "A".into()
            }
        );
    }
}
