//! Merging loop corrections into one flow per pipe.

use hc_core::Real;
use hc_network::Network;

use crate::corrector::LoopCorrection;
use crate::error::{SolverError, SolverResult};
use crate::state::FlowState;

/// How a pipe shared by two loops combines their proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconciliation {
    /// Each loop proposes `Q + Δ·orientation` for the pipe; the new flow is
    /// the mean of the proposals in the pipe's reference direction.
    #[default]
    Average,
    /// Both corrections are applied: `Q + Δ1·o1 + Δ2·o2`. Junction continuity
    /// is preserved exactly.
    Superpose,
}

impl Reconciliation {
    pub fn as_str(self) -> &'static str {
        match self {
            Reconciliation::Average => "average",
            Reconciliation::Superpose => "superpose",
        }
    }
}

impl std::str::FromStr for Reconciliation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "average" => Ok(Reconciliation::Average),
            "superpose" => Ok(Reconciliation::Superpose),
            other => Err(format!(
                "unknown reconciliation '{other}' (expected average or superpose)"
            )),
        }
    }
}

/// Build the next flow state from the committed one and every loop's Δ.
///
/// `corrections` must hold one entry per loop, in loop order; anything else
/// is a setup error. Pipes in no loop keep their flow; pipes in one loop take
/// that loop's proposal.
pub fn reconcile(
    network: &Network,
    flows: &FlowState,
    corrections: &[LoopCorrection],
    policy: Reconciliation,
) -> SolverResult<FlowState> {
    if corrections.len() != network.loops().len() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "expected {} loop corrections, got {}",
                network.loops().len(),
                corrections.len()
            ),
        });
    }
    for (lp, correction) in network.loops().iter().zip(corrections) {
        if correction.loop_id != lp.id {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "correction for loop {} found where loop {} ({}) was expected",
                    correction.loop_id, lp.id, lp.name
                ),
            });
        }
    }
    flows.ensure_matches(network)?;

    let next = network
        .pipes()
        .iter()
        .map(|pipe| {
            let q = flows.flow(pipe.id)?;
            // Each loop's change, converted into the pipe's reference direction
            let changes = network
                .memberships(pipe.id)
                .iter()
                .map(|(loop_id, orientation)| corrections[loop_id.slot()].delta * orientation.sign());
            Ok(q + merge(changes, policy))
        })
        .collect::<SolverResult<Vec<_>>>()?;

    Ok(FlowState::from_vec(next))
}

fn merge(changes: impl Iterator<Item = Real>, policy: Reconciliation) -> Real {
    let (count, sum) = changes.fold((0_usize, 0.0), |(n, s), c| (n + 1, s + c));
    match (count, policy) {
        (0, _) => 0.0,
        (_, Reconciliation::Superpose) => sum,
        (n, Reconciliation::Average) => sum / n as Real,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_core::{LoopId, PipeId};
    use hc_network::{NetworkBuilder, Orientation};

    /// Two triangles X-Y-Z and X-Z-W sharing pipe "s" (X -> Z), plus a
    /// branch pipe that belongs to no loop.
    fn network() -> Network {
        let mut b = NetworkBuilder::new();
        let x = b.add_junction("X");
        let y = b.add_junction("Y");
        let z = b.add_junction("Z");
        let w = b.add_junction("W");
        let v = b.add_junction("V");
        let xy = b.add_pipe("xy", x, y);
        let yz = b.add_pipe("yz", y, z);
        let s = b.add_pipe("s", x, z);
        let zw = b.add_pipe("zw", z, w);
        let xw = b.add_pipe("xw", x, w);
        b.add_pipe("branch", w, v);
        b.add_loop(
            "upper",
            [
                (xy, Orientation::Forward),
                (yz, Orientation::Forward),
                (s, Orientation::Reverse),
            ],
        );
        b.add_loop(
            "lower",
            [
                (s, Orientation::Forward),
                (zw, Orientation::Forward),
                (xw, Orientation::Reverse),
            ],
        );
        b.build().unwrap()
    }

    fn corrections(d1: Real, d2: Real) -> Vec<LoopCorrection> {
        [d1, d2]
            .iter()
            .enumerate()
            .map(|(i, &delta)| LoopCorrection {
                loop_id: LoopId::from_index(i as u32),
                delta,
                head_loss_sum: 0.0,
                slope_sum: 1.0,
                degenerate: false,
                non_finite: false,
                zero_flow_pipes: Vec::new(),
            })
            .collect()
    }

    fn pipe(n: &Network, name: &str) -> PipeId {
        n.pipe_id(name).unwrap()
    }

    fn flow(state: &FlowState, n: &Network, name: &str) -> Real {
        state.get(pipe(n, name)).unwrap()
    }

    #[test]
    fn shared_pipe_takes_mean_of_proposals() {
        let n = network();
        let flows = FlowState::new(&n, vec![1.0, 1.0, 0.4, 0.6, 0.6, 0.1]).unwrap();
        let next = reconcile(&n, &flows, &corrections(0.1, 0.3), Reconciliation::Average).unwrap();

        // upper proposes 0.4 - 0.1, lower proposes 0.4 + 0.3
        assert!((flow(&next, &n, "s") - 0.5).abs() < 1e-12);
        assert!((flow(&next, &n, "xy") - 1.1).abs() < 1e-12);
        assert!((flow(&next, &n, "xw") - 0.3).abs() < 1e-12);
        assert_eq!(flow(&next, &n, "branch"), 0.1);
    }

    #[test]
    fn superpose_applies_both_corrections() {
        let n = network();
        let flows = FlowState::new(&n, vec![1.0, 1.0, 0.4, 0.6, 0.6, 0.1]).unwrap();
        let next = reconcile(&n, &flows, &corrections(0.1, 0.3), Reconciliation::Superpose).unwrap();
        assert!((flow(&next, &n, "s") - 0.6).abs() < 1e-12);
    }

    #[test]
    fn shared_views_agree_after_reconcile() {
        let n = network();
        let flows = FlowState::new(&n, vec![1.0, 1.0, 0.4, 0.6, 0.6, 0.1]).unwrap();
        let next = reconcile(&n, &flows, &corrections(-0.2, 0.05), Reconciliation::Average).unwrap();

        let shared = n.shared_pipes()[0];
        let upper_view = next.in_loop_frame(shared.pipe, shared.first.1).unwrap();
        let lower_view = next.in_loop_frame(shared.pipe, shared.second.1).unwrap();
        assert_eq!(upper_view, -lower_view);
    }

    #[test]
    fn input_state_is_untouched() {
        let n = network();
        let flows = FlowState::new(&n, vec![1.0, 1.0, 0.4, 0.6, 0.6, 0.1]).unwrap();
        let before = flows.clone();
        let _ = reconcile(&n, &flows, &corrections(0.1, 0.3), Reconciliation::Average).unwrap();
        assert_eq!(flows, before);
    }

    #[test]
    fn wrong_correction_count_is_rejected() {
        let n = network();
        let flows = FlowState::zeros(&n);
        assert!(reconcile(&n, &flows, &corrections(0.1, 0.3)[..1], Reconciliation::Average).is_err());
    }

    #[test]
    fn out_of_order_corrections_are_rejected() {
        let n = network();
        let flows = FlowState::new(&n, vec![1.0, 1.0, 0.4, 0.6, 0.6, 0.1]).unwrap();
        let mut swapped = corrections(0.1, 0.3);
        swapped.reverse();

        let err = reconcile(&n, &flows, &swapped, Reconciliation::Average).unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
        assert!(err.to_string().contains("where loop 0 (upper) was expected"));
    }

    #[test]
    fn state_from_other_network_is_rejected() {
        let n = network();
        let mut b = NetworkBuilder::new();
        let x = b.add_junction("X");
        let y = b.add_junction("Y");
        b.add_pipe("only", x, y);
        let other = b.build().unwrap();

        let err = reconcile(
            &n,
            &FlowState::zeros(&other),
            &corrections(0.1, 0.3),
            Reconciliation::Average,
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("Average".parse::<Reconciliation>(), Ok(Reconciliation::Average));
        assert_eq!("superpose".parse::<Reconciliation>(), Ok(Reconciliation::Superpose));
        assert!("mean".parse::<Reconciliation>().is_err());
        assert_eq!(Reconciliation::default().as_str(), "average");
    }
}
