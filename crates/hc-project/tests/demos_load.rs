use std::path::Path;

use hc_project::SolverInputs;
use hc_solver::{SolveStatus, junction_balances, max_imbalance, solve};

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/projects")
        .join(name)
}

#[test]
fn demos_load_and_validate() {
    for name in ["two_loop.yaml", "two_loop_superpose.yaml"] {
        let project = hc_project::load_yaml(&demo(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        hc_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}

#[test]
fn two_loop_demo_solves() {
    let project = hc_project::load_yaml(&demo("two_loop.yaml")).unwrap();
    let inputs = SolverInputs::from_project(&project).unwrap();

    assert_eq!(inputs.network.pipes().len(), 7);
    assert_eq!(inputs.network.shared_pipes().len(), 1);

    let problem = inputs.problem().unwrap();
    let solution = solve(&problem, inputs.initial_state().unwrap(), &inputs.config).unwrap();
    assert_eq!(solution.status, SolveStatus::Converged);
    assert_eq!(solution.iterations, 2);
}

#[test]
fn superpose_demo_keeps_continuity() {
    let project = hc_project::load_yaml(&demo("two_loop_superpose.yaml")).unwrap();
    let inputs = SolverInputs::from_project(&project).unwrap();
    assert_eq!(inputs.config.tolerance, 0.001);
    assert_eq!(inputs.config.max_iterations, 100);

    let problem = inputs.problem().unwrap();
    let solution = solve(&problem, inputs.initial_state().unwrap(), &inputs.config).unwrap();
    assert!(solution.is_converged());

    let balances = junction_balances(&inputs.network, &solution.flows).unwrap();
    assert!(max_imbalance(&balances) < 1e-9);
    assert_eq!(solution.junction_imbalance, max_imbalance(&balances));
}
