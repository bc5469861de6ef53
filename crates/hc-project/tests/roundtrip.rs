use hc_project::schema::*;
use hc_project::{load_json, load_yaml, save_json, save_yaml, validate_project};

fn member(pipe: &str, orientation: OrientationDef) -> LoopMemberDef {
    LoopMemberDef {
        pipe: pipe.to_string(),
        orientation,
    }
}

fn pipe(id: &str, from: &str, to: &str, data: (f64, f64, f64), q: f64) -> PipeDef {
    PipeDef {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        length_ft: data.0,
        diameter_in: data.1,
        roughness: data.2,
        initial_flow_cfs: q,
    }
}

fn two_loop_project() -> Project {
    use OrientationDef::{Forward, Reverse};

    let junctions = [
        ("A", -2.776),
        ("B", 1.216),
        ("C", 1.216),
        ("D", 1.523),
        ("E", -2.394),
        ("F", 1.215),
    ]
    .iter()
    .map(|&(id, demand_cfs)| JunctionDef {
        id: id.to_string(),
        demand_cfs,
    })
    .collect();

    Project {
        version: LATEST_VERSION,
        name: "Two-loop network".to_string(),
        solver: SolverDef::default(),
        junctions,
        pipes: vec![
            pipe("1", "A", "D", (1500.0, 10.0, 100.0), 0.776),
            pipe("2", "A", "B", (400.0, 10.0, 100.0), 2.0),
            pipe("3", "B", "C", (600.0, 10.0, 120.0), 0.784),
            pipe("4", "D", "C", (800.0, 8.0, 110.0), 0.216),
            pipe("5", "E", "D", (700.0, 8.0, 110.0), 0.963),
            pipe("6", "E", "F", (1000.0, 10.0, 90.0), 1.431),
            pipe("7", "F", "C", (750.0, 10.0, 100.0), 0.216),
        ],
        loops: vec![
            LoopDef {
                id: "L1".to_string(),
                pipes: vec![
                    member("1", Forward),
                    member("2", Reverse),
                    member("3", Reverse),
                    member("4", Forward),
                ],
            },
            LoopDef {
                id: "L2".to_string(),
                pipes: vec![
                    member("4", Reverse),
                    member("5", Reverse),
                    member("6", Forward),
                    member("7", Forward),
                ],
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = Project {
        version: LATEST_VERSION,
        name: "Empty Project".to_string(),
        solver: SolverDef::default(),
        junctions: vec![],
        pipes: vec![],
        loops: vec![],
    };

    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("hc_project_roundtrip_empty.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_two_loop_project() {
    let project = two_loop_project();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("hc_project_roundtrip_two_loop.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_two_loop_project() {
    let project = two_loop_project();

    let path = std::env::temp_dir().join("hc_project_roundtrip_two_loop.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn orientation_serializes_as_sign() {
    let yaml = serde_yaml::to_string(&member("4", OrientationDef::Reverse)).unwrap();
    assert!(yaml.contains("orientation: '-'") || yaml.contains("orientation: \"-\""));

    let parsed: LoopMemberDef = serde_yaml::from_str("{ pipe: \"4\", orientation: \"+\" }").unwrap();
    assert_eq!(parsed.orientation, OrientationDef::Forward);
}

#[test]
fn solver_section_defaults() {
    let yaml = "version: 1\nname: Defaults\n";
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(project.solver.max_iterations, 100);
    assert_eq!(project.solver.tolerance, 0.01);
    assert_eq!(project.solver.reconciliation, ReconciliationDef::Average);

    let partial: SolverDef = serde_yaml::from_str("reconciliation: superpose").unwrap();
    assert_eq!(partial.reconciliation, ReconciliationDef::Superpose);
    assert_eq!(partial.max_iterations, 100);
}

#[test]
fn format_follows_extension() {
    use hc_project::Format;
    use std::path::Path;

    assert_eq!(Format::from_path(Path::new("net.json")), Format::Json);
    assert_eq!(Format::from_path(Path::new("net.JSON")), Format::Json);
    assert_eq!(Format::from_path(Path::new("net.yaml")), Format::Yaml);
    assert_eq!(Format::from_path(Path::new("net")), Format::Yaml);
}

#[test]
fn load_picks_format_from_extension() {
    let project = two_loop_project();
    let path = std::env::temp_dir().join("hc_project_load_by_extension.json");
    save_json(&path, &project).unwrap();
    assert_eq!(hc_project::load(&path).unwrap(), project);
}

#[test]
fn parse_reports_malformed_yaml() {
    let err = hc_project::parse("version: [1", hc_project::Format::Yaml).unwrap_err();
    assert!(matches!(err, hc_project::ProjectError::Yaml(_)));
}
