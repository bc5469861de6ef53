mod error;
mod report;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use error::{CliError, CliResult};
use hc_project::SolverInputs;
use hc_solver::{Reconciliation, solve};
use report::SolveReport;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hc-cli")]
#[command(about = "Hardy-Cross pipe network solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and network topology
    Validate {
        /// Path to the project YAML (or .json) file
        project_path: PathBuf,
    },
    /// Solve the network for pipe flows
    Solve {
        /// Path to the project YAML (or .json) file
        project_path: PathBuf,
        /// Override the project's iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Override the project's convergence tolerance (cfs)
        #[arg(long)]
        tolerance: Option<f64>,
        /// Override how shared pipes combine corrections (average|superpose)
        #[arg(long)]
        reconciliation: Option<Reconciliation>,
        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            max_iterations,
            tolerance,
            reconciliation,
            json,
        } => cmd_solve(
            &project_path,
            SolveOverrides {
                max_iterations,
                tolerance,
                reconciliation,
            },
            json,
        ),
    }
}

struct SolveOverrides {
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    reconciliation: Option<Reconciliation>,
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = hc_project::load(project_path)?;
    let inputs = SolverInputs::from_project(&project)?;

    let network = &inputs.network;
    println!("✓ Project is valid");
    println!(
        "  {} junctions, {} pipes, {} loops ({} shared pipes)",
        network.junctions().len(),
        network.pipes().len(),
        network.loops().len(),
        network.shared_pipes().len()
    );
    Ok(())
}

fn cmd_solve(project_path: &Path, overrides: SolveOverrides, json: bool) -> CliResult<()> {
    let project = hc_project::load(project_path)?;
    let mut inputs = SolverInputs::from_project(&project)?;

    if let Some(n) = overrides.max_iterations {
        inputs.config.max_iterations = n;
    }
    if let Some(tol) = overrides.tolerance {
        inputs.config.tolerance = tol;
    }
    if let Some(policy) = overrides.reconciliation {
        inputs.config.reconciliation = policy;
    }
    inputs
        .config
        .validate()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let problem = inputs.problem()?;
    let initial = inputs.initial_state()?;
    tracing::info!(
        project = %project.name,
        pipes = inputs.network.pipes().len(),
        loops = inputs.network.loops().len(),
        "solving"
    );
    let solution = solve(&problem, initial, &inputs.config)?;

    let report = SolveReport::new(&project.name, &inputs, &problem, &solution)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_table();
    }

    if !solution.is_converged() {
        return Err(CliError::NotConverged {
            iterations: solution.iterations,
        });
    }
    Ok(())
}
