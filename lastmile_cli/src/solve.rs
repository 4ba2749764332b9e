use std::path::PathBuf;

use clap::Args;
use lastmile_solver::{
    problem::snapshot::DispatchSnapshot,
    solver::{
        fleet::FleetSolver,
        params::{SolverParams, Threads},
    },
};
use tracing::info;

use crate::parsers;

#[derive(Args)]
pub struct SolveArgs {
    /// Dispatch snapshot to plan (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the plan; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cap on improvement passes
    #[arg(short, long)]
    passes: Option<usize>,

    /// Wall-clock budget for improvement (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    duration: Option<jiff::SignedDuration>,

    /// Per-route duration ceiling, overrides the snapshot's value
    #[arg(short, long, value_parser = parsers::parse_duration)]
    max_route_duration: Option<jiff::SignedDuration>,

    /// Worker threads for the route-build phase (default: all cores)
    #[arg(short, long)]
    threads: Option<u8>,
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let raw = std::fs::read_to_string(&args.input)?;
    let mut snapshot: DispatchSnapshot = serde_json::from_str(&raw)?;

    if let Some(ceiling) = args.max_route_duration {
        snapshot.max_route_duration = Some(ceiling);
    }

    let mut params = SolverParams::default();
    if let Some(passes) = args.passes {
        params.max_improvement_passes = passes;
    }
    if let Some(duration) = args.duration {
        params.time_budget = Some(duration);
    }
    if let Some(threads) = args.threads {
        params.build_threads = Threads::Multi(threads as usize);
    }

    let problem = snapshot.into_problem();
    let plan = FleetSolver::new(params).solve(&problem);

    info!(
        routes = plan.routes.len(),
        served = plan.stops.len(),
        unserved = plan.unserved.len(),
        excluded = plan.exclusions.len(),
        total_distance_m = plan.total_distance().value(),
        "plan ready"
    );

    let json = serde_json::to_string_pretty(&plan)?;
    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
