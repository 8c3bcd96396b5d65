use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use u_orienteering::grasp::{Grasp, GraspConfig, SelectionPolicy};
use u_orienteering::io::read_instance;

#[derive(Parser)]
#[clap(author, version, about = "GRASP construction for the team orienteering problem with time windows", long_about = None)]
struct Cli {
    /// Instance file
    instance: PathBuf,

    /// JSON file with run parameters; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of constructions
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Restricted candidate list size
    #[arg(short, long)]
    rcl_size: Option<usize>,

    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Membership threshold for the alpha-cut policy
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Routes opened before the first insertion
    #[arg(long)]
    initial_routes: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Random,
    FuzzyBest,
    FuzzyAlphaCut,
}

fn build_config(cli: &Cli) -> anyhow::Result<GraspConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<GraspConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GraspConfig::default(),
    };

    if let Some(n) = cli.iterations {
        config.max_iterations = n;
    }
    if let Some(n) = cli.rcl_size {
        config.rcl_size = n;
    }
    if let Some(n) = cli.initial_routes {
        config.initial_routes = n;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let current_alpha = match config.policy {
        SelectionPolicy::FuzzyAlphaCut { alpha } => alpha,
        _ => 0.8,
    };
    let alpha = cli.alpha.unwrap_or(current_alpha);
    config.policy = match cli.policy {
        Some(PolicyArg::Random) => SelectionPolicy::Random,
        Some(PolicyArg::FuzzyBest) => SelectionPolicy::FuzzyBest,
        Some(PolicyArg::FuzzyAlphaCut) => SelectionPolicy::FuzzyAlphaCut { alpha },
        None => match config.policy {
            SelectionPolicy::FuzzyAlphaCut { .. } => SelectionPolicy::FuzzyAlphaCut { alpha },
            other => other,
        },
    };

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = build_config(&cli)?;
    let problem = read_instance(&cli.instance)
        .with_context(|| format!("loading instance {}", cli.instance.display()))?;
    info!(
        pois = problem.poi_count(),
        vehicles = problem.vehicle_count(),
        max_time = problem.max_time_per_route(),
        "loaded instance"
    );

    let report = Grasp::new(&problem, config).run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "seed: {}  iterations: {}  mean fitness: {:.2}",
            report.seed, report.iterations, report.mean_fitness
        );
        print!("{}", report.best_solution);
    }

    Ok(())
}
