use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wayfind::report;
use wayfind::Dataset;

/// Shortest paths and trip plans over a graph of locations
#[derive(Parser, Debug)]
#[command(name = "wayfind")]
#[command(about = "Shortest paths and trip plans over a graph of locations", long_about = None)]
struct Args {
    /// JSON dataset to load (defaults to the built-in sample world)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every location with its description and categories
    Locations,
    /// Print each location's connections
    Graph,
    /// List locations tagged with a category
    Filter { tag: String },
    /// Shortest path between two locations
    Path { from: String, to: String },
    /// Leg-by-leg plan over two or more stops
    Trip {
        #[arg(required = true, num_args = 1..)]
        stops: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = match &args.dataset {
        Some(path) => {
            info!("Loading dataset from {:?}", path);
            Dataset::load(path)?
        }
        None => Dataset::sample(),
    };
    let planner = dataset.into_planner()?;
    info!(
        "Loaded {} locations and {} connections",
        planner.location_count(),
        planner.connection_count()
    );

    let output = match args.command {
        Command::Locations => report::render_locations(&planner.locations()),
        Command::Graph => report::render_graph(&planner),
        Command::Filter { tag } => report::render_filter(&tag, &planner.filter_by_category(&tag)),
        Command::Path { from, to } => report::render_route(&planner.shortest_path(&from, &to)),
        Command::Trip { stops } => report::render_trip(&planner, &planner.plan_trip(&stops[..])?),
    };
    print!("{}", output);
    Ok(())
}
