use clap::Parser;
use tracing::info;

use appraiser::config::AppraiserConfig;
use appraiser::pricing::PricingData;
use appraiser::registry::Universe;
use appraiser::report::show_results;
use appraiser::solver::DepthSolver;
use appraiser::valuation::ValuationTable;

#[derive(Parser, Debug)]
#[command(name = "appraiser")]
#[command(about = "Derives a worth for every craftable entity from its recipe graph")]
struct Args {
    /// Universe file (entities and recipes, JSON)
    #[arg(short, long)]
    universe: String,

    /// Pricing data file (overrides, optional set, match rules); rewritten after solving
    #[arg(short, long)]
    data: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write the pricing report (overrides the config)
    #[arg(short, long)]
    report: Option<String>,

    /// Maximum ancestors on the recursion path (overrides the config)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print every entity with its computed worth
    #[arg(long)]
    show: bool,

    /// Solve and report without rewriting the pricing data
    #[arg(long)]
    dry_run: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "appraiser=info",
        1 => "appraiser=debug",
        _ => "appraiser=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Appraiser v{}", env!("CARGO_PKG_VERSION"));

    // Load or create configuration
    let mut config = match &args.config {
        Some(path) => AppraiserConfig::from_file(path)?,
        None => AppraiserConfig::default(),
    };
    if let Some(depth) = args.max_depth {
        config.solver.max_depth = depth;
    }
    if let Some(path) = &args.report {
        config.output.report_path = path.clone();
    }
    config.output.show_results |= args.show;

    let universe = Universe::from_json_file(&args.universe)?;
    let mut data = PricingData::load_or_default(&args.data)?;
    let rules = data.matching.clone();

    let valuation = ValuationTable::seeded(&universe.registry, &rules, &data.overrides);
    let mut solver = DepthSolver::new(&universe, valuation, &config.solver);
    let summary = solver.solve_all(&data.overrides);
    let report = solver.reconcile(&rules, &mut data, &summary);

    if config.output.show_results {
        for line in show_results(&universe.registry, solver.valuation()) {
            println!("{}", line);
        }
    }

    report.save(&config.output.report_path, config.output.pretty)?;
    info!("Report written to {}", config.output.report_path);

    if args.dry_run {
        info!("Dry run, leaving {} untouched", args.data);
    } else {
        data.save(&args.data, config.output.pretty)?;
        info!("Pricing data written to {}", args.data);
    }

    info!(
        "{} unsolved, {} overrides awaiting a value, {} optional",
        summary.unsolved,
        data.overrides.values().filter(|w| w.is_none()).count(),
        data.optional.len()
    );
    Ok(())
}
