use crate::reports;
use clap::Args;
use mingle_core::config::SolveConfig;
use mingle_core::error::MingleResult;
use mingle_core::export;
use mingle_core::runner::{ProgressCallback, Solver};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: SolveConfig,

    /// JSON file with a full solve configuration; overrides the flags.
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Dump the final seating plan as CSV.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, step: u64, score: i64, temp: f64) -> bool {
        info!(step, score, "progress at temperature {temp:.4}");
        true
    }
}

pub fn run(args: SolveArgs) -> MingleResult<()> {
    let config = match &args.config_file {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            SolveConfig::load_from_file(path)?
        }
        None => args.config.clone(),
    };

    info!(
        groups = config.roster.groups,
        males = config.roster.males_per_group,
        females = config.roster.females_per_group,
        days = config.roster.days,
        iterations = config.anneal.iterations,
        "solving"
    );

    let started = Instant::now();
    let report = Solver::new(config).run(args.seed, LogProgress)?;
    let elapsed = started.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reports::print_summary(&report, elapsed);
        reports::print_schedule(&report.schedule);
    }

    if let Some(path) = &args.out {
        export::write_csv_file(&report.schedule, path)?;
        info!("seating plan written to {}", path.display());
    }

    Ok(())
}
