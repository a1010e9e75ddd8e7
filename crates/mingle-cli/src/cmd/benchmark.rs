use clap::Args;
use mingle_core::config::RosterParams;
use mingle_core::error::MingleResult;
use mingle_core::Schedule;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub roster: RosterParams,

    #[arg(long, default_value_t = 1_000_000)]
    pub iterations: u64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

fn build(args: &BenchmarkArgs) -> MingleResult<Schedule> {
    let mut schedule = Schedule::new(
        args.roster.groups,
        args.roster.males_per_group,
        args.roster.females_per_group,
        args.roster.days,
        args.seed,
    )?;
    schedule.set_immovable_males(&args.roster.immovable_male_counts()?)?;
    schedule.set_immovable_females(&args.roster.immovable_female_counts()?)?;
    Ok(schedule)
}

pub fn run(args: BenchmarkArgs) -> MingleResult<()> {
    let mut schedule = build(&args)?;
    let started = Instant::now();
    for _ in 0..args.iterations {
        schedule.hillclimb_step();
    }
    let elapsed = started.elapsed();
    info!(
        iterations = args.iterations,
        score = schedule.score(),
        "hill climbing took {:.3}s ({:.2}M steps/s)",
        elapsed.as_secs_f64(),
        args.iterations as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );

    let mut schedule = build(&args)?;
    let started = Instant::now();
    schedule.anneal(args.iterations);
    let elapsed = started.elapsed();
    info!(
        iterations = args.iterations,
        score = schedule.score(),
        "simulated annealing took {:.3}s ({:.2}M steps/s)",
        elapsed.as_secs_f64(),
        args.iterations as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );

    Ok(())
}
