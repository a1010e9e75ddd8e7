use clap::{Parser, Subcommand};
use std::process;
use tracing::error;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Contact-maximizing group rotation optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a schedule and optimize it.
    Solve(cmd::solve::SolveArgs),
    /// Measure optimization throughput on a roster.
    Benchmark(cmd::benchmark::BenchmarkArgs),
}

fn main() {
    // Logs go to stderr; stdout carries the report, tables and JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Benchmark(args) => cmd::benchmark::run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}
