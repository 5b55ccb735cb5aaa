use std::{error::Error, path::PathBuf, process::exit};

use clap::Parser;
use tracing::error;

use tspreport::{
    io::{optima::OptimumTable, result_reader::RunResults},
    stats,
};

#[derive(Parser)]
#[command(version, about = "Compare the mean solution quality of two solver runs")]
pub struct Arguments {
    /// Instance name used to look up the optimum
    pub instance: String,

    /// Result file of the baseline run (A)
    pub run_a: PathBuf,

    /// Result file of the candidate run (B)
    pub run_b: PathBuf,

    /// JSON file mapping instance names to their known-optimal cost
    pub optima: PathBuf,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Treat reader warnings as errors
    #[arg(short, long)]
    pub paranoid: bool,
}

fn compare(args: &Arguments) -> Result<(), Box<dyn Error>> {
    let optima = OptimumTable::read(&args.optima)?;
    let optimum = optima.get(&args.instance)?;

    let run_a = RunResults::read(&args.run_a, args.paranoid)?;
    let run_b = RunResults::read(&args.run_b, args.paranoid)?;

    let comparison = stats::compare_runs(&run_a.costs(), &run_b.costs(), optimum)
        .ok_or("both result files must contain at least one run")?;

    println!("{}: optimum {optimum}", args.instance);
    println!(
        "mean RSQ of A ({}): {:.3}%",
        args.run_a.display(),
        comparison.rsq_a
    );
    println!(
        "mean RSQ of B ({}): {:.3}%",
        args.run_b.display(),
        comparison.rsq_b
    );
    match comparison.delta_percent {
        Some(delta) => println!("improvement of B over A: {delta:.2}%"),
        None => println!("improvement of B over A: n/a (run A is already optimal)"),
    }

    Ok(())
}

fn main() {
    let args = Arguments::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::INFO)
            .without_time()
            .init();
    }

    if let Err(e) = compare(&args) {
        error!("{e}");
        exit(1)
    }
}
