use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Render per-instance plots and a summary table for TSP solver runs")]
pub struct Opts {
    /// Directory containing `*_pos.dat` node layout files
    pub instances: PathBuf,

    /// Directory containing solver result files (`*.txt`)
    pub results: PathBuf,

    /// JSON file mapping instance names to their known-optimal cost
    pub optima: PathBuf,

    /// Directory the plots and the summary table are written to
    #[arg(short, long, default_value = "report")]
    pub output: PathBuf,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Treat reader warnings as errors
    #[arg(short, long)]
    pub paranoid: bool,
}

impl Opts {
    pub fn process() -> Self {
        let opts = Opts::parse();

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(if opts.quiet {
                tracing::Level::ERROR
            } else {
                tracing::Level::INFO
            })
            .without_time()
            .init();

        opts
    }
}
