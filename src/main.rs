use std::{
    collections::BTreeMap,
    error::Error,
    path::{Path, PathBuf},
    process::exit,
};

use glob::glob;
use tracing::{error, info, warn};

use tspreport::{
    checks::checker::load_and_check,
    io::optima::OptimumTable,
    options::Opts,
    report::{
        cost_plot::render_cost_report,
        table::{self, InstanceRow},
        tour_plot::render_tour_report,
    },
    stats::{self, CostSummary},
};

fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let pattern = dir.join(pattern);
    let pattern = pattern
        .to_str()
        .ok_or("directory path is not valid UTF-8")?;

    let mut files: Vec<PathBuf> = glob(pattern)?.collect::<Result<_, _>>()?;
    files.sort();
    Ok(files)
}

/// Strips the first matching suffix from the file name; the remainder is the
/// instance name both file kinds are keyed by.
fn instance_name(path: &Path, suffixes: &[&str]) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    suffixes
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .map(str::to_string)
}

fn process_instance(
    name: &str,
    instance_path: &Path,
    results_path: &Path,
    optimum: u64,
    out_dir: &Path,
    paranoid: bool,
) -> Result<InstanceRow, Box<dyn Error>> {
    let (layout, runs) = load_and_check(instance_path, results_path, paranoid)?;

    let best = stats::best(runs.results()).ok_or("result file contains no runs")?;
    let worst = stats::worst(runs.results()).ok_or("result file contains no runs")?;
    let costs = runs.costs();
    let summary = CostSummary::describe(&costs).ok_or("result file contains no runs")?;

    render_cost_report(
        &out_dir.join(format!("{name}_costs.png")),
        name,
        &costs,
        optimum,
    )?;
    render_tour_report(
        &out_dir.join(format!("{name}_tours.png")),
        name,
        &layout,
        best,
        worst,
    )?;

    Ok(InstanceRow {
        instance: name.to_string(),
        optimum,
        best: best.cost,
        worst: worst.cost,
        summary,
    })
}

/// Runs the whole batch and returns the number of instances that failed.
/// A bad file only loses that instance; the rest of the batch proceeds.
fn run(opts: &Opts) -> Result<usize, Box<dyn Error>> {
    let optima = OptimumTable::read(&opts.optima)?;

    let layouts: BTreeMap<String, PathBuf> = discover(&opts.instances, "*_pos.dat")?
        .into_iter()
        .filter_map(|path| Some((instance_name(&path, &["_pos.dat"])?, path)))
        .collect();
    info!("Discovered {} instance files", layouts.len());

    let result_files = discover(&opts.results, "*.txt")?;
    info!("Discovered {} result files", result_files.len());

    std::fs::create_dir_all(&opts.output)?;

    let mut rows = Vec::new();
    let mut failed = 0usize;

    for results_path in &result_files {
        let Some(name) = instance_name(results_path, &["_mat.dat.txt", ".txt"]) else {
            continue;
        };

        let outcome = layouts
            .get(&name)
            .ok_or_else(|| {
                Box::<dyn Error>::from(format!("no `{name}_pos.dat` found for {results_path:?}"))
            })
            .and_then(|instance_path| {
                let optimum = optima.get(&name)?;
                process_instance(
                    &name,
                    instance_path,
                    results_path,
                    optimum,
                    &opts.output,
                    opts.paranoid,
                )
            });

        match outcome {
            Ok(row) => {
                info!(
                    "{name}: {} runs, best {}, worst {}",
                    row.summary.runs, row.best, row.worst
                );
                rows.push(row);
            }
            Err(e) => {
                error!("Skipping {name}: {e}");
                failed += 1;
            }
        }
    }

    if rows.is_empty() {
        warn!("No instance produced a report");
    } else {
        table::write_summary_table(&opts.output.join("summary.csv"), &rows)?;
        info!(
            "Wrote {} report(s) and summary.csv to {:?}",
            rows.len(),
            opts.output
        );
    }

    Ok(failed)
}

fn main() {
    let opts = Opts::process();

    match run(&opts) {
        Ok(0) => {}
        Ok(failed) => {
            error!("{failed} instance(s) could not be processed");
            exit(1);
        }
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    }
}
