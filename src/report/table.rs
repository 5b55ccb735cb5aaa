use std::{io::Write, path::Path};

use itertools::Itertools;
use tracing::debug;

use crate::stats::{self, CostSummary};

/// One line of the summary table: the aggregated view of every run recorded
/// for a single instance.
#[derive(Debug, Clone)]
pub struct InstanceRow {
    pub instance: String,
    pub optimum: u64,
    pub best: u64,
    pub worst: u64,
    pub summary: CostSummary,
}

pub fn write_summary_table(path: &Path, rows: &[InstanceRow]) -> Result<(), csv::Error> {
    debug!("Write summary table to {path:?}");
    write_summary_to(csv::Writer::from_path(path)?, rows)
}

pub fn write_summary_to<W: Write>(
    mut writer: csv::Writer<W>,
    rows: &[InstanceRow],
) -> Result<(), csv::Error> {
    writer.write_record([
        "instance",
        "runs",
        "best",
        "worst",
        "mean",
        "median",
        "q1",
        "q3",
        "optimum",
        "rsq_best_pct",
        "rsq_mean_pct",
    ])?;

    for row in rows.iter().sorted_by(|a, b| a.instance.cmp(&b.instance)) {
        let summary = &row.summary;
        writer.write_record([
            row.instance.clone(),
            summary.runs.to_string(),
            row.best.to_string(),
            row.worst.to_string(),
            format!("{:.2}", summary.mean),
            format!("{:.2}", summary.median),
            format!("{:.2}", summary.q1),
            format!("{:.2}", summary.q3),
            row.optimum.to_string(),
            format!(
                "{:.3}",
                stats::relative_quality_percent(row.best as f64, row.optimum)
            ),
            format!(
                "{:.3}",
                stats::relative_quality_percent(summary.mean, row.optimum)
            ),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
