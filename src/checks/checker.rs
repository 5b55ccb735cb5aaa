use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    checks::tour::{TourCheckError, assert_tours_cover_layout},
    io::{
        instance_reader::{Layout, LayoutReaderError},
        result_reader::{ResultReaderError, RunResults},
    },
};

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    LayoutReaderError(#[from] LayoutReaderError),

    #[error(transparent)]
    ResultReaderError(#[from] ResultReaderError),

    #[error("Results do not fit the instance layout: {0}")]
    TourCheck(#[from] TourCheckError),
}

/// Loads a layout together with the results reported for it and verifies that
/// every circuit actually tours this instance.
pub fn load_and_check(
    instance_path: &Path,
    results_path: &Path,
    paranoid: bool,
) -> Result<(Layout, RunResults), CheckerError> {
    let instance_reader = BufReader::new(File::open(instance_path)?);
    let results_reader = BufReader::new(File::open(results_path)?);
    load_and_check_from(instance_reader, results_reader, paranoid)
}

pub fn load_and_check_from(
    instance_reader: impl BufRead,
    results_reader: impl BufRead,
    paranoid: bool,
) -> Result<(Layout, RunResults), CheckerError> {
    let layout = Layout::read_from(instance_reader, paranoid)?;
    let results = RunResults::read_from(results_reader, paranoid)?;

    assert_tours_cover_layout(&results, layout.num_nodes())?;

    debug!(
        "Loaded {} nodes and {} runs",
        layout.num_nodes(),
        results.num_runs()
    );

    Ok((layout, results))
}
