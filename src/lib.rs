//! Readers, consistency checks, and report rendering for TSP solver runs.
//!
//! The crate consumes the flat text files produced by an external solver
//! (node layouts and tour/cost result files), derives descriptive statistics
//! against a table of known optima, and renders per-instance plots plus a
//! CSV summary table.

pub mod checks;
pub mod io;
pub mod options;
pub mod report;
pub mod stats;
