use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, error, warn};

/// One solver run: the tour (implicitly closed into a cycle) and the cost
/// the solver reported for it. Costs are consumed verbatim, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourResult {
    pub circuit: Vec<u32>,
    pub cost: u64,
}

#[derive(Debug, Error)]
pub enum ResultReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed result file: {0}")]
    ParserError(#[from] ResultParseError),
    #[error("Warning while reading result file (paranoid mode): {0}")]
    ParserWarning(#[from] ResultParseWarning),
}

#[derive(Debug, Error, PartialEq)]
pub enum ResultParseError {
    #[error("File ends mid-record: record {} has a circuit line but no cost line", record + 1)]
    Truncated { record: usize },

    #[error("Record {}: circuit line contains non-integer token {token:?}", record + 1)]
    InvalidNodeToken { record: usize, token: String },

    #[error("Record {}: circuit line is empty", record + 1)]
    EmptyCircuit { record: usize },

    #[error("Record {}: cost line {content:?} is not a single non-negative integer", record + 1)]
    InvalidCost { record: usize, content: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ResultParseWarning {
    #[error("Line {} has extra whitespace", lineno + 1)]
    ExtraWhitespace { lineno: usize },
}

/// The runs recorded in one result file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResults {
    pub results: Vec<TourResult>,
}

impl RunResults {
    pub fn num_runs(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> &[TourResult] {
        &self.results
    }

    pub fn costs(&self) -> Vec<u64> {
        self.results.iter().map(|r| r.cost).collect()
    }

    pub fn read(path: &Path, paranoid: bool) -> Result<Self, ResultReaderError> {
        debug!("Read results from {path:?}");
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), paranoid)
    }

    pub fn read_from(reader: impl BufRead, paranoid: bool) -> Result<Self, ResultReaderError> {
        let mut parser = ResultParser::process(reader)?;

        for w in &parser.warnings {
            warn!(" {w}");
        }

        for e in &parser.errors {
            error!(" {e}");
        }

        if !parser.errors.is_empty() {
            return Err(ResultReaderError::ParserError(parser.errors.remove(0)));
        }

        if paranoid && !parser.warnings.is_empty() {
            return Err(ResultReaderError::ParserWarning(parser.warnings.remove(0)));
        }

        Ok(Self {
            results: std::mem::take(&mut parser.results),
        })
    }

    /// Emits the same two-lines-per-run format the reader consumes;
    /// `read_from` of the written bytes reproduces `self` exactly.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        for result in &self.results {
            writeln!(writer, "{}", result.circuit.iter().join(" "))?;
            writeln!(writer, "{}", result.cost)?;
        }
        Ok(())
    }
}

//////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct ResultParser {
    pub errors: Vec<ResultParseError>,
    pub warnings: Vec<ResultParseWarning>,
    pub results: Vec<TourResult>,
}

impl ResultParser {
    pub fn process(reader: impl BufRead) -> Result<ResultParser, std::io::Error> {
        let mut parser = ResultParser::default();

        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

        for (lineno, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.join(" ") != *line {
                parser
                    .warnings
                    .push(ResultParseWarning::ExtraWhitespace { lineno });
            }
        }

        for (record, pair) in lines.chunks(2).enumerate() {
            let [circuit_line, cost_line] = pair else {
                parser.errors.push(ResultParseError::Truncated { record });
                break;
            };

            parser.visit_record(record, circuit_line, cost_line);
        }

        Ok(parser)
    }

    fn visit_record(&mut self, record: usize, circuit_line: &str, cost_line: &str) {
        let mut circuit = Vec::new();
        for token in circuit_line.split_whitespace() {
            match token.parse::<u32>() {
                Ok(node) => circuit.push(node),
                Err(_) => {
                    self.errors.push(ResultParseError::InvalidNodeToken {
                        record,
                        token: token.to_string(),
                    });
                    return;
                }
            }
        }

        if circuit.is_empty() {
            self.errors.push(ResultParseError::EmptyCircuit { record });
            return;
        }

        let Ok(cost) = cost_line.trim().parse::<u64>() else {
            self.errors.push(ResultParseError::InvalidCost {
                record,
                content: cost_line.to_string(),
            });
            return;
        };

        self.results.push(TourResult { circuit, cost });
    }
}
