use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::{debug, error, warn};

/// Coordinates of a single node. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Error)]
pub enum LayoutReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed instance file: {0}")]
    ParserError(#[from] LayoutParseError),
    #[error("Warning while reading instance file (paranoid mode): {0}")]
    ParserWarning(#[from] LayoutParseWarning),
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutParseError {
    #[error("Line {} has {found} tokens, but the format is `<id> <x> <y>`", lineno + 1)]
    WrongTokenCount { lineno: usize, found: usize },

    #[error("Line {} contains non-numeric token {token:?}", lineno + 1)]
    InvalidNumber { lineno: usize, token: String },

    #[error("Line {} contains node id 0, but on-disk ids are 1-based", lineno + 1)]
    ZeroNodeId { lineno: usize },

    #[error("Line {} repeats node id {id} first seen in line {}", lineno + 1, first_lineno + 1)]
    DuplicateNode {
        lineno: usize,
        first_lineno: usize,
        id: u64,
    },

    #[error("File has {num_lines} nodes, but id {missing} never appears")]
    MissingNodeId { num_lines: usize, missing: u64 },

    #[error("Instance file contains no nodes")]
    Empty,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutParseWarning {
    #[error("Line {} has extra whitespace", lineno + 1)]
    ExtraWhitespace { lineno: usize },
}

/// Node positions of one problem instance, indexed by 0-based node id.
///
/// The on-disk format uses 1-based ids; the reader normalizes them, so after
/// a successful load the id set is exactly `0..num_nodes()`.
#[derive(Debug, Clone)]
pub struct Layout {
    positions: Vec<Position>,
}

impl Layout {
    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, node: u32) -> Option<Position> {
        self.positions.get(node as usize).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn read(path: &Path, paranoid: bool) -> Result<Self, LayoutReaderError> {
        debug!("Read instance layout from {path:?}");
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), paranoid)
    }

    pub fn read_from(reader: impl BufRead, paranoid: bool) -> Result<Self, LayoutReaderError> {
        let mut parser = LayoutParser::process(reader)?;

        for w in &parser.warnings {
            warn!(" {w}");
        }

        for e in &parser.errors {
            error!(" {e}");
        }

        if !parser.errors.is_empty() {
            return Err(LayoutReaderError::ParserError(parser.errors.remove(0)));
        }

        if paranoid && !parser.warnings.is_empty() {
            return Err(LayoutReaderError::ParserWarning(parser.warnings.remove(0)));
        }

        let num_nodes = parser.positions.len();
        let mut positions = vec![Position { x: 0.0, y: 0.0 }; num_nodes];
        for (id, (_, pos)) in parser.positions {
            positions[id as usize] = pos;
        }

        Ok(Self { positions })
    }
}

//////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct LayoutParser {
    pub errors: Vec<LayoutParseError>,
    pub warnings: Vec<LayoutParseWarning>,

    /// 0-based id to (lineno, position) of the first occurrence.
    pub positions: HashMap<u64, (usize, Position)>,
    num_lines: usize,
}

impl LayoutParser {
    pub fn process(reader: impl BufRead) -> Result<LayoutParser, std::io::Error> {
        let mut parser = LayoutParser::default();

        for (lineno, line) in reader.lines().enumerate() {
            parser.visit_line(lineno, &line?);
        }

        parser.finish();
        Ok(parser)
    }

    fn visit_line(&mut self, lineno: usize, line: &str) {
        self.num_lines += 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.join(" ") != line {
            self.warnings
                .push(LayoutParseWarning::ExtraWhitespace { lineno });
        }

        if tokens.len() != 3 {
            self.errors.push(LayoutParseError::WrongTokenCount {
                lineno,
                found: tokens.len(),
            });
            return;
        }

        let Ok(raw_id) = tokens[0].parse::<u64>() else {
            self.errors.push(LayoutParseError::InvalidNumber {
                lineno,
                token: tokens[0].to_string(),
            });
            return;
        };

        let mut coords = [0.0f64; 2];
        for (slot, token) in coords.iter_mut().zip(&tokens[1..]) {
            match token.parse::<f64>() {
                Ok(value) => *slot = value,
                Err(_) => {
                    self.errors.push(LayoutParseError::InvalidNumber {
                        lineno,
                        token: token.to_string(),
                    });
                    return;
                }
            }
        }

        if raw_id == 0 {
            self.errors.push(LayoutParseError::ZeroNodeId { lineno });
            return;
        }

        // normalize to the 0-based ids used everywhere downstream
        let id = raw_id - 1;
        let pos = Position {
            x: coords[0],
            y: coords[1],
        };

        if let Some(&(first_lineno, _)) = self.positions.get(&id) {
            self.errors.push(LayoutParseError::DuplicateNode {
                lineno,
                first_lineno,
                id: raw_id,
            });
        } else {
            self.positions.insert(id, (lineno, pos));
        }
    }

    fn finish(&mut self) {
        if self.num_lines == 0 {
            self.errors.push(LayoutParseError::Empty);
            return;
        }

        for id in 0..self.num_lines as u64 {
            if !self.positions.contains_key(&id) {
                self.errors.push(LayoutParseError::MissingNodeId {
                    num_lines: self.num_lines,
                    missing: id + 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_node_layout() {
        let data = b"1 0.0 0.0\n2 3.0 4.0\n";
        let layout = Layout::read_from(&data[..], true).unwrap();

        assert_eq!(layout.num_nodes(), 2);
        assert_eq!(layout.position(0), Some(Position { x: 0.0, y: 0.0 }));
        assert_eq!(layout.position(1), Some(Position { x: 3.0, y: 4.0 }));
        assert_eq!(layout.position(2), None);
    }

    #[test]
    fn ids_normalized_regardless_of_file_order() {
        let data = b"3 1.0 1.0\n1 0.0 0.0\n2 0.5 0.5\n";
        let layout = Layout::read_from(&data[..], true).unwrap();

        assert_eq!(layout.num_nodes(), 3);
        assert_eq!(layout.position(2), Some(Position { x: 1.0, y: 1.0 }));
        assert_eq!(layout.position(0), Some(Position { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn irregular_whitespace_is_tolerated() {
        let data = b"1   0.0  0.0\n2 3.0 4.0 \n";
        let layout = Layout::read_from(&data[..], false).unwrap();
        assert_eq!(layout.num_nodes(), 2);

        // but promoted to a failure in paranoid mode
        let err = Layout::read_from(&data[..], true).unwrap_err();
        assert!(matches!(err, LayoutReaderError::ParserWarning(_)));
    }

    macro_rules! assert_raises_error {
        ($name : ident, $str : expr, $pat : pat) => {
            #[test]
            fn $name() {
                let data = $str;
                let parser = LayoutParser::process(&data[..]).unwrap();
                assert!(
                    parser.errors.iter().any(|e| matches!(e, $pat)),
                    "Errors: {:#?}",
                    parser.errors
                );
            }
        };
    }

    assert_raises_error!(
        non_numeric_tokens,
        b"a b\n",
        LayoutParseError::WrongTokenCount { lineno: 0, found: 2 }
    );

    assert_raises_error!(
        non_numeric_coordinate,
        b"1 0.0 east\n",
        LayoutParseError::InvalidNumber { lineno: 0, .. }
    );

    assert_raises_error!(
        non_numeric_id,
        b"x 0.0 1.0\n",
        LayoutParseError::InvalidNumber { lineno: 0, .. }
    );

    assert_raises_error!(
        too_many_tokens,
        b"1 0.0 1.0 2.0\n",
        LayoutParseError::WrongTokenCount { lineno: 0, found: 4 }
    );

    assert_raises_error!(
        zero_based_id_on_disk,
        b"0 0.0 1.0\n1 1.0 1.0\n",
        LayoutParseError::ZeroNodeId { lineno: 0 }
    );

    assert_raises_error!(
        duplicate_id_is_never_overwritten,
        b"1 0.0 0.0\n1 5.0 5.0\n",
        LayoutParseError::DuplicateNode {
            lineno: 1,
            first_lineno: 0,
            id: 1
        }
    );

    assert_raises_error!(
        id_gap,
        b"1 0.0 0.0\n3 5.0 5.0\n",
        LayoutParseError::MissingNodeId {
            num_lines: 2,
            missing: 2
        }
    );

    assert_raises_error!(empty_file, b"", LayoutParseError::Empty);

    #[test]
    fn error_message_names_offending_line() {
        let parser = LayoutParser::process(&b"1 0.0 0.0\nx y z\n"[..]).unwrap();
        let rendered = parser.errors[0].to_string();
        assert!(rendered.contains("Line 2"), "{rendered}");
    }
}
