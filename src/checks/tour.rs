use thiserror::Error;

use crate::io::result_reader::RunResults;

#[derive(Debug, Error, PartialEq)]
pub enum TourCheckError {
    #[error("Record {}: node id {node} is out of range for an instance with {num_nodes} nodes", record + 1)]
    NodeOutOfRange {
        record: usize,
        node: u32,
        num_nodes: usize,
    },

    #[error("Record {}: node id {node} is visited more than once", record + 1)]
    RepeatedNode { record: usize, node: u32 },

    #[error("Record {}: circuit visits {len} nodes, but the instance has {num_nodes}", record + 1)]
    LengthMismatch {
        record: usize,
        len: usize,
        num_nodes: usize,
    },
}

/// Asserts that every circuit is a permutation of the instance's node ids.
///
/// The result format carries no node count of its own, so a result file can
/// only be interpreted against a layout it actually belongs to; this is the
/// gate the report pipeline runs before aggregating anything.
pub fn assert_tours_cover_layout(
    results: &RunResults,
    num_nodes: usize,
) -> Result<(), TourCheckError> {
    for (record, result) in results.results().iter().enumerate() {
        let mut seen = vec![false; num_nodes];

        for &node in &result.circuit {
            if node as usize >= num_nodes {
                return Err(TourCheckError::NodeOutOfRange {
                    record,
                    node,
                    num_nodes,
                });
            }

            if std::mem::replace(&mut seen[node as usize], true) {
                return Err(TourCheckError::RepeatedNode { record, node });
            }
        }

        if result.circuit.len() != num_nodes {
            return Err(TourCheckError::LengthMismatch {
                record,
                len: result.circuit.len(),
                num_nodes,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::result_reader::TourResult;

    fn runs(circuits: &[&[u32]]) -> RunResults {
        RunResults {
            results: circuits
                .iter()
                .map(|&circuit| TourResult {
                    circuit: circuit.to_vec(),
                    cost: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn permutations_pass() {
        let results = runs(&[&[0, 1, 2], &[2, 0, 1]]);
        assert_tours_cover_layout(&results, 3).unwrap();
    }

    #[test]
    fn out_of_range_node_is_rejected() {
        let results = runs(&[&[0, 1, 2], &[0, 1, 3]]);
        assert_eq!(
            assert_tours_cover_layout(&results, 3),
            Err(TourCheckError::NodeOutOfRange {
                record: 1,
                node: 3,
                num_nodes: 3
            })
        );
    }

    #[test]
    fn repeated_node_is_rejected() {
        let results = runs(&[&[0, 1, 1]]);
        assert_eq!(
            assert_tours_cover_layout(&results, 3),
            Err(TourCheckError::RepeatedNode { record: 0, node: 1 })
        );
    }

    #[test]
    fn short_circuit_is_rejected() {
        let results = runs(&[&[0, 2]]);
        assert_eq!(
            assert_tours_cover_layout(&results, 3),
            Err(TourCheckError::LengthMismatch {
                record: 0,
                len: 2,
                num_nodes: 3
            })
        );
    }

    #[test]
    fn empty_result_set_passes() {
        assert_tours_cover_layout(&RunResults::default(), 3).unwrap();
    }
}
