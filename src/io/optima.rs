use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OptimaError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Optimum table is not a valid JSON object of `name: cost` entries: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No known optimum for instance {name:?}")]
    UnknownInstance { name: String },
}

/// Known-optimal cost per instance name. Hand-maintained ground truth,
/// loaded from a JSON object (`{"bayg29": 1610, ...}`) rather than baked
/// into the code, so tests and callers can supply their own table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct OptimumTable {
    optima: HashMap<String, u64>,
}

impl OptimumTable {
    pub fn read(path: &Path) -> Result<Self, OptimaError> {
        debug!("Read optimum table from {path:?}");
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn get(&self, name: &str) -> Result<u64, OptimaError> {
        self.optima
            .get(name)
            .copied()
            .ok_or_else(|| OptimaError::UnknownInstance {
                name: name.to_string(),
            })
    }

    pub fn insert(&mut self, name: impl Into<String>, optimum: u64) {
        self.optima.insert(name.into(), optimum);
    }

    pub fn len(&self) -> usize {
        self.optima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.optima.is_empty()
    }
}

impl FromIterator<(String, u64)> for OptimumTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            optima: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_object() {
        let table: OptimumTable =
            serde_json::from_str(r#"{"bayg29": 1610, "gr21": 2707}"#).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("bayg29").unwrap(), 1610);
        assert_eq!(table.get("gr21").unwrap(), 2707);
    }

    #[test]
    fn reads_the_testcase_table() {
        let table = OptimumTable::read(&crate::io::tests::testcases_directory("optima.json"))
            .unwrap();

        assert_eq!(table.get("berlin5").unwrap(), 2000);
        assert_eq!(table.get("square4").unwrap(), 4);
    }

    #[test]
    fn unknown_instance_is_an_error() {
        let mut table = OptimumTable::default();
        table.insert("bayg29", 1610);

        let err = table.get("st70").unwrap_err();
        assert!(matches!(err, OptimaError::UnknownInstance { .. }));
        assert!(err.to_string().contains("st70"));
    }
}
