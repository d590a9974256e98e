// SPDX-License-Identifier: Apache-2.0

use crate::ClassifyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Fallback for a class index the reference dataset never named.
pub const UNKNOWN_LABEL: &str = "Unknown Disorder";

const LABEL_COLUMN: &str = "Disorder";

/// Index-to-disorder mapping derived once at startup and read-only after.
///
/// The indices the model emits were fixed at training time by the first-seen
/// order of the reference dataset's `Disorder` column, so derivation must
/// preserve that order exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisorderLabels {
    labels: Vec<String>,
}

impl DisorderLabels {
    pub fn from_reference_csv(path: &Path) -> Result<Self, ClassifyError> {
        let file = fs::File::open(path).map_err(|e| {
            ClassifyError::Reference(format!("cannot open reference dataset '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ClassifyError> {
        let mut lines = reader.lines();
        let header = lines
            .next()
            .ok_or_else(|| ClassifyError::Reference("reference dataset is empty".to_string()))?
            .map_err(|e| ClassifyError::Reference(e.to_string()))?;
        let column = header
            .split(',')
            .position(|h| h.trim() == LABEL_COLUMN)
            .ok_or_else(|| {
                ClassifyError::Reference(format!(
                    "reference dataset has no '{LABEL_COLUMN}' column"
                ))
            })?;

        let mut labels = Vec::new();
        let mut seen = HashSet::new();
        for line in lines {
            let line = line.map_err(|e| ClassifyError::Reference(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let Some(value) = line.split(',').nth(column) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if seen.insert(value.to_string()) {
                labels.push(value.to_string());
            }
        }
        if labels.is_empty() {
            return Err(ClassifyError::Reference(
                "reference dataset names no disorders".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    #[must_use]
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Label for a predicted class index; the sentinel for unmapped indices.
    #[must_use]
    pub fn resolve(&self, index: usize) -> &str {
        self.labels
            .get(index)
            .map_or(UNKNOWN_LABEL, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
