// SPDX-License-Identifier: Apache-2.0

use crate::metadata::PatientMetadata;
use serde::{Deserialize, Serialize};

pub const PREVIEW_LEN: usize = 50;

/// A prediction about to be written. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrediction {
    pub metadata: PatientMetadata,
    pub sequence: String,
    pub disorder: String,
    pub confidence: f64,
}

/// A persisted prediction row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PredictionRecord {
    pub id: i64,
    pub metadata: PatientMetadata,
    pub sequence: String,
    pub disorder: String,
    pub confidence: f64,
}

/// The column subset surfaced by the history view. chronic_illnesses and
/// symptoms stay persisted but are not read back on this path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub sequence: String,
    pub disorder: String,
    pub confidence: f64,
}

/// First `PREVIEW_LEN` characters plus a trailing marker, for display only.
#[must_use]
pub fn sequence_preview(sequence: &str) -> String {
    let head: String = sequence.chars().take(PREVIEW_LEN).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_to_fifty_chars() {
        let long = "A".repeat(120);
        let p = sequence_preview(&long);
        assert_eq!(p.len(), PREVIEW_LEN + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn preview_keeps_short_sequences_whole() {
        assert_eq!(sequence_preview("ACGT"), "ACGT...");
    }
}
