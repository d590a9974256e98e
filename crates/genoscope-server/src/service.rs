// SPDX-License-Identifier: Apache-2.0

use genoscope_classify::{split_sequences, Classify, ClassifyError};
use genoscope_model::{sequence_preview, HistoryRow, NewPrediction, PatientMetadata};
use genoscope_store::{PredictionStore, StoreError};
use std::sync::Arc;

#[derive(Debug)]
pub enum PredictError {
    Classify(ClassifyError),
    Store(StoreError),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classify(e) => write!(f, "classification failed: {e}"),
            Self::Store(e) => write!(f, "persistence failed: {e}"),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<ClassifyError> for PredictError {
    fn from(e: ClassifyError) -> Self {
        Self::Classify(e)
    }
}

impl From<StoreError> for PredictError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// One classified record of a batch upload. The preview is display-only; the
/// full sequence was classified and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub preview: String,
    pub disorder: String,
    pub confidence: f64,
}

/// Classify-then-persist orchestration shared by the manual and batch flows.
pub struct PredictionService {
    classifier: Arc<dyn Classify>,
    store: PredictionStore,
}

impl PredictionService {
    #[must_use]
    pub fn new(classifier: Arc<dyn Classify>, store: PredictionStore) -> Self {
        Self { classifier, store }
    }

    /// Classify `sequence` and write one record with the supplied metadata.
    /// The write happens only after a successful classification, so a model
    /// failure leaves no partial row behind.
    pub fn classify_and_record(
        &self,
        sequence: &str,
        metadata: PatientMetadata,
    ) -> Result<(String, f64), PredictError> {
        let result = self.classifier.classify(sequence)?;
        self.store.append(&NewPrediction {
            metadata,
            sequence: sequence.to_string(),
            disorder: result.label.clone(),
            confidence: result.confidence,
        })?;
        Ok((result.label, result.confidence))
    }

    /// Run every record of a genome file through the classifier in order,
    /// with all-"NA" metadata. Empty content yields an empty list.
    pub fn process_genome_file(&self, content: &str) -> Result<Vec<BatchOutcome>, PredictError> {
        let mut outcomes = Vec::new();
        for sequence in split_sequences(content) {
            let (disorder, confidence) =
                self.classify_and_record(&sequence, PatientMetadata::default())?;
            outcomes.push(BatchOutcome {
                preview: sequence_preview(&sequence),
                disorder,
                confidence,
            });
        }
        Ok(outcomes)
    }

    pub fn history(&self) -> Result<Vec<HistoryRow>, PredictError> {
        Ok(self.store.list_all_desc()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClassifier;
    use tempfile::tempdir;

    fn service_in(dir: &tempfile::TempDir) -> PredictionService {
        let store = PredictionStore::new(dir.path().join("predictions.db"));
        store.init().expect("init");
        PredictionService::new(
            Arc::new(FixedClassifier::new("Thalassemia", 91.0)),
            store,
        )
    }

    #[test]
    fn every_successful_classification_writes_one_record() {
        let dir = tempdir().expect("tempdir");
        let service = service_in(&dir);
        let (label, confidence) = service
            .classify_and_record("ACGTACGT", PatientMetadata::default())
            .expect("classify");
        assert_eq!(label, "Thalassemia");
        assert!((confidence - 91.0).abs() < f64::EPSILON);
        assert_eq!(service.history().expect("history").len(), 1);
    }

    #[test]
    fn batch_processing_persists_full_sequences_but_previews_results() {
        let dir = tempdir().expect("tempdir");
        let service = service_in(&dir);
        let long = "A".repeat(80);
        let outcomes = service
            .process_genome_file(&format!(">r1\n{long}\n>r2\nTTTT"))
            .expect("process");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].preview.len(), 53);
        assert_eq!(outcomes[1].preview, "TTTT...");
        let history = service.history().expect("history");
        assert_eq!(history.len(), 2);
        // newest first: r2 then r1
        assert_eq!(history[0].sequence, "TTTT");
        assert_eq!(history[1].sequence, long);
        assert_eq!(history[0].name, "NA");
    }

    #[test]
    fn empty_file_yields_no_outcomes_and_no_rows() {
        let dir = tempdir().expect("tempdir");
        let service = service_in(&dir);
        assert!(service.process_genome_file("").expect("process").is_empty());
        assert!(service.history().expect("history").is_empty());
    }
}
