// SPDX-License-Identifier: Apache-2.0

use genoscope_classify::{Classification, Classify, ClassifyError};

/// Deterministic classifier for tests: always returns the same label and
/// confidence, with index 0.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    label: String,
    confidence: f64,
}

impl FixedClassifier {
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

impl Classify for FixedClassifier {
    fn classify(&self, _sequence: &str) -> Result<Classification, ClassifyError> {
        Ok(Classification {
            label_index: 0,
            label: self.label.clone(),
            confidence: self.confidence,
        })
    }
}
