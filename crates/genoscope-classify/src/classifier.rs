// SPDX-License-Identifier: Apache-2.0

use crate::artifacts::ClassifierArtifacts;
use crate::kmer;
use crate::labels::DisorderLabels;
use crate::model::DisorderClassifier;
use crate::ClassifyError;
use burn::prelude::*;
use std::path::Path;
use tokenizers::Tokenizer;

type InferBackend = burn::backend::NdArray;
type InferDevice = burn::backend::ndarray::NdArrayDevice;

const PAD_ID: u32 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label_index: usize,
    pub label: String,
    /// Probability of the predicted class, as a percentage in [0, 100].
    pub confidence: f64,
}

/// Seam between request handling and the pretrained model, so server tests
/// can substitute a deterministic classifier.
pub trait Classify: Send + Sync {
    fn classify(&self, sequence: &str) -> Result<Classification, ClassifyError>;
}

pub struct SequenceClassifier {
    model: DisorderClassifier<InferBackend>,
    tokenizer: Tokenizer,
    labels: DisorderLabels,
    kmer_len: usize,
    max_seq_len: usize,
    device: InferDevice,
}

impl SequenceClassifier {
    pub fn new(
        model: DisorderClassifier<InferBackend>,
        tokenizer: Tokenizer,
        labels: DisorderLabels,
        kmer_len: usize,
        max_seq_len: usize,
    ) -> Self {
        Self {
            model,
            tokenizer,
            labels,
            kmer_len,
            max_seq_len,
            device: InferDevice::default(),
        }
    }

    /// Load the full pipeline from a pretrained artifact directory plus the
    /// reference dataset the label space derives from.
    pub fn from_artifacts(
        artifact_dir: &Path,
        reference_csv: &Path,
        kmer_len: usize,
    ) -> Result<Self, ClassifyError> {
        let device = InferDevice::default();
        let artifacts = ClassifierArtifacts::new(artifact_dir);
        let config = artifacts.load_config()?;
        let model = artifacts.load_model::<InferBackend>(&config, &device)?;
        let tokenizer = artifacts.load_tokenizer()?;
        let labels = DisorderLabels::from_reference_csv(reference_csv)?;
        if labels.len() != config.num_labels {
            tracing::warn!(
                reference = labels.len(),
                model = config.num_labels,
                "label space size differs from the model head; unmapped indices fall back"
            );
        }
        Ok(Self::new(
            model,
            tokenizer,
            labels,
            kmer_len,
            config.max_seq_len,
        ))
    }

    #[must_use]
    pub fn labels(&self) -> &DisorderLabels {
        &self.labels
    }

    fn input_ids(&self, sequence: &str) -> Result<Vec<u32>, ClassifyError> {
        let encoded = kmer::encode(sequence, self.kmer_len);
        let enc = self
            .tokenizer
            .encode(encoded.as_str(), true)
            .map_err(|e| ClassifyError::Tokenize(e.to_string()))?;
        let mut ids: Vec<u32> = enc.get_ids().to_vec();
        ids.truncate(self.max_seq_len);
        while ids.len() < self.max_seq_len {
            ids.push(PAD_ID);
        }
        Ok(ids)
    }
}

impl Classify for SequenceClassifier {
    fn classify(&self, sequence: &str) -> Result<Classification, ClassifyError> {
        let ids = self.input_ids(sequence)?;
        let input_flat: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
        let input = Tensor::<InferBackend, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .unsqueeze::<2>();

        let logits = self.model.forward(input); // [1, num_labels]
        let probabilities: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ClassifyError::Decode(format!("{e:?}")))?;

        let (label_index, top) = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .ok_or_else(|| ClassifyError::Decode("empty probability vector".to_string()))?;

        let confidence = f64::from(*top) * 100.0;
        let label = self.labels.resolve(label_index).to_string();
        tracing::debug!(label = %label, confidence, "sequence classified");
        Ok(Classification {
            label_index,
            label,
            confidence,
        })
    }
}
