// SPDX-License-Identifier: Apache-2.0

use crate::model::{DisorderClassifier, DisorderClassifierConfig};
use crate::ClassifyError;
use burn::prelude::*;
use burn::record::{CompactRecorder, Recorder};
use std::fs;
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub const CONFIG_FILE: &str = "classifier_config.json";
pub const WEIGHTS_FILE: &str = "model";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// The pretrained artifact directory: architecture config JSON, tokenizer
/// JSON, and a CompactRecorder weight checkpoint saved without extension
/// (the recorder appends its own).
pub struct ClassifierArtifacts {
    dir: PathBuf,
}

impl ClassifierArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_config(&self) -> Result<DisorderClassifierConfig, ClassifyError> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).map_err(|e| {
            ClassifyError::Artifact(format!("cannot read '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            ClassifyError::Artifact(format!("invalid classifier config '{}': {e}", path.display()))
        })
    }

    pub fn load_model<B: Backend>(
        &self,
        config: &DisorderClassifierConfig,
        device: &B::Device,
    ) -> Result<DisorderClassifier<B>, ClassifyError> {
        let path = self.dir.join(WEIGHTS_FILE);
        let record = CompactRecorder::new().load(path.clone(), device).map_err(|e| {
            ClassifyError::Artifact(format!("cannot load checkpoint '{}': {e}", path.display()))
        })?;
        tracing::info!("classifier weights loaded from '{}'", path.display());
        Ok(config.init(device).load_record(record))
    }

    pub fn load_tokenizer(&self) -> Result<Tokenizer, ClassifyError> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path).map_err(|e| {
            ClassifyError::Artifact(format!("cannot load tokenizer '{}': {e}", path.display()))
        })
    }

    pub fn save_config(&self, config: &DisorderClassifierConfig) -> Result<(), ClassifyError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| ClassifyError::Artifact(e.to_string()))?;
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ClassifyError::Artifact(e.to_string()))?;
        fs::write(&path, json).map_err(|e| {
            ClassifyError::Artifact(format!("cannot write '{}': {e}", path.display()))
        })
    }

    pub fn save_model<B: Backend>(
        &self,
        model: DisorderClassifier<B>,
    ) -> Result<(), ClassifyError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| ClassifyError::Artifact(e.to_string()))?;
        let path = self.dir.join(WEIGHTS_FILE);
        CompactRecorder::new()
            .record(model.into_record(), path.clone())
            .map_err(|e| {
                ClassifyError::Artifact(format!("cannot save checkpoint '{}': {e}", path.display()))
            })
    }
}
