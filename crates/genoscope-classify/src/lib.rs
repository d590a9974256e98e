#![forbid(unsafe_code)]
//! Genoscope classification pipeline.
//!
//! Wraps a pretrained transformer sequence classifier behind the [`Classify`]
//! seam: raw nucleotide text goes in, a disorder label and a confidence
//! percentage come out. The surrounding modules cover the k-mer encoding the
//! model was trained on, the index-to-disorder label space, artifact loading,
//! and multi-record genome file splitting.

mod artifacts;
mod classifier;
mod genome_file;
mod kmer;
mod labels;
mod model;

pub use artifacts::{ClassifierArtifacts, CONFIG_FILE, TOKENIZER_FILE, WEIGHTS_FILE};
pub use classifier::{Classification, Classify, SequenceClassifier};
pub use genome_file::split_sequences;
pub use kmer::{encode as kmer_encode, DEFAULT_K};
pub use labels::{DisorderLabels, UNKNOWN_LABEL};
pub use model::{DisorderClassifier, DisorderClassifierConfig};

pub const CRATE_NAME: &str = "genoscope-classify";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    Artifact(String),
    Reference(String),
    Tokenize(String),
    Decode(String),
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Artifact(msg)
            | Self::Reference(msg)
            | Self::Tokenize(msg)
            | Self::Decode(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ClassifyError {}
